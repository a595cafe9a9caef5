//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::support::errors::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user
    async fn save(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
}
