//! Charger repository interface

use async_trait::async_trait;

use super::model::Charger;
use crate::support::errors::DomainResult;

#[async_trait]
pub trait ChargerRepository: Send + Sync {
    /// Save a new charger
    async fn save(&self, charger: Charger) -> DomainResult<()>;

    /// Find charger by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Charger>>;
}
