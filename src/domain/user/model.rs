//! User domain entity
//!
//! Account management (registration, profile updates, password handling)
//! lives in the account directory service; this service only needs the
//! identity and role of the authenticated principal.

use chrono::{DateTime, Utc};

/// Principal role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// End user who books and pays for chargers
    User,
    /// Charger owner; may not book their own or others' chargers
    Provider,
    /// Back-office administrator
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Provider => "provider",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "provider" => Self::Provider,
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account view
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            role,
            created_at: Utc::now(),
        }
    }

    pub fn can_book(&self) -> bool {
        !matches!(self.role, UserRole::Provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [UserRole::User, UserRole::Provider, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_user() {
        assert_eq!(UserRole::from_str("superuser"), UserRole::User);
    }

    #[test]
    fn providers_cannot_book() {
        assert!(!User::new("acme", "acme@example.com", UserRole::Provider).can_book());
        assert!(User::new("alice", "alice@example.com", UserRole::User).can_book());
    }
}
