use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Your booking time is unavailable")]
    Unavailable,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cannot calculate the booking amount for charger {0}")]
    PriceUnavailable(String),

    #[error("The card was declined: {0}")]
    PaymentDeclined(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// Required by the SeaORM transaction closure, which propagates database
// failures through the caller's error type.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
