//! Core business entities, rules and repository traits

pub mod availability;
pub mod booking;
pub mod charger;
pub mod payment;
pub mod user;

// Re-export commonly used types
pub use availability::{
    booking_hours, is_available, is_available_strict, validate_interval, OverlapRule, TimeRange,
};
pub use booking::{BookingLedger, BookingRecord, BookingStatus};
pub use charger::{Charger, ChargerRepository};
pub use payment::Payment;
pub use user::{User, UserRepository, UserRole};

// Re-export error types from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
