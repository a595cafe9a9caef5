//! REST API module for the charger booking service
//!
//! Provides HTTP endpoints for viewing chargers, reserving time slots
//! and paying for reservations.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::create_api_router;
