//! # Charger Booking Service
//!
//! Booking and payment backend for a marketplace of EV chargers.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the availability rule and repository traits
//! - **application**: Booking and payment services, the payment gateway port
//! - **infrastructure**: SeaORM persistence and the Stripe gateway
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication middleware
//! - **support**: Errors and graceful shutdown

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use api::create_api_router;
