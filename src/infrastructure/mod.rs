//! External concerns: persistence and the payment provider

pub mod database;
pub mod stripe;

pub use database::repositories::{
    SeaOrmBookingLedger, SeaOrmChargerRepository, SeaOrmUserRepository,
};
pub use database::{init_database, DatabaseConfig};
pub use stripe::StripeGateway;
