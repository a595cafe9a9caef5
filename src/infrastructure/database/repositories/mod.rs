//! Database repository implementations

pub mod booking_ledger;
pub mod charger_repository;
pub mod user_repository;

pub use booking_ledger::SeaOrmBookingLedger;
pub use charger_repository::SeaOrmChargerRepository;
pub use user_repository::SeaOrmUserRepository;
