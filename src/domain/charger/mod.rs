//! Charger aggregate

pub mod model;
pub mod repository;

pub use model::Charger;
pub use repository::ChargerRepository;
