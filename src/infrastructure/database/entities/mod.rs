//! Database entities module

pub mod booking;
pub mod charger;
pub mod occupied_interval;
pub mod payment;
pub mod user;

pub use booking::Entity as Booking;
pub use charger::Entity as Charger;
pub use occupied_interval::Entity as OccupiedInterval;
pub use payment::Entity as Payment;
pub use user::Entity as User;
