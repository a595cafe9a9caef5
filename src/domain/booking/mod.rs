//! Booking aggregate
//!
//! Booking records, their status, and the ledger interface.

pub mod ledger;
pub mod model;

pub use ledger::BookingLedger;
pub use model::{BookingRecord, BookingStatus};
