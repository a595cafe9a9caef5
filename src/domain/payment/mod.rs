//! Payment aggregate

pub mod model;

pub use model::Payment;
