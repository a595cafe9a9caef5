//! Outbound ports consumed by application services

pub mod gateway;

pub use gateway::{CardDetails, ChargeError, ChargeReceipt, PaymentGateway};
