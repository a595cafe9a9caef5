//! Business logic and use cases

pub mod ports;
pub mod services;

pub use ports::{CardDetails, ChargeError, ChargeReceipt, PaymentGateway};
pub use services::{BookingService, PaymentService};
