//! Application services

mod booking;
mod payment;

pub use booking::BookingService;
pub use payment::PaymentService;

// ── Test fakes shared by the service tests ─────────────────────
