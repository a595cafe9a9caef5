//! Cross-cutting support types

pub mod errors;
pub mod shutdown;

pub use errors::{DomainError, DomainResult};
pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
