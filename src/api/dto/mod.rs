//! API DTOs

pub mod booking;
pub mod common;

pub use booking::*;
pub use common::{ApiResponse, StatusResponse};
