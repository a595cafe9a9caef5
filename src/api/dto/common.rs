//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper.
///
/// On success: `{"success": true, "data": {...}}`,
/// on error: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Envelope used by the booking and payment endpoints:
/// `{"status": "Success", "message": ..., "detail": {...}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse<T> {
    pub status: String,
    pub message: String,
    pub detail: T,
}

impl<T> StatusResponse<T> {
    pub fn success(message: impl Into<String>, detail: T) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
            detail,
        }
    }
}
