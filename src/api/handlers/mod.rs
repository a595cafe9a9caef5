//! API Handlers

pub mod chargers;
pub mod health;
pub mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::application::{BookingService, PaymentService};
use crate::domain::DomainError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
}

/// Map a domain error to the response-contract status code.
///
/// Post-validation failures (pricing, gateway, commit) are deliberately
/// collapsed into a generic 500; the contract does not distinguish a
/// declined card from an internal error.
pub(crate) fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match &e {
        DomainError::InvalidInterval(_) | DomainError::Unavailable => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, e.to_string()),
        DomainError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, e.to_string()),
        DomainError::PriceUnavailable(_)
        | DomainError::PaymentDeclined(_)
        | DomainError::Gateway(_)
        | DomainError::CommitFailed(_)
        | DomainError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "The order was not successful".to_string(),
        ),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let (status, _) = error_response(DomainError::Unavailable);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = error_response(DomainError::InvalidInterval("inverted".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_uses_contract_message() {
        let (_, body) = error_response(DomainError::Unavailable);
        assert_eq!(
            body.0.error.as_deref(),
            Some("Your booking time is unavailable")
        );
    }

    #[test]
    fn payment_failures_collapse_to_generic_500() {
        for e in [
            DomainError::PriceUnavailable("c1".into()),
            DomainError::PaymentDeclined("card".into()),
            DomainError::Gateway("io".into()),
            DomainError::CommitFailed("gone".into()),
        ] {
            let (status, body) = error_response(e);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.0.error.as_deref(), Some("The order was not successful"));
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, _) = error_response(DomainError::NotFound {
            entity: "Charger",
            field: "id",
            value: "x".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
