//! Endpoints returning the caller's own bookings and payments

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::{error_response, AppState};
use crate::api::dto::{ApiResponse, PaymentDto, UserBookingDetailDto};
use crate::auth::AuthenticatedUser;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// The caller's bookings, ascending by start time
#[utoipa::path(
    get,
    path = "/api/v1/users/me/bookings",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking list", body = ApiResponse<UserBookingDetailDto>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserBookingDetailDto>>, HandlerError> {
    let user = state
        .bookings
        .user_detail(&principal.user_id)
        .await
        .map_err(error_response)?;
    let records = state
        .bookings
        .bookings_with_chargers(&principal.user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserBookingDetailDto::new(
        user, records,
    ))))
}

/// The caller's payment receipts, ascending by start time
#[utoipa::path(
    get,
    path = "/api/v1/users/me/payments",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment list", body = ApiResponse<Vec<PaymentDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn my_payments(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<PaymentDto>>>, HandlerError> {
    let payments = state
        .payments
        .payment_history(&principal.user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        payments.into_iter().map(PaymentDto::from).collect(),
    )))
}
