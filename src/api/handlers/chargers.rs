//! Charger booking and payment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use super::{error_response, AppState};
use crate::api::dto::{
    ApiResponse, BookingRequest, ChargerDetailDto, ChargerDto, PaymentDetailDto, PaymentRequest,
    StatusResponse, UserBookingDetailDto, UserSummaryDto,
};
use crate::application::CardDetails;
use crate::auth::AuthenticatedUser;
use crate::domain::DomainError;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// Charger detail with its occupied schedule
#[utoipa::path(
    get,
    path = "/api/v1/chargers/{id}",
    tag = "Chargers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Charger ID")),
    responses(
        (status = 200, description = "Charger detail", body = ApiResponse<ChargerDetailDto>),
        (status = 404, description = "Charger not found")
    )
)]
pub async fn get_charger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChargerDetailDto>>, HandlerError> {
    let (charger, occupied) = state
        .bookings
        .charger_detail(&id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(ChargerDetailDto {
        charger: ChargerDto::from(charger),
        unavailable_times: occupied,
    })))
}

/// Reserve a time slot on a charger
///
/// Creates an unpaid booking record for the caller. The slot becomes
/// occupied for other users only once it is paid.
#[utoipa::path(
    post,
    path = "/api/v1/chargers/{id}/booking",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Charger ID")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Charger booked", body = StatusResponse<UserBookingDetailDto>),
        (status = 400, description = "Invalid or unavailable time range"),
        (status = 403, description = "Providers cannot book chargers"),
        (status = 404, description = "Charger not found")
    )
)]
pub async fn book_charger(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(principal): Extension<AuthenticatedUser>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<StatusResponse<UserBookingDetailDto>>, HandlerError> {
    if principal.is_provider() {
        return Err(error_response(DomainError::Forbidden(
            "Providers cannot book chargers".to_string(),
        )));
    }

    state
        .bookings
        .reserve(&principal.user_id, &id, request.range())
        .await
        .map_err(error_response)?;

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

    Ok(Json(StatusResponse::success(
        "The charger is booked successfully",
        UserBookingDetailDto::new(user, records),
    )))
}

/// Pay for a reserved time slot
///
/// Charges the card through the payment provider, then atomically flips
/// the booking to paid, occupies the slot and creates the receipt.
#[utoipa::path(
    post,
    path = "/api/v1/chargers/{id}/payment",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Charger ID")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Booking paid", body = StatusResponse<PaymentDetailDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Charger not found"),
        (status = 500, description = "Payment or commit failure")
    )
)]
pub async fn pay_charger(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(principal): Extension<AuthenticatedUser>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<StatusResponse<PaymentDetailDto>>, HandlerError> {
    if principal.is_provider() {
        return Err(error_response(DomainError::Forbidden(
            "Providers cannot pay for bookings".to_string(),
        )));
    }
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    let card = CardDetails {
        card_number: request.card_number.clone(),
        cvc: request.cvc.clone(),
        exp_month: request.exp_month,
        exp_year: request.exp_year,
    };

    let payment = state
        .payments
        .pay(
            &principal.user_id,
            &id,
            request.range(),
            &card,
            &request.currency,
        )
        .await
        .map_err(error_response)?;

    // populate the receipt with user and charger summaries
    let (charger, _) = state
        .bookings
        .charger_detail(&id)
        .await
        .map_err(error_response)?;
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

    let detail = PaymentDetailDto {
        id: payment.id,
        user: UserSummaryDto {
            id: user.id,
            username: user.username,
            email: user.email,
            booking_hours: records.into_iter().map(|(r, _)| r.into()).collect(),
        },
        charger: ChargerDto::from(charger),
        start_time: payment.range.start,
        end_time: payment.range.end,
        total_booking_hours: payment.total_booking_hours,
        total_price: payment.total_price,
        created_at: payment.created_at,
    };

    Ok(Json(StatusResponse::success(
        "The charger booking has been paid successfully",
        detail,
    )))
}
