//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{chargers, health, users, AppState};
use crate::application::{BookingService, PaymentService};
use crate::auth::{auth_middleware, AuthState, JwtConfig};
use crate::domain::availability::TimeRange;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Chargers
        chargers::get_charger,
        chargers::book_charger,
        chargers::pay_charger,
        // Users
        users::my_bookings,
        users::my_payments,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            TimeRange,
            health::HealthResponse,
            // Chargers
            ChargerDto,
            ChargerDetailDto,
            // Bookings
            BookingRequest,
            BookingHourDto,
            BookingSlotDto,
            UserBookingDetailDto,
            // Payments
            PaymentRequest,
            PaymentDto,
            PaymentDetailDto,
            UserSummaryDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check for uptime and readiness monitoring."),
        (name = "Chargers", description = "Charger details including the occupied schedule. A time slot shows up in `unavailableTimes` only once its booking has been paid."),
        (name = "Bookings", description = "Reserve a time slot on a charger. Reservations are created unpaid and do not block the slot for other users until payment completes."),
        (name = "Payments", description = "Pay for a reserved slot. The card is charged first, then the booking is flipped to `paid` and the slot becomes occupied in a single transaction."),
        (name = "Users", description = "The authenticated user's own bookings and payment receipts, ordered ascending by start time."),
    ),
    info(
        title = "Charger Booking API",
        version = "1.0.0",
        description = "REST API for booking and paying for EV charging slots.

## Authentication

All endpoints except `/health` require a JWT Bearer token issued by the
account service, passed in the `Authorization: Bearer <token>` header.
Providers can own chargers but cannot book or pay for them.

## Booking flow

1. `POST /api/v1/chargers/{id}/booking` reserves a slot (status `unpaid`)
2. `POST /api/v1/chargers/{id}/payment` charges the card and flips the
   booking to `paid`, occupying the slot for everyone else

## Response format

Read endpoints use the standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

Booking and payment return:
```json
{\"status\": \"Success\", \"message\": \"...\", \"detail\": {...}}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    bookings: Arc<BookingService>,
    payments: Arc<PaymentService>,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    let app_state = AppState { bookings, payments };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Charger routes (protected)
    let charger_routes = Router::new()
        .route("/{id}", get(chargers::get_charger))
        .route("/{id}/booking", post(chargers::book_charger))
        .route("/{id}/payment", post(chargers::pay_charger))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    // User routes (protected)
    let user_routes = Router::new()
        .route("/me/bookings", get(users::my_bookings))
        .route("/me/payments", get(users::my_payments))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(app_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Chargers
        .nest("/api/v1/chargers", charger_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
