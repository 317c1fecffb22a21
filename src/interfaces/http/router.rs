//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::BookingService;

use super::common::{ApiResponse, PaginatedResponse, PaginationParams};
use super::modules::bookings::{self, BookingAppState};
use super::modules::health::{self, HealthState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::my_bookings,
        bookings::handlers::check_availability,
        bookings::handlers::get_booking,
        bookings::handlers::cancel_booking,
        // Administration
        bookings::handlers::admin_list_bookings,
        bookings::handlers::admin_update_status,
        bookings::handlers::admin_statistics,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<bookings::BookingDto>,
            PaginationParams,
            // Bookings
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            bookings::CancelBookingRequest,
            bookings::CancelBookingResponse,
            bookings::UpdateBookingStatusRequest,
            bookings::AvailabilityResponse,
            bookings::BookingStatisticsDto,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Bookings", description = "Booking lifecycle: create, cancel, availability, administrative status updates"),
    ),
    info(
        title = "Tripvar Booking API",
        version = "1.0.0",
        description = "REST API for the travel booking reservation engine",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<BookingService>,
    db: DatabaseConnection,
    prometheus: PrometheusHandle,
) -> Router {
    let booking_state = BookingAppState { service };
    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    // Identity arrives via gateway headers; handlers extract it with
    // `AuthContext`, so no auth middleware runs here.
    let booking_routes = Router::new()
        .route("/", post(bookings::handlers::create_booking))
        .route("/my-bookings", get(bookings::handlers::my_bookings))
        .route(
            "/check/availability",
            get(bookings::handlers::check_availability),
        )
        .route("/admin/all", get(bookings::handlers::admin_list_bookings))
        .route("/admin/stats", get(bookings::handlers::admin_statistics))
        .route(
            "/admin/{id}/status",
            put(bookings::handlers::admin_update_status),
        )
        .route("/{id}", get(bookings::handlers::get_booking))
        .route("/{id}/cancel", put(bookings::handlers::cancel_booking))
        .with_state(booking_state);

    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1/bookings", booking_routes)
        .merge(health_routes)
        .route(
            "/metrics",
            get(move || {
                let handle = prometheus.clone();
                async move { handle.render() }
            }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
