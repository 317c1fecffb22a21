//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::application::{BookingService, CreateBooking};
use crate::domain::booking::{BookingFilter, BookingStatus, PaymentMethod};
use crate::domain::{ContactInfo, DomainError};
use crate::interfaces::http::auth::{require_admin, AuthContext};
use crate::interfaces::http::common::{
    domain_error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::shared::pagination::validate_pagination;
use crate::shared::retry::{retry_with_backoff, RetryConfig};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

type Reply<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn parse_status<T>(s: &str) -> Result<BookingStatus, (StatusCode, Json<ApiResponse<T>>)> {
    BookingStatus::parse(s).ok_or_else(|| {
        domain_error_response(DomainError::Validation(format!(
            "Invalid booking status: {}",
            s
        )))
    })
}

/// Listing parameters for a user's own bookings
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MyBookingsQuery {
    /// Filter by status (confirmed, cancelled, completed, no-show)
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Listing parameters for the administrative booking index
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingsQuery {
    pub status: Option<String>,
    pub destination_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid dates, guest count or payment method"),
        (status = 404, description = "Destination not found"),
        (status = 409, description = "Dates overlap an existing booking")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    ValidatedJson(body): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let payment_method = PaymentMethod::parse(&body.payment_method).ok_or_else(|| {
        domain_error_response(DomainError::Validation(
            "Payment method must be credit-card, paypal, or bank-transfer".to_string(),
        ))
    })?;

    let booking = state
        .service
        .create_booking(CreateBooking {
            user_id: actor.user_id,
            destination_id: body.destination_id,
            check_in: body.check_in_date,
            check_out: body.check_out_date,
            guest_count: body.number_of_guests,
            payment_method,
            contact: ContactInfo {
                email: body.contact_email,
                phone: body.contact_phone,
                special_requests: body.special_requests,
            },
        })
        .await
        .map_err(domain_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(booking.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/my-bookings",
    tag = "Bookings",
    params(MyBookingsQuery),
    responses(
        (status = 200, description = "The caller's bookings, newest first",
         body = ApiResponse<PaginatedResponse<BookingDto>>)
    )
)]
pub async fn my_bookings(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    Query(query): Query<MyBookingsQuery>,
) -> Reply<PaginatedResponse<BookingDto>> {
    let status = query
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;
    let (page, limit) = validate_pagination(query.page, query.limit);

    let result = state
        .service
        .list_user_bookings(actor.user_id, status, page, limit)
        .await
        .map_err(domain_error_response)?;

    let items = result.bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        result.total,
        page,
        limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/check/availability",
    tag = "Bookings",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability of the destination over the dates",
         body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Malformed date range"),
        (status = 404, description = "Destination not found")
    )
)]
pub async fn check_availability(
    State(state): State<BookingAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Reply<AvailabilityResponse> {
    // Pure read; transient storage failures are worth one or two retries
    // before giving up with a 503.
    let available = retry_with_backoff(
        RetryConfig::default(),
        || {
            state.service.check_availability(
                query.destination_id,
                query.check_in_date,
                query.check_out_date,
                query.number_of_guests,
            )
        },
        |err| err.is_transient(),
        "check_availability",
    )
    .await
    .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(AvailabilityResponse {
        available,
        check_in_date: query.check_in_date,
        check_out_date: query.check_out_date,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    Path(id): Path<Uuid>,
) -> Reply<BookingDto> {
    let booking = state
        .service
        .get_booking(id, &actor)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Booking cancelled with the refund granted",
         body = ApiResponse<CancelBookingResponse>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already left the confirmed state")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CancelBookingRequest>,
) -> Reply<CancelBookingResponse> {
    let outcome = state
        .service
        .cancel_booking(id, &actor, body.reason)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(CancelBookingResponse {
        booking: outcome.booking.into(),
        refund_amount: outcome.refund_amount,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/admin/all",
    tag = "Bookings",
    params(AdminBookingsQuery),
    responses(
        (status = 200, description = "All bookings, newest first",
         body = ApiResponse<PaginatedResponse<BookingDto>>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn admin_list_bookings(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    Query(query): Query<AdminBookingsQuery>,
) -> Reply<PaginatedResponse<BookingDto>> {
    require_admin(&actor)?;

    let status = query
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;
    let (page, limit) = validate_pagination(query.page, query.limit);

    let result = state
        .service
        .list_all_bookings(
            BookingFilter {
                status,
                destination_id: query.destination_id,
            },
            page,
            limit,
        )
        .await
        .map_err(domain_error_response)?;

    let items = result.bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        result.total,
        page,
        limit,
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/admin/{id}/status",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking is not in the confirmed state")
    )
)]
pub async fn admin_update_status(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateBookingStatusRequest>,
) -> Reply<BookingDto> {
    require_admin(&actor)?;
    let new_status = parse_status(&body.status)?;

    let booking = state
        .service
        .update_booking_status(id, new_status)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/admin/stats",
    tag = "Bookings",
    responses(
        (status = 200, description = "Aggregate booking figures",
         body = ApiResponse<BookingStatisticsDto>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn admin_statistics(
    State(state): State<BookingAppState>,
    AuthContext(actor): AuthContext,
) -> Reply<BookingStatisticsDto> {
    require_admin(&actor)?;

    let stats = state
        .service
        .booking_statistics()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(stats.into())))
}
