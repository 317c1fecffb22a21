//! Booking DTOs
//!
//! Wire format follows the public API contract: camelCase field names with
//! `checkInDate` / `checkOutDate` / `numberOfGuests` naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::booking::{Booking, BookingStatistics};

/// Request to create a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Destination to book
    pub destination_id: Uuid,
    /// Check-in date (ISO 8601); must lie in the future
    pub check_in_date: DateTime<Utc>,
    /// Check-out date (ISO 8601); exclusive, the checkout day is free
    pub check_out_date: DateTime<Utc>,
    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
    pub number_of_guests: i32,
    /// One of: credit-card, paypal, bank-transfer
    pub payment_method: String,
    #[validate(length(max = 500, message = "cannot exceed 500 characters"))]
    pub special_requests: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// Request to cancel a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    #[validate(length(max = 200, message = "cannot exceed 200 characters"))]
    pub reason: Option<String>,
}

/// Administrative status update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    /// One of: confirmed, cancelled, completed, no-show
    pub status: String,
}

/// Availability query parameters
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub destination_id: Uuid,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    /// When given, answers the capacity-aware question instead of the
    /// exclusive-calendar one
    pub number_of_guests: Option<i32>,
}

/// Availability answer
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    /// Human-facing reference, e.g. `TRV-4F9A01BC`
    pub booking_reference: String,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub number_of_guests: i32,
    /// Cents
    pub price_per_night: i64,
    pub total_nights: i64,
    /// Cents
    pub total_amount: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            booking_reference: b.reference(),
            id: b.id,
            user_id: b.user_id,
            destination_id: b.destination_id,
            check_in_date: b.period.check_in(),
            check_out_date: b.period.check_out(),
            number_of_guests: b.guest_count,
            price_per_night: b.price_per_night,
            total_nights: b.total_nights,
            total_amount: b.total_amount,
            payment_method: b.payment_method.as_str().to_string(),
            payment_status: b.payment_status.as_str().to_string(),
            status: b.status.as_str().to_string(),
            special_requests: b.contact.special_requests,
            contact_email: b.contact.email,
            contact_phone: b.contact.phone,
            cancelled_at: b.cancelled_at,
            cancellation_reason: b.cancellation_reason,
            refund_amount: b.refund_amount,
            refunded_at: b.refunded_at,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Response from cancelling a booking
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingResponse {
    pub booking: BookingDto,
    /// Refund granted by the cancellation policy, cents
    pub refund_amount: i64,
}

/// Aggregate booking figures (administrative)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatisticsDto {
    pub total: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
    pub no_show: u64,
    /// Cents, over non-cancelled bookings
    pub total_revenue: i64,
}

impl From<BookingStatistics> for BookingStatisticsDto {
    fn from(s: BookingStatistics) -> Self {
        Self {
            total: s.total,
            confirmed: s.confirmed,
            cancelled: s.cancelled,
            completed: s.completed,
            no_show: s.no_show,
            total_revenue: s.total_revenue,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
