//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

/// Fields written when a booking is cancelled. Applied atomically together
/// with the `confirmed → cancelled` transition.
#[derive(Debug, Clone)]
pub struct CancellationRecord {
    pub cancelled_at: DateTime<Utc>,
    pub reason: Option<String>,
    /// Refund due in cents; zero means no refund and leaves the payment
    /// status untouched.
    pub refund_amount: i64,
}

/// Filters for booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub destination_id: Option<Uuid>,
}

/// One page of bookings plus the unpaginated total
#[derive(Debug, Clone)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total: u64,
}

/// Aggregate figures over all bookings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingStatistics {
    pub total: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
    pub no_show: u64,
    /// Sum of `total_amount` over non-cancelled bookings, cents
    pub total_revenue: i64,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking
    async fn insert(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// All bookings holding dates on a destination's calendar
    /// (status confirmed or completed)
    async fn find_active_by_destination(&self, destination_id: Uuid)
        -> DomainResult<Vec<Booking>>;

    /// Apply a cancellation if and only if the booking is still `confirmed`.
    ///
    /// Returns `false` when the booking was already in a terminal status;
    /// the caller turns that into a conflict. A positive refund also flips
    /// the payment status to `refunded` and stamps `refunded_at`.
    async fn apply_cancellation(
        &self,
        id: Uuid,
        record: CancellationRecord,
    ) -> DomainResult<bool>;

    /// Move a booking from `expected` to `next` if it is still in `expected`.
    /// Returns `false` when the stored status no longer matches.
    async fn transition_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<bool>;

    /// A user's bookings, newest first
    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage>;

    /// All bookings, newest first (administrative listing)
    async fn find_all(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage>;

    /// Aggregate booking counts and revenue (administrative)
    async fn statistics(&self) -> DomainResult<BookingStatistics>;
}
