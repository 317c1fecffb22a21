//! Booking lifecycle service
//!
//! Orchestrates create / cancel / status updates over the repositories,
//! prices stays, applies the refund policy and emits notification events.
//!
//! The availability check and the insert are separate storage operations, so
//! creation takes a per-destination lock across the pair: two concurrent
//! requests for overlapping dates on the same destination resolve to exactly
//! one confirmed booking and one conflict.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use metrics::counter;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::booking::{pricing, refund};
use crate::domain::{
    Booking, BookingFilter, BookingPage, BookingStatistics, BookingStatus, CancellationRecord,
    ContactInfo, Destination, DomainError, DomainResult, PaymentMethod, RepositoryProvider,
    StayPeriod, MAX_GUESTS, MIN_GUESTS,
};
use crate::notifications::{
    BookingCancelledEvent, BookingConfirmedEvent, Event, SharedEventBus,
};

use super::availability::AvailabilityChecker;

/// Role of the acting user, as asserted by the upstream auth gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// The authenticated principal performing an operation
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input for creating a booking
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guest_count: i32,
    pub payment_method: PaymentMethod,
    pub contact: ContactInfo,
}

/// Result of a cancellation: the updated booking plus the refund granted
#[derive(Debug, Clone)]
pub struct CancellationOutcome {
    pub booking: Booking,
    /// Cents; zero when the cancellation fell in the no-refund tier
    pub refund_amount: i64,
}

/// Per-destination creation locks.
///
/// Held across availability-check + insert so the read-then-write pair is
/// atomic with respect to other creates for the same destination.
struct DestinationLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl DestinationLocks {
    fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, destination_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(destination_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Service for booking lifecycle operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    availability: AvailabilityChecker,
    event_bus: SharedEventBus,
    creation_locks: DestinationLocks,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self {
            availability: AvailabilityChecker::new(repos.clone()),
            repos,
            event_bus,
            creation_locks: DestinationLocks::new(),
        }
    }

    /// Create a confirmed booking for a destination over a stay period.
    ///
    /// Validates the request, snapshots the destination's current price,
    /// rejects overlapping dates with a conflict, persists and emits a
    /// `booking_confirmed` event.
    pub async fn create_booking(&self, request: CreateBooking) -> DomainResult<Booking> {
        let period = StayPeriod::new(request.check_in, request.check_out)?;
        if !period.starts_after(Utc::now()) {
            return Err(DomainError::Validation(
                "Check-in date must be in the future".to_string(),
            ));
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&request.guest_count) {
            return Err(DomainError::Validation(format!(
                "Number of guests must be between {} and {}",
                MIN_GUESTS, MAX_GUESTS
            )));
        }

        let destination = self.destination(request.destination_id).await?;

        // Serialize check-and-insert per destination: without this, two
        // concurrent requests could both pass the availability check and
        // both persist.
        let lock = self.creation_locks.lock_for(destination.id);
        let _guard = lock.lock().await;

        if self
            .availability
            .has_conflict(destination.id, &period)
            .await?
        {
            return Err(DomainError::Conflict(
                "Destination is not available for the selected dates".to_string(),
            ));
        }

        let quote = pricing::price(&period, destination.price_per_night, request.guest_count);
        let booking = Booking::new(
            request.user_id,
            destination.id,
            period,
            request.guest_count,
            destination.price_per_night,
            quote,
            request.payment_method,
            request.contact,
        );
        self.repos.bookings().insert(booking.clone()).await?;
        drop(_guard);

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            destination_id = %booking.destination_id,
            total_amount = booking.total_amount,
            "Booking created"
        );
        counter!("bookings_created_total").increment(1);

        self.event_bus
            .publish(Event::BookingConfirmed(BookingConfirmedEvent {
                booking_id: booking.id,
                reference: booking.reference(),
                user_id: booking.user_id,
                destination_id: booking.destination_id,
                check_in: booking.period.check_in(),
                check_out: booking.period.check_out(),
                total_amount: booking.total_amount,
                timestamp: Utc::now(),
            }));

        Ok(booking)
    }

    /// Cancel a booking on behalf of its owner (or an administrator) and
    /// grant the tiered refund.
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        actor: &Actor,
        reason: Option<String>,
    ) -> DomainResult<CancellationOutcome> {
        let booking = self.booking(booking_id).await?;

        if !booking.is_owned_by(actor.user_id) && !actor.is_admin() {
            return Err(DomainError::Forbidden(
                "Access denied: booking belongs to another user".to_string(),
            ));
        }

        Self::ensure_cancellable(&booking)?;

        let now = Utc::now();
        let days_until_check_in = booking.period.days_until_check_in(now);
        let refund_amount = refund::refund_amount(booking.total_amount, days_until_check_in);

        // Conditional on the stored status still being `confirmed`; a
        // concurrent cancel that won the race leaves nothing to apply here.
        let applied = self
            .repos
            .bookings()
            .apply_cancellation(
                booking_id,
                CancellationRecord {
                    cancelled_at: now,
                    reason,
                    refund_amount,
                },
            )
            .await?;
        if !applied {
            return Err(DomainError::Conflict(
                "Booking is already cancelled".to_string(),
            ));
        }

        let booking = self.booking(booking_id).await?;

        info!(
            booking_id = %booking.id,
            user_id = %actor.user_id,
            refund_amount,
            days_until_check_in,
            "Booking cancelled"
        );
        counter!("bookings_cancelled_total").increment(1);
        self.publish_cancelled(&booking, refund_amount);

        Ok(CancellationOutcome {
            booking,
            refund_amount,
        })
    }

    /// Administrative status update. Only `confirmed` bookings can move, and
    /// only to a terminal status; moving to `cancelled` runs the full
    /// cancellation bookkeeping so the refund invariant holds on this path
    /// too.
    pub async fn update_booking_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> DomainResult<Booking> {
        let booking = self.booking(booking_id).await?;

        if !booking.status.can_transition_to(new_status) {
            return Err(DomainError::Conflict(format!(
                "Cannot change booking status from {} to {}",
                booking.status, new_status
            )));
        }

        let changed = match new_status {
            BookingStatus::Cancelled => {
                let now = Utc::now();
                let refund_amount = refund::refund_amount(
                    booking.total_amount,
                    booking.period.days_until_check_in(now),
                );
                let applied = self
                    .repos
                    .bookings()
                    .apply_cancellation(
                        booking_id,
                        CancellationRecord {
                            cancelled_at: now,
                            reason: Some("cancelled by administrator".to_string()),
                            refund_amount,
                        },
                    )
                    .await?;
                if applied {
                    counter!("bookings_cancelled_total").increment(1);
                }
                applied
            }
            _ => {
                self.repos
                    .bookings()
                    .transition_status(booking_id, BookingStatus::Confirmed, new_status)
                    .await?
            }
        };
        if !changed {
            return Err(DomainError::Conflict(format!(
                "Booking is no longer {}",
                BookingStatus::Confirmed
            )));
        }

        let booking = self.booking(booking_id).await?;
        info!(booking_id = %booking.id, status = %booking.status, "Booking status updated");

        if booking.status == BookingStatus::Cancelled {
            self.publish_cancelled(&booking, booking.refund_amount.unwrap_or(0));
        }

        Ok(booking)
    }

    /// Whether the destination can take a stay over the given dates.
    ///
    /// Without a guest count this is the strict calendar test (no overlap at
    /// all). With one, the capacity-aware variant applies: overlapping
    /// parties share the destination up to its declared capacity.
    pub async fn check_availability(
        &self,
        destination_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        guest_count: Option<i32>,
    ) -> DomainResult<bool> {
        let period = StayPeriod::new(check_in, check_out)?;
        match guest_count {
            None => self.availability.is_available(destination_id, &period).await,
            Some(guests) => {
                if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
                    return Err(DomainError::Validation(format!(
                        "Number of guests must be between {} and {}",
                        MIN_GUESTS, MAX_GUESTS
                    )));
                }
                let destination = self.destination(destination_id).await?;
                self.availability
                    .fits_capacity(&destination, &period, guests)
                    .await
            }
        }
    }

    /// Fetch one booking, visible to its owner and to administrators.
    pub async fn get_booking(&self, booking_id: Uuid, actor: &Actor) -> DomainResult<Booking> {
        let booking = self.booking(booking_id).await?;
        if !booking.is_owned_by(actor.user_id) && !actor.is_admin() {
            return Err(DomainError::Forbidden(
                "Access denied: booking belongs to another user".to_string(),
            ));
        }
        Ok(booking)
    }

    /// A user's own bookings, newest first.
    pub async fn list_user_bookings(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        self.repos
            .bookings()
            .find_by_user(user_id, status, page, limit)
            .await
    }

    /// All bookings (administrative listing).
    pub async fn list_all_bookings(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        self.repos.bookings().find_all(filter, page, limit).await
    }

    /// Aggregate counts and revenue (administrative).
    pub async fn booking_statistics(&self) -> DomainResult<BookingStatistics> {
        self.repos.bookings().statistics().await
    }

    // ── Internals ──────────────────────────────────────────────

    fn ensure_cancellable(booking: &Booking) -> DomainResult<()> {
        match booking.status {
            BookingStatus::Confirmed => Ok(()),
            BookingStatus::Cancelled => Err(DomainError::Conflict(
                "Booking is already cancelled".to_string(),
            )),
            BookingStatus::Completed => Err(DomainError::Conflict(
                "Cannot cancel completed booking".to_string(),
            )),
            BookingStatus::NoShow => Err(DomainError::Conflict(
                "Cannot cancel no-show booking".to_string(),
            )),
        }
    }

    async fn destination(&self, destination_id: Uuid) -> DomainResult<Destination> {
        self.repos
            .destinations()
            .find_by_id(destination_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Destination", "id", destination_id.to_string())
            })
    }

    async fn booking(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id.to_string()))
    }

    fn publish_cancelled(&self, booking: &Booking, refund_amount: i64) {
        if booking.cancelled_at.is_none() {
            // Should not happen; the repositories stamp cancelled_at together
            warn!(booking_id = %booking.id, "Cancelled booking without cancelled_at");
        }
        self.event_bus
            .publish(Event::BookingCancelled(BookingCancelledEvent {
                booking_id: booking.id,
                reference: booking.reference(),
                user_id: booking.user_id,
                destination_id: booking.destination_id,
                refund_amount,
                reason: booking.cancellation_reason.clone(),
                timestamp: Utc::now(),
            }));
    }
}

// ── Tests ──────────────────────────────────────────────────────
