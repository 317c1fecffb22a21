//! In-memory repositories for development and testing

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::booking::{
    Booking, BookingFilter, BookingPage, BookingRepository, BookingStatistics, BookingStatus,
    CancellationRecord, PaymentStatus,
};
use crate::domain::destination::{Destination, DestinationRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

/// In-memory booking store
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: DashMap<Uuid, Booking>,
}

/// In-memory destination store
#[derive(Default)]
pub struct InMemoryDestinationRepository {
    destinations: DashMap<Uuid, Destination>,
}

/// All repositories backed by process-local maps. Suitable for tests and
/// local development; the SeaORM provider is the production counterpart.
#[derive(Default)]
pub struct InMemoryRepositories {
    bookings: InMemoryBookingRepository,
    destinations: InMemoryDestinationRepository,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn destinations(&self) -> &dyn DestinationRepository {
        &self.destinations
    }
}

fn page_of(mut bookings: Vec<Booking>, page: u64, limit: u64) -> BookingPage {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = bookings.len() as u64;
    let limit = limit.max(1) as usize;
    let start = (page.saturating_sub(1) as usize) * limit;
    let bookings = bookings.into_iter().skip(start).take(limit).collect();
    BookingPage { bookings, total }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::Conflict(format!(
                "Booking {} already exists",
                booking.id
            )));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_active_by_destination(
        &self,
        destination_id: Uuid,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.destination_id == destination_id && b.status.occupies_calendar())
            .map(|b| b.clone())
            .collect())
    }

    async fn apply_cancellation(
        &self,
        id: Uuid,
        record: CancellationRecord,
    ) -> DomainResult<bool> {
        // get_mut holds the map entry exclusively, so the check-and-write
        // below is atomic with respect to concurrent cancels.
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Ok(false);
        };
        if booking.status != BookingStatus::Confirmed {
            return Ok(false);
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(record.cancelled_at);
        booking.cancellation_reason = record.reason;
        booking.refund_amount = Some(record.refund_amount);
        booking.updated_at = record.cancelled_at;
        if record.refund_amount > 0 {
            booking.payment_status = PaymentStatus::Refunded;
            booking.refunded_at = Some(record.cancelled_at);
        }
        Ok(true)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<bool> {
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Ok(false);
        };
        if booking.status != expected {
            return Ok(false);
        }
        booking.status = next;
        booking.updated_at = chrono::Utc::now();
        Ok(true)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        let matching = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| status.map_or(true, |s| b.status == s))
            .map(|b| b.clone())
            .collect();
        Ok(page_of(matching, page, limit))
    }

    async fn find_all(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        let matching = self
            .bookings
            .iter()
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .filter(|b| filter.destination_id.map_or(true, |d| b.destination_id == d))
            .map(|b| b.clone())
            .collect();
        Ok(page_of(matching, page, limit))
    }

    async fn statistics(&self) -> DomainResult<BookingStatistics> {
        let mut stats = BookingStatistics::default();
        for booking in self.bookings.iter() {
            stats.total += 1;
            match booking.status {
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
                BookingStatus::Completed => stats.completed += 1,
                BookingStatus::NoShow => stats.no_show += 1,
            }
            if booking.status != BookingStatus::Cancelled {
                stats.total_revenue += booking.total_amount;
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl DestinationRepository for InMemoryDestinationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Destination>> {
        Ok(self.destinations.get(&id).map(|d| d.clone()))
    }

    async fn insert(&self, destination: Destination) -> DomainResult<()> {
        self.destinations.insert(destination.id, destination);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
