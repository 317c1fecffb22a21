//! Availability checker
//!
//! Read-then-decide queries over a destination's calendar. The checker holds
//! no locks itself; the booking lifecycle serializes check-and-insert per
//! destination when it creates bookings (see `BookingService`).

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::booking::StayPeriod;
use crate::domain::destination::Destination;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct AvailabilityChecker {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether the destination is free over the whole period: no booking
    /// with status confirmed or completed may overlap it. Back-to-back
    /// stays (one checkout equals the next check-in) do not conflict.
    pub async fn is_available(
        &self,
        destination_id: Uuid,
        period: &StayPeriod,
    ) -> DomainResult<bool> {
        if self
            .repos
            .destinations()
            .find_by_id(destination_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(
                "Destination",
                "id",
                destination_id.to_string(),
            ));
        }
        Ok(!self.has_conflict(destination_id, period).await?)
    }

    /// Overlap test against the destination's active bookings. Used directly
    /// by the create path, which has already resolved the destination.
    pub async fn has_conflict(
        &self,
        destination_id: Uuid,
        period: &StayPeriod,
    ) -> DomainResult<bool> {
        let active = self
            .repos
            .bookings()
            .find_active_by_destination(destination_id)
            .await?;
        Ok(active.iter().any(|b| b.period.overlaps(period)))
    }

    /// Capacity-aware variant: instead of exclusive occupancy, guests of
    /// overlapping bookings share the destination up to its capacity. The
    /// candidate party fits when the overlapping head-count plus the party
    /// stays within `Destination::capacity()`.
    pub async fn fits_capacity(
        &self,
        destination: &Destination,
        period: &StayPeriod,
        guest_count: i32,
    ) -> DomainResult<bool> {
        let active = self
            .repos
            .bookings()
            .find_active_by_destination(destination.id)
            .await?;
        let occupied: i32 = active
            .iter()
            .filter(|b| b.period.overlaps(period))
            .map(|b| b.guest_count)
            .sum();
        Ok(occupied + guest_count <= destination.capacity())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{pricing, Booking, ContactInfo, PaymentMethod};
    use crate::infrastructure::storage::InMemoryRepositories;
    use chrono::{TimeZone, Utc};

    fn period(from_day: u32, to_day: u32) -> StayPeriod {
        StayPeriod::new(
            Utc.with_ymd_and_hms(2030, 6, from_day, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, to_day, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    async fn seeded() -> (AvailabilityChecker, Arc<InMemoryRepositories>, Destination) {
        let repos = Arc::new(InMemoryRepositories::new());
        let destination = Destination::new("Alpine Chalet", 10_000, Some(6));
        repos
            .destinations()
            .insert(destination.clone())
            .await
            .unwrap();
        (
            AvailabilityChecker::new(repos.clone()),
            repos,
            destination,
        )
    }

    async fn book(
        repos: &InMemoryRepositories,
        destination_id: Uuid,
        p: StayPeriod,
        guests: i32,
    ) {
        let quote = pricing::price(&p, 10_000, guests);
        let booking = Booking::new(
            Uuid::new_v4(),
            destination_id,
            p,
            guests,
            10_000,
            quote,
            PaymentMethod::CreditCard,
            ContactInfo {
                email: "guest@example.com".into(),
                ..Default::default()
            },
        );
        repos.bookings().insert(booking).await.unwrap();
    }

    #[tokio::test]
    async fn empty_calendar_is_available() {
        let (checker, _repos, destination) = seeded().await;
        assert!(checker
            .is_available(destination.id, &period(10, 13))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn overlapping_booking_blocks_availability() {
        let (checker, repos, destination) = seeded().await;
        book(&repos, destination.id, period(10, 13), 2).await;

        assert!(!checker
            .is_available(destination.id, &period(12, 15))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn back_to_back_is_available() {
        let (checker, repos, destination) = seeded().await;
        book(&repos, destination.id, period(10, 13), 2).await;

        assert!(checker
            .is_available(destination.id, &period(13, 15))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn unknown_destination_is_not_found() {
        let (checker, _repos, _destination) = seeded().await;
        let result = checker.is_available(Uuid::new_v4(), &period(10, 13)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn capacity_counts_overlapping_guests() {
        let (checker, repos, destination) = seeded().await;
        book(&repos, destination.id, period(10, 13), 4).await;

        // 4 of 6 places taken over the overlap
        assert!(checker
            .fits_capacity(&destination, &period(12, 15), 2)
            .await
            .unwrap());
        assert!(!checker
            .fits_capacity(&destination, &period(12, 15), 3)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn capacity_ignores_disjoint_bookings() {
        let (checker, repos, destination) = seeded().await;
        book(&repos, destination.id, period(10, 13), 6).await;

        assert!(checker
            .fits_capacity(&destination, &period(20, 23), 6)
            .await
            .unwrap());
    }
}
