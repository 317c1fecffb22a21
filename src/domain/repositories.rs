//! Repository access for the domain layer

use super::booking::BookingRepository;
use super::destination::DestinationRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let destination = repos.destinations().find_by_id(id).await?;
///     let active = repos.bookings().find_active_by_destination(id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn destinations(&self) -> &dyn DestinationRepository;
}
