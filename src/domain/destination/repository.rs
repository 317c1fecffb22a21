//! Destination repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Destination;
use crate::domain::DomainResult;

#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Find destination by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Destination>>;

    /// Persist a destination (seeding and tests; the catalog service owns
    /// the full CRUD surface)
    async fn insert(&self, destination: Destination) -> DomainResult<()>;
}
