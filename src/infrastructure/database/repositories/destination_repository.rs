//! SeaORM implementation of DestinationRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;
use uuid::Uuid;

use crate::domain::destination::{Destination, DestinationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::destination;

pub struct SeaOrmDestinationRepository {
    db: DatabaseConnection,
}

impl SeaOrmDestinationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: destination::Model) -> Destination {
    Destination {
        id: m.id,
        title: m.title,
        price_per_night: m.price_per_night,
        max_guests: m.max_guests,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(format!("Database error: {}", e))
}

#[async_trait]
impl DestinationRepository for SeaOrmDestinationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Destination>> {
        let model = destination::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, d: Destination) -> DomainResult<()> {
        debug!(destination_id = %d.id, title = d.title.as_str(), "Inserting destination");

        let model = destination::ActiveModel {
            id: Set(d.id),
            title: Set(d.title),
            price_per_night: Set(d.price_per_night),
            max_guests: Set(d.max_guests),
            created_at: Set(d.created_at),
            updated_at: Set(d.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
