//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::{
    Booking, BookingFilter, BookingPage, BookingRepository, BookingStatistics, BookingStatus,
    CancellationRecord, ContactInfo, PaymentMethod, PaymentStatus, StayPeriod,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let period = StayPeriod::new(m.check_in, m.check_out)?;
    let status = BookingStatus::parse(&m.status)
        .ok_or_else(|| DomainError::Infra(format!("Stored booking status invalid: {}", m.status)))?;
    let payment_method = PaymentMethod::parse(&m.payment_method).ok_or_else(|| {
        DomainError::Infra(format!(
            "Stored payment method invalid: {}",
            m.payment_method
        ))
    })?;
    let payment_status = PaymentStatus::parse(&m.payment_status).ok_or_else(|| {
        DomainError::Infra(format!(
            "Stored payment status invalid: {}",
            m.payment_status
        ))
    })?;

    Ok(Booking {
        id: m.id,
        user_id: m.user_id,
        destination_id: m.destination_id,
        period,
        guest_count: m.guest_count,
        price_per_night: m.price_per_night,
        total_nights: m.total_nights,
        total_amount: m.total_amount,
        payment_method,
        payment_status,
        status,
        contact: ContactInfo {
            email: m.contact_email,
            phone: m.contact_phone,
            special_requests: m.special_requests,
        },
        cancelled_at: m.cancelled_at,
        cancellation_reason: m.cancellation_reason,
        refund_amount: m.refund_amount,
        refunded_at: m.refunded_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        user_id: Set(b.user_id),
        destination_id: Set(b.destination_id),
        check_in: Set(b.period.check_in()),
        check_out: Set(b.period.check_out()),
        guest_count: Set(b.guest_count),
        price_per_night: Set(b.price_per_night),
        total_nights: Set(b.total_nights),
        total_amount: Set(b.total_amount),
        payment_method: Set(b.payment_method.as_str().to_string()),
        payment_status: Set(b.payment_status.as_str().to_string()),
        status: Set(b.status.as_str().to_string()),
        special_requests: Set(b.contact.special_requests),
        contact_email: Set(b.contact.email),
        contact_phone: Set(b.contact.phone),
        cancelled_at: Set(b.cancelled_at),
        cancellation_reason: Set(b.cancellation_reason),
        refund_amount: Set(b.refund_amount),
        refunded_at: Set(b.refunded_at),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(format!("Database error: {}", e))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, b: Booking) -> DomainResult<()> {
        debug!(booking_id = %b.id, "Inserting booking");
        domain_to_active(b).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_active_by_destination(
        &self,
        destination_id: Uuid,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::DestinationId.eq(destination_id))
            .filter(booking::Column::Status.is_in([
                BookingStatus::Confirmed.as_str(),
                BookingStatus::Completed.as_str(),
            ]))
            .order_by_asc(booking::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn apply_cancellation(
        &self,
        id: Uuid,
        record: CancellationRecord,
    ) -> DomainResult<bool> {
        debug!(booking_id = %id, refund = record.refund_amount, "Applying cancellation");

        let mut update = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Cancelled.as_str()),
            )
            .col_expr(
                booking::Column::CancelledAt,
                Expr::value(Some(record.cancelled_at)),
            )
            .col_expr(
                booking::Column::CancellationReason,
                Expr::value(record.reason),
            )
            .col_expr(
                booking::Column::RefundAmount,
                Expr::value(Some(record.refund_amount)),
            )
            .col_expr(
                booking::Column::UpdatedAt,
                Expr::value(record.cancelled_at),
            );

        if record.refund_amount > 0 {
            update = update
                .col_expr(
                    booking::Column::PaymentStatus,
                    Expr::value(PaymentStatus::Refunded.as_str()),
                )
                .col_expr(
                    booking::Column::RefundedAt,
                    Expr::value(Some(record.cancelled_at)),
                );
        }

        // The status filter makes the transition conditional: a booking that
        // already left `confirmed` matches zero rows.
        let result = update
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(BookingStatus::Confirmed.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<bool> {
        debug!(booking_id = %id, from = %expected, to = %next, "Transitioning booking status");

        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(next.as_str()))
            .col_expr(booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        let mut query = booking::Entity::find().filter(booking::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(booking::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok(BookingPage {
            bookings: models
                .into_iter()
                .map(model_to_domain)
                .collect::<DomainResult<_>>()?,
            total,
        })
    }

    async fn find_all(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<BookingPage> {
        let mut query = booking::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }
        if let Some(destination_id) = filter.destination_id {
            query = query.filter(booking::Column::DestinationId.eq(destination_id));
        }

        let paginator = query
            .order_by_desc(booking::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok(BookingPage {
            bookings: models
                .into_iter()
                .map(model_to_domain)
                .collect::<DomainResult<_>>()?,
            total,
        })
    }

    async fn statistics(&self) -> DomainResult<BookingStatistics> {
        let count_for = |status: BookingStatus| {
            booking::Entity::find()
                .filter(booking::Column::Status.eq(status.as_str()))
                .count(&self.db)
        };

        let confirmed = count_for(BookingStatus::Confirmed).await.map_err(db_err)?;
        let cancelled = count_for(BookingStatus::Cancelled).await.map_err(db_err)?;
        let completed = count_for(BookingStatus::Completed).await.map_err(db_err)?;
        let no_show = count_for(BookingStatus::NoShow).await.map_err(db_err)?;

        let amounts: Vec<i64> = booking::Entity::find()
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .select_only()
            .column(booking::Column::TotalAmount)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(BookingStatistics {
            total: confirmed + cancelled + completed + no_show,
            confirmed,
            cancelled,
            completed,
            no_show,
            total_revenue: amounts.into_iter().sum(),
        })
    }
}
