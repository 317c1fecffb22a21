//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    pub destination_id: Uuid,

    /// Half-open stay range: the checkout day itself is not occupied
    pub check_in: DateTimeUtc,
    pub check_out: DateTimeUtc,

    pub guest_count: i32,

    /// Price snapshot taken from the destination at creation, cents
    pub price_per_night: i64,
    pub total_nights: i64,
    pub total_amount: i64,

    /// Payment method: credit-card, paypal, bank-transfer
    pub payment_method: String,

    /// Payment status: pending, paid, failed, refunded
    pub payment_status: String,

    /// Booking status: confirmed, cancelled, completed, no-show
    pub status: String,

    #[sea_orm(nullable)]
    pub special_requests: Option<String>,

    pub contact_email: String,

    #[sea_orm(nullable)]
    pub contact_phone: Option<String>,

    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub cancellation_reason: Option<String>,

    #[sea_orm(nullable)]
    pub refund_amount: Option<i64>,

    #[sea_orm(nullable)]
    pub refunded_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::destination::Entity",
        from = "Column::DestinationId",
        to = "super::destination::Column::Id"
    )]
    Destination,
}

impl Related<super::destination::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Destination.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
