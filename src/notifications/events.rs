//! Notification events
//!
//! Events the booking lifecycle emits for the external notification
//! pipeline. Emission is fire-and-forget: delivery failures never surface
//! back into the booking operation that produced the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A booking was created and confirmed
    BookingConfirmed(BookingConfirmedEvent),
    /// A booking was cancelled, possibly with a refund
    BookingCancelled(BookingCancelledEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingConfirmed(_) => "booking_confirmed",
            Event::BookingCancelled(_) => "booking_cancelled",
        }
    }

    /// The booking this event concerns
    pub fn booking_id(&self) -> Uuid {
        match self {
            Event::BookingConfirmed(e) => e.booking_id,
            Event::BookingCancelled(e) => e.booking_id,
        }
    }

    /// The user to notify
    pub fn user_id(&self) -> Uuid {
        match self {
            Event::BookingConfirmed(e) => e.user_id,
            Event::BookingCancelled(e) => e.user_id,
        }
    }
}

/// Booking confirmed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub reference: String,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Booking cancelled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelledEvent {
    pub booking_id: Uuid,
    pub reference: String,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    /// Refund granted by the cancellation policy, cents; zero when the
    /// cancellation was too close to check-in
    pub refund_amount: i64,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names_match_the_wire_contract() {
        let confirmed = Event::BookingConfirmed(BookingConfirmedEvent {
            booking_id: Uuid::new_v4(),
            reference: "TRV-00000001".into(),
            user_id: Uuid::new_v4(),
            destination_id: Uuid::new_v4(),
            check_in: Utc::now(),
            check_out: Utc::now(),
            total_amount: 60_000,
            timestamp: Utc::now(),
        });
        assert_eq!(confirmed.event_type(), "booking_confirmed");

        let cancelled = Event::BookingCancelled(BookingCancelledEvent {
            booking_id: Uuid::new_v4(),
            reference: "TRV-00000002".into(),
            user_id: Uuid::new_v4(),
            destination_id: Uuid::new_v4(),
            refund_amount: 0,
            reason: None,
            timestamp: Utc::now(),
        });
        assert_eq!(cancelled.event_type(), "booking_cancelled");
    }

    #[test]
    fn serialized_events_are_tagged_by_type() {
        let event = Event::BookingCancelled(BookingCancelledEvent {
            booking_id: Uuid::new_v4(),
            reference: "TRV-00000003".into(),
            user_id: Uuid::new_v4(),
            destination_id: Uuid::new_v4(),
            refund_amount: 30_000,
            reason: Some("change of plans".into()),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "BookingCancelled");
        assert_eq!(json["data"]["refund_amount"], 30_000);
    }
}
