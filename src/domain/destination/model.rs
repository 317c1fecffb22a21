//! Destination domain entity
//!
//! The catalog itself (creation, editing, media, reviews) lives in a separate
//! service; the booking engine only reads the fields it prices and checks
//! capacity against.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fallback capacity when a destination does not declare one.
pub const DEFAULT_MAX_GUESTS: i32 = 10;

/// A bookable destination
#[derive(Debug, Clone)]
pub struct Destination {
    pub id: Uuid,
    pub title: String,
    /// Current per-night price in cents; snapshotted onto bookings at
    /// creation time
    pub price_per_night: i64,
    /// Maximum concurrent guests, when the destination declares one
    pub max_guests: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Destination {
    pub fn new(title: impl Into<String>, price_per_night: i64, max_guests: Option<i32>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            price_per_night,
            max_guests,
            created_at: now,
            updated_at: now,
        }
    }

    /// Declared capacity, falling back to the conservative default.
    pub fn capacity(&self) -> i32 {
        self.max_guests.unwrap_or(DEFAULT_MAX_GUESTS)
    }
}

// ── Tests ──────────────────────────────────────────────────────
