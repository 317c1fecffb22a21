//! Booking domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::period::StayPeriod;
use super::pricing::Quote;

/// Allowed guest counts per booking
pub const MIN_GUESTS: i32 = 1;
pub const MAX_GUESTS: i32 = 10;

/// Booking status
///
/// `Confirmed` is the only non-terminal state; every other status is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Active reservation holding its dates on the calendar
    Confirmed,
    /// Cancelled by the guest or an administrator
    Cancelled,
    /// Stay took place (administrative close-out)
    Completed,
    /// Guest never arrived (administrative close-out)
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no-show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "no-show" => Some(Self::NoShow),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Confirmed)
    }

    /// Legal transitions: `confirmed` may move to any terminal status;
    /// nothing leaves a terminal status.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(self, Self::Confirmed) && next != Self::Confirmed
    }

    /// Whether a booking in this status holds its dates on the calendar.
    pub fn occupies_calendar(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method chosen at booking time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Paypal => "paypal",
            Self::BankTransfer => "bank-transfer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit-card" => Some(Self::CreditCard),
            "paypal" => Some(Self::Paypal),
            "bank-transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "failed" => Some(Self::Failed),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest contact details attached to a booking. Opaque to the core logic.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

/// A reservation of one destination by one user over a stay period.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID, generated at creation
    pub id: Uuid,
    /// Owning user (immutable after creation)
    pub user_id: Uuid,
    /// Booked destination (immutable after creation)
    pub destination_id: Uuid,
    /// Half-open `[check_in, check_out)` stay range
    pub period: StayPeriod,
    pub guest_count: i32,
    /// Per-night price snapshotted from the destination at creation, cents
    pub price_per_night: i64,
    pub total_nights: i64,
    /// `total_nights * price_per_night * guest_count`, cents
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub contact: ContactInfo,
    /// Set only once the booking is cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub refund_amount: Option<i64>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a freshly confirmed booking from a priced stay.
    pub fn new(
        user_id: Uuid,
        destination_id: Uuid,
        period: StayPeriod,
        guest_count: i32,
        price_per_night: i64,
        quote: Quote,
        payment_method: PaymentMethod,
        contact: ContactInfo,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            destination_id,
            period,
            guest_count,
            price_per_night,
            total_nights: quote.nights,
            total_amount: quote.total_amount,
            payment_method,
            payment_status: PaymentStatus::Pending,
            status: BookingStatus::Confirmed,
            contact,
            cancelled_at: None,
            cancellation_reason: None,
            refund_amount: None,
            refunded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Human-facing reference shown on confirmations, e.g. `TRV-4F9A01BC`.
    pub fn reference(&self) -> String {
        let hex = self.id.simple().to_string();
        format!("TRV-{}", hex[hex.len() - 8..].to_uppercase())
    }

    /// Whether this booking blocks its dates for other guests.
    pub fn occupies_calendar(&self) -> bool {
        self.status.occupies_calendar()
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::pricing;
    use chrono::{Duration, TimeZone};

    fn sample_booking() -> Booking {
        let period = StayPeriod::new(
            Utc.with_ymd_and_hms(2030, 6, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 13, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let quote = pricing::price(&period, 10_000, 2);
        Booking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            period,
            2,
            10_000,
            quote,
            PaymentMethod::CreditCard,
            ContactInfo {
                email: "guest@example.com".into(),
                phone: None,
                special_requests: None,
            },
        )
    }

    #[test]
    fn new_booking_is_confirmed_and_unpaid() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(b.payment_status, PaymentStatus::Pending);
        assert!(b.refund_amount.is_none());
        assert!(b.cancelled_at.is_none());
    }

    #[test]
    fn derived_amounts_match_the_quote() {
        let b = sample_booking();
        assert_eq!(b.total_nights, 3);
        assert_eq!(b.total_amount, 60_000);
    }

    #[test]
    fn confirmed_transitions_to_each_terminal_status() {
        let from = BookingStatus::Confirmed;
        assert!(from.can_transition_to(BookingStatus::Cancelled));
        assert!(from.can_transition_to(BookingStatus::Completed));
        assert!(from.can_transition_to(BookingStatus::NoShow));
        assert!(!from.can_transition_to(BookingStatus::Confirmed));
    }

    #[test]
    fn terminal_statuses_allow_no_transitions() {
        for terminal in [
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::NoShow,
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(BookingStatus::Confirmed));
            assert!(!terminal.can_transition_to(BookingStatus::Completed));
        }
    }

    #[test]
    fn only_confirmed_and_completed_occupy_the_calendar() {
        assert!(BookingStatus::Confirmed.occupies_calendar());
        assert!(BookingStatus::Completed.occupies_calendar());
        assert!(!BookingStatus::Cancelled.occupies_calendar());
        assert!(!BookingStatus::NoShow.occupies_calendar());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::NoShow,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("checked-in"), None);
    }

    #[test]
    fn payment_method_parses_the_wire_names() {
        assert_eq!(
            PaymentMethod::parse("credit-card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(PaymentMethod::parse("paypal"), Some(PaymentMethod::Paypal));
        assert_eq!(
            PaymentMethod::parse("bank-transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(PaymentMethod::parse("cash"), None);
    }

    #[test]
    fn reference_is_trv_plus_eight_hex_chars() {
        let b = sample_booking();
        let reference = b.reference();
        assert!(reference.starts_with("TRV-"));
        assert_eq!(reference.len(), 12);
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn ownership_check() {
        let b = sample_booking();
        assert!(b.is_owned_by(b.user_id));
        assert!(!b.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn period_nights_drive_total_for_longer_stays() {
        let period = StayPeriod::new(
            Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap() + Duration::days(14),
        )
        .unwrap();
        let quote = pricing::price(&period, 8_000, 3);
        assert_eq!(quote.nights, 14);
        assert_eq!(quote.total_amount, 14 * 8_000 * 3);
    }
}
