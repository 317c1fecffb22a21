//! Pricing calculator
//!
//! Pure computation, no I/O. Amounts are integers in the smallest currency
//! unit (cents); the per-night price is snapshotted from the destination at
//! booking time, so later price changes never touch existing bookings.

use super::period::StayPeriod;

/// Priced stay: billable nights and the resulting total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    /// `nights * price_per_night * guest_count`, in cents
    pub total_amount: i64,
}

/// Price a stay. Nights come from the period's ceiling day count, so a
/// partial day bills as a full night (hospitality convention).
pub fn price(period: &StayPeriod, price_per_night: i64, guest_count: i32) -> Quote {
    let nights = period.nights();
    Quote {
        nights,
        total_amount: nights * price_per_night * guest_count as i64,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn period(from_day: u32, to_day: u32) -> StayPeriod {
        StayPeriod::new(
            Utc.with_ymd_and_hms(2024, 1, from_day, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, to_day, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn three_nights_two_guests_at_100_per_night() {
        // $100.00/night, 2 guests, [Jan 10, Jan 13) => 3 nights, $600.00
        let quote = price(&period(10, 13), 10_000, 2);
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_amount, 60_000);
    }

    #[test]
    fn single_night_single_guest() {
        let quote = price(&period(10, 11), 7_550, 1);
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.total_amount, 7_550);
    }

    #[test]
    fn partial_day_bills_as_full_night() {
        let p = StayPeriod::new(
            Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 12, 11, 0, 0).unwrap(),
        )
        .unwrap();
        let quote = price(&p, 10_000, 1);
        assert_eq!(quote.nights, 2);
        assert_eq!(quote.total_amount, 20_000);
    }

    #[test]
    fn total_scales_with_guest_count() {
        let base = price(&period(10, 13), 5_000, 1);
        let four = price(&period(10, 13), 5_000, 4);
        assert_eq!(four.total_amount, base.total_amount * 4);
    }
}
