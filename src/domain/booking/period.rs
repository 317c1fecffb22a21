//! Stay period value object
//!
//! A booking occupies the half-open interval `[check_in, check_out)`:
//! the checkout day itself is free, so back-to-back stays on the same
//! destination never conflict.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{DomainError, DomainResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Half-open `[check_in, check_out)` date range of a stay.
///
/// Construction enforces `check_out > check_in`; the fields stay private so
/// every `StayPeriod` in the system is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl StayPeriod {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::Validation(
                "Check-out date must be after check-in date".to_string(),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Standard interval-intersection test for half-open ranges:
    /// `a.start < b.end && b.start < a.end`. A period whose check-in equals
    /// another's check-out does not overlap it.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Number of billable nights: duration in days, rounded up, so a partial
    /// day always counts as a full night. Always ≥ 1.
    pub fn nights(&self) -> i64 {
        ceil_days(self.check_out - self.check_in)
    }

    /// Days from `now` until check-in, rounded up. Negative once the
    /// check-in has passed.
    pub fn days_until_check_in(&self, now: DateTime<Utc>) -> i64 {
        ceil_days(self.check_in - now)
    }

    /// Whether check-in lies strictly in the future of `now`.
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.check_in > now
    }
}

/// Ceiling division of a duration into whole days.
fn ceil_days(duration: Duration) -> i64 {
    (duration.num_seconds() + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(date(from.0, from.1, from.2), date(to.0, to.1, to.2)).unwrap()
    }

    #[test]
    fn rejects_check_out_before_check_in() {
        let result = StayPeriod::new(date(2024, 1, 13), date(2024, 1, 10));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_zero_length_period() {
        let result = StayPeriod::new(date(2024, 1, 10), date(2024, 1, 10));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn overlapping_periods_are_detected() {
        let a = period((2024, 1, 10), (2024, 1, 13));
        let b = period((2024, 1, 12), (2024, 1, 15));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn contained_period_overlaps() {
        let outer = period((2024, 1, 10), (2024, 1, 20));
        let inner = period((2024, 1, 12), (2024, 1, 14));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn back_to_back_periods_do_not_overlap() {
        let a = period((2024, 1, 10), (2024, 1, 13));
        let b = period((2024, 1, 13), (2024, 1, 15));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn disjoint_periods_do_not_overlap() {
        let a = period((2024, 1, 10), (2024, 1, 13));
        let b = period((2024, 2, 1), (2024, 2, 5));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn nights_counts_whole_days() {
        let p = period((2024, 1, 10), (2024, 1, 13));
        assert_eq!(p.nights(), 3);
    }

    #[test]
    fn partial_day_counts_as_full_night() {
        let p = StayPeriod::new(
            Utc.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 11, 10, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(p.nights(), 1);

        let q = StayPeriod::new(
            Utc.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 12, 10, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(q.nights(), 2);
    }

    #[test]
    fn days_until_check_in_rounds_up() {
        let p = period((2024, 1, 10), (2024, 1, 13));
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        // 6.5 days out rounds up to 7
        assert_eq!(p.days_until_check_in(now), 7);
    }

    #[test]
    fn days_until_check_in_is_negative_after_check_in() {
        let p = period((2024, 1, 10), (2024, 1, 13));
        let now = date(2024, 1, 12);
        assert_eq!(p.days_until_check_in(now), -2);
    }

    #[test]
    fn starts_after_is_strict() {
        let p = period((2024, 1, 10), (2024, 1, 13));
        assert!(p.starts_after(date(2024, 1, 9)));
        assert!(!p.starts_after(date(2024, 1, 10)));
        assert!(!p.starts_after(date(2024, 1, 11)));
    }
}
