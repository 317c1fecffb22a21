//! Cancellation refund policy
//!
//! Three discrete tiers keyed by days between cancellation and check-in:
//! 7+ days out refunds everything, 3–6 days half, under 3 days nothing.
//! A check-in already in the past lands in the bottom tier.

/// Refund tier applied when a booking is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundTier {
    Full,
    Half,
    None,
}

impl RefundTier {
    /// Select the tier for a cancellation `days` before check-in.
    pub fn for_days_until_check_in(days: i64) -> Self {
        if days >= 7 {
            Self::Full
        } else if days >= 3 {
            Self::Half
        } else {
            Self::None
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            Self::Full => 100,
            Self::Half => 50,
            Self::None => 0,
        }
    }

    /// Refund due on `total_amount` (cents) at this tier.
    pub fn apply(&self, total_amount: i64) -> i64 {
        match self {
            Self::Full => total_amount,
            Self::Half => total_amount / 2,
            Self::None => 0,
        }
    }
}

/// Refund due for a cancellation `days_until_check_in` days out.
pub fn refund_amount(total_amount: i64, days_until_check_in: i64) -> i64 {
    RefundTier::for_days_until_check_in(days_until_check_in).apply(total_amount)
}

// ── Tests ──────────────────────────────────────────────────────
