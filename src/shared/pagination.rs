//! Pagination parameter clamping

/// Normalize raw pagination input: 1-based page, limit clamped to 1–100.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(validate_pagination(None, None), (1, 20));
    }

    #[test]
    fn zero_page_becomes_first() {
        assert_eq!(validate_pagination(Some(0), Some(10)), (1, 10));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(validate_pagination(Some(2), Some(0)), (2, 1));
        assert_eq!(validate_pagination(Some(2), Some(1_000)), (2, 100));
    }
}
