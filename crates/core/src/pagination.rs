//! Pagination defaults and clamping helpers shared by list endpoints.

/// Default number of rows per page.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a requested limit into `1..=MAX_LIST_LIMIT`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Clamp a requested offset to be non-negative, defaulting to 0.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(clamp_limit(None), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn oversized_limit_is_capped() {
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIST_LIMIT);
    }

    #[test]
    fn zero_and_negative_limits_floor_at_one() {
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
    }

    #[test]
    fn in_range_limit_passes_through() {
        assert_eq!(clamp_limit(Some(50)), 50);
    }

    #[test]
    fn offsets_never_go_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
