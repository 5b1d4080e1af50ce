//! Days-of-week bitmask helpers for schedule patterns.
//!
//! A pattern's `days_of_week` is a SMALLINT bitmask with Monday at bit 0
//! and Sunday at bit 6, matching `Weekday::num_days_from_monday`.

use chrono::Weekday;

/// Bitmask covering every day of the week.
pub const ALL_DAYS: i16 = 0b0111_1111;

/// Bit for a given weekday (Monday = bit 0).
pub fn weekday_bit(weekday: Weekday) -> i16 {
    1 << weekday.num_days_from_monday()
}

/// Check whether `mask` includes the given weekday.
pub fn includes(mask: i16, weekday: Weekday) -> bool {
    mask & weekday_bit(weekday) != 0
}

/// Check whether a mask is well-formed: at least one day, no stray bits.
pub fn is_valid_mask(mask: i16) -> bool {
    mask > 0 && mask & !ALL_DAYS == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monday_is_bit_zero() {
        assert_eq!(weekday_bit(Weekday::Mon), 0b0000_0001);
        assert_eq!(weekday_bit(Weekday::Sun), 0b0100_0000);
    }

    #[test]
    fn includes_matches_set_bits() {
        // Mon + Wed + Fri
        let mask = 0b0001_0101;
        assert!(includes(mask, Weekday::Mon));
        assert!(!includes(mask, Weekday::Tue));
        assert!(includes(mask, Weekday::Wed));
        assert!(includes(mask, Weekday::Fri));
        assert!(!includes(mask, Weekday::Sun));
    }

    #[test]
    fn all_days_includes_everything() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(includes(ALL_DAYS, weekday));
        }
    }

    #[test]
    fn mask_validity() {
        assert!(is_valid_mask(1));
        assert!(is_valid_mask(ALL_DAYS));
        assert!(!is_valid_mask(0));
        assert!(!is_valid_mask(0b1000_0000));
        assert!(!is_valid_mask(-1));
    }
}
