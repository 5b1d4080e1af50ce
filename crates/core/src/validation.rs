//! Custom field validators plugged into `validator` derive on DTOs.
//!
//! These cover the formats the declarative attributes cannot express:
//! Vietnamese phone numbers and vehicle plate numbers.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Vietnamese phone number: `0` or `+84` followed by 9-10 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0|\+84)\d{9,10}$").expect("phone regex is valid"));

/// Vietnamese plate number: two-digit province code, one or two series
/// letters, then `12345`, `1234`, or `123.45`.
static PLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}[A-Z]{1,2}-(?:\d{4,5}|\d{3}\.\d{2})$").expect("plate regex is valid")
});

/// Validator-derive hook for phone fields.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("must be a Vietnamese phone number (0... or +84...)".into());
        Err(err)
    }
}

/// Validator-derive hook for plate-number fields.
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    if PLATE_RE.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("plate_number");
        err.message = Some("must be a Vietnamese plate number (e.g. 51B-123.45)".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_domestic_and_international_phones() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("+84912345678").is_ok());
        assert!(validate_phone("09123456789").is_ok());
    }

    #[test]
    fn rejects_malformed_phones() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("091234567").is_err()); // too short
        assert!(validate_phone("091234567890").is_err()); // too long
        assert!(validate_phone("+1 555 0100").is_err());
        assert!(validate_phone("091234567a").is_err());
    }

    #[test]
    fn accepts_plate_formats() {
        assert!(validate_plate_number("51B-123.45").is_ok());
        assert!(validate_plate_number("29A-12345").is_ok());
        assert!(validate_plate_number("43LD-1234").is_ok());
    }

    #[test]
    fn rejects_malformed_plates() {
        assert!(validate_plate_number("").is_err());
        assert!(validate_plate_number("51B123.45").is_err());
        assert!(validate_plate_number("5B-123.45").is_err());
        assert!(validate_plate_number("51b-123.45").is_err());
        assert!(validate_plate_number("51B-12").is_err());
    }
}
