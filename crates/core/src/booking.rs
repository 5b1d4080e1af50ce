//! Booking status state machine and reference-code generation.
//!
//! Lives in `core` (zero internal deps) so both the API layer and the
//! schedule-progress job share one definition of which booking
//! transitions are legal.

use rand::distr::Alphanumeric;
use rand::Rng;

// ---------------------------------------------------------------------------
// Status ids
// ---------------------------------------------------------------------------

/// Booking status ids matching `booking_statuses` seed data (1-based).
///
/// Intentionally duplicated from the `db` crate's `BookingStatus` enum
/// because `core` must have zero internal deps.
pub const STATUS_PENDING: i16 = 1;
pub const STATUS_CONFIRMED: i16 = 2;
pub const STATUS_COMPLETED: i16 = 3;
pub const STATUS_CANCELLED: i16 = 4;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of valid target status ids reachable from `from_status`.
///
/// Terminal states (Completed, Cancelled) return an empty slice.
pub fn valid_transitions(from_status: i16) -> &'static [i16] {
    match from_status {
        // Pending -> Confirmed (payment), Cancelled
        STATUS_PENDING => &[STATUS_CONFIRMED, STATUS_CANCELLED],
        // Confirmed -> Completed (trip ran), Cancelled
        STATUS_CONFIRMED => &[STATUS_COMPLETED, STATUS_CANCELLED],
        // Terminal states, plus unknown ids: no transitions allowed
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: i16, to: i16) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning an error message for invalid ones.
pub fn validate_transition(from: i16, to: i16) -> Result<(), String> {
    if can_transition(from, to) {
        Ok(())
    } else {
        let from_name = status_name(from);
        let to_name = status_name(to);
        Err(format!(
            "Invalid booking transition: {from_name} ({from}) -> {to_name} ({to})"
        ))
    }
}

/// Human-readable name for a status id (for error messages).
pub fn status_name(id: i16) -> &'static str {
    match id {
        STATUS_PENDING => "Pending",
        STATUS_CONFIRMED => "Confirmed",
        STATUS_COMPLETED => "Completed",
        STATUS_CANCELLED => "Cancelled",
        _ => "Unknown",
    }
}

// ---------------------------------------------------------------------------
// Reference codes
// ---------------------------------------------------------------------------

/// Prefix printed on every booking code.
pub const BOOKING_CODE_PREFIX: &str = "VX";

/// Random suffix length of a booking code.
pub const BOOKING_CODE_SUFFIX_LEN: usize = 8;

/// Prefix of every payment reference.
pub const PAYMENT_REF_PREFIX: &str = "PM";

/// Random suffix length of a payment reference.
pub const PAYMENT_REF_SUFFIX_LEN: usize = 10;

fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

/// Generate a booking code: `VX` followed by 8 uppercase alphanumerics.
///
/// Uniqueness is enforced by the `uq_bookings_code` constraint; callers
/// retry on conflict.
pub fn generate_booking_code() -> String {
    format!("{BOOKING_CODE_PREFIX}{}", random_suffix(BOOKING_CODE_SUFFIX_LEN))
}

/// Generate a payment reference: `PM` followed by 10 uppercase alphanumerics.
pub fn generate_payment_ref() -> String {
    format!("{PAYMENT_REF_PREFIX}{}", random_suffix(PAYMENT_REF_SUFFIX_LEN))
}
