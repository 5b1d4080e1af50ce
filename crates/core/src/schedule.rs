//! Schedule status state machine.
//!
//! A schedule advances through its lifecycle as UTC time passes its
//! departure and arrival instants. The cancel endpoint validates against
//! this module; the background progress sweep applies the time-driven
//! transitions in SQL using the status ids below.

// ---------------------------------------------------------------------------
// Status ids
// ---------------------------------------------------------------------------

/// Schedule status ids matching `schedule_statuses` seed data (1-based).
///
/// Intentionally duplicated from the `db` crate's `ScheduleStatus` enum
/// because `core` must have zero internal deps.
pub const STATUS_SCHEDULED: i16 = 1;
pub const STATUS_DEPARTED: i16 = 2;
pub const STATUS_COMPLETED: i16 = 3;
pub const STATUS_CANCELLED: i16 = 4;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of valid target status ids reachable from `from_status`.
pub fn valid_transitions(from_status: i16) -> &'static [i16] {
    match from_status {
        // Scheduled -> Departed (bus left), Cancelled
        STATUS_SCHEDULED => &[STATUS_DEPARTED, STATUS_CANCELLED],
        // Departed -> Completed; a bus on the road is not cancellable
        STATUS_DEPARTED => &[STATUS_COMPLETED],
        // Terminal states, plus unknown ids
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
            "Invalid schedule transition: {from_name} ({from}) -> {to_name} ({to})"
        ))
    }
}

/// Human-readable name for a status id (for error messages).
pub fn status_name(id: i16) -> &'static str {
    match id {
        STATUS_SCHEDULED => "Scheduled",
        STATUS_DEPARTED => "Departed",
        STATUS_COMPLETED => "Completed",
        STATUS_CANCELLED => "Cancelled",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_to_departed() {
        assert!(can_transition(STATUS_SCHEDULED, STATUS_DEPARTED));
    }

    #[test]
    fn scheduled_to_cancelled() {
        assert!(can_transition(STATUS_SCHEDULED, STATUS_CANCELLED));
    }

    #[test]
    fn departed_to_completed() {
        assert!(can_transition(STATUS_DEPARTED, STATUS_COMPLETED));
    }

    #[test]
    fn departed_is_not_cancellable() {
        assert!(!can_transition(STATUS_DEPARTED, STATUS_CANCELLED));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(valid_transitions(STATUS_COMPLETED).is_empty());
        assert!(valid_transitions(STATUS_CANCELLED).is_empty());
    }

    #[test]
    fn validate_transition_err_names_both_states() {
        let err = validate_transition(STATUS_DEPARTED, STATUS_CANCELLED).unwrap_err();
        assert!(err.contains("Departed"));
        assert!(err.contains("Cancelled"));
    }
}
