//! Deterministic seat-label maps.
//!
//! Seat labels are derived from the bus's seat kind and count rather than
//! stored per seat, so the same `(kind, count)` pair always yields the
//! same map on every caller.

/// Seat kind for a conventional seated coach.
pub const SEAT_KIND_SEATER: &str = "seater";

/// Seat kind for a two-deck sleeper coach.
pub const SEAT_KIND_SLEEPER: &str = "sleeper";

/// Valid seat kinds accepted on bus creation.
pub const SEAT_KINDS: &[&str] = &[SEAT_KIND_SEATER, SEAT_KIND_SLEEPER];

/// Check whether a seat kind is one of the known values.
pub fn is_valid_seat_kind(kind: &str) -> bool {
    SEAT_KINDS.contains(&kind)
}

/// Generate the full seat-label map for a bus.
///
/// - `seater`: `01`, `02`, ... `NN` (zero-padded to two digits).
/// - `sleeper`: lower deck `A01..`, upper deck `B01..`; the lower deck
///   takes the larger half when the count is odd.
///
/// Unknown kinds fall back to the seater layout.
pub fn seat_map(seat_kind: &str, seat_count: i32) -> Vec<String> {
    let count = seat_count.max(0) as u32;
    match seat_kind {
        SEAT_KIND_SLEEPER => {
            let lower = count.div_ceil(2);
            let upper = count - lower;
            let mut labels = Vec::with_capacity(count as usize);
            labels.extend((1..=lower).map(|n| format!("A{n:02}")));
            labels.extend((1..=upper).map(|n| format!("B{n:02}")));
            labels
        }
        _ => (1..=count).map(|n| format!("{n:02}")).collect(),
    }
}

/// Check whether a label belongs to the map for `(seat_kind, seat_count)`.
pub fn is_valid_seat_label(seat_kind: &str, seat_count: i32, label: &str) -> bool {
    seat_map(seat_kind, seat_count).iter().any(|l| l == label)
}
