//! Conversion between stored UTC instants and Vietnam wall-clock time.
//!
//! Every timestamp the platform persists is a UTC instant
//! (`DateTime<Utc>`); everything a passenger types into a form or reads
//! off a screen is Vietnam local time. Vietnam is UTC+7 year-round with no
//! daylight-saving rule, so the conversion is a constant 7-hour shift and
//! `to_local(to_utc(s))` reproduces every wall-clock field exactly.
//!
//! This module is the single home of that offset. Handlers, repositories,
//! and background jobs all convert through here; none of them re-declare
//! the literal `7`. Wall clocks are `NaiveDateTime` / `NaiveDate` —
//! calendar fields with no zone tag, Vietnam-local by convention.
//!
//! The fixed-offset arithmetic is deliberate: a tz-database lookup buys
//! nothing for a region without DST. It also means this module does NOT
//! generalize to DST regions — deploying there needs a real timezone
//! crate, not a wider constant.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};

/// Vietnam's offset from UTC, in hours. The only place this number lives.
pub const VIETNAM_OFFSET_HOURS: i32 = 7;

/// The offset in seconds, for [`FixedOffset`] construction.
const VIETNAM_OFFSET_SECS: i32 = VIETNAM_OFFSET_HOURS * 3600;

/// Wall-clock format accepted on write paths: `2025-01-15T14:30:00`,
/// no zone suffix.
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Calendar years expressible in the wall-clock shape (`YYYY` is four
/// digits). `%Y` itself parses signed and extended years, so the range
/// is enforced separately after parsing.
pub const WALL_CLOCK_YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Sentinel rendered by [`display_local`] for unparsable input.
pub const DISPLAY_SENTINEL: &str = "N/A";

/// Vietnamese weekday names indexed by days-from-Monday.
///
/// Fixed constants rather than a locale lookup so formatted output is
/// byte-identical on every host.
const WEEKDAY_NAMES: [&str; 7] = [
    "Thứ Hai",
    "Thứ Ba",
    "Thứ Tư",
    "Thứ Năm",
    "Thứ Sáu",
    "Thứ Bảy",
    "Chủ Nhật",
];

/// Error for timestamp input that does not parse at the system boundary.
///
/// Raised on write paths (wall-clock form input) and read paths (UTC
/// strings from the store). Callers surface it as a validation failure;
/// it is never silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid timestamp format: {0:?}")]
    InvalidTimestampFormat(String),
}

/// Display patterns for rendering an instant in Vietnam local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPattern {
    /// `15/01/2025`
    ShortDate,
    /// `Thứ Tư, 15/01/2025`
    LongDate,
    /// `14:30`
    TimeOnly,
    /// `15/01/2025 14:30:00`
    FullDateTime,
}

/// The fixed UTC+7 offset. Construction cannot fail for this constant.
fn vietnam_offset() -> FixedOffset {
    FixedOffset::east_opt(VIETNAM_OFFSET_SECS).expect("UTC+7 is a valid fixed offset")
}

/// Parse a Vietnam wall-clock string (`YYYY-MM-DDTHH:MM:SS`) into the UTC
/// instant it denotes.
///
/// The input carries no zone marker; it is read as Vietnam local time and
/// shifted back by exactly 7 hours. Anything that is not a syntactically
/// valid calendar date/time in this exact shape — wrong separators, a
/// trailing zone suffix, an impossible date, a year outside the
/// four-digit range — is rejected.
pub fn to_utc(local: &str) -> Result<DateTime<Utc>, TimeError> {
    let wall = NaiveDateTime::parse_from_str(local, WALL_CLOCK_FORMAT)
        .map_err(|_| TimeError::InvalidTimestampFormat(local.to_string()))?;
    if !WALL_CLOCK_YEAR_RANGE.contains(&wall.year()) {
        return Err(TimeError::InvalidTimestampFormat(local.to_string()));
    }
    wall_clock_to_utc(wall).map_err(|_| TimeError::InvalidTimestampFormat(local.to_string()))
}

/// Shift an already-structured Vietnam wall clock to its UTC instant.
///
/// Used when composing a wall clock from parts (a calendar date plus a
/// pattern's time-of-day) rather than parsing a string.
///
/// Fails only when the shifted instant would fall below chrono's calendar
/// minimum (`%Y` parses signed years, so extreme values are reachable
/// through otherwise well-formed input).
pub fn wall_clock_to_utc(wall: NaiveDateTime) -> Result<DateTime<Utc>, TimeError> {
    wall.checked_sub_signed(Duration::hours(i64::from(VIETNAM_OFFSET_HOURS)))
        .map(|shifted| Utc.from_utc_datetime(&shifted))
        .ok_or_else(|| TimeError::InvalidTimestampFormat(wall.to_string()))
}

/// Shift a UTC instant to the Vietnam wall clock that displays it.
///
/// Total over its domain: every instant has exactly one wall clock, 7
/// hours ahead, with no zone tag on the result.
pub fn to_local(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&vietnam_offset()).naive_local()
}

/// Parse an ISO-8601 UTC string as the data store returns it
/// (`2025-01-15T07:30:00Z`; fractional seconds and explicit numeric
/// offsets are accepted and normalized to UTC).
pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeError::InvalidTimestampFormat(raw.to_string()))
}

/// Vietnamese name of a weekday (`Weekday::Mon` → `"Thứ Hai"`).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Format an instant for display in Vietnam local time.
///
/// Pure: the same instant and pattern always produce the same bytes, and
/// formatting a valid instant cannot fail. Error recovery for raw strings
/// of unknown provenance belongs to [`display_local`], not here.
pub fn format_local(instant: DateTime<Utc>, pattern: FormatPattern) -> String {
    let wall = to_local(instant);
    match pattern {
        FormatPattern::ShortDate => wall.format("%d/%m/%Y").to_string(),
        FormatPattern::LongDate => format!(
            "{}, {}",
            weekday_name(wall.weekday()),
            wall.format("%d/%m/%Y")
        ),
        FormatPattern::TimeOnly => wall.format("%H:%M").to_string(),
        FormatPattern::FullDateTime => wall.format("%d/%m/%Y %H:%M:%S").to_string(),
    }
}

/// Render-path wrapper over [`format_local`] for raw timestamp strings.
///
/// Returns the `"N/A"` sentinel instead of an error when the input does
/// not parse, so a corrupt value never takes down a render. Display code
/// only — values that feed computation, persistence, or filtering must go
/// through [`parse_utc`] and handle the error.
pub fn display_local(raw: &str, pattern: FormatPattern) -> String {
    match parse_utc(raw) {
        Ok(instant) => format_local(instant, pattern),
        Err(_) => DISPLAY_SENTINEL.to_string(),
    }
}

/// UTC instant at which a Vietnam-local calendar day begins
/// (local `00:00:00.000`). Fails for dates at the calendar minimum,
/// where the 7-hour shift has nowhere to go.
pub fn start_of_local_day(date: NaiveDate) -> Result<DateTime<Utc>, TimeError> {
    wall_clock_to_utc(date.and_time(NaiveTime::MIN))
}

/// UTC instant of the last millisecond of a Vietnam-local calendar day
/// (local `23:59:59.999`).
pub fn end_of_local_day(date: NaiveDate) -> Result<DateTime<Utc>, TimeError> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day time");
    wall_clock_to_utc(date.and_time(end))
}

/// Inclusive UTC bounds of one Vietnam-local calendar day, shaped for
/// `WHERE departure_at BETWEEN $1 AND $2`.
///
/// Both bounds shift by the same 7 hours as every other conversion.
/// Filtering on these bounds rather than the raw date is what keeps a
/// near-midnight departure on the day the passenger actually picked.
pub fn local_day_range(date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), TimeError> {
    Ok((start_of_local_day(date)?, end_of_local_day(date)?))
}
