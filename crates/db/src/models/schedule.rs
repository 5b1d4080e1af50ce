//! Schedule entity model and DTOs.
//!
//! `departure_at` / `arrival_at` are UTC instants; the wall-clock
//! strings a staff member types are converted in the handler layer
//! through the core localtime boundary before these DTOs are built.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vexe_core::types::{DbId, StatusId, Timestamp};

/// A schedule row from the `schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub pattern_id: Option<DbId>,
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub departure_at: Timestamp,
    pub arrival_at: Timestamp,
    /// VND; no decimals.
    pub price: i64,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a schedule (manual creation or pattern generation).
#[derive(Debug, Clone)]
pub struct CreateSchedule {
    pub pattern_id: Option<DbId>,
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub departure_at: Timestamp,
    pub arrival_at: Timestamp,
    pub price: i64,
}

/// DTO for updating a schedule. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateSchedule {
    pub bus_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub departure_at: Option<Timestamp>,
    pub arrival_at: Option<Timestamp>,
    pub price: Option<i64>,
}

/// Optional filters accepted by the public schedule search.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub route_id: Option<DbId>,
    pub origin_province_id: Option<DbId>,
    pub destination_province_id: Option<DbId>,
    /// UTC bounds of one Vietnam-local calendar day.
    pub departure_between: Option<(Timestamp, Timestamp)>,
}

/// A schedule search row joined with route, province, and bus data,
/// plus the live booked-seat count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleSearchRow {
    pub id: DbId,
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub departure_at: Timestamp,
    pub arrival_at: Timestamp,
    pub price: i64,
    pub status_id: StatusId,
    pub origin_province: String,
    pub destination_province: String,
    pub plate_number: String,
    pub seat_kind: String,
    pub seat_count: i32,
    /// Seats currently held by live bookings (seat rows are deleted on
    /// cancellation, so a plain count is accurate).
    pub booked_seats: i64,
}
