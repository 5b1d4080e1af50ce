//! Schedule pattern entity model and DTOs.
//!
//! A pattern is a recurring departure template: route, bus, driver, a
//! Vietnam-local departure time-of-day, and a days-of-week bitmask.
//! Concrete schedules are generated from it through the core boundary.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};

/// A schedule pattern row from the `schedule_patterns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchedulePattern {
    pub id: DbId,
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    /// Local wall-clock time-of-day template; NOT a UTC instant.
    pub departure_time: NaiveTime,
    pub duration_minutes: i32,
    /// Bitmask, Monday = bit 0.
    pub days_of_week: i16,
    /// VND; no decimals.
    pub price: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new schedule pattern.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSchedulePattern {
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub departure_time: NaiveTime,
    #[validate(range(min = 10, max = 4320))]
    pub duration_minutes: i32,
    #[validate(range(min = 1, max = 127))]
    pub days_of_week: i16,
    #[validate(range(min = 0))]
    pub price: i64,
}

/// DTO for updating an existing schedule pattern. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSchedulePattern {
    pub route_id: Option<DbId>,
    pub bus_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub departure_time: Option<NaiveTime>,
    #[validate(range(min = 10, max = 4320))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 1, max = 127))]
    pub days_of_week: Option<i16>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub is_active: Option<bool>,
}
