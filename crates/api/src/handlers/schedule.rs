//! Schedule handlers: public search and detail, staff mutations.
//!
//! This is where the timezone boundary is crossed in both directions.
//! Staff submit Vietnam wall-clock strings that are converted to UTC
//! before touching the database; responses convert stored UTC instants
//! back into local presentation fields. The `date` search filter is a
//! local calendar date expanded to UTC BETWEEN bounds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use vexe_core::error::CoreError;
use vexe_core::localtime::{
    format_local, local_day_range, to_local, to_utc, FormatPattern, WALL_CLOCK_YEAR_RANGE,
};
use vexe_core::pagination::{clamp_limit, clamp_offset};
use vexe_core::schedule as schedule_rules;
use vexe_core::seating::seat_map;
use vexe_core::types::{DbId, StatusId, Timestamp};
use vexe_db::models::schedule::{
    CreateSchedule, Schedule, ScheduleFilter, ScheduleSearchRow, UpdateSchedule,
};
use vexe_db::repositories::{BusRepo, DriverRepo, RouteRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /schedules`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub route_id: Option<DbId>,
    pub origin_province_id: Option<DbId>,
    pub destination_province_id: Option<DbId>,
    /// Vietnam-local calendar date (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /schedules`.
///
/// Times are Vietnam wall-clock strings (`YYYY-MM-DDTHH:MM:SS`), never
/// UTC. Conversion happens here, once.
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub departure_at_local: String,
    pub arrival_at_local: String,
    pub price: i64,
}

/// Request body for `PUT /schedules/{id}`. All fields optional; time
/// fields use the same wall-clock contract as creation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub bus_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub departure_at_local: Option<String>,
    pub arrival_at_local: Option<String>,
    pub price: Option<i64>,
}

/// A search/detail row enriched with local presentation fields.
#[derive(Debug, Serialize)]
pub struct ScheduleView {
    pub id: DbId,
    pub route_id: DbId,
    pub bus_id: DbId,
    pub driver_id: DbId,
    pub origin_province: String,
    pub destination_province: String,
    pub plate_number: String,
    pub seat_kind: String,
    pub seat_count: i32,
    pub seats_available: i64,
    pub price: i64,
    pub status_id: StatusId,
    pub status: &'static str,
    /// Stored UTC instants, for API clients that do their own rendering.
    pub departure_at: Timestamp,
    pub arrival_at: Timestamp,
    /// Vietnam wall-clock (`YYYY-MM-DDTHH:MM:SS`).
    pub departure_local: String,
    pub arrival_local: String,
    /// `dd/MM/yyyy`.
    pub departure_date: String,
    /// `HH:mm`.
    pub departure_time_display: String,
}

impl From<ScheduleSearchRow> for ScheduleView {
    fn from(row: ScheduleSearchRow) -> Self {
        Self {
            id: row.id,
            route_id: row.route_id,
            bus_id: row.bus_id,
            driver_id: row.driver_id,
            origin_province: row.origin_province,
            destination_province: row.destination_province,
            plate_number: row.plate_number,
            seat_kind: row.seat_kind,
            seat_count: row.seat_count,
            seats_available: i64::from(row.seat_count) - row.booked_seats,
            price: row.price,
            status_id: row.status_id,
            status: schedule_rules::status_name(row.status_id),
            departure_local: to_local(row.departure_at)
                .format(vexe_core::localtime::WALL_CLOCK_FORMAT)
                .to_string(),
            arrival_local: to_local(row.arrival_at)
                .format(vexe_core::localtime::WALL_CLOCK_FORMAT)
                .to_string(),
            departure_date: format_local(row.departure_at, FormatPattern::ShortDate),
            departure_time_display: format_local(row.departure_at, FormatPattern::TimeOnly),
            departure_at: row.departure_at,
            arrival_at: row.arrival_at,
        }
    }
}

/// One seat in the `GET /schedules/{id}/seats` response.
#[derive(Debug, Serialize)]
pub struct SeatAvailability {
    pub label: String,
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/schedules
pub async fn search_schedules(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ScheduleView>>>> {
    if let Some(date) = params.date {
        if !WALL_CLOCK_YEAR_RANGE.contains(&date.year()) {
            return Err(AppError::BadRequest(
                "date must use a four-digit year".into(),
            ));
        }
    }
    let departure_between = params
        .date
        .map(local_day_range)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let filter = ScheduleFilter {
        route_id: params.route_id,
        origin_province_id: params.origin_province_id,
        destination_province_id: params.destination_province_id,
        departure_between,
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let rows = ScheduleRepo::search(&state.pool, &filter, limit, offset).await?;
    let data = rows.into_iter().map(ScheduleView::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScheduleView>> {
    let row = ScheduleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;
    Ok(Json(ScheduleView::from(row)))
}

/// GET /api/v1/schedules/{id}/seats
///
/// The full seat map for the schedule's bus, with per-seat availability
/// against live bookings.
pub async fn get_schedule_seats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SeatAvailability>>>> {
    let row = ScheduleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;
    let taken = ScheduleRepo::taken_seats(&state.pool, id).await?;

    let data = seat_map(&row.seat_kind, row.seat_count)
        .into_iter()
        .map(|label| {
            let available = !taken.contains(&label);
            SeatAvailability { label, available }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Staff handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    if input.price < 0 {
        return Err(AppError::BadRequest("Price must not be negative".into()));
    }

    let departure_at = parse_wall_clock(&input.departure_at_local)?;
    let arrival_at = parse_wall_clock(&input.arrival_at_local)?;
    if arrival_at <= departure_at {
        return Err(AppError::BadRequest(
            "Arrival must be after departure".into(),
        ));
    }
    ensure_references(&state, input.route_id, input.bus_id, input.driver_id).await?;

    let schedule = ScheduleRepo::create(
        &state.pool,
        &CreateSchedule {
            pattern_id: None,
            route_id: input.route_id,
            bus_id: input.bus_id,
            driver_id: input.driver_id,
            departure_at,
            arrival_at,
            price: input.price,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// PUT /api/v1/schedules/{id}
pub async fn update_schedule(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScheduleRequest>,
) -> AppResult<Json<Schedule>> {
    if let Some(price) = input.price {
        if price < 0 {
            return Err(AppError::BadRequest("Price must not be negative".into()));
        }
    }

    let existing = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;

    let departure_at = input
        .departure_at_local
        .as_deref()
        .map(parse_wall_clock)
        .transpose()?;
    let arrival_at = input
        .arrival_at_local
        .as_deref()
        .map(parse_wall_clock)
        .transpose()?;

    // The ordering check runs against the merged pair so a patch cannot
    // leave arrival at or before departure.
    let merged_departure = departure_at.unwrap_or(existing.departure_at);
    let merged_arrival = arrival_at.unwrap_or(existing.arrival_at);
    if merged_arrival <= merged_departure {
        return Err(AppError::BadRequest(
            "Arrival must be after departure".into(),
        ));
    }

    if let Some(bus_id) = input.bus_id {
        BusRepo::find_by_id(&state.pool, bus_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Bus",
                id: bus_id,
            }))?;
    }
    if let Some(driver_id) = input.driver_id {
        DriverRepo::find_by_id(&state.pool, driver_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Driver",
                id: driver_id,
            }))?;
    }

    let schedule = ScheduleRepo::update(
        &state.pool,
        id,
        &UpdateSchedule {
            bus_id: input.bus_id,
            driver_id: input.driver_id,
            departure_at,
            arrival_at,
            price: input.price,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Schedule",
        id,
    }))?;

    Ok(Json(schedule))
}

/// DELETE /api/v1/schedules/{id}
///
/// Cancels the schedule rather than deleting the row; the state machine
/// rejects cancelling a Completed or already-Cancelled trip.
pub async fn cancel_schedule(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Schedule>> {
    let existing = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;

    schedule_rules::validate_transition(existing.status_id, schedule_rules::STATUS_CANCELLED)
        .map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let schedule = ScheduleRepo::set_status(&state.pool, id, schedule_rules::STATUS_CANCELLED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;

    Ok(Json(schedule))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_wall_clock(raw: &str) -> Result<Timestamp, AppError> {
    to_utc(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn ensure_references(
    state: &AppState,
    route_id: DbId,
    bus_id: DbId,
    driver_id: DbId,
) -> AppResult<()> {
    RouteRepo::find_by_id(&state.pool, route_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Route",
            id: route_id,
        }))?;
    BusRepo::find_by_id(&state.pool, bus_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bus",
            id: bus_id,
        }))?;
    DriverRepo::find_by_id(&state.pool, driver_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id: driver_id,
        }))?;
    Ok(())
}
