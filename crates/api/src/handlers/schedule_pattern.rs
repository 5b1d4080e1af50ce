//! Schedule pattern handlers, staff-only.
//!
//! A pattern stores a Vietnam-local departure time-of-day and a
//! days-of-week bitmask. The generate endpoint expands it into concrete
//! schedules, converting each local wall-clock departure to UTC at the
//! core boundary.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::localtime::{wall_clock_to_utc, WALL_CLOCK_YEAR_RANGE};
use vexe_core::recurrence;
use vexe_core::types::DbId;
use vexe_db::models::schedule::CreateSchedule;
use vexe_db::models::schedule_pattern::{
    CreateSchedulePattern, SchedulePattern, UpdateSchedulePattern,
};
use vexe_db::repositories::{BusRepo, DriverRepo, RouteRepo, SchedulePatternRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest generation window accepted in one request, in days.
const MAX_GENERATION_SPAN_DAYS: i64 = 92;

/// Request body for `POST /schedule-patterns/{id}/generate`.
///
/// Both dates are Vietnam-local calendar dates, inclusive.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Response body for the generate endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Schedules inserted by this request.
    pub created: u32,
    /// Dates skipped because the (pattern, departure) pair already existed.
    pub skipped: u32,
}

/// GET /api/v1/schedule-patterns
pub async fn list_patterns(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<SchedulePattern>>>> {
    let data = SchedulePatternRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/schedule-patterns/{id}
pub async fn get_pattern(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<SchedulePattern>> {
    let pattern = SchedulePatternRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SchedulePattern",
            id,
        }))?;
    Ok(Json(pattern))
}

/// POST /api/v1/schedule-patterns
pub async fn create_pattern(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateSchedulePattern>,
) -> AppResult<(StatusCode, Json<SchedulePattern>)> {
    input.validate()?;
    if !recurrence::is_valid_mask(input.days_of_week) {
        return Err(AppError::BadRequest(format!(
            "Invalid days-of-week mask: {}",
            input.days_of_week
        )));
    }
    ensure_references(&state, input.route_id, input.bus_id, input.driver_id).await?;

    let pattern = SchedulePatternRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(pattern)))
}

/// PUT /api/v1/schedule-patterns/{id}
pub async fn update_pattern(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedulePattern>,
) -> AppResult<Json<SchedulePattern>> {
    input.validate()?;
    if let Some(mask) = input.days_of_week {
        if !recurrence::is_valid_mask(mask) {
            return Err(AppError::BadRequest(format!(
                "Invalid days-of-week mask: {mask}"
            )));
        }
    }

    let pattern = SchedulePatternRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SchedulePattern",
            id,
        }))?;
    Ok(Json(pattern))
}

/// DELETE /api/v1/schedule-patterns/{id}
///
/// Soft delete: deactivates the pattern. Already-generated schedules
/// are untouched.
pub async fn delete_pattern(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = SchedulePatternRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SchedulePattern",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/schedule-patterns/{id}/generate
///
/// Expand the pattern over a local-date window. For every date whose
/// weekday is set in the mask, a schedule is inserted at
/// `wall_clock_to_utc(date + departure_time)`. Dates that already have a
/// schedule for this pattern are counted as skipped, so re-running the
/// same window is safe.
pub async fn generate_schedules(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    if input.from_date > input.to_date {
        return Err(AppError::BadRequest(
            "from_date must not be after to_date".into(),
        ));
    }
    if !WALL_CLOCK_YEAR_RANGE.contains(&input.from_date.year())
        || !WALL_CLOCK_YEAR_RANGE.contains(&input.to_date.year())
    {
        return Err(AppError::BadRequest(
            "Dates must use four-digit years".into(),
        ));
    }
    let span_days = (input.to_date - input.from_date).num_days();
    if span_days >= MAX_GENERATION_SPAN_DAYS {
        return Err(AppError::BadRequest(format!(
            "Generation window must be under {MAX_GENERATION_SPAN_DAYS} days"
        )));
    }

    let pattern = SchedulePatternRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SchedulePattern",
            id,
        }))?;
    if !pattern.is_active {
        return Err(AppError::Core(CoreError::Conflict(
            "Pattern is inactive".into(),
        )));
    }

    let mut created = 0u32;
    let mut skipped = 0u32;

    let mut date = input.from_date;
    while date <= input.to_date {
        if recurrence::includes(pattern.days_of_week, date.weekday()) {
            let departure_at = wall_clock_to_utc(NaiveDateTime::new(date, pattern.departure_time))
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let arrival_at =
                departure_at + chrono::Duration::minutes(i64::from(pattern.duration_minutes));

            let inserted = ScheduleRepo::insert_generated(
                &state.pool,
                &CreateSchedule {
                    pattern_id: Some(pattern.id),
                    route_id: pattern.route_id,
                    bus_id: pattern.bus_id,
                    driver_id: pattern.driver_id,
                    departure_at,
                    arrival_at,
                    price: pattern.price,
                },
            )
            .await?;

            if inserted {
                created += 1;
            } else {
                skipped += 1;
            }
        }
        date = date.succ_opt().ok_or_else(|| {
            AppError::BadRequest("to_date is out of the supported calendar range".into())
        })?;
    }

    tracing::info!(pattern_id = id, created, skipped, "Pattern generation finished");
    Ok(Json(GenerateResponse { created, skipped }))
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
