//! Bus fleet handlers. Reads are public, writes are staff-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::seating::is_valid_seat_kind;
use vexe_core::types::DbId;
use vexe_db::models::bus::{Bus, CreateBus, UpdateBus};
use vexe_db::repositories::BusRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/buses
pub async fn list_buses(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Bus>>>> {
    let data = BusRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/buses/{id}
pub async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Bus>> {
    let bus = BusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Bus", id }))?;
    Ok(Json(bus))
}

/// POST /api/v1/buses
pub async fn create_bus(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateBus>,
) -> AppResult<(StatusCode, Json<Bus>)> {
    input.validate()?;
    if !is_valid_seat_kind(&input.seat_kind) {
        return Err(AppError::BadRequest(format!(
            "Unknown seat kind: {}",
            input.seat_kind
        )));
    }
    let bus = BusRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(bus)))
}

/// PUT /api/v1/buses/{id}
pub async fn update_bus(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBus>,
) -> AppResult<Json<Bus>> {
    input.validate()?;
    let bus = BusRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Bus", id }))?;
    Ok(Json(bus))
}

/// DELETE /api/v1/buses/{id}
///
/// Soft delete: deactivates the bus.
pub async fn delete_bus(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = BusRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Bus", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
