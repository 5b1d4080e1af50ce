//! Driver roster handlers, staff-only on both reads and writes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::types::DbId;
use vexe_db::models::driver::{CreateDriver, Driver, UpdateDriver};
use vexe_db::repositories::DriverRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/drivers
pub async fn list_drivers(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Driver>>>> {
    let data = DriverRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/drivers/{id}
pub async fn get_driver(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Driver>> {
    let driver = DriverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Driver", id }))?;
    Ok(Json(driver))
}

/// POST /api/v1/drivers
pub async fn create_driver(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateDriver>,
) -> AppResult<(StatusCode, Json<Driver>)> {
    input.validate()?;
    let driver = DriverRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

/// PUT /api/v1/drivers/{id}
pub async fn update_driver(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDriver>,
) -> AppResult<Json<Driver>> {
    input.validate()?;
    let driver = DriverRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Driver", id }))?;
    Ok(Json(driver))
}

/// DELETE /api/v1/drivers/{id}
///
/// Soft delete: deactivates the driver.
pub async fn delete_driver(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = DriverRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Driver", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
