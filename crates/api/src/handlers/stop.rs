//! Route stop handlers, nested under `/routes/{route_id}/stops`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::types::DbId;
use vexe_db::models::stop::{CreateStop, Stop, UpdateStop};
use vexe_db::repositories::{RouteRepo, StopRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/routes/{route_id}/stops
///
/// Stops in boarding order (by `sequence_index`).
pub async fn list_stops(
    State(state): State<AppState>,
    Path(route_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Stop>>>> {
    ensure_route_exists(&state, route_id).await?;
    let data = StopRepo::list_for_route(&state.pool, route_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/routes/{route_id}/stops
pub async fn create_stop(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(route_id): Path<DbId>,
    Json(input): Json<CreateStop>,
) -> AppResult<(StatusCode, Json<Stop>)> {
    input.validate()?;
    ensure_route_exists(&state, route_id).await?;
    let stop = StopRepo::create(&state.pool, route_id, &input).await?;
    Ok((StatusCode::CREATED, Json(stop)))
}

/// PUT /api/v1/routes/{route_id}/stops/{stop_id}
pub async fn update_stop(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path((route_id, stop_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateStop>,
) -> AppResult<Json<Stop>> {
    input.validate()?;
    ensure_stop_on_route(&state, route_id, stop_id).await?;

    let stop = StopRepo::update(&state.pool, stop_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stop",
            id: stop_id,
        }))?;
    Ok(Json(stop))
}

/// DELETE /api/v1/routes/{route_id}/stops/{stop_id}
pub async fn delete_stop(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path((route_id, stop_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_stop_on_route(&state, route_id, stop_id).await?;

    let deleted = StopRepo::delete(&state.pool, stop_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Stop",
            id: stop_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_route_exists(state: &AppState, route_id: DbId) -> AppResult<()> {
    RouteRepo::find_by_id(&state.pool, route_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Route",
            id: route_id,
        }))?;
    Ok(())
}

/// A stop addressed through the wrong route's URL is treated as missing.
async fn ensure_stop_on_route(state: &AppState, route_id: DbId, stop_id: DbId) -> AppResult<()> {
    let stop = StopRepo::find_by_id(&state.pool, stop_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stop",
            id: stop_id,
        }))?;
    if stop.route_id != route_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Stop",
            id: stop_id,
        }));
    }
    Ok(())
}
