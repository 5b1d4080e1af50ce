//! Route catalog handlers. Reads are public, writes are staff-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::types::DbId;
use vexe_db::models::route::{CreateRoute, Route, UpdateRoute};
use vexe_db::repositories::{ProvinceRepo, RouteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/routes
///
/// Lists active routes by default; `?include_inactive=true` lists all.
pub async fn list_routes(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Route>>>> {
    let data = RouteRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Route>> {
    let route = RouteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))?;
    Ok(Json(route))
}

/// POST /api/v1/routes
pub async fn create_route(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateRoute>,
) -> AppResult<(StatusCode, Json<Route>)> {
    input.validate()?;
    if input.origin_province_id == input.destination_province_id {
        return Err(AppError::BadRequest(
            "Origin and destination provinces must differ".into(),
        ));
    }
    ensure_province_exists(&state, input.origin_province_id).await?;
    ensure_province_exists(&state, input.destination_province_id).await?;

    let route = RouteRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

/// PUT /api/v1/routes/{id}
pub async fn update_route(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoute>,
) -> AppResult<Json<Route>> {
    input.validate()?;

    let existing = RouteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))?;

    // Cross-check the merged endpoint pair, not just the patch.
    let origin = input.origin_province_id.unwrap_or(existing.origin_province_id);
    let destination = input
        .destination_province_id
        .unwrap_or(existing.destination_province_id);
    if origin == destination {
        return Err(AppError::BadRequest(
            "Origin and destination provinces must differ".into(),
        ));
    }
    if let Some(province_id) = input.origin_province_id {
        ensure_province_exists(&state, province_id).await?;
    }
    if let Some(province_id) = input.destination_province_id {
        ensure_province_exists(&state, province_id).await?;
    }

    let route = RouteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))?;
    Ok(Json(route))
}

/// DELETE /api/v1/routes/{id}
///
/// Soft delete: deactivates the route so historical schedules keep
/// resolving their route data.
pub async fn delete_route(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = RouteRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Route", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_province_exists(state: &AppState, id: DbId) -> AppResult<()> {
    ProvinceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Province",
            id,
        }))?;
    Ok(())
}
