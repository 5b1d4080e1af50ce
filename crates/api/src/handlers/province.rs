//! Province catalog handlers. Reads are public, writes are staff-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::types::DbId;
use vexe_db::models::province::{CreateProvince, Province, UpdateProvince};
use vexe_db::repositories::ProvinceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/provinces
pub async fn list_provinces(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Province>>>> {
    let data = ProvinceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/provinces/{id}
pub async fn get_province(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Province>> {
    let province = ProvinceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Province",
            id,
        }))?;
    Ok(Json(province))
}

/// POST /api/v1/provinces
pub async fn create_province(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(input): Json<CreateProvince>,
) -> AppResult<(StatusCode, Json<Province>)> {
    input.validate()?;
    let province = ProvinceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(province)))
}

/// PUT /api/v1/provinces/{id}
pub async fn update_province(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProvince>,
) -> AppResult<Json<Province>> {
    input.validate()?;
    let province = ProvinceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Province",
            id,
        }))?;
    Ok(Json(province))
}

/// DELETE /api/v1/provinces/{id}
///
/// Hard delete. Fails with a foreign-key error while routes still
/// reference the province.
pub async fn delete_province(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProvinceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Province",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
