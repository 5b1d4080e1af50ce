//! Admin-only user management handlers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::pagination::{clamp_limit, clamp_offset};
use vexe_core::types::DbId;
use vexe_db::models::user::{CreateUser, UpdateUser, UserResponse};
use vexe_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::resolve_role_name;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let users = UserRepo::list(&state.pool, limit, offset).await?;

    // One role lookup for the whole page instead of one per row.
    let roles: HashMap<DbId, String> = RoleRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let data = users
        .into_iter()
        .map(|u| UserResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            role: roles.get(&u.role_id).cloned().unwrap_or_default(),
            role_id: u.role_id,
            is_active: u.is_active,
            last_login_at: u.last_login_at,
            created_at: u.created_at,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users
///
/// Create a user with an explicit role, e.g. a staff account.
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let role = RoleRepo::find_by_id(&state.pool, input.role_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Role",
            id: input.role_id,
        }))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: role.name,
            role_id: user.role_id,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = resolve_role_name(&state, user.role_id).await?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role_id) = input.role_id {
        RoleRepo::find_by_id(&state.pool, role_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Role",
                id: role_id,
            }))?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = resolve_role_name(&state, user.role_id).await?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft delete: deactivates the account and revokes its sessions so
/// booking history stays intact.
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Set a new password and revoke all existing sessions.
pub async fn reset_password(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
