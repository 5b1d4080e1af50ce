//! Feedback handlers: authenticated create, public list, author-or-admin
//! delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vexe_core::error::CoreError;
use vexe_core::pagination::{clamp_limit, clamp_offset};
use vexe_core::roles::ROLE_ADMIN;
use vexe_core::types::DbId;
use vexe_db::models::feedback::{CreateFeedback, Feedback};
use vexe_db::repositories::{FeedbackRepo, RouteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackListParams {
    pub route_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    input.validate()?;
    if let Some(route_id) = input.route_id {
        RouteRepo::find_by_id(&state.pool, route_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Route",
                id: route_id,
            }))?;
    }

    let feedback = FeedbackRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// GET /api/v1/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(params): Query<FeedbackListParams>,
) -> AppResult<Json<DataResponse<Vec<Feedback>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let data = FeedbackRepo::list(&state.pool, params.route_id, limit, offset).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/feedback/{id}
///
/// Authors may delete their own feedback; admins may delete any.
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let feedback = FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }))?;

    if feedback.user_id != auth_user.user_id && auth_user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin may delete feedback".into(),
        )));
    }

    let deleted = FeedbackRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
