//! Feedback entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};

/// A feedback row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub user_id: DbId,
    /// Optional: feedback may target a route or the service in general.
    pub route_id: Option<DbId>,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating feedback. The author comes from the access token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedback {
    pub route_id: Option<DbId>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}
