//! Route entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};

/// A route row from the `routes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Route {
    pub id: DbId,
    pub origin_province_id: DbId,
    pub destination_province_id: DbId,
    pub distance_km: i32,
    /// Standard trip duration used as the default for patterns.
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoute {
    pub origin_province_id: DbId,
    pub destination_province_id: DbId,
    #[validate(range(min = 1, max = 5000))]
    pub distance_km: i32,
    #[validate(range(min = 10, max = 4320))]
    pub duration_minutes: i32,
}

/// DTO for updating an existing route. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoute {
    pub origin_province_id: Option<DbId>,
    pub destination_province_id: Option<DbId>,
    #[validate(range(min = 1, max = 5000))]
    pub distance_km: Option<i32>,
    #[validate(range(min = 10, max = 4320))]
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}
