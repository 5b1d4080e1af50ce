//! Stop entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};

/// A stop row from the `stops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stop {
    pub id: DbId,
    pub route_id: DbId,
    pub name: String,
    pub address: Option<String>,
    /// Position along the route, unique per route.
    pub sequence_index: i32,
    pub is_pickup: bool,
    pub is_dropoff: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new stop. The route id comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStop {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub sequence_index: i32,
    pub is_pickup: Option<bool>,
    pub is_dropoff: Option<bool>,
}

/// DTO for updating an existing stop. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStop {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub sequence_index: Option<i32>,
    pub is_pickup: Option<bool>,
    pub is_dropoff: Option<bool>,
}
