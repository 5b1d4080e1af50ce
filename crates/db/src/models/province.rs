//! Province entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};

/// A province row from the `provinces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    pub id: DbId,
    pub name: String,
    /// Short uppercase code (e.g. `HCM`, `HN`).
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new province.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProvince {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 2, max = 10))]
    pub code: String,
}

/// DTO for updating an existing province. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProvince {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 10))]
    pub code: Option<String>,
}
