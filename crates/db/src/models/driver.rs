//! Driver entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};
use vexe_core::validation::validate_phone;

/// A driver row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Driver {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub license_no: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new driver.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDriver {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(min = 5, max = 20))]
    pub license_no: String,
}

/// DTO for updating an existing driver. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDriver {
    #[validate(length(min = 2, max = 100))]
    pub full_name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub phone: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub license_no: Option<String>,
    pub is_active: Option<bool>,
}
