//! Bus entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vexe_core::types::{DbId, Timestamp};
use vexe_core::validation::validate_plate_number;

/// A bus row from the `buses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bus {
    pub id: DbId,
    pub plate_number: String,
    pub model: Option<String>,
    /// `seater` or `sleeper`; drives the seat-label map.
    pub seat_kind: String,
    pub seat_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new bus.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBus {
    #[validate(custom(function = validate_plate_number))]
    pub plate_number: String,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    pub seat_kind: String,
    #[validate(range(min = 1, max = 100))]
    pub seat_count: i32,
}

/// DTO for updating an existing bus. All fields are optional.
///
/// Seat kind and count are deliberately absent: changing the seat map
/// under existing bookings would orphan their seat labels.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBus {
    #[validate(custom(function = validate_plate_number))]
    pub plate_number: Option<String>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    pub is_active: Option<bool>,
}
