//! Booking entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vexe_core::types::{DbId, StatusId, Timestamp};

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    /// Human-facing reference code (`VX` + 8 alphanumerics).
    pub code: String,
    pub user_id: DbId,
    pub schedule_id: DbId,
    pub seat_count: i32,
    /// VND; schedule price times seat count.
    pub total_price: i64,
    pub status_id: StatusId,
    pub booked_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a booking; built by the handler after seat-label
/// validation, never directly from request JSON.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub code: String,
    pub user_id: DbId,
    pub schedule_id: DbId,
    pub seat_labels: Vec<String>,
    pub total_price: i64,
}

/// A seat held by a booking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingSeat {
    pub id: DbId,
    pub booking_id: DbId,
    pub schedule_id: DbId,
    pub seat_label: String,
    pub created_at: Timestamp,
}
