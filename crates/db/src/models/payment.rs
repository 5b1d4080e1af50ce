//! Payment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vexe_core::types::{DbId, StatusId, Timestamp};

/// Payment methods accepted by the `ck_payments_method` constraint.
pub const PAYMENT_METHODS: &[&str] = &["cash", "bank_transfer", "card"];

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub booking_id: DbId,
    /// Human-facing reference (`PM` + 10 alphanumerics).
    pub payment_ref: String,
    pub amount: i64,
    pub method: String,
    pub status_id: StatusId,
    /// Null until the payment is confirmed.
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a payment; everything else is derived from
/// the booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub method: String,
}

/// DTO for inserting a payment row.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub booking_id: DbId,
    pub payment_ref: String,
    pub amount: i64,
    pub method: String,
}
