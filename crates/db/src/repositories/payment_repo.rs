//! Repository for the `payments` table.

use sqlx::PgPool;
use vexe_core::types::{DbId, StatusId};

use crate::models::payment::{CreatePayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, booking_id, payment_ref, amount, method, status_id, paid_at, \
                        created_at, updated_at";

/// Provides operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new pending payment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (booking_id, payment_ref, amount, method)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.booking_id)
            .bind(&input.payment_ref)
            .bind(input.amount)
            .bind(&input.method)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a booking's payments, most recent first.
    pub async fn list_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE booking_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Transition a payment out of the `from` status, stamping `paid_at`
    /// when the target status is Paid.
    ///
    /// Returns `None` if the payment does not exist or is not currently
    /// in the expected status, so concurrent confirmations cannot both
    /// win.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: StatusId,
        to: StatusId,
        stamp_paid_at: bool,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                status_id = $3,
                paid_at = CASE WHEN $4 THEN NOW() ELSE paid_at END
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .bind(stamp_paid_at)
            .fetch_optional(pool)
            .await
    }
}
