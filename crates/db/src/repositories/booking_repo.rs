//! Repository for the `bookings` and `booking_seats` tables.

use sqlx::PgPool;
use vexe_core::booking::{STATUS_CANCELLED, STATUS_COMPLETED, STATUS_CONFIRMED, STATUS_PENDING};
use vexe_core::types::{DbId, StatusId};

use crate::models::booking::{Booking, BookingSeat, CreateBooking};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, user_id, schedule_id, seat_count, total_price, status_id, \
                        booked_at, cancelled_at, created_at, updated_at";

/// Seat column list.
const SEAT_COLUMNS: &str = "id, booking_id, schedule_id, seat_label, created_at";

/// Provides operations for bookings and their seat holds.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking and its seat rows in one transaction.
    ///
    /// A duplicate seat on the schedule violates
    /// `uq_booking_seats_schedule_seat` and rolls the whole booking back;
    /// the caller maps that violation to a conflict response.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO bookings (code, user_id, schedule_id, seat_count, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(&input.code)
            .bind(input.user_id)
            .bind(input.schedule_id)
            .bind(input.seat_labels.len() as i32)
            .bind(input.total_price)
            .fetch_one(&mut *tx)
            .await?;

        for label in &input.seat_labels {
            sqlx::query(
                "INSERT INTO booking_seats (booking_id, schedule_id, seat_label)
                 VALUES ($1, $2, $3)",
            )
            .bind(booking.id)
            .bind(input.schedule_id)
            .bind(label)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Find a booking by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking by its human-facing code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE code = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List a user's bookings, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE user_id = $1
             ORDER BY booked_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all bookings, most recent first. Staff view.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings ORDER BY booked_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List live bookings on a schedule. Passenger manifest for staff.
    pub async fn list_for_schedule(
        pool: &PgPool,
        schedule_id: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE schedule_id = $1 AND status_id IN ($2, $3)
             ORDER BY booked_at"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(schedule_id)
            .bind(STATUS_PENDING)
            .bind(STATUS_CONFIRMED)
            .fetch_all(pool)
            .await
    }

    /// List the seats held by a booking.
    pub async fn seats_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<BookingSeat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM booking_seats
             WHERE booking_id = $1
             ORDER BY seat_label"
        );
        sqlx::query_as::<_, BookingSeat>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Set a booking's status. Returns the updated row, or `None` if no
    /// row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a booking's status only if it currently holds `from`. Returns
    /// whether a row was updated, so concurrent transitions cannot both
    /// win.
    pub async fn set_status_guarded(
        pool: &PgPool,
        id: DbId,
        from: StatusId,
        to: StatusId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings SET status_id = $3 WHERE id = $1 AND status_id = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Cancel a booking: mark it Cancelled, stamp `cancelled_at`, and
    /// delete its seat rows so the seats become bookable again. One
    /// transaction.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bookings SET status_id = $2, cancelled_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(STATUS_CANCELLED)
            .fetch_optional(&mut *tx)
            .await?;

        if booking.is_some() {
            sqlx::query("DELETE FROM booking_seats WHERE booking_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Mark Confirmed bookings on the given schedules as Completed.
    ///
    /// Runs after the schedule progress sweep; Pending bookings stay
    /// Pending so an unpaid ride remains visible to staff.
    pub async fn complete_for_schedules(
        pool: &PgPool,
        schedule_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if schedule_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE bookings SET status_id = $1
             WHERE status_id = $2 AND schedule_id = ANY($3)",
        )
        .bind(STATUS_COMPLETED)
        .bind(STATUS_CONFIRMED)
        .bind(schedule_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
