//! Repository for the `buses` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::bus::{Bus, CreateBus, UpdateBus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, plate_number, model, seat_kind, seat_count, is_active, created_at, updated_at";

/// Provides CRUD operations for buses.
pub struct BusRepo;

impl BusRepo {
    /// Insert a new bus, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBus) -> Result<Bus, sqlx::Error> {
        let query = format!(
            "INSERT INTO buses (plate_number, model, seat_kind, seat_count)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bus>(&query)
            .bind(&input.plate_number)
            .bind(&input.model)
            .bind(&input.seat_kind)
            .bind(input.seat_count)
            .fetch_one(pool)
            .await
    }

    /// Find a bus by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buses WHERE id = $1");
        sqlx::query_as::<_, Bus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List buses, optionally filtered to active ones only.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Bus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM buses
             WHERE ($1 = false OR is_active = true)
             ORDER BY plate_number"
        );
        sqlx::query_as::<_, Bus>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a bus. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBus,
    ) -> Result<Option<Bus>, sqlx::Error> {
        let query = format!(
            "UPDATE buses SET
                plate_number = COALESCE($2, plate_number),
                model = COALESCE($3, model),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bus>(&query)
            .bind(id)
            .bind(&input.plate_number)
            .bind(&input.model)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a bus. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE buses SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
