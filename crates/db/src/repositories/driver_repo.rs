//! Repository for the `drivers` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::driver::{CreateDriver, Driver, UpdateDriver};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, phone, license_no, is_active, created_at, updated_at";

/// Provides CRUD operations for drivers.
pub struct DriverRepo;

impl DriverRepo {
    /// Insert a new driver, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDriver) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (full_name, phone, license_no)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.license_no)
            .fetch_one(pool)
            .await
    }

    /// Find a driver by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List drivers, optionally filtered to active ones only.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drivers
             WHERE ($1 = false OR is_active = true)
             ORDER BY full_name"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a driver. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDriver,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                license_no = COALESCE($4, license_no),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.license_no)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a driver. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE drivers SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
