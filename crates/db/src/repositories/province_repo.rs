//! Repository for the `provinces` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::province::{CreateProvince, Province, UpdateProvince};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at, updated_at";

/// Provides CRUD operations for provinces.
pub struct ProvinceRepo;

impl ProvinceRepo {
    /// Insert a new province, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProvince) -> Result<Province, sqlx::Error> {
        let query = format!(
            "INSERT INTO provinces (name, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Province>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    /// Find a province by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Province>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM provinces WHERE id = $1");
        sqlx::query_as::<_, Province>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all provinces alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Province>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM provinces ORDER BY name");
        sqlx::query_as::<_, Province>(&query).fetch_all(pool).await
    }

    /// Update a province. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProvince,
    ) -> Result<Option<Province>, sqlx::Error> {
        let query = format!(
            "UPDATE provinces SET
                name = COALESCE($2, name),
                code = COALESCE($3, code)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Province>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_optional(pool)
            .await
    }

    /// Delete a province. Returns `true` if a row was deleted.
    ///
    /// Fails with a foreign-key violation while routes reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM provinces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
