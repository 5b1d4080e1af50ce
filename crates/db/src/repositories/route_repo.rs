//! Repository for the `routes` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::route::{CreateRoute, Route, UpdateRoute};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, origin_province_id, destination_province_id, distance_km, \
                        duration_minutes, is_active, created_at, updated_at";

/// Provides CRUD operations for routes.
pub struct RouteRepo;

impl RouteRepo {
    /// Insert a new route, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRoute) -> Result<Route, sqlx::Error> {
        let query = format!(
            "INSERT INTO routes (origin_province_id, destination_province_id, distance_km, duration_minutes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(input.origin_province_id)
            .bind(input.destination_province_id)
            .bind(input.distance_km)
            .bind(input.duration_minutes)
            .fetch_one(pool)
            .await
    }

    /// Find a route by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Route>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routes WHERE id = $1");
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List routes, optionally filtered to active ones only.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Route>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routes
             WHERE ($1 = false OR is_active = true)
             ORDER BY id"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a route. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoute,
    ) -> Result<Option<Route>, sqlx::Error> {
        let query = format!(
            "UPDATE routes SET
                origin_province_id = COALESCE($2, origin_province_id),
                destination_province_id = COALESCE($3, destination_province_id),
                distance_km = COALESCE($4, distance_km),
                duration_minutes = COALESCE($5, duration_minutes),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .bind(input.origin_province_id)
            .bind(input.destination_province_id)
            .bind(input.distance_km)
            .bind(input.duration_minutes)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a route. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE routes SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
