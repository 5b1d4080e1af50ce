//! Repository for the `stops` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::stop::{CreateStop, Stop, UpdateStop};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, route_id, name, address, sequence_index, is_pickup, is_dropoff, \
                        created_at, updated_at";

/// Provides CRUD operations for route stops.
pub struct StopRepo;

impl StopRepo {
    /// Insert a new stop on a route, returning the created row.
    pub async fn create(
        pool: &PgPool,
        route_id: DbId,
        input: &CreateStop,
    ) -> Result<Stop, sqlx::Error> {
        let query = format!(
            "INSERT INTO stops (route_id, name, address, sequence_index, is_pickup, is_dropoff)
             VALUES ($1, $2, $3, $4, COALESCE($5, true), COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stop>(&query)
            .bind(route_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.sequence_index)
            .bind(input.is_pickup)
            .bind(input.is_dropoff)
            .fetch_one(pool)
            .await
    }

    /// Find a stop by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stops WHERE id = $1");
        sqlx::query_as::<_, Stop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a route's stops in travel order.
    pub async fn list_for_route(pool: &PgPool, route_id: DbId) -> Result<Vec<Stop>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stops WHERE route_id = $1 ORDER BY sequence_index"
        );
        sqlx::query_as::<_, Stop>(&query)
            .bind(route_id)
            .fetch_all(pool)
            .await
    }

    /// Update a stop. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStop,
    ) -> Result<Option<Stop>, sqlx::Error> {
        let query = format!(
            "UPDATE stops SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                sequence_index = COALESCE($4, sequence_index),
                is_pickup = COALESCE($5, is_pickup),
                is_dropoff = COALESCE($6, is_dropoff)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stop>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.sequence_index)
            .bind(input.is_pickup)
            .bind(input.is_dropoff)
            .fetch_optional(pool)
            .await
    }

    /// Delete a stop. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
