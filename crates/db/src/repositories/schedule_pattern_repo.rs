//! Repository for the `schedule_patterns` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::schedule_pattern::{
    CreateSchedulePattern, SchedulePattern, UpdateSchedulePattern,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, route_id, bus_id, driver_id, departure_time, duration_minutes, \
                        days_of_week, price, is_active, created_at, updated_at";

/// Provides CRUD operations for schedule patterns.
pub struct SchedulePatternRepo;

impl SchedulePatternRepo {
    /// Insert a new pattern, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSchedulePattern,
    ) -> Result<SchedulePattern, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedule_patterns
                (route_id, bus_id, driver_id, departure_time, duration_minutes, days_of_week, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchedulePattern>(&query)
            .bind(input.route_id)
            .bind(input.bus_id)
            .bind(input.driver_id)
            .bind(input.departure_time)
            .bind(input.duration_minutes)
            .bind(input.days_of_week)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a pattern by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SchedulePattern>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedule_patterns WHERE id = $1");
        sqlx::query_as::<_, SchedulePattern>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List patterns, optionally filtered to active ones only.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
    ) -> Result<Vec<SchedulePattern>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedule_patterns
             WHERE ($1 = false OR is_active = true)
             ORDER BY id"
        );
        sqlx::query_as::<_, SchedulePattern>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a pattern. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchedulePattern,
    ) -> Result<Option<SchedulePattern>, sqlx::Error> {
        let query = format!(
            "UPDATE schedule_patterns SET
                route_id = COALESCE($2, route_id),
                bus_id = COALESCE($3, bus_id),
                driver_id = COALESCE($4, driver_id),
                departure_time = COALESCE($5, departure_time),
                duration_minutes = COALESCE($6, duration_minutes),
                days_of_week = COALESCE($7, days_of_week),
                price = COALESCE($8, price),
                is_active = COALESCE($9, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchedulePattern>(&query)
            .bind(id)
            .bind(input.route_id)
            .bind(input.bus_id)
            .bind(input.driver_id)
            .bind(input.departure_time)
            .bind(input.duration_minutes)
            .bind(input.days_of_week)
            .bind(input.price)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a pattern. Returns `true` if the row was updated.
    ///
    /// Already-generated schedules are untouched.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE schedule_patterns SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
