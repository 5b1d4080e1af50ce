//! Repository for the `feedback` table.

use sqlx::PgPool;
use vexe_core::types::DbId;

use crate::models::feedback::{CreateFeedback, Feedback};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, route_id, rating, comment, created_at, updated_at";

/// Provides operations for passenger feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert feedback from a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (user_id, route_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(user_id)
            .bind(input.route_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a feedback row by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List feedback, optionally restricted to one route, newest first.
    pub async fn list(
        pool: &PgPool,
        route_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback
             WHERE ($1::bigint IS NULL OR route_id = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(route_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a feedback row. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
