//! Repository for the `schedules` table.
//!
//! All timestamps here are UTC. Local-day searches receive the
//! precomputed UTC bounds of the Vietnam-local day from the caller.

use sqlx::PgPool;
use vexe_core::schedule::{STATUS_COMPLETED, STATUS_DEPARTED, STATUS_SCHEDULED};
use vexe_core::types::{DbId, StatusId, Timestamp};

use crate::models::schedule::{
    CreateSchedule, Schedule, ScheduleFilter, ScheduleSearchRow, UpdateSchedule,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pattern_id, route_id, bus_id, driver_id, departure_at, arrival_at, \
                        price, status_id, created_at, updated_at";

/// Search projection: schedule columns joined with route, provinces, and
/// bus, plus the live seat count.
const SEARCH_COLUMNS: &str = "s.id, s.route_id, s.bus_id, s.driver_id, s.departure_at, \
    s.arrival_at, s.price, s.status_id, \
    po.name AS origin_province, pd.name AS destination_province, \
    b.plate_number, b.seat_kind, b.seat_count, \
    (SELECT COUNT(*) FROM booking_seats bs WHERE bs.schedule_id = s.id) AS booked_seats";

/// Provides CRUD and search operations for schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a new schedule, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSchedule) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules
                (pattern_id, route_id, bus_id, driver_id, departure_at, arrival_at, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(input.pattern_id)
            .bind(input.route_id)
            .bind(input.bus_id)
            .bind(input.driver_id)
            .bind(input.departure_at)
            .bind(input.arrival_at)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Insert a pattern-generated schedule, skipping duplicates.
    ///
    /// Regeneration over an overlapping date range is idempotent: an
    /// existing (pattern, departure) pair leaves the row untouched.
    /// Returns `true` if a row was actually inserted.
    pub async fn insert_generated(
        pool: &PgPool,
        input: &CreateSchedule,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO schedules
                (pattern_id, route_id, bus_id, driver_id, departure_at, arrival_at, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_schedules_pattern_departure DO NOTHING",
        )
        .bind(input.pattern_id)
        .bind(input.route_id)
        .bind(input.bus_id)
        .bind(input.driver_id)
        .bind(input.departure_at)
        .bind(input.arrival_at)
        .bind(input.price)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a schedule by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = $1");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a schedule by ID with joined route/bus presentation data.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScheduleSearchRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SEARCH_COLUMNS}
             FROM schedules s
             JOIN routes r ON r.id = s.route_id
             JOIN provinces po ON po.id = r.origin_province_id
             JOIN provinces pd ON pd.id = r.destination_province_id
             JOIN buses b ON b.id = s.bus_id
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, ScheduleSearchRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search schedules with optional filters, ordered by departure.
    ///
    /// Each filter binds as a nullable parameter; a `NULL` bind disables
    /// that clause. `departure_between` carries the UTC bounds of one
    /// Vietnam-local day and matches inclusively on both ends.
    pub async fn search(
        pool: &PgPool,
        filter: &ScheduleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScheduleSearchRow>, sqlx::Error> {
        let (day_start, day_end) = match filter.departure_between {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        let query = format!(
            "SELECT {SEARCH_COLUMNS}
             FROM schedules s
             JOIN routes r ON r.id = s.route_id
             JOIN provinces po ON po.id = r.origin_province_id
             JOIN provinces pd ON pd.id = r.destination_province_id
             JOIN buses b ON b.id = s.bus_id
             WHERE ($1::bigint IS NULL OR s.route_id = $1)
               AND ($2::bigint IS NULL OR r.origin_province_id = $2)
               AND ($3::bigint IS NULL OR r.destination_province_id = $3)
               AND ($4::timestamptz IS NULL OR s.departure_at BETWEEN $4 AND $5)
             ORDER BY s.departure_at
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, ScheduleSearchRow>(&query)
            .bind(filter.route_id)
            .bind(filter.origin_province_id)
            .bind(filter.destination_province_id)
            .bind(day_start)
            .bind(day_end)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a schedule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchedule,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!(
            "UPDATE schedules SET
                bus_id = COALESCE($2, bus_id),
                driver_id = COALESCE($3, driver_id),
                departure_at = COALESCE($4, departure_at),
                arrival_at = COALESCE($5, arrival_at),
                price = COALESCE($6, price)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .bind(input.bus_id)
            .bind(input.driver_id)
            .bind(input.departure_at)
            .bind(input.arrival_at)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }

    /// Set a schedule's status. Returns the updated row, or `None` if no
    /// row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!(
            "UPDATE schedules SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// List seat labels currently held on a schedule.
    pub async fn taken_seats(pool: &PgPool, id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT seat_label FROM booking_seats WHERE schedule_id = $1 ORDER BY seat_label",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(label,)| label).collect())
    }

    /// Progress sweep: mark schedules whose departure has passed as
    /// Departed. Returns the ids of affected schedules.
    pub async fn mark_departed(pool: &PgPool, now: Timestamp) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE schedules SET status_id = $1
             WHERE status_id = $2 AND departure_at <= $3 AND arrival_at > $3
             RETURNING id",
        )
        .bind(STATUS_DEPARTED)
        .bind(STATUS_SCHEDULED)
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Progress sweep: mark schedules whose arrival has passed as
    /// Completed. Also catches Scheduled rows the Departed sweep never
    /// saw (e.g. after downtime). Returns the ids of affected schedules.
    pub async fn mark_completed(pool: &PgPool, now: Timestamp) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE schedules SET status_id = $1
             WHERE status_id IN ($2, $3) AND arrival_at <= $4
             RETURNING id",
        )
        .bind(STATUS_COMPLETED)
        .bind(STATUS_SCHEDULED)
        .bind(STATUS_DEPARTED)
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
