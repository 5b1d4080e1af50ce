//! Time-driven schedule status progression.
//!
//! Spawns a background loop that advances schedule statuses as the clock
//! passes their UTC instants: Scheduled becomes Departed once
//! `departure_at` passes, and Departed (or a Scheduled row the previous
//! sweep missed) becomes Completed once `arrival_at` passes. Confirmed
//! bookings on completed schedules are closed out in the same sweep.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use vexe_db::repositories::{BookingRepo, ScheduleRepo};

/// Default sweep interval in seconds.
const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Run the schedule progress loop until `cancel` is triggered.
///
/// The interval is overridable via `SCHEDULE_PROGRESS_INTERVAL_SECS`.
/// All comparisons happen in UTC; local time never enters this path.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("SCHEDULE_PROGRESS_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    tracing::info!(interval_secs, "Schedule progress job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Schedule progress job stopping");
                break;
            }
            _ = interval.tick() => {
                sweep(&pool).await;
            }
        }
    }
}

/// One progress sweep: complete arrivals first so a schedule whose whole
/// trip elapsed between ticks goes straight to Completed.
async fn sweep(pool: &PgPool) {
    let now = Utc::now();

    let completed = match ScheduleRepo::mark_completed(pool, now).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "Schedule progress: completion sweep failed");
            return;
        }
    };
    if !completed.is_empty() {
        tracing::info!(count = completed.len(), "Schedules marked completed");
        match BookingRepo::complete_for_schedules(pool, &completed).await {
            Ok(closed) if closed > 0 => {
                tracing::info!(closed, "Confirmed bookings completed");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Schedule progress: booking completion failed");
            }
        }
    }

    match ScheduleRepo::mark_departed(pool, now).await {
        Ok(ids) if !ids.is_empty() => {
            tracing::info!(count = ids.len(), "Schedules marked departed");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Schedule progress: departure sweep failed");
        }
    }
}
