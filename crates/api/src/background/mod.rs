//! Background jobs spawned at server startup.

pub mod schedule_progress;
