/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Status lookup-table ids are PostgreSQL SMALLSERIAL.
pub type StatusId = i16;

/// All persisted timestamps are UTC instants.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
