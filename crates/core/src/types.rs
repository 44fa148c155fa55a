/// Server-side sequence ids (transaction numbers, item ids, step ids).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
