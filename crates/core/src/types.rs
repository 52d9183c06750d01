/// Movie identifiers are UUID v7, assigned by the store on insert.
pub type MovieId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
