/// All entity primary keys are PostgreSQL UUIDs.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Invoice creation dates have day resolution.
pub type InvoiceDate = chrono::NaiveDate;
