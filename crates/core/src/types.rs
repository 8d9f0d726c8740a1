/// Record identifiers are opaque strings assigned by the remote store.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (`YYYY-MM-DD` on the wire).
pub type Date = chrono::NaiveDate;
