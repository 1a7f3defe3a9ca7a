/// All row identifiers in the external store are UUIDs.
pub type VideoId = uuid::Uuid;
pub type SegmentId = uuid::Uuid;
pub type QuestionId = uuid::Uuid;
pub type ResponseId = uuid::Uuid;

/// Auth-provider user id.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
