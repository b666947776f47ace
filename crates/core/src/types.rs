/// Entity identifiers are human-readable strings (`CMP-2026-000001`, `CIT-0001`, ...).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
