//! Audit log DTOs.
//!
//! Audit rows are append-only and only ever written to the database; the
//! in-memory store keeps the equivalent information in complaint timelines.

use serde::Serialize;

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAuditLog {
    pub actor_id: Option<String>,
    pub actor_role: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub details: serde_json::Value,
}
