//! Repository for the `audit_logs` table.

use sqlx::PgConnection;

use crate::models::audit::CreateAuditLog;

/// Append-only writes to the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert one audit entry on an open connection (usually a transaction).
    pub async fn insert(conn: &mut PgConnection, entry: &CreateAuditLog) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs \
                (actor_id, actor_role, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&entry.actor_id)
        .bind(&entry.actor_role)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.details)
        .execute(conn)
        .await?;
        Ok(())
    }
}
