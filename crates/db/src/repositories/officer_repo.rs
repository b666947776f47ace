//! Repository for the `officers` table.

use sqlx::PgPool;

use crate::models::officer::Officer;

/// Column list for `officers` queries.
const COLUMNS: &str = "id, name, department, role, phone, active";

/// Read access to officers.
pub struct OfficerRepo;

impl OfficerRepo {
    /// List all officers, ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Officer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM officers ORDER BY id");
        sqlx::query_as::<_, Officer>(&query).fetch_all(pool).await
    }

    /// Find an officer by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM officers WHERE id = $1");
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
