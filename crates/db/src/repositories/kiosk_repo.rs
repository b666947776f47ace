//! Repository for the `kiosks` table.

use sqlx::PgPool;

use crate::models::kiosk::Kiosk;

/// Column list for `kiosks` queries.
const COLUMNS: &str = "id, name, location, latitude, longitude, status, last_heartbeat";

/// Read access to kiosks.
pub struct KioskRepo;

impl KioskRepo {
    /// List all kiosks, ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Kiosk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kiosks ORDER BY id");
        sqlx::query_as::<_, Kiosk>(&query).fetch_all(pool).await
    }
}
