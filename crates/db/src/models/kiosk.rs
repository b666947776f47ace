//! Service kiosk entity model.

use serde::Serialize;
use sqlx::FromRow;
use suvidha_core::types::Timestamp;

pub const KIOSK_ONLINE: &str = "online";
pub const KIOSK_OFFLINE: &str = "offline";
pub const KIOSK_MAINTENANCE: &str = "maintenance";

/// A row from the `kiosks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Kiosk {
    pub id: String,
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub last_heartbeat: Option<Timestamp>,
}
