//! Municipal officer entity model.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `officers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Officer {
    pub id: String,
    pub name: String,
    pub department: String,
    /// `admin` or `officer`.
    pub role: String,
    pub phone: Option<String>,
    pub active: bool,
}
