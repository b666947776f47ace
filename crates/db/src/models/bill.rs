//! Utility bill entity model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use suvidha_core::types::Timestamp;

/// A row from the `bills` table. Amounts are integer paise.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bill {
    pub id: String,
    pub citizen_id: String,
    pub utility: String,
    pub amount_paise: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub paid_at: Option<Timestamp>,
    pub receipt_number: Option<String>,
    pub created_at: Timestamp,
}
