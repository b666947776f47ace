//! Repository for the `bills` table.

use sqlx::PgPool;
use suvidha_core::billing::BILL_PAID;
use suvidha_core::types::Timestamp;

use crate::models::bill::Bill;

/// Column list for `bills` queries.
const COLUMNS: &str = "\
    id, citizen_id, utility, amount_paise, due_date, status, \
    paid_at, receipt_number, created_at";

/// Provides bill lookups and payment updates.
pub struct BillRepo;

impl BillRepo {
    /// List a citizen's bills, most recent due date first.
    pub async fn list_for_citizen(pool: &PgPool, citizen_id: &str) -> Result<Vec<Bill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bills WHERE citizen_id = $1 ORDER BY due_date DESC, id"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(citizen_id)
            .fetch_all(pool)
            .await
    }

    /// Find a bill by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bills WHERE id = $1");
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark an unpaid bill paid. Returns `None` if the bill is unknown or
    /// already paid.
    pub async fn mark_paid(
        pool: &PgPool,
        id: &str,
        paid_at: Timestamp,
        receipt_number: &str,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET status = $1, paid_at = $2, receipt_number = $3 \
             WHERE id = $4 AND status <> $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(BILL_PAID)
            .bind(paid_at)
            .bind(receipt_number)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
