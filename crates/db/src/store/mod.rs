//! Repository contract shared by the Postgres store and the in-memory Mock
//! Store, and the [`Datastore`] adapter that routes between them.
//!
//! - [`PortalStore`]: the create/read/update contract.
//! - [`PgStore`]: relational implementation over [`crate::repositories`].
//! - [`MockStore`]: process-wide in-memory collections with demo seed data.
//! - [`Datastore`]: tries the database first and falls back to the Mock
//!   Store; writes go to the Mock Store and are mirrored best-effort.

mod datastore;
mod mock;
mod pg;
mod seed;

use async_trait::async_trait;
use suvidha_core::types::Timestamp;

use crate::models::bill::Bill;
use crate::models::citizen::Citizen;
use crate::models::complaint::{Complaint, ComplaintChange, ComplaintFilter, ComplaintSummary};
use crate::models::dashboard::DashboardStats;
use crate::models::kiosk::Kiosk;
use crate::models::officer::Officer;

pub use datastore::Datastore;
pub use mock::MockStore;
pub use pg::PgStore;

/// Errors returned by a [`PortalStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The relational backend failed (unreachable, constraint, decode...).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record with the same identity already exists.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Whether the write was refused because the identity is already taken,
    /// either by the store itself or by a Postgres unique violation.
    pub fn is_duplicate(&self) -> bool {
        match self {
            StoreError::Conflict(_) => true,
            StoreError::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            StoreError::Database(_) => false,
        }
    }
}

/// Which backend served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Database,
    Mock,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Database => "database",
            DataSource::Mock => "mock",
        }
    }
}

/// Create/read/update contract over the portal's entities.
///
/// Entities are never deleted. Mutations take fully computed values
/// (e.g. [`ComplaintChange`]) so every implementation stores identical data.
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// The backend this implementation represents.
    fn source(&self) -> DataSource;

    // -- Complaints ---------------------------------------------------------

    async fn insert_complaint(&self, complaint: &Complaint) -> Result<(), StoreError>;

    async fn find_complaint(&self, id: &str) -> Result<Option<Complaint>, StoreError>;

    /// Complaints matching `filter`, newest first, without timelines.
    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError>;

    /// Status counts, optionally restricted to one citizen. Ignores every
    /// other filter.
    async fn complaint_summary(
        &self,
        citizen_id: Option<&str>,
    ) -> Result<ComplaintSummary, StoreError>;

    /// Apply a computed change. Returns `None` if the complaint is unknown.
    async fn apply_complaint_change(
        &self,
        id: &str,
        change: &ComplaintChange,
    ) -> Result<Option<Complaint>, StoreError>;

    // -- Citizens & officers ------------------------------------------------

    async fn insert_citizen(&self, citizen: &Citizen) -> Result<(), StoreError>;

    async fn find_citizen(&self, id: &str) -> Result<Option<Citizen>, StoreError>;

    async fn find_citizen_by_phone(&self, phone: &str) -> Result<Option<Citizen>, StoreError>;

    async fn list_officers(&self) -> Result<Vec<Officer>, StoreError>;

    async fn find_officer(&self, id: &str) -> Result<Option<Officer>, StoreError>;

    // -- Kiosks & bills -----------------------------------------------------

    async fn list_kiosks(&self) -> Result<Vec<Kiosk>, StoreError>;

    async fn list_bills(&self, citizen_id: &str) -> Result<Vec<Bill>, StoreError>;

    async fn find_bill(&self, id: &str) -> Result<Option<Bill>, StoreError>;

    /// Mark an unpaid bill paid. A bill that is already paid yields
    /// [`StoreError::Conflict`]; an unknown bill yields `None`.
    async fn mark_bill_paid(
        &self,
        id: &str,
        paid_at: Timestamp,
        receipt_number: &str,
    ) -> Result<Option<Bill>, StoreError>;

    // -- Aggregates ---------------------------------------------------------

    /// Full dashboard aggregates; `today_start` bounds `resolved_today`.
    async fn dashboard_stats(&self, today_start: Timestamp) -> Result<DashboardStats, StoreError>;
}
