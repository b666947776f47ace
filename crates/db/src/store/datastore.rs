use std::sync::Arc;

use suvidha_core::types::Timestamp;

use super::{DataSource, MockStore, PgStore, PortalStore, StoreError};
use crate::models::bill::Bill;
use crate::models::citizen::Citizen;
use crate::models::complaint::{
    Complaint, ComplaintChange, ComplaintFilter, ComplaintPage, NewComplaint,
};
use crate::models::dashboard::DashboardStats;
use crate::models::kiosk::Kiosk;
use crate::models::officer::Officer;
use crate::DbPool;

/// Upper bound on renumbering attempts for one registration.
const MAX_ID_ATTEMPTS: usize = 256;

/// Try the primary store; on error log a warning and serve from the Mock
/// Store instead.
macro_rules! read_through {
    ($self:ident, $op:literal, $store:ident => $call:expr) => {{
        let mut served = None;
        if let Some($store) = $self.primary.as_deref() {
            match $call.await {
                Ok(value) => served = Some(value),
                Err(e) => tracing::warn!(
                    operation = $op,
                    error = %e,
                    "Database read failed, serving from mock store",
                ),
            }
        }
        match served {
            Some(value) => Ok(value),
            None => {
                let $store: &MockStore = &$self.mock;
                $call.await
            }
        }
    }};
}

/// Like [`read_through!`] for lookups: a primary miss also falls through to
/// the Mock Store, which may hold records the database never received.
macro_rules! find_through {
    ($self:ident, $op:literal, $store:ident => $call:expr) => {{
        let mut found = None;
        if let Some($store) = $self.primary.as_deref() {
            match $call.await {
                Ok(value) => found = value,
                Err(e) => tracing::warn!(
                    operation = $op,
                    error = %e,
                    "Database lookup failed, checking mock store",
                ),
            }
        }
        match found {
            Some(value) => Ok(Some(value)),
            None => {
                let $store: &MockStore = &$self.mock;
                $call.await
            }
        }
    }};
}

/// Best-effort copy of a write that already landed in the Mock Store.
/// Evaluates to the primary's result, or `None` when there is no primary or
/// the write failed.
macro_rules! mirror {
    ($self:ident, $op:literal, $store:ident => $call:expr) => {{
        match $self.primary.as_deref() {
            Some($store) => match $call.await {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(
                        operation = $op,
                        error = %e,
                        "Database mirror write failed, mock store remains authoritative",
                    );
                    None
                }
            },
            None => None,
        }
    }};
}

/// Routes every data operation between the relational store and the
/// process-wide Mock Store.
///
/// Reads are database-first with a silent fallback. Writes always land in
/// the Mock Store first, so a record is visible to every portal even if the
/// database rejects it, and are then mirrored to the database.
#[derive(Clone)]
pub struct Datastore {
    mock: Arc<MockStore>,
    primary: Option<Arc<dyn PortalStore>>,
    pool: Option<DbPool>,
}

impl Datastore {
    /// Build a datastore over the shared Mock Store and an optional pool.
    pub fn new(mock: Arc<MockStore>, pool: Option<DbPool>) -> Self {
        let primary = pool
            .clone()
            .map(|pool| Arc::new(PgStore::new(pool)) as Arc<dyn PortalStore>);
        Self { mock, primary, pool }
    }

    /// A datastore with no database behind it.
    pub fn mock_only(mock: Arc<MockStore>) -> Self {
        Self {
            mock,
            primary: None,
            pool: None,
        }
    }

    /// A datastore over an arbitrary primary store.
    pub fn with_primary(mock: Arc<MockStore>, primary: Arc<dyn PortalStore>) -> Self {
        Self {
            mock,
            primary: Some(primary),
            pool: None,
        }
    }

    pub fn mock(&self) -> &Arc<MockStore> {
        &self.mock
    }

    pub fn pool(&self) -> Option<&DbPool> {
        self.pool.as_ref()
    }

    /// The backend reads are attempted against first.
    pub fn data_source(&self) -> DataSource {
        self.primary
            .as_ref()
            .map_or(DataSource::Mock, |primary| primary.source())
    }

    /// Whether the database answers a trivial query. `false` without a pool.
    pub async fn primary_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => crate::health_check(pool).await.is_ok(),
            None => false,
        }
    }

    // -- Complaints ---------------------------------------------------------

    /// Register a complaint. The identifier is allocated by the Mock Store.
    ///
    /// If the database already holds that identifier (rows from an earlier
    /// run), the Mock Store copy is renumbered and the insert retried, so a
    /// database-first lookup never resolves the id to a different complaint.
    pub async fn register_complaint(
        &self,
        input: NewComplaint,
        now: Timestamp,
    ) -> Result<Complaint, StoreError> {
        let mut complaint = self.mock.create_complaint(input, now).await;
        let Some(primary) = self.primary.as_deref() else {
            return Ok(complaint);
        };

        for _ in 0..MAX_ID_ATTEMPTS {
            match primary.insert_complaint(&complaint).await {
                Ok(()) => break,
                Err(e) if e.is_duplicate() => {
                    let taken = complaint.id.clone();
                    let Some(renumbered) = self.mock.renumber_complaint(&taken, now).await else {
                        break;
                    };
                    tracing::info!(
                        %taken,
                        complaint_id = %renumbered.id,
                        "Complaint id already held by the database, renumbered",
                    );
                    complaint = renumbered;
                }
                Err(e) => {
                    tracing::warn!(
                        operation = "insert_complaint",
                        error = %e,
                        "Database mirror write failed, mock store remains authoritative",
                    );
                    break;
                }
            }
        }
        Ok(complaint)
    }

    pub async fn find_complaint(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        find_through!(self, "find_complaint", store => store.find_complaint(id))
    }

    /// A page of complaints plus the status summary, both from the same
    /// backend. The summary honours only the citizen restriction.
    pub async fn list_complaints(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<ComplaintPage, StoreError> {
        read_through!(self, "list_complaints", store => load_page(store, filter))
    }

    /// Apply a computed change to both stores.
    ///
    /// Returns the Mock Store's copy, or the database's when only the
    /// database knows the complaint.
    pub async fn apply_complaint_change(
        &self,
        id: &str,
        change: &ComplaintChange,
    ) -> Result<Option<Complaint>, StoreError> {
        let local = self.mock.apply_complaint_change(id, change).await?;
        let remote = mirror!(self, "apply_complaint_change", store => store.apply_complaint_change(id, change));
        Ok(local.or(remote.flatten()))
    }

    // -- Citizens -----------------------------------------------------------

    /// Resolve the citizen behind a verified phone number, registering one on
    /// first login.
    pub async fn citizen_login(&self, phone: &str, now: Timestamp) -> Result<Citizen, StoreError> {
        if let Some(primary) = self.primary.as_deref() {
            match primary.find_citizen_by_phone(phone).await {
                Ok(Some(citizen)) => return Ok(citizen),
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    operation = "find_citizen_by_phone",
                    error = %e,
                    "Database lookup failed, checking mock store",
                ),
            }
        }

        let (citizen, created) = self.mock.find_or_create_citizen(phone, now).await;
        if created {
            tracing::info!(citizen_id = %citizen.id, "Registered citizen on first login");
            mirror!(self, "insert_citizen", store => store.insert_citizen(&citizen));
        }
        Ok(citizen)
    }

    pub async fn find_citizen(&self, id: &str) -> Result<Option<Citizen>, StoreError> {
        find_through!(self, "find_citizen", store => store.find_citizen(id))
    }

    // -- Officers & kiosks --------------------------------------------------

    pub async fn list_officers(&self) -> Result<Vec<Officer>, StoreError> {
        read_through!(self, "list_officers", store => store.list_officers())
    }

    pub async fn find_officer(&self, id: &str) -> Result<Option<Officer>, StoreError> {
        find_through!(self, "find_officer", store => store.find_officer(id))
    }

    pub async fn list_kiosks(&self) -> Result<Vec<Kiosk>, StoreError> {
        read_through!(self, "list_kiosks", store => store.list_kiosks())
    }

    // -- Bills --------------------------------------------------------------

    pub async fn list_bills(&self, citizen_id: &str) -> Result<Vec<Bill>, StoreError> {
        read_through!(self, "list_bills", store => store.list_bills(citizen_id))
    }

    pub async fn find_bill(&self, id: &str) -> Result<Option<Bill>, StoreError> {
        find_through!(self, "find_bill", store => store.find_bill(id))
    }

    /// Mark a bill paid in both stores.
    ///
    /// Fails with [`StoreError::Conflict`] if the bill is already paid in the
    /// Mock Store, or in the database when only the database knows it.
    pub async fn pay_bill(
        &self,
        id: &str,
        paid_at: Timestamp,
        receipt_number: &str,
    ) -> Result<Option<Bill>, StoreError> {
        let local = self.mock.mark_bill_paid(id, paid_at, receipt_number).await?;
        let remote = match self.primary.as_deref() {
            Some(store) => match store.mark_bill_paid(id, paid_at, receipt_number).await {
                Ok(bill) => bill,
                Err(e @ StoreError::Conflict(_)) if local.is_none() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        operation = "mark_bill_paid",
                        error = %e,
                        "Database mirror write failed, mock store remains authoritative",
                    );
                    None
                }
            },
            None => None,
        };
        Ok(local.or(remote))
    }

    // -- Aggregates ---------------------------------------------------------

    pub async fn dashboard_stats(&self, today_start: Timestamp) -> Result<DashboardStats, StoreError> {
        read_through!(self, "dashboard_stats", store => store.dashboard_stats(today_start))
    }
}

async fn load_page(
    store: &dyn PortalStore,
    filter: &ComplaintFilter,
) -> Result<ComplaintPage, StoreError> {
    let complaints = store.list_complaints(filter).await?;
    let summary = store.complaint_summary(filter.citizen_id.as_deref()).await?;
    Ok(ComplaintPage {
        complaints,
        summary,
    })
}
