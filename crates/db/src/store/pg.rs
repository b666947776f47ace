use async_trait::async_trait;
use suvidha_core::types::Timestamp;

use super::{DataSource, PortalStore, StoreError};
use crate::models::bill::Bill;
use crate::models::citizen::Citizen;
use crate::models::complaint::{Complaint, ComplaintChange, ComplaintFilter, ComplaintSummary};
use crate::models::dashboard::DashboardStats;
use crate::models::kiosk::Kiosk;
use crate::models::officer::Officer;
use crate::repositories::{
    BillRepo, CitizenRepo, ComplaintRepo, DashboardRepo, KioskRepo, OfficerRepo,
};
use crate::DbPool;

/// Postgres-backed [`PortalStore`]. A thin newtype over the pool that
/// delegates to the repository structs.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortalStore for PgStore {
    fn source(&self) -> DataSource {
        DataSource::Database
    }

    async fn insert_complaint(&self, complaint: &Complaint) -> Result<(), StoreError> {
        ComplaintRepo::create(&self.pool, complaint).await?;
        Ok(())
    }

    async fn find_complaint(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        Ok(ComplaintRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        Ok(ComplaintRepo::list_filtered(&self.pool, filter).await?)
    }

    async fn complaint_summary(
        &self,
        citizen_id: Option<&str>,
    ) -> Result<ComplaintSummary, StoreError> {
        let counts = ComplaintRepo::count_by_status(&self.pool, citizen_id).await?;
        Ok(ComplaintSummary::from_counts(
            counts.iter().map(|(status, count)| (status.as_str(), *count)),
        ))
    }

    async fn apply_complaint_change(
        &self,
        id: &str,
        change: &ComplaintChange,
    ) -> Result<Option<Complaint>, StoreError> {
        Ok(ComplaintRepo::apply_change(&self.pool, id, change).await?)
    }

    async fn insert_citizen(&self, citizen: &Citizen) -> Result<(), StoreError> {
        CitizenRepo::create(&self.pool, citizen).await?;
        Ok(())
    }

    async fn find_citizen(&self, id: &str) -> Result<Option<Citizen>, StoreError> {
        Ok(CitizenRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_citizen_by_phone(&self, phone: &str) -> Result<Option<Citizen>, StoreError> {
        Ok(CitizenRepo::find_by_phone(&self.pool, phone).await?)
    }

    async fn list_officers(&self) -> Result<Vec<Officer>, StoreError> {
        Ok(OfficerRepo::list(&self.pool).await?)
    }

    async fn find_officer(&self, id: &str) -> Result<Option<Officer>, StoreError> {
        Ok(OfficerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_kiosks(&self) -> Result<Vec<Kiosk>, StoreError> {
        Ok(KioskRepo::list(&self.pool).await?)
    }

    async fn list_bills(&self, citizen_id: &str) -> Result<Vec<Bill>, StoreError> {
        Ok(BillRepo::list_for_citizen(&self.pool, citizen_id).await?)
    }

    async fn find_bill(&self, id: &str) -> Result<Option<Bill>, StoreError> {
        Ok(BillRepo::find_by_id(&self.pool, id).await?)
    }

    async fn mark_bill_paid(
        &self,
        id: &str,
        paid_at: Timestamp,
        receipt_number: &str,
    ) -> Result<Option<Bill>, StoreError> {
        if let Some(bill) = BillRepo::mark_paid(&self.pool, id, paid_at, receipt_number).await? {
            return Ok(Some(bill));
        }
        match BillRepo::find_by_id(&self.pool, id).await? {
            Some(_) => Err(StoreError::Conflict(format!("Bill {id} is already paid"))),
            None => Ok(None),
        }
    }

    async fn dashboard_stats(&self, today_start: Timestamp) -> Result<DashboardStats, StoreError> {
        Ok(DashboardRepo::stats(&self.pool, today_start).await?)
    }
}
