use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Datelike;
use suvidha_core::billing::{BILL_OVERDUE, BILL_PAID, BILL_PENDING};
use suvidha_core::complaint::format_complaint_id;
use suvidha_core::types::Timestamp;
use tokio::sync::RwLock;

use super::{seed, DataSource, PortalStore, StoreError};
use crate::models::bill::Bill;
use crate::models::citizen::{format_citizen_id, Citizen};
use crate::models::complaint::{
    Complaint, ComplaintChange, ComplaintFilter, ComplaintSummary, NewComplaint,
};
use crate::models::dashboard::{tally, DashboardStats};
use crate::models::kiosk::{Kiosk, KIOSK_ONLINE};
use crate::models::officer::Officer;

/// The in-memory collections.
#[derive(Debug, Default)]
pub(super) struct MockData {
    pub citizens: Vec<Citizen>,
    pub officers: Vec<Officer>,
    pub complaints: Vec<Complaint>,
    pub kiosks: Vec<Kiosk>,
    pub bills: Vec<Bill>,
    /// Complaint ids the database already holds for another record.
    pub reserved_complaint_ids: HashSet<String>,
}

impl MockData {
    /// First free `CMP-<year>-<n>` at or after `len + 1`, skipping ids held
    /// here or reserved by the database.
    fn next_complaint_id(&self, year: i32) -> String {
        let mut sequence = self.complaints.len() as u64 + 1;
        loop {
            let id = format_complaint_id(year, sequence);
            let taken = self.reserved_complaint_ids.contains(&id)
                || self.complaints.iter().any(|c| c.id == id);
            if !taken {
                return id;
            }
            sequence += 1;
        }
    }
}

/// Process-wide in-memory store, used as the system of record when the
/// database is unreachable and as the authoritative copy for cross-portal
/// visibility.
///
/// All collections sit behind one `RwLock`; identifier allocation happens
/// under the write lock so concurrent registrations never collide.
#[derive(Debug)]
pub struct MockStore {
    data: RwLock<MockData>,
}

impl MockStore {
    /// An empty store.
    pub fn empty() -> Self {
        Self {
            data: RwLock::new(MockData::default()),
        }
    }

    /// A store pre-populated with demo citizens, officers, kiosks, bills and
    /// complaints relative to `now`.
    pub fn seeded(now: Timestamp) -> Self {
        Self {
            data: RwLock::new(seed::demo_data(now)),
        }
    }

    /// Register a new complaint, allocating `CMP-<year>-<len + 1>` under the
    /// write lock. Skips forward if that identifier is already taken.
    pub async fn create_complaint(&self, input: NewComplaint, now: Timestamp) -> Complaint {
        let mut data = self.data.write().await;
        let id = data.next_complaint_id(now.year());

        let complaint = Complaint::register(id, input, now);
        data.complaints.push(complaint.clone());
        complaint
    }

    /// Give the complaint stored as `taken` a fresh identifier and never hand
    /// `taken` out again. Returns the renumbered complaint, or `None` if no
    /// complaint has that id.
    pub async fn renumber_complaint(&self, taken: &str, now: Timestamp) -> Option<Complaint> {
        let mut data = self.data.write().await;
        data.reserved_complaint_ids.insert(taken.to_string());
        let id = data.next_complaint_id(now.year());

        let complaint = data.complaints.iter_mut().find(|c| c.id == taken)?;
        complaint.id = id.clone();
        for update in &mut complaint.updates {
            update.complaint_id = id.clone();
        }
        Some(complaint.clone())
    }

    /// Return the citizen registered with `phone`, creating one if needed.
    ///
    /// The boolean is `true` when a new citizen was created.
    pub async fn find_or_create_citizen(&self, phone: &str, now: Timestamp) -> (Citizen, bool) {
        let mut data = self.data.write().await;

        if let Some(existing) = data.citizens.iter().find(|c| c.phone == phone) {
            return (existing.clone(), false);
        }

        let mut sequence = data.citizens.len() as u64 + 1;
        let mut id = format_citizen_id(sequence);
        while data.citizens.iter().any(|c| c.id == id) {
            sequence += 1;
            id = format_citizen_id(sequence);
        }

        let citizen = Citizen::first_login(id, phone, now);
        data.citizens.push(citizen.clone());
        (citizen, true)
    }

    /// Number of complaints currently held.
    pub async fn complaint_count(&self) -> usize {
        self.data.read().await.complaints.len()
    }
}

#[async_trait]
impl PortalStore for MockStore {
    fn source(&self) -> DataSource {
        DataSource::Mock
    }

    async fn insert_complaint(&self, complaint: &Complaint) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.complaints.iter().any(|c| c.id == complaint.id) {
            return Err(StoreError::Conflict(format!(
                "Complaint {} already exists",
                complaint.id
            )));
        }
        data.complaints.push(complaint.clone());
        Ok(())
    }

    async fn find_complaint(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        let data = self.data.read().await;
        Ok(data.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        let data = self.data.read().await;
        let mut matching: Vec<&Complaint> =
            data.complaints.iter().filter(|c| filter.matches(c)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit() as usize)
            .map(|c| Complaint {
                updates: Vec::new(),
                ..c.clone()
            })
            .collect())
    }

    async fn complaint_summary(
        &self,
        citizen_id: Option<&str>,
    ) -> Result<ComplaintSummary, StoreError> {
        let data = self.data.read().await;
        Ok(ComplaintSummary::from_counts(
            data.complaints
                .iter()
                .filter(|c| citizen_id.is_none_or(|id| c.citizen_id.as_deref() == Some(id)))
                .map(|c| (c.status.as_str(), 1)),
        ))
    }

    async fn apply_complaint_change(
        &self,
        id: &str,
        change: &ComplaintChange,
    ) -> Result<Option<Complaint>, StoreError> {
        let mut data = self.data.write().await;
        Ok(data.complaints.iter_mut().find(|c| c.id == id).map(|c| {
            c.apply(change);
            c.clone()
        }))
    }

    async fn insert_citizen(&self, citizen: &Citizen) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data
            .citizens
            .iter()
            .any(|c| c.id == citizen.id || c.phone == citizen.phone)
        {
            return Err(StoreError::Conflict(format!(
                "Citizen {} already exists",
                citizen.id
            )));
        }
        data.citizens.push(citizen.clone());
        Ok(())
    }

    async fn find_citizen(&self, id: &str) -> Result<Option<Citizen>, StoreError> {
        let data = self.data.read().await;
        Ok(data.citizens.iter().find(|c| c.id == id).cloned())
    }

    async fn find_citizen_by_phone(&self, phone: &str) -> Result<Option<Citizen>, StoreError> {
        let data = self.data.read().await;
        Ok(data.citizens.iter().find(|c| c.phone == phone).cloned())
    }

    async fn list_officers(&self) -> Result<Vec<Officer>, StoreError> {
        Ok(self.data.read().await.officers.clone())
    }

    async fn find_officer(&self, id: &str) -> Result<Option<Officer>, StoreError> {
        let data = self.data.read().await;
        Ok(data.officers.iter().find(|o| o.id == id).cloned())
    }

    async fn list_kiosks(&self) -> Result<Vec<Kiosk>, StoreError> {
        Ok(self.data.read().await.kiosks.clone())
    }

    async fn list_bills(&self, citizen_id: &str) -> Result<Vec<Bill>, StoreError> {
        let data = self.data.read().await;
        let mut bills: Vec<Bill> = data
            .bills
            .iter()
            .filter(|b| b.citizen_id == citizen_id)
            .cloned()
            .collect();
        bills.sort_by(|a, b| b.due_date.cmp(&a.due_date).then_with(|| a.id.cmp(&b.id)));
        Ok(bills)
    }

    async fn find_bill(&self, id: &str) -> Result<Option<Bill>, StoreError> {
        let data = self.data.read().await;
        Ok(data.bills.iter().find(|b| b.id == id).cloned())
    }

    async fn mark_bill_paid(
        &self,
        id: &str,
        paid_at: Timestamp,
        receipt_number: &str,
    ) -> Result<Option<Bill>, StoreError> {
        let mut data = self.data.write().await;
        let Some(bill) = data.bills.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if bill.status == BILL_PAID {
            return Err(StoreError::Conflict(format!("Bill {id} is already paid")));
        }

        bill.status = BILL_PAID.to_string();
        bill.paid_at = Some(paid_at);
        bill.receipt_number = Some(receipt_number.to_string());
        Ok(Some(bill.clone()))
    }

    async fn dashboard_stats(&self, today_start: Timestamp) -> Result<DashboardStats, StoreError> {
        let data = self.data.read().await;

        let complaints = ComplaintSummary::from_counts(
            data.complaints.iter().map(|c| (c.status.as_str(), 1)),
        );
        let by_priority = tally(data.complaints.iter().map(|c| c.priority.as_str()));
        let by_category = tally(data.complaints.iter().map(|c| c.category.as_str()));
        let resolved_today = data
            .complaints
            .iter()
            .filter(|c| c.resolved_at.is_some_and(|at| at >= today_start))
            .count() as i64;

        let kiosks_online = data
            .kiosks
            .iter()
            .filter(|k| k.status == KIOSK_ONLINE)
            .count() as i64;
        let bills_pending = data
            .bills
            .iter()
            .filter(|b| b.status == BILL_PENDING || b.status == BILL_OVERDUE)
            .count() as i64;
        let amount_collected_paise = data
            .bills
            .iter()
            .filter(|b| b.status == BILL_PAID)
            .map(|b| b.amount_paise)
            .sum();

        Ok(DashboardStats {
            complaints,
            by_priority,
            by_category,
            resolved_today,
            total_citizens: data.citizens.len() as i64,
            kiosks_online,
            kiosks_total: data.kiosks.len() as i64,
            bills_pending,
            amount_collected_paise,
        })
    }
}
