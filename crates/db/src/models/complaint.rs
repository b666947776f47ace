//! Complaint entity model, timeline rows, and the change sets applied by the
//! citizen and admin mutation paths.

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use suvidha_core::complaint::{
    estimated_resolution, resolved_at_after, status_after_admin_update, validate_reopen,
    validate_status, STATUS_REGISTERED,
};
use suvidha_core::error::CoreError;
use suvidha_core::roles::ROLE_CITIZEN;
use suvidha_core::types::Timestamp;

use crate::models::audit::CreateAuditLog;

/// Default page size for complaint listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Upper bound for a single complaint listing page.
pub const MAX_LIST_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `complaints` table, plus its timeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: String,
    pub citizen_id: Option<String>,
    pub category: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub assigned_officer_id: Option<String>,
    pub estimated_resolution: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Loaded separately from `complaint_updates`; omitted from listings.
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<ComplaintUpdate>,
}

/// A row from the `complaint_updates` table (one timeline entry).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplaintUpdate {
    pub complaint_id: String,
    pub status: String,
    pub comment: Option<String>,
    pub author_role: String,
    pub author_id: Option<String>,
    pub created_at: Timestamp,
}

/// Normalized registration input.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub citizen_id: Option<String>,
    pub category: String,
    pub description: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Complaint {
    /// Build a freshly registered complaint with the given identifier.
    pub fn register(id: String, input: NewComplaint, now: Timestamp) -> Self {
        let initial = ComplaintUpdate {
            complaint_id: id.clone(),
            status: STATUS_REGISTERED.to_string(),
            comment: Some("Complaint registered".to_string()),
            author_role: ROLE_CITIZEN.to_string(),
            author_id: input.citizen_id.clone(),
            created_at: now,
        };

        Self {
            estimated_resolution: estimated_resolution(&input.priority, now),
            id,
            citizen_id: input.citizen_id,
            category: input.category,
            description: input.description,
            status: STATUS_REGISTERED.to_string(),
            priority: input.priority,
            latitude: input.latitude,
            longitude: input.longitude,
            address: input.address,
            assigned_officer_id: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
            updates: vec![initial],
        }
    }

    /// Overwrite the mutable fields with a computed change and append its
    /// timeline entry.
    pub fn apply(&mut self, change: &ComplaintChange) {
        self.status = change.status.clone();
        self.resolved_at = change.resolved_at;
        self.assigned_officer_id = change.assigned_officer_id.clone();
        self.updated_at = change.updated_at;
        self.updates.push(change.log.clone());
    }
}

// ---------------------------------------------------------------------------
// Change sets
// ---------------------------------------------------------------------------

/// Who is mutating a complaint.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Option<String>,
    pub role: String,
}

/// The fully computed result of a mutation.
///
/// Computed once against the current record and written unchanged to every
/// store, so both stores receive the same field values.
#[derive(Debug, Clone)]
pub struct ComplaintChange {
    pub status: String,
    pub resolved_at: Option<Timestamp>,
    pub assigned_officer_id: Option<String>,
    pub updated_at: Timestamp,
    pub log: ComplaintUpdate,
    /// Database-only audit row.
    pub audit: Option<CreateAuditLog>,
}

impl ComplaintChange {
    /// Privileged update: optional status, assignment and comment.
    ///
    /// No transition table is enforced; any known status may be set. An
    /// empty `assigned_to` clears the assignment.
    pub fn admin_update(
        current: &Complaint,
        status: Option<&str>,
        assigned_to: Option<&str>,
        comment: Option<&str>,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if status.is_none() && assigned_to.is_none() && comment.is_none() {
            return Err(CoreError::Validation(
                "At least one of status, comment or assignedTo is required".into(),
            ));
        }
        if let Some(s) = status {
            validate_status(s)?;
        }

        let assigning = assigned_to.is_some_and(|a| !a.trim().is_empty());
        let next_status = status_after_admin_update(&current.status, status, assigning)
            .unwrap_or(current.status.as_str())
            .to_string();
        let resolved_at = resolved_at_after(&next_status, current.resolved_at, now);
        let assigned_officer_id = match assigned_to.map(str::trim) {
            Some("") => None,
            Some(officer) => Some(officer.to_string()),
            None => current.assigned_officer_id.clone(),
        };

        let audit = CreateAuditLog {
            actor_id: actor.id.clone(),
            actor_role: actor.role.clone(),
            action: "complaint.update".to_string(),
            entity_type: "complaint".to_string(),
            entity_id: current.id.clone(),
            details: json!({
                "from_status": current.status,
                "to_status": next_status,
                "assigned_officer_id": assigned_officer_id,
                "comment": comment,
            }),
        };

        Ok(Self {
            log: ComplaintUpdate {
                complaint_id: current.id.clone(),
                status: next_status.clone(),
                comment: comment.map(str::to_string),
                author_role: actor.role.clone(),
                author_id: actor.id.clone(),
                created_at: now,
            },
            status: next_status,
            resolved_at,
            assigned_officer_id,
            updated_at: now,
            audit: Some(audit),
        })
    }

    /// Citizen patch: reopen and/or add a message.
    pub fn citizen_patch(
        current: &Complaint,
        reopen: bool,
        message: Option<&str>,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        let message = message.map(str::trim).filter(|m| !m.is_empty());
        if !reopen && message.is_none() {
            return Err(CoreError::Validation(
                "Either action 'reopen' or a non-empty message is required".into(),
            ));
        }

        let (status, resolved_at) = if reopen {
            validate_reopen(&current.status)?;
            (STATUS_REGISTERED.to_string(), None)
        } else {
            (current.status.clone(), current.resolved_at)
        };

        let audit = reopen.then(|| CreateAuditLog {
            actor_id: actor.id.clone(),
            actor_role: actor.role.clone(),
            action: "complaint.reopen".to_string(),
            entity_type: "complaint".to_string(),
            entity_id: current.id.clone(),
            details: json!({ "from_status": current.status, "message": message }),
        });

        Ok(Self {
            log: ComplaintUpdate {
                complaint_id: current.id.clone(),
                status: status.clone(),
                comment: message
                    .map(str::to_string)
                    .or_else(|| Some("Complaint reopened".to_string())),
                author_role: actor.role.clone(),
                author_id: actor.id.clone(),
                created_at: now,
            },
            status,
            resolved_at,
            assigned_officer_id: current.assigned_officer_id.clone(),
            updated_at: now,
            audit,
        })
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Filters for complaint listings. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    /// Restricts the listing to one citizen's complaints.
    #[serde(skip)]
    pub citizen_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ComplaintFilter {
    /// Clamped page size.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }

    /// Non-negative offset.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Whether a complaint passes every filter (used by the in-memory store).
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.as_deref().is_none_or(|s| complaint.status == s)
            && self
                .category
                .as_deref()
                .is_none_or(|c| complaint.category.eq_ignore_ascii_case(c))
            && self.priority.as_deref().is_none_or(|p| complaint.priority == p)
            && self
                .citizen_id
                .as_deref()
                .is_none_or(|c| complaint.citizen_id.as_deref() == Some(c))
    }
}

/// Complaint counts by status, independent of list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintSummary {
    pub total: i64,
    pub registered: i64,
    pub assigned: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
}

impl ComplaintSummary {
    /// Build a summary from `(status, count)` pairs. Unknown statuses count
    /// towards the total only.
    pub fn from_counts<'a>(counts: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let mut summary = Self::default();
        for (status, count) in counts {
            summary.total += count;
            match status {
                "registered" => summary.registered += count,
                "assigned" => summary.assigned += count,
                "in_progress" => summary.in_progress += count,
                "resolved" => summary.resolved += count,
                "closed" => summary.closed += count,
                _ => {}
            }
        }
        summary
    }

    /// Count for a single status.
    pub fn count(&self, status: &str) -> i64 {
        match status {
            "registered" => self.registered,
            "assigned" => self.assigned,
            "in_progress" => self.in_progress,
            "resolved" => self.resolved,
            "closed" => self.closed,
            _ => 0,
        }
    }
}

/// A page of complaints plus the unfiltered summary.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintPage {
    pub complaints: Vec<Complaint>,
    pub summary: ComplaintSummary,
}
