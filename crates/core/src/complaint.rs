//! Complaint lifecycle constants and rules.
//!
//! Statuses, priorities, SLA targets, identifier formatting and the
//! `resolved_at` bookkeeping rule shared by the in-memory store, the
//! Postgres store and the API handlers.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly registered (or reopened) complaint.
pub const STATUS_REGISTERED: &str = "registered";
/// An officer has been assigned.
pub const STATUS_ASSIGNED: &str = "assigned";
/// Field work has started.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// The issue has been fixed.
pub const STATUS_RESOLVED: &str = "resolved";
/// The complaint has been closed (verified or withdrawn).
pub const STATUS_CLOSED: &str = "closed";

/// All valid complaint statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_REGISTERED,
    STATUS_ASSIGNED,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_CRITICAL: &str = "critical";

/// Client alias accepted on input and stored as [`PRIORITY_CRITICAL`].
pub const PRIORITY_EMERGENCY_ALIAS: &str = "emergency";

/// All valid stored priorities.
pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_CRITICAL,
];

// ---------------------------------------------------------------------------
// Registration defaults
// ---------------------------------------------------------------------------

/// Minimum description length (characters, after trimming).
pub const MIN_DESCRIPTION_LENGTH: u64 = 5;

/// Category used when the client sends neither `category` nor `type`.
pub const DEFAULT_CATEGORY: &str = "general";

/// City centre used when a complaint arrives without coordinates.
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;
pub const DEFAULT_ADDRESS: &str = "New Delhi, India";

/// Prefix of every complaint identifier.
pub const COMPLAINT_ID_PREFIX: &str = "CMP";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid complaint status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Normalize a client-supplied priority.
///
/// Missing or blank input defaults to `medium`; `emergency` is stored as
/// `critical`. Matching is case-insensitive.
pub fn normalize_priority(input: Option<&str>) -> Result<&'static str, CoreError> {
    let raw = match input.map(str::trim) {
        None | Some("") => return Ok(PRIORITY_MEDIUM),
        Some(raw) => raw.to_ascii_lowercase(),
    };

    if raw == PRIORITY_EMERGENCY_ALIAS {
        return Ok(PRIORITY_CRITICAL);
    }

    VALID_PRIORITIES
        .iter()
        .copied()
        .find(|p| *p == raw)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid priority '{raw}'. Must be one of: {}, {PRIORITY_EMERGENCY_ALIAS}",
                VALID_PRIORITIES.join(", ")
            ))
        })
}

/// Normalize the category, accepting `category` and `type` interchangeably.
pub fn normalize_category(category: Option<&str>, kind: Option<&str>) -> String {
    category
        .or(kind)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

// ---------------------------------------------------------------------------
// SLA
// ---------------------------------------------------------------------------

/// Target resolution time in hours for a stored priority.
pub fn sla_hours(priority: &str) -> i64 {
    match priority {
        PRIORITY_CRITICAL => 4,
        PRIORITY_HIGH => 24,
        PRIORITY_LOW => 72,
        _ => 48,
    }
}

/// Estimated resolution deadline for a complaint created at `created_at`.
pub fn estimated_resolution(priority: &str, created_at: Timestamp) -> Timestamp {
    created_at + chrono::Duration::hours(sla_hours(priority))
}

/// Human-readable acknowledgement returned on registration.
pub fn registration_message(priority: &str) -> String {
    format!(
        "Complaint registered successfully. Expected resolution within {} hours.",
        sla_hours(priority)
    )
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Format a complaint identifier: `CMP-<year>-<six digit sequence>`.
pub fn format_complaint_id(year: i32, sequence: u64) -> String {
    format!("{COMPLAINT_ID_PREFIX}-{year}-{sequence:06}")
}

// ---------------------------------------------------------------------------
// Lifecycle rules
// ---------------------------------------------------------------------------

/// Compute `resolved_at` after moving to `next_status`.
///
/// - `resolved` keeps an existing timestamp or stamps `now`.
/// - `closed` preserves whatever was there.
/// - every other status clears it.
pub fn resolved_at_after(
    next_status: &str,
    current_resolved_at: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match next_status {
        STATUS_RESOLVED => current_resolved_at.or(Some(now)),
        STATUS_CLOSED => current_resolved_at,
        _ => None,
    }
}

/// Status a complaint should take after an admin update.
///
/// An explicit status always wins. Assigning an officer to a complaint that
/// is still `registered` moves it to `assigned`. Otherwise the status is
/// left unchanged (`None`).
pub fn status_after_admin_update(
    current_status: &str,
    requested_status: Option<&str>,
    assigning_officer: bool,
) -> Option<&'static str> {
    if let Some(requested) = requested_status {
        return VALID_STATUSES.iter().copied().find(|s| *s == requested);
    }
    if assigning_officer && current_status == STATUS_REGISTERED {
        return Some(STATUS_ASSIGNED);
    }
    None
}

/// Only resolved or closed complaints may be reopened by the citizen.
pub fn validate_reopen(current_status: &str) -> Result<(), CoreError> {
    if current_status == STATUS_RESOLVED || current_status == STATUS_CLOSED {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Only resolved or closed complaints can be reopened (current status: '{current_status}')"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "Status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert_matches!(validate_status("pending"), Err(CoreError::Validation(_)));
        assert!(validate_status("").is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(normalize_priority(None).unwrap(), PRIORITY_MEDIUM);
        assert_eq!(normalize_priority(Some("  ")).unwrap(), PRIORITY_MEDIUM);
    }

    #[test]
    fn emergency_is_stored_as_critical() {
        assert_eq!(normalize_priority(Some("emergency")).unwrap(), PRIORITY_CRITICAL);
        assert_eq!(normalize_priority(Some("EMERGENCY")).unwrap(), PRIORITY_CRITICAL);
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert_matches!(
            normalize_priority(Some("urgent")),
            Err(CoreError::Validation(msg)) if msg.contains("urgent")
        );
    }

    #[test]
    fn category_falls_back_to_type_then_default() {
        assert_eq!(normalize_category(Some("Water"), Some("power")), "water");
        assert_eq!(normalize_category(None, Some("electricity")), "electricity");
        assert_eq!(normalize_category(Some(""), None), DEFAULT_CATEGORY);
    }

    #[test]
    fn sla_hours_follow_priority() {
        assert_eq!(sla_hours(PRIORITY_CRITICAL), 4);
        assert_eq!(sla_hours(PRIORITY_HIGH), 24);
        assert_eq!(sla_hours(PRIORITY_MEDIUM), 48);
        assert_eq!(sla_hours(PRIORITY_LOW), 72);
    }

    #[test]
    fn estimated_resolution_matches_reported_sla() {
        let created = at(0);
        let estimate = estimated_resolution(PRIORITY_HIGH, created);
        assert_eq!(estimate - created, chrono::Duration::hours(24));
        assert!(registration_message(PRIORITY_HIGH).contains("24 hours"));
    }

    #[test]
    fn complaint_id_is_zero_padded() {
        assert_eq!(format_complaint_id(2026, 7), "CMP-2026-000007");
        assert_eq!(format_complaint_id(2025, 123_456), "CMP-2025-123456");
    }

    #[test]
    fn resolving_stamps_resolved_at_once() {
        assert_eq!(resolved_at_after(STATUS_RESOLVED, None, at(5)), Some(at(5)));
        assert_eq!(
            resolved_at_after(STATUS_RESOLVED, Some(at(2)), at(5)),
            Some(at(2))
        );
    }

    #[test]
    fn regressing_clears_resolved_at() {
        for status in [STATUS_REGISTERED, STATUS_ASSIGNED, STATUS_IN_PROGRESS] {
            assert_eq!(resolved_at_after(status, Some(at(2)), at(5)), None);
        }
    }

    #[test]
    fn closing_preserves_resolved_at() {
        assert_eq!(resolved_at_after(STATUS_CLOSED, Some(at(2)), at(5)), Some(at(2)));
        assert_eq!(resolved_at_after(STATUS_CLOSED, None, at(5)), None);
    }

    #[test]
    fn assignment_promotes_registered_complaints() {
        assert_eq!(
            status_after_admin_update(STATUS_REGISTERED, None, true),
            Some(STATUS_ASSIGNED)
        );
        assert_eq!(status_after_admin_update(STATUS_IN_PROGRESS, None, true), None);
        assert_eq!(status_after_admin_update(STATUS_REGISTERED, None, false), None);
    }

    #[test]
    fn explicit_status_wins_over_assignment() {
        assert_eq!(
            status_after_admin_update(STATUS_REGISTERED, Some(STATUS_RESOLVED), true),
            Some(STATUS_RESOLVED)
        );
    }

    #[test]
    fn only_finished_complaints_can_be_reopened() {
        assert!(validate_reopen(STATUS_RESOLVED).is_ok());
        assert!(validate_reopen(STATUS_CLOSED).is_ok());
        assert!(validate_reopen(STATUS_IN_PROGRESS).is_err());
        assert!(validate_reopen(STATUS_REGISTERED).is_err());
    }
}
