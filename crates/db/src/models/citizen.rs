//! Citizen entity model.

use serde::Serialize;
use sqlx::FromRow;
use suvidha_core::types::Timestamp;

/// A row from the `citizens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Citizen {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub ward: Option<i32>,
    pub created_at: Timestamp,
}

/// Prefix of generated citizen identifiers.
pub const CITIZEN_ID_PREFIX: &str = "CIT";

/// Format a citizen identifier: `CIT-0001`.
pub fn format_citizen_id(sequence: u64) -> String {
    format!("{CITIZEN_ID_PREFIX}-{sequence:04}")
}

impl Citizen {
    /// A citizen created on first OTP login. The name is a placeholder until
    /// the profile is completed.
    pub fn first_login(id: String, phone: &str, now: Timestamp) -> Self {
        let suffix = &phone[phone.len().saturating_sub(4)..];
        Self {
            id,
            name: format!("Citizen {suffix}"),
            phone: phone.to_string(),
            email: None,
            address: None,
            ward: None,
            created_at: now,
        }
    }
}
