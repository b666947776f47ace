//! Synthetic utility-grid status snapshots pushed to WebSocket subscribers.
//!
//! The values are simulated; nothing here is derived from persisted state.

use rand::Rng;
use serde::Serialize;

use crate::types::Timestamp;

/// Message `type` tag carried by every utility-status frame.
pub const MSG_TYPE_UTILITY_STATUS: &str = "utility_status";

/// Load percentage above which a grid is reported as `strained`.
pub const STRAINED_LOAD_PCT: f64 = 85.0;

/// Utilities covered by the feed.
pub const UTILITIES: &[&str] = &["electricity", "water", "gas"];

/// Status of a single utility grid.
#[derive(Debug, Clone, Serialize)]
pub struct UtilityStatus {
    pub utility: &'static str,
    /// `normal`, `strained` or `outage`.
    pub status: &'static str,
    pub load_pct: f64,
    pub active_outages: u32,
    pub affected_wards: Vec<u32>,
}

/// A full snapshot across all utilities.
#[derive(Debug, Clone, Serialize)]
pub struct UtilitySnapshot {
    pub generated_at: Timestamp,
    pub utilities: Vec<UtilityStatus>,
}

/// Envelope sent over the WebSocket.
#[derive(Debug, Clone, Serialize)]
pub struct UtilityStatusMessage {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub data: UtilitySnapshot,
}

impl UtilityStatusMessage {
    pub fn new(data: UtilitySnapshot) -> Self {
        Self {
            msg_type: MSG_TYPE_UTILITY_STATUS,
            data,
        }
    }
}

/// Classify a grid from its load and outage count.
pub fn classify(load_pct: f64, active_outages: u32) -> &'static str {
    if active_outages > 0 {
        "outage"
    } else if load_pct >= STRAINED_LOAD_PCT {
        "strained"
    } else {
        "normal"
    }
}

/// Generate a random snapshot for every utility.
pub fn generate_snapshot<R: Rng + ?Sized>(rng: &mut R, now: Timestamp) -> UtilitySnapshot {
    let utilities = UTILITIES
        .iter()
        .map(|&utility| {
            let load_pct = (rng.random_range(40.0..98.0_f64) * 10.0).round() / 10.0;
            // Roughly one grid in ten reports an outage at any tick.
            let active_outages = if rng.random_bool(0.1) {
                rng.random_range(1..=3)
            } else {
                0
            };
            let mut affected_wards: Vec<u32> = (0..active_outages)
                .map(|_| rng.random_range(1..=50))
                .collect();
            affected_wards.sort_unstable();
            affected_wards.dedup();

            UtilityStatus {
                utility,
                status: classify(load_pct, active_outages),
                load_pct,
                active_outages,
                affected_wards,
            }
        })
        .collect();

    UtilitySnapshot {
        generated_at: now,
        utilities,
    }
}
