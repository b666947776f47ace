//! Periodic broadcast of synthetic utility-grid status.
//!
//! Every tick generates a fresh [`UtilitySnapshot`] and pushes it to all
//! WebSocket clients as `{ "type": "utility_status", "data": ... }`.
//!
//! [`UtilitySnapshot`]: suvidha_core::utility_status::UtilitySnapshot

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use suvidha_core::utility_status::{generate_snapshot, UtilityStatusMessage};
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Build one utility-status frame.
pub fn next_message() -> UtilityStatusMessage {
    UtilityStatusMessage::new(generate_snapshot(&mut rand::rng(), Utc::now()))
}

/// Spawn the feed loop. Runs until `cancel` fires.
pub fn start_utility_feed(
    ws_manager: Arc<WsManager>,
    interval_secs: u64,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(interval_secs, "Utility status feed started");
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Utility status feed stopping");
                    break;
                }
                _ = interval.tick() => {
                    if ws_manager.connection_count().await == 0 {
                        continue;
                    }
                    let message = next_message();
                    match ws_manager.broadcast_json(&message).await {
                        Ok(delivered) => tracing::debug!(delivered, "Broadcast utility status"),
                        Err(e) => tracing::error!(error = %e, "Failed to serialize utility status"),
                    }
                }
            }
        }
    })
}
