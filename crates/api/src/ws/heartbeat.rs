use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Seconds between pings.
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Ping every client until `cancel` fires. Closed connections are pruned as
/// a side effect of each round.
pub fn start_heartbeat(
    ws_manager: Arc<WsManager>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("WebSocket heartbeat stopping");
                    break;
                }
                _ = interval.tick() => {
                    let live = ws_manager.ping_all().await;
                    if live > 0 {
                        tracing::debug!(live, "WebSocket heartbeat");
                    }
                }
            }
        }
    })
}
