//! Registry of live kiosk and dashboard WebSocket connections.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use serde::Serialize;
use suvidha_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// A registered WebSocket connection.
pub struct WsConnection {
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Registry of live WebSocket connections, keyed by connection id.
///
/// Shared behind `Arc` by the upgrade handler, the heartbeat and the
/// utility feed. A connection whose channel has closed is pruned the next
/// time anything is fanned out to it.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver its writer task drains.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Queue `message` for a single connection. Returns `false` if the
    /// connection is unknown or gone.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        let mut conns = self.connections.write().await;
        match conns.get(conn_id) {
            Some(conn) if conn.sender.send(message).is_ok() => true,
            Some(_) => {
                conns.remove(conn_id);
                false
            }
            None => false,
        }
    }

    /// Serialize `payload` and queue it for a single connection.
    pub async fn send_json_to<T: Serialize>(
        &self,
        conn_id: &str,
        payload: &T,
    ) -> Result<bool, serde_json::Error> {
        let text = serde_json::to_string(payload)?;
        Ok(self.send_to(conn_id, Message::Text(text.into())).await)
    }

    /// Send `message` to every connection. Returns how many accepted it.
    pub async fn broadcast(&self, message: Message) -> usize {
        self.fan_out(|| message.clone()).await
    }

    /// Serialize `payload` once and broadcast it as a text frame.
    pub async fn broadcast_json<T: Serialize>(&self, payload: &T) -> Result<usize, serde_json::Error> {
        let text = serde_json::to_string(payload)?;
        Ok(self.broadcast(Message::Text(text.into())).await)
    }

    /// Ping every connection. Returns how many are still live.
    pub async fn ping_all(&self) -> usize {
        self.fan_out(|| Message::Ping(Bytes::new())).await
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the registry.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    async fn fan_out(&self, frame: impl Fn() -> Message) -> usize {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|_, conn| conn.sender.send(frame()).is_ok());
        let pruned = before - conns.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Dropped closed WebSocket connections");
        }
        conns.len()
    }
}
