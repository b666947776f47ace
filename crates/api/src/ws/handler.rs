use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::ws::manager::WsManager;
use crate::ws::utility_feed::next_message;

/// First frame sent on every connection.
#[derive(Debug, Serialize)]
struct Welcome<'a> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    connection_id: &'a str,
}

/// Frames a client may send. Anything else is ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    /// Ask for a utility snapshot now instead of waiting for the next tick.
    Refresh,
}

/// GET /api/ws
///
/// Upgrade to a WebSocket that receives the utility-status feed.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let mut rx = ws_manager.add(conn_id.clone()).await;
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let welcome = Welcome {
        msg_type: "connected",
        connection_id: &conn_id,
    };
    send_json(&ws_manager, &conn_id, &welcome).await;
    send_snapshot(&ws_manager, &conn_id).await;

    let (mut sink, mut stream) = socket.split();
    let writer_conn_id = conn_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() || closing {
                tracing::debug!(conn_id = %writer_conn_id, "WebSocket writer finished");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientFrame>(text.as_str()) {
                Ok(ClientFrame::Refresh) => send_snapshot(&ws_manager, &conn_id).await,
                Err(_) => tracing::trace!(conn_id = %conn_id, "Ignoring unknown client frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    writer.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

async fn send_snapshot(ws_manager: &WsManager, conn_id: &str) {
    send_json(ws_manager, conn_id, &next_message()).await;
}

async fn send_json<T: Serialize>(ws_manager: &WsManager, conn_id: &str, payload: &T) {
    if let Err(e) = ws_manager.send_json_to(conn_id, payload).await {
        tracing::error!(conn_id = %conn_id, error = %e, "Failed to serialize WebSocket frame");
    }
}
