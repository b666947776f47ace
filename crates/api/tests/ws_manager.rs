//! Unit tests for `WsManager` and the utility status frame.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades.

use axum::extract::ws::Message;
use suvidha_api::ws::utility_feed::next_message;
use suvidha_api::ws::WsManager;

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _rx1 = manager.add("conn-1".to_string()).await;
    let _rx2 = manager.add("conn-2".to_string()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn broadcast_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;

    let delivered = manager.broadcast(Message::Text("hello".into())).await;
    assert_eq!(delivered, 2);

    for rx in [&mut rx1, &mut rx2] {
        match rx.recv().await {
            Some(Message::Text(text)) => assert_eq!(text.as_str(), "hello"),
            other => panic!("Expected text frame, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn broadcast_drops_closed_connections() {
    let manager = WsManager::new();
    let _live = manager.add("live".to_string()).await;
    let dropped = manager.add("gone".to_string()).await;
    drop(dropped);

    let delivered = manager.broadcast(Message::Text("ping".into())).await;

    assert_eq!(delivered, 1);
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn utility_status_is_broadcast_as_json() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    let delivered = manager.broadcast_json(&next_message()).await.unwrap();
    assert_eq!(delivered, 1);

    let Some(Message::Text(text)) = rx.recv().await else {
        panic!("Expected a text frame");
    };
    let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["type"], "utility_status");
    let utilities = json["data"]["utilities"].as_array().unwrap();
    assert_eq!(utilities.len(), 3);
    assert!(utilities.iter().all(|u| u["load_pct"].is_number()));
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx.recv().await, Some(Message::Close(None))));
}

#[tokio::test]
async fn send_to_targets_one_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;

    assert!(manager.send_to("conn-2", Message::Text("only you".into())).await);
    assert!(!manager.send_to("conn-9", Message::Text("nobody".into())).await);

    assert!(matches!(rx2.recv().await, Some(Message::Text(t)) if t.as_str() == "only you"));
    assert!(rx1.try_recv().is_err());
}

#[tokio::test]
async fn ping_all_prunes_closed_connections() {
    let manager = WsManager::new();
    let mut live = manager.add("live".to_string()).await;
    drop(manager.add("gone".to_string()).await);

    assert_eq!(manager.ping_all().await, 1);
    assert_eq!(manager.connection_count().await, 1);
    assert!(matches!(live.recv().await, Some(Message::Ping(_))));
}
