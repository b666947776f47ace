use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use suvidha_api::config::ServerConfig;
use suvidha_api::router::build_app_router;
use suvidha_api::state::AppState;
use suvidha_api::{background, ws};
use suvidha_db::store::{Datastore, MockStore};

/// How long a request waits for a pooled connection before falling back to
/// the Mock Store.
const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = ?config.environment,
        otp_dev_bypass = config.otp.dev_bypass,
        "Loaded server configuration"
    );

    // --- Database (optional) ---
    let pool = match &config.database_url {
        Some(url) => {
            let pool = suvidha_db::create_pool(url, DB_ACQUIRE_TIMEOUT)?;
            match suvidha_db::run_migrations(&pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Database unavailable at startup, serving from mock store until it recovers"
                ),
            }
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running in mock-only mode");
            None
        }
    };

    let mock = Arc::new(MockStore::seeded(Utc::now()));
    let data = Datastore::new(mock, pool);

    // --- App state ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let state = AppState::new(config.clone(), data, Arc::clone(&ws_manager));

    // --- Background tasks ---
    let cancel = CancellationToken::new();
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), cancel.clone());
    let feed_handle = ws::start_utility_feed(
        Arc::clone(&ws_manager),
        config.utility_feed_interval_secs,
        cancel.clone(),
    );
    let sweep_handle = tokio::spawn(background::expiry_sweep::run(
        Arc::clone(&state.otp),
        Arc::clone(&state.rate_limiter),
        cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    for handle in [heartbeat_handle, feed_handle, sweep_handle] {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Background tasks stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Human-readable logs by default; JSON lines when `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "suvidha_api=debug,suvidha_db=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix) to start graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
