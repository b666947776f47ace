use std::sync::Arc;

use suvidha_core::otp::OtpStore;
use suvidha_db::store::Datastore;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database-first data access with Mock Store fallback.
    pub data: Datastore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Outstanding citizen OTPs.
    pub otp: Arc<OtpStore>,
    /// Per-client request ceiling.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build state from configuration and a datastore, creating the OTP store
    /// and rate limiter the configuration describes.
    pub fn new(config: ServerConfig, data: Datastore, ws_manager: Arc<WsManager>) -> Self {
        let otp = Arc::new(OtpStore::new(config.otp.ttl_secs, config.otp.dev_bypass));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit));
        Self {
            data,
            config: Arc::new(config),
            ws_manager,
            otp,
            rate_limiter,
        }
    }
}
