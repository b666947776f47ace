//! Fixed-window request ceiling per client address.
//!
//! Every client gets `max_requests` per `window_secs`; the window restarts on
//! the first request after it elapses. Requests over the ceiling are answered
//! with 429 and a `Retry-After` header.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;

use crate::config::RateLimitConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Counter for one client's current window.
struct Window {
    started: Instant,
    count: u64,
}

/// Per-client fixed-window counters.
pub struct RateLimiter {
    windows: Mutex<HashMap<Option<IpAddr>, Window>>,
    max_requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
        }
    }

    /// Count a request from `client`.
    ///
    /// Returns `Err(retry_after_secs)` once the ceiling is exceeded. Requests
    /// without a known address share one bucket.
    pub async fn check(&self, client: Option<IpAddr>) -> Result<(), u64> {
        self.check_at(client, Instant::now()).await
    }

    /// Drop windows that have fully elapsed. Returns the number removed.
    pub async fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started) < self.window);
        before - windows.len()
    }

    async fn check_at(&self, client: Option<IpAddr>, now: Instant) -> Result<(), u64> {
        let mut windows = self.windows.lock().await;
        let entry = windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        let mut elapsed = now.duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
            elapsed = Duration::ZERO;
        }

        entry.count += 1;
        if entry.count > self.max_requests {
            Err(self.window.saturating_sub(elapsed).as_secs().max(1))
        } else {
            Ok(())
        }
    }
}

/// Middleware applying [`RateLimiter`] to every route.
///
/// The client address comes from `ConnectInfo` when the server was started
/// with `into_make_service_with_connect_info`.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Err(retry_after_secs) = state.rate_limiter.check(client).await {
        tracing::warn!(client = ?client, retry_after_secs, "Rate limit exceeded");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    Ok(next.run(request).await)
}
