//! Periodic removal of expired OTP entries and elapsed rate-limit windows.

use std::sync::Arc;
use std::time::Duration;

use suvidha_core::otp::OtpStore;
use tokio_util::sync::CancellationToken;

use crate::middleware::rate_limit::RateLimiter;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(otp: Arc<OtpStore>, rate_limiter: Arc<RateLimiter>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Expiry sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let otps = otp.purge_expired();
                let windows = rate_limiter.purge_stale().await;
                if otps > 0 || windows > 0 {
                    tracing::debug!(otps, windows, "Expiry sweep removed stale entries");
                }
            }
        }
    }
}
