//! WebSocket fan-out for live dashboard updates.
//!
//! Connection registry, heartbeat pings, the upgrade handler and the
//! synthetic utility-status feed.

mod handler;
mod heartbeat;
pub mod manager;
pub mod utility_feed;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use utility_feed::start_utility_feed;
