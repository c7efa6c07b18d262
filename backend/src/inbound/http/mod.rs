//! HTTP inbound adapter exposing the relay and health endpoints.

pub mod error;
pub mod health;
pub mod relay;
pub mod schemas;
pub mod state;

pub use relay::{LEGACY_RELAY_PATH, RELAY_CONFIRMATION, RELAY_PAYLOAD_LIMIT, relay_resource};
pub use state::HttpState;
