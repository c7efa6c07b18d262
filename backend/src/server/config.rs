//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::ContactRelayCommand;
use crate::inbound::http::HttpState;

/// Everything `create_server` needs besides health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) relay_path: String,
    pub(crate) relay: Arc<dyn ContactRelayCommand>,
}

impl ServerConfig {
    /// Construct a configuration serving `relay` at `relay_path`.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        relay_path: impl Into<String>,
        relay: Arc<dyn ContactRelayCommand>,
    ) -> Self {
        Self {
            bind_addr,
            relay_path: relay_path.into(),
            relay,
        }
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Path the relay is mounted at, besides the legacy alias.
    #[must_use]
    pub fn relay_path(&self) -> &str {
        &self.relay_path
    }

    pub(crate) fn http_state(&self) -> HttpState {
        HttpState::new(Arc::clone(&self.relay))
    }
}
