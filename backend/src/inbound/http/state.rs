//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on domain
//! ports, so they stay testable without SMTP.

use std::sync::Arc;

use crate::domain::ports::{ContactRelayCommand, FixtureContactRelayCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Relay use-case invoked for each contact submission.
    pub relay: Arc<dyn ContactRelayCommand>,
}

impl HttpState {
    /// Build state around a relay implementation.
    pub fn new(relay: Arc<dyn ContactRelayCommand>) -> Self {
        Self { relay }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureContactRelayCommand))
    }
}
