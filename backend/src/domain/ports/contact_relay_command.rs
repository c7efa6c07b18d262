//! Driving port used by inbound adapters to relay one contact submission.

use async_trait::async_trait;

use crate::domain::{RelayError, RelayReceipt};

/// Use-case port: relay a raw request body as an email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelayCommand: Send + Sync {
    /// Validate `body`, compose the email and deliver it.
    async fn relay(&self, body: &[u8]) -> Result<RelayReceipt, RelayError>;
}

/// Fixture implementation that reports success without touching a transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureContactRelayCommand;

#[async_trait]
impl ContactRelayCommand for FixtureContactRelayCommand {
    async fn relay(&self, _body: &[u8]) -> Result<RelayReceipt, RelayError> {
        Ok(RelayReceipt {
            subject: "Portfolio contact from fixture".to_owned(),
        })
    }
}
