//! Driven port for handing composed messages to a mail provider.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::EmailMessage;

define_port_error! {
    /// Errors surfaced while delivering a message.
    pub enum MailTransportError {
        /// Transport settings are missing or invalid.
        Configuration { message: String } =>
            "mail transport is not configured: {message}",
        /// A sender or recipient address could not be parsed.
        InvalidAddress { message: String } =>
            "invalid email address: {message}",
        /// The provider could not be reached or the session broke.
        Connection { message: String } =>
            "smtp connection failed: {message}",
        /// The provider rejected the credentials.
        Authentication { message: String } =>
            "smtp authentication failed: {message}",
        /// The provider refused the message.
        Rejected { message: String } =>
            "smtp server rejected message: {message}",
    }
}

impl MailTransportError {
    /// Provider-level detail without the category prefix.
    ///
    /// This is the text returned to the browser on a failed relay.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Configuration { message }
            | Self::InvalidAddress { message }
            | Self::Connection { message }
            | Self::Authentication { message }
            | Self::Rejected { message } => message,
        }
    }
}

/// Port for delivering one composed message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `message`, returning once the provider accepts or rejects it.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use portfolio_backend::domain::ports::{FixtureMailTransport, MailTransport};
    ///
    /// let transport = FixtureMailTransport;
    /// transport.deliver(&message).await?;
    /// # Ok::<(), portfolio_backend::domain::ports::MailTransportError>(())
    /// ```
    async fn deliver(&self, message: &EmailMessage) -> Result<(), MailTransportError>;
}

/// Fixture implementation that accepts every message without sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMailTransport;

#[async_trait]
impl MailTransport for FixtureMailTransport {
    async fn deliver(&self, _message: &EmailMessage) -> Result<(), MailTransportError> {
        Ok(())
    }
}
