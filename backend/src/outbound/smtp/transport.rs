//! Lettre-backed implementation of the `MailTransport` port.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::SmtpSettings;
use crate::domain::EmailMessage;
use crate::domain::ports::{MailTransport, MailTransportError};

/// Delivers messages through an authenticated SMTP session.
///
/// Port 465 connects with implicit TLS; every other port starts in plain text
/// and upgrades with STARTTLS when the server offers it.
#[derive(Clone)]
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build a transport for `settings`. No connection is opened until the
    /// first delivery.
    ///
    /// # Errors
    /// Returns [`MailTransportError::Configuration`] when TLS parameters
    /// cannot be built for the configured host.
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, MailTransportError> {
        let tls_parameters = TlsParameters::new(settings.host.clone())
            .map_err(|error| MailTransportError::configuration(error.to_string()))?;
        let tls = if settings.implicit_tls() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .tls(tls)
            .credentials(credentials)
            .build();
        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, message: &EmailMessage) -> Result<(), MailTransportError> {
        let outbound = build_message(message)?;
        let response = self.mailer.send(outbound).await.map_err(map_smtp_error)?;
        debug!(code = %response.code(), "smtp server accepted message");
        Ok(())
    }
}

/// Transport installed when SMTP settings are unusable at startup.
///
/// Every delivery fails with the stored reason, so the relay still answers
/// with a JSON 500 instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct UnconfiguredMailTransport {
    reason: String,
}

impl UnconfiguredMailTransport {
    /// Build a transport that always fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl MailTransport for UnconfiguredMailTransport {
    async fn deliver(&self, _message: &EmailMessage) -> Result<(), MailTransportError> {
        Err(MailTransportError::configuration(self.reason.clone()))
    }
}

fn parse_address(raw: &str, role: &str) -> Result<Address, MailTransportError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|error| MailTransportError::invalid_address(format!("{role} {raw:?}: {error}")))
}

/// Header-safe copy of submitted text: control characters, line breaks
/// included, become spaces so a value can never start a new header line.
fn header_text(raw: &str) -> String {
    raw.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

fn build_message(message: &EmailMessage) -> Result<Message, MailTransportError> {
    let sender = parse_address(&message.from_envelope_address, "sender")?;
    let recipient = parse_address(&message.to_address, "recipient")?;
    let cleaned_name = header_text(&message.from_display_name);
    let display_name = Some(cleaned_name.trim().to_owned()).filter(|name| !name.is_empty());

    Message::builder()
        .from(Mailbox::new(display_name, sender))
        .to(Mailbox::new(None, recipient))
        .subject(header_text(&message.subject))
        .multipart(MultiPart::alternative_plain_html(
            message.text_body.clone(),
            message.html_body.clone(),
        ))
        .map_err(|error| MailTransportError::rejected(error.to_string()))
}

fn map_smtp_error(error: lettre::transport::smtp::Error) -> MailTransportError {
    let detail = error.to_string();
    let auth_failure = error
        .status()
        .is_some_and(|code| code.to_string().starts_with("53"));
    if auth_failure {
        MailTransportError::authentication(detail)
    } else if error.is_permanent() || error.is_transient() {
        MailTransportError::rejected(detail)
    } else {
        MailTransportError::connection(detail)
    }
}
