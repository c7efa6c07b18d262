//! Contact relay use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ContactRelayCommand, MailTransport};
use crate::domain::{
    ContactSubmission, EmailMessage, HtmlBodyPolicy, MailRouting, RelayError, TraceId,
};

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    /// Subject line of the delivered email.
    pub subject: String,
}

/// Turns one raw request body into one delivered email.
///
/// Holds no mutable state; concurrent requests share only the transport.
#[derive(Clone)]
pub struct ContactRelayService {
    transport: Arc<dyn MailTransport>,
    routing: MailRouting,
    html_policy: HtmlBodyPolicy,
}

impl ContactRelayService {
    /// Build a service delivering through `transport` to the given mailboxes.
    pub fn new(transport: Arc<dyn MailTransport>, routing: MailRouting) -> Self {
        Self {
            transport,
            routing,
            html_policy: HtmlBodyPolicy::default(),
        }
    }

    /// Override how submitted text is embedded in the HTML part.
    #[must_use]
    pub fn with_html_policy(mut self, policy: HtmlBodyPolicy) -> Self {
        self.html_policy = policy;
        self
    }
}

#[async_trait]
impl ContactRelayCommand for ContactRelayService {
    async fn relay(&self, body: &[u8]) -> Result<RelayReceipt, RelayError> {
        let submission = ContactSubmission::from_json_body(body)?;
        let message = EmailMessage::compose(&submission, &self.routing, self.html_policy);
        self.transport.deliver(&message).await?;
        info!(
            trace_id = %TraceId::current_label(),
            subject = %message.subject,
            "contact message relayed"
        );
        Ok(RelayReceipt {
            subject: message.subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MailTransportError, MockMailTransport};
    use rstest::{fixture, rstest};

    const VALID_BODY: &[u8] = br#"{"name":"A","email":"a@b.com","message":"hi"}"#;

    #[fixture]
    fn routing() -> MailRouting {
        MailRouting {
            sender_address: "relay@example.com".to_owned(),
            recipient_address: "owner@example.com".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn delivers_exactly_one_message(routing: MailRouting) {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .withf(|message| {
                message.subject == "Portfolio contact from A"
                    && message.from_envelope_address == "relay@example.com"
                    && message.to_address == "owner@example.com"
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = ContactRelayService::new(Arc::new(transport), routing);

        let receipt = service.relay(VALID_BODY).await.expect("relay succeeds");
        assert_eq!(receipt.subject, "Portfolio contact from A");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_fields_never_reach_transport(routing: MailRouting) {
        let mut transport = MockMailTransport::new();
        transport.expect_deliver().times(0);
        let service = ContactRelayService::new(Arc::new(transport), routing);

        let error = service
            .relay(br#"{"name":"A"}"#)
            .await
            .expect_err("incomplete body is rejected");
        assert!(matches!(error, RelayError::MissingFields(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn transport_failure_becomes_delivery_error(routing: MailRouting) {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .times(1)
            .returning(|_| Err(MailTransportError::connection("connection refused")));
        let service = ContactRelayService::new(Arc::new(transport), routing);

        let error = service.relay(VALID_BODY).await.expect_err("delivery fails");
        assert_eq!(error.client_message(), "connection refused");
    }

    #[rstest]
    #[tokio::test]
    async fn escaped_policy_reaches_transport(routing: MailRouting) {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .withf(|message| message.html_body.starts_with("<p>&lt;i&gt;"))
            .times(1)
            .returning(|_| Ok(()));
        let service = ContactRelayService::new(Arc::new(transport), routing)
            .with_html_policy(HtmlBodyPolicy::Escaped);

        service
            .relay(br#"{"name":"A","email":"a@b.com","message":"<i>hi</i>"}"#)
            .await
            .expect("relay succeeds");
    }
}
