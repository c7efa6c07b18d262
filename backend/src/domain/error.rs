//! Relay failures, independent of the transport that reports them.
//!
//! Inbound adapters decide how each variant is rendered; the HTTP adapter
//! maps them to a plain-text 400 or a JSON 500.

use crate::domain::MissingFields;
use crate::domain::ports::MailTransportError;

/// Message used when a delivery failure carries no detail.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Reasons a relay request does not end in a sent email.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The payload lacked a required field.
    #[error(transparent)]
    MissingFields(#[from] MissingFields),
    /// Composition or delivery failed after the payload was accepted.
    #[error(transparent)]
    Delivery(#[from] MailTransportError),
}

impl RelayError {
    /// Text returned to the caller for this failure.
    ///
    /// # Examples
    /// ```
    /// use portfolio_backend::domain::RelayError;
    /// use portfolio_backend::domain::ports::MailTransportError;
    ///
    /// let err = RelayError::from(MailTransportError::connection("  "));
    /// assert_eq!(err.client_message(), "Unknown error");
    /// ```
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingFields(missing) => missing.to_string(),
            Self::Delivery(error) => {
                let detail = error.detail().trim();
                if detail.is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_owned()
                } else {
                    detail.to_owned()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactSubmission;

    #[test]
    fn missing_fields_message_is_fixed() {
        let missing = ContactSubmission::from_json_body(b"{}").expect_err("empty body");
        let error = RelayError::from(missing);
        assert_eq!(error.client_message(), "Missing required fields");
    }

    #[test]
    fn delivery_message_is_provider_detail() {
        let error = RelayError::from(MailTransportError::authentication("535 bad credentials"));
        assert_eq!(error.client_message(), "535 bad credentials");
    }

    #[test]
    fn blank_delivery_detail_falls_back() {
        let error = RelayError::from(MailTransportError::rejected(""));
        assert_eq!(error.client_message(), UNKNOWN_ERROR_MESSAGE);
    }
}
