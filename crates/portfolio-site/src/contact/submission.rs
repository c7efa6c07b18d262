//! Sending a validated contact form to the relay.
//!
//! The client does no validation of its own; callers run
//! [`validate`](super::validate) first. There are no retries: each call is a
//! single POST whose result is folded into a [`SubmissionOutcome`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::error;

use super::ContactForm;

/// Banner text when the relay fails without a usable message.
pub const SEND_FAILED_FALLBACK: &str = "Failed to send message.";
/// Banner text when the request never reached the relay.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error while sending message.";

/// Where a submission attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No attempt yet, or the last banner was dismissed.
    #[default]
    Idle,
    /// A request is in flight.
    Sending,
    /// The relay accepted the message.
    Sent,
    /// The relay answered with a failure status.
    ServerError(String),
    /// The relay could not be reached.
    NetworkError(String),
}

impl SubmissionOutcome {
    /// Text for the error banner, if this outcome shows one.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::ServerError(message) | Self::NetworkError(message) => Some(message),
            Self::Idle | Self::Sending | Self::Sent => None,
        }
    }

    /// Whether the outcome is final for its attempt.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Idle | Self::Sending)
    }
}

/// Port for delivering a contact form to the relay.
///
/// Implementations always settle: the returned outcome is never
/// [`SubmissionOutcome::Idle`] or [`SubmissionOutcome::Sending`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    /// Send `form` and report how the attempt ended.
    async fn submit(&self, form: &ContactForm) -> SubmissionOutcome;
}

/// Map a relay response to an outcome.
///
/// A 2xx status is success regardless of body. Otherwise the body is read as
/// JSON and its `error`, then `message`, string becomes the banner; anything
/// else yields [`SEND_FAILED_FALLBACK`].
///
/// # Examples
/// ```
/// use portfolio_site::contact::{SubmissionOutcome, outcome_from_response};
/// use reqwest::StatusCode;
///
/// let outcome = outcome_from_response(StatusCode::BAD_REQUEST, b"Missing required fields");
/// assert_eq!(
///     outcome,
///     SubmissionOutcome::ServerError("Failed to send message.".to_owned())
/// );
/// ```
#[must_use]
pub fn outcome_from_response(status: StatusCode, body: &[u8]) -> SubmissionOutcome {
    if status.is_success() {
        return SubmissionOutcome::Sent;
    }
    let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let message = ["error", "message"]
        .into_iter()
        .filter_map(|key| parsed.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(SEND_FAILED_FALLBACK);
    SubmissionOutcome::ServerError(message.to_owned())
}

/// Reqwest adapter posting forms as JSON to the relay URL.
pub struct HttpContactRelay {
    client: Client,
    endpoint: Url,
}

impl HttpContactRelay {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Relay URL requests are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactRelay for HttpContactRelay {
    async fn submit(&self, form: &ContactForm) -> SubmissionOutcome {
        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, endpoint = %self.endpoint, "contact relay unreachable");
                return SubmissionOutcome::NetworkError(NETWORK_ERROR_MESSAGE.to_owned());
            }
        };

        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();
        let outcome = outcome_from_response(status, &body);
        if let SubmissionOutcome::ServerError(message) = &outcome {
            error!(status = status.as_u16(), %message, "contact relay rejected submission");
        }
        outcome
    }
}
