//! OpenAPI schema wrappers for relay payloads.
//!
//! The handler reads the raw body itself; these types exist so the documented
//! contract matches what browsers send and receive.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact form payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RelayRequestSchema {
    /// Sender's name; becomes the display name and subject suffix.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Sender's address, quoted in the message body.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Free-form message text.
    #[schema(example = "Hello!")]
    pub message: String,
}

/// Confirmation returned when the provider accepts the message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RelayConfirmation {
    /// Human-readable confirmation.
    #[schema(example = "Email sent.")]
    pub message: String,
}

/// Failure body returned on a 500.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RelayErrorBody {
    /// Provider error text, or "Unknown error".
    #[schema(example = "Connection refused")]
    pub error: String,
}
