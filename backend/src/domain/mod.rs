//! Domain types and use-cases for the contact relay.
//!
//! Purpose: keep submission checks, email composition and relay orchestration
//! free of HTTP and SMTP details. Adapters live under `inbound` and
//! `outbound` and talk to this module through [`ports`].
//!
//! Public surface:
//! - `ContactSubmission`: payload that passed the required-field check.
//! - `EmailMessage`: the composed outbound message.
//! - `ContactRelayService`: the relay use-case.
//! - `RelayError`: failure taxonomy mapped by inbound adapters.
//! - `TraceId`: request-scoped correlation identifier.

pub mod contact;
pub mod email;
pub mod error;
pub mod ports;
mod relay_service;
mod trace_id;

pub use self::contact::{ContactSubmission, MissingFields, REQUIRED_FIELDS};
pub use self::email::{EmailMessage, HtmlBodyPolicy, MailRouting};
pub use self::error::{RelayError, UNKNOWN_ERROR_MESSAGE};
pub use self::relay_service::{ContactRelayService, RelayReceipt};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
