//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **smtp**: lettre-backed delivery of relay messages, plus the settings
//!   loader for the SMTP environment variables.
//!
//! Adapters translate between domain types and provider representations and
//! hold no business logic.

pub mod smtp;
