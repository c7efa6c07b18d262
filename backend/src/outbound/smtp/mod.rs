//! SMTP adapter for the `MailTransport` port.
//!
//! Settings come from the `SMTP_*` and `CONTACT_EMAIL` variables; the
//! transport is built once at startup and shared across requests.

mod settings;
mod transport;

pub use settings::{
    CONTACT_EMAIL_ENV, MailEnv, ProcessMailEnv, SMTP_HOST_ENV, SMTP_PASS_ENV, SMTP_PORT_ENV,
    SMTP_FROM_ENV, SMTP_USER_ENV, SmtpConfigError, SmtpSettings, smtp_settings_from_env,
};
pub use transport::{SmtpMailTransport, UnconfiguredMailTransport};
