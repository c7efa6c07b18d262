//! SMTP settings read from the process environment.
//!
//! Variable names are part of the deployment contract and match the hosting
//! provider's secret names, so they are read directly rather than through a
//! prefixed config layer.

use lettre::Address;
use tracing::warn;

use crate::domain::MailRouting;

/// SMTP server hostname.
pub const SMTP_HOST_ENV: &str = "SMTP_HOST";
/// SMTP server port.
pub const SMTP_PORT_ENV: &str = "SMTP_PORT";
/// SMTP account name; the envelope sender when it is an address.
pub const SMTP_USER_ENV: &str = "SMTP_USER";
/// Optional operator mailbox used as the envelope sender.
pub const SMTP_FROM_ENV: &str = "SMTP_FROM";
/// SMTP account password.
pub const SMTP_PASS_ENV: &str = "SMTP_PASS";
/// Mailbox that receives contact messages.
pub const CONTACT_EMAIL_ENV: &str = "CONTACT_EMAIL";

const DEFAULT_SMTP_HOST: &str = "smtp.mailtrap.io";
const DEFAULT_SMTP_PORT: u16 = 587;
const IMPLICIT_TLS_PORT: u16 = 465;

/// Environment abstraction for SMTP lookups.
///
/// Lets tests supply variables without mutating the process environment.
pub trait MailEnv {
    /// Fetch a variable by name.
    fn string(&self, name: &str) -> Option<String>;
}

/// Environment access backed by the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessMailEnv;

impl MailEnv for ProcessMailEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Validated SMTP connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Account name used to authenticate.
    pub username: String,
    /// Envelope sender address.
    pub sender: String,
    /// Account password.
    pub password: String,
    /// Destination mailbox.
    pub recipient: String,
}

impl SmtpSettings {
    /// Whether the connection starts with TLS (port 465) instead of upgrading.
    #[must_use]
    pub fn implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }

    /// Mailboxes used when composing relay messages.
    #[must_use]
    pub fn routing(&self) -> MailRouting {
        MailRouting {
            sender_address: self.sender.clone(),
            recipient_address: self.recipient.clone(),
        }
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Errors raised while reading SMTP settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SmtpConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// The configured sender is not a mailbox address.
    #[error("{name} is not a valid email address ({value}): {message}")]
    InvalidSender {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parser detail.
        message: String,
    },
}

/// Read SMTP settings from `env`.
///
/// Host and port fall back to defaults; a port that is not a positive integer
/// is replaced by the default with a warning. Credentials and the destination
/// mailbox are required.
///
/// The envelope sender is `SMTP_FROM` when set. Otherwise it is `SMTP_USER`
/// when that is an address, and the destination mailbox when the account name
/// is an opaque token.
///
/// # Examples
/// ```
/// use portfolio_backend::outbound::smtp::{smtp_settings_from_env, MailEnv};
///
/// struct Vars;
/// impl MailEnv for Vars {
///     fn string(&self, name: &str) -> Option<String> {
///         match name {
///             "SMTP_USER" => Some("relay@example.com".into()),
///             "SMTP_PASS" => Some("secret".into()),
///             "CONTACT_EMAIL" => Some("owner@example.com".into()),
///             _ => None,
///         }
///     }
/// }
///
/// let settings = smtp_settings_from_env(&Vars).expect("settings load");
/// assert_eq!(settings.host, "smtp.mailtrap.io");
/// assert_eq!(settings.port, 587);
/// assert!(!settings.implicit_tls());
/// ```
///
/// # Errors
/// Returns [`SmtpConfigError::MissingEnv`] for the first required variable
/// that is unset or blank, and [`SmtpConfigError::InvalidSender`] when
/// `SMTP_FROM` is set but is not an address.
pub fn smtp_settings_from_env<E: MailEnv>(env: &E) -> Result<SmtpSettings, SmtpConfigError> {
    let host = non_blank(env, SMTP_HOST_ENV).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned());
    let port = port_from_env(env);
    let username = required(env, SMTP_USER_ENV)?;
    let password = required(env, SMTP_PASS_ENV)?;
    let recipient = required(env, CONTACT_EMAIL_ENV)?;
    let sender = sender_from_env(env, &username, &recipient)?;

    Ok(SmtpSettings {
        host,
        port,
        username,
        sender,
        password,
        recipient,
    })
}

fn sender_from_env<E: MailEnv>(
    env: &E,
    username: &str,
    recipient: &str,
) -> Result<String, SmtpConfigError> {
    if let Some(raw) = non_blank(env, SMTP_FROM_ENV) {
        let from = raw.trim();
        return from
            .parse::<Address>()
            .map(|_| from.to_owned())
            .map_err(|error| SmtpConfigError::InvalidSender {
                name: SMTP_FROM_ENV,
                value: from.to_owned(),
                message: error.to_string(),
            });
    }
    if username.trim().parse::<Address>().is_ok() {
        return Ok(username.trim().to_owned());
    }
    warn!("SMTP_USER is not an address and SMTP_FROM is unset; sending from CONTACT_EMAIL");
    Ok(recipient.trim().to_owned())
}

fn port_from_env<E: MailEnv>(env: &E) -> u16 {
    let Some(raw) = non_blank(env, SMTP_PORT_ENV) else {
        return DEFAULT_SMTP_PORT;
    };
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            warn!(value = %raw, "invalid SMTP_PORT; using {DEFAULT_SMTP_PORT}");
            DEFAULT_SMTP_PORT
        }
    }
}

fn non_blank<E: MailEnv>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn required<E: MailEnv>(env: &E, name: &'static str) -> Result<String, SmtpConfigError> {
    non_blank(env, name).ok_or(SmtpConfigError::MissingEnv { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::{Env as MockableEnv, MockEnv};
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    struct TestEnv {
        inner: MockEnv,
    }

    impl MailEnv for TestEnv {
        fn string(&self, name: &str) -> Option<String> {
            MockableEnv::string(&self.inner, name)
        }
    }

    fn mock_env(vars: HashMap<String, String>) -> TestEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        TestEnv { inner: env }
    }

    #[fixture]
    fn complete_vars() -> HashMap<String, String> {
        HashMap::from([
            (SMTP_USER_ENV.to_owned(), "relay@example.com".to_owned()),
            (SMTP_PASS_ENV.to_owned(), "secret".to_owned()),
            (CONTACT_EMAIL_ENV.to_owned(), "owner@example.com".to_owned()),
        ])
    }

    #[rstest]
    fn defaults_apply_when_host_and_port_are_unset(complete_vars: HashMap<String, String>) {
        let settings = smtp_settings_from_env(&mock_env(complete_vars)).expect("settings load");
        assert_eq!(settings.host, DEFAULT_SMTP_HOST);
        assert_eq!(settings.port, DEFAULT_SMTP_PORT);
        assert_eq!(
            settings.routing(),
            MailRouting {
                sender_address: "relay@example.com".to_owned(),
                recipient_address: "owner@example.com".to_owned(),
            }
        );
    }

    #[rstest]
    #[case::implicit("465", 465, true)]
    #[case::submission("587", 587, false)]
    #[case::alternate("2525", 2525, false)]
    #[case::padded(" 465 ", 465, true)]
    #[case::not_numeric("abc", DEFAULT_SMTP_PORT, false)]
    #[case::zero("0", DEFAULT_SMTP_PORT, false)]
    #[case::blank("", DEFAULT_SMTP_PORT, false)]
    fn port_selects_tls_mode(
        mut complete_vars: HashMap<String, String>,
        #[case] raw: &str,
        #[case] port: u16,
        #[case] implicit_tls: bool,
    ) {
        complete_vars.insert(SMTP_PORT_ENV.to_owned(), raw.to_owned());
        let settings = smtp_settings_from_env(&mock_env(complete_vars)).expect("settings load");
        assert_eq!(settings.port, port);
        assert_eq!(settings.implicit_tls(), implicit_tls);
    }

    #[rstest]
    #[case(SMTP_USER_ENV)]
    #[case(SMTP_PASS_ENV)]
    #[case(CONTACT_EMAIL_ENV)]
    fn required_variables_are_enforced(
        mut complete_vars: HashMap<String, String>,
        #[case] name: &'static str,
    ) {
        complete_vars.insert(name.to_owned(), "   ".to_owned());
        let error = smtp_settings_from_env(&mock_env(complete_vars)).expect_err("blank is missing");
        assert_eq!(error, SmtpConfigError::MissingEnv { name });
    }

    #[rstest]
    fn account_token_falls_back_to_destination_sender(mut complete_vars: HashMap<String, String>) {
        complete_vars.insert(SMTP_USER_ENV.to_owned(), "1a2b3c4d5e6f7g".to_owned());
        let settings = smtp_settings_from_env(&mock_env(complete_vars)).expect("settings load");
        assert_eq!(settings.username, "1a2b3c4d5e6f7g");
        assert_eq!(settings.routing().sender_address, "owner@example.com");
    }

    #[rstest]
    #[case::account_address("relay@example.com")]
    #[case::account_token("1a2b3c4d5e6f7g")]
    fn explicit_sender_takes_precedence(
        mut complete_vars: HashMap<String, String>,
        #[case] username: &str,
    ) {
        complete_vars.insert(SMTP_USER_ENV.to_owned(), username.to_owned());
        complete_vars.insert(SMTP_FROM_ENV.to_owned(), " site@example.org ".to_owned());
        let settings = smtp_settings_from_env(&mock_env(complete_vars)).expect("settings load");
        assert_eq!(settings.sender, "site@example.org");
        assert_eq!(settings.username, username);
    }

    #[rstest]
    fn invalid_explicit_sender_is_rejected(mut complete_vars: HashMap<String, String>) {
        complete_vars.insert(SMTP_FROM_ENV.to_owned(), "no-domain".to_owned());
        let error = smtp_settings_from_env(&mock_env(complete_vars)).expect_err("sender rejected");
        assert!(matches!(
            error,
            SmtpConfigError::InvalidSender { name: SMTP_FROM_ENV, ref value, .. } if value == "no-domain"
        ));
    }

    #[rstest]
    fn debug_output_redacts_password(complete_vars: HashMap<String, String>) {
        let settings = smtp_settings_from_env(&mock_env(complete_vars)).expect("settings load");
        let rendered = format!("{settings:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret"));
    }
}
