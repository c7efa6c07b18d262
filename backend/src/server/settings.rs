//! Relay server settings loaded via OrthoConfig.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::HtmlBodyPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RELAY_PATH: &str = "/relay";

/// Listener and routing settings for the relay server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELAY")]
pub struct RelaySettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Path the relay is mounted at.
    pub path: Option<String>,
    /// Escape submitted text before embedding it in the HTML part.
    #[ortho_config(default = false)]
    pub escape_html: bool,
}

impl RelaySettings {
    /// Configured interface, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Relay path with a leading slash, falling back to `/relay`.
    pub fn relay_path(&self) -> String {
        match self.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() && path != "/" => {
                format!("/{}", path.trim_start_matches('/'))
            }
            _ => DEFAULT_RELAY_PATH.to_owned(),
        }
    }

    /// How submitted text is embedded in the HTML part.
    pub fn html_policy(&self) -> HtmlBodyPolicy {
        if self.escape_html {
            HtmlBodyPolicy::Escaped
        } else {
            HtmlBodyPolicy::Verbatim
        }
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::other(format!("host {} did not resolve", self.host())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> RelaySettings {
        RelaySettings::load_from_iter([OsString::from("portfolio-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("RELAY_HOST", None::<String>),
            ("RELAY_PORT", None::<String>),
            ("RELAY_PATH", None::<String>),
            ("RELAY_ESCAPE_HTML", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.relay_path(), DEFAULT_RELAY_PATH);
        assert_eq!(settings.html_policy(), HtmlBodyPolicy::Verbatim);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RELAY_HOST", Some("127.0.0.1".to_owned())),
            ("RELAY_PORT", Some("9090".to_owned())),
            ("RELAY_PATH", Some("api/contact".to_owned())),
            ("RELAY_ESCAPE_HTML", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address resolves"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(settings.relay_path(), "/api/contact");
        assert_eq!(settings.html_policy(), HtmlBodyPolicy::Escaped);
    }

    #[rstest]
    #[case::root("/")]
    #[case::blank("  ")]
    fn unusable_paths_fall_back(#[case] path: &str) {
        let settings = RelaySettings {
            host: None,
            port: None,
            path: Some(path.to_owned()),
            escape_html: false,
        };
        assert_eq!(settings.relay_path(), DEFAULT_RELAY_PATH);
    }
}
