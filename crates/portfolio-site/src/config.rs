//! Site settings loaded via OrthoConfig, and the adapters built from them.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::contact::{ContactScreen, HttpContactRelay};
use crate::feed::{DescriptionPolicy, FeedSort, FeedView, GithubRepositorySource};

const DEFAULT_RELAY_URL: &str = "http://localhost:8080/relay";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while turning settings into a [`Site`].
#[derive(Debug, thiserror::Error)]
pub enum SiteConfigError {
    /// A URL setting did not parse.
    #[error("{setting} is not a valid URL ({value}): {message}")]
    InvalidUrl {
        /// Setting name.
        setting: &'static str,
        /// Offending value.
        value: String,
        /// Parser detail.
        message: String,
    },
    /// The feed sort key is neither `created` nor `updated`.
    #[error("feed_sort is invalid: {message}")]
    InvalidSort {
        /// Parser detail.
        message: String,
    },
    /// The timeout is zero.
    #[error("timeout_seconds must be positive")]
    ZeroTimeout,
    /// An HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Settings for the contact and projects sections.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITE")]
pub struct SiteSettings {
    /// Account whose public repositories are listed.
    pub account_name: Option<String>,
    /// External profile link shown next to the feed.
    pub profile_url: Option<String>,
    /// Contact relay endpoint.
    pub relay_url: Option<String>,
    /// Repository host API base.
    pub api_base: Option<String>,
    /// Listing order, `created` or `updated`.
    pub feed_sort: Option<String>,
    /// Hide repositories without a description.
    #[ortho_config(default = false)]
    pub require_description: bool,
    /// Request timeout for both HTTP clients.
    pub timeout_seconds: Option<u64>,
}

impl SiteSettings {
    /// Trimmed account name, if one is set.
    #[must_use]
    pub fn account_name(&self) -> Option<&str> {
        non_blank(self.account_name.as_deref())
    }

    /// Trimmed profile link, if one is set.
    #[must_use]
    pub fn profile_url(&self) -> Option<&str> {
        non_blank(self.profile_url.as_deref())
    }

    /// Relay endpoint, falling back to the local relay server.
    ///
    /// # Errors
    /// Returns [`SiteConfigError::InvalidUrl`] when the value does not parse.
    pub fn relay_url(&self) -> Result<Url, SiteConfigError> {
        parse_url("relay_url", self.relay_url.as_deref(), DEFAULT_RELAY_URL)
    }

    /// Repository host API base, falling back to GitHub.
    ///
    /// # Errors
    /// Returns [`SiteConfigError::InvalidUrl`] when the value does not parse.
    pub fn api_base(&self) -> Result<Url, SiteConfigError> {
        parse_url("api_base", self.api_base.as_deref(), DEFAULT_API_BASE)
    }

    /// Listing order, falling back to creation time.
    ///
    /// # Errors
    /// Returns [`SiteConfigError::InvalidSort`] for unknown keys.
    pub fn feed_sort(&self) -> Result<FeedSort, SiteConfigError> {
        non_blank(self.feed_sort.as_deref()).map_or(Ok(FeedSort::default()), |raw| {
            raw.parse()
                .map_err(|message| SiteConfigError::InvalidSort { message })
        })
    }

    /// Description filter for the feed.
    #[must_use]
    pub const fn description_policy(&self) -> DescriptionPolicy {
        if self.require_description {
            DescriptionPolicy::Require
        } else {
            DescriptionPolicy::Keep
        }
    }

    /// Request timeout, falling back to 30 seconds.
    ///
    /// # Errors
    /// Returns [`SiteConfigError::ZeroTimeout`] when set to zero.
    pub fn timeout(&self) -> Result<Duration, SiteConfigError> {
        match self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS) {
            0 => Err(SiteConfigError::ZeroTimeout),
            seconds => Ok(Duration::from_secs(seconds)),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_url(
    setting: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<Url, SiteConfigError> {
    let raw = non_blank(value).unwrap_or(default);
    Url::parse(raw).map_err(|error| SiteConfigError::InvalidUrl {
        setting,
        value: raw.to_owned(),
        message: error.to_string(),
    })
}

/// The two site sections wired to their HTTP adapters.
pub struct Site {
    /// Contact relay client.
    pub relay: HttpContactRelay,
    /// Repository listing client.
    pub repositories: GithubRepositorySource,
    /// Contact section state.
    pub contact: ContactScreen,
    /// Projects section state.
    pub feed: FeedView,
    account_name: Option<String>,
    profile_url: Option<String>,
}

impl Site {
    /// Build adapters and empty section state from `settings`.
    ///
    /// # Errors
    /// Returns [`SiteConfigError`] when a URL, the sort key or the timeout is
    /// invalid, or an HTTP client cannot be built.
    pub fn from_settings(settings: &SiteSettings) -> Result<Self, SiteConfigError> {
        let timeout = settings.timeout()?;
        let relay = HttpContactRelay::new(settings.relay_url()?, timeout)?;
        let repositories =
            GithubRepositorySource::new(settings.api_base()?, settings.feed_sort()?, timeout)?;
        Ok(Self {
            relay,
            repositories,
            contact: ContactScreen::new(),
            feed: FeedView::new(settings.description_policy()),
            account_name: settings.account_name().map(str::to_owned),
            profile_url: settings.profile_url().map(str::to_owned),
        })
    }

    /// Account whose repositories the feed lists.
    #[must_use]
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// External profile link, if configured.
    #[must_use]
    pub fn profile_url(&self) -> Option<&str> {
        self.profile_url.as_deref()
    }

    /// Refresh the feed for the configured account.
    pub async fn refresh_feed(&mut self) -> crate::feed::presenter::RefreshOutcome {
        self.feed
            .refresh(&self.repositories, self.account_name.as_deref())
            .await
    }

    /// Submit the contact form through the relay client.
    pub async fn submit_contact(&mut self) -> &crate::contact::SubmissionOutcome {
        self.contact.submit(&self.relay).await
    }
}
