//! Repository listing retrieval.
//!
//! The adapter owns transport details only: URL construction, headers,
//! timeout and status mapping, and tolerant JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::warn;

use super::{FeedSort, RepositoryRecord};

const USER_AGENT: &str = concat!("portfolio-site/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Errors surfaced while fetching the repository listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedSourceError {
    /// The request could not be sent or the response could not be read.
    #[error("repository listing transport failed: {message}")]
    Transport {
        /// Transport detail.
        message: String,
    },
    /// The request or the host timed out.
    #[error("repository listing timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The host refused the request because of rate limits.
    #[error("repository listing rate limited: {message}")]
    RateLimited {
        /// Host detail.
        message: String,
    },
    /// The host answered with another non-success status.
    #[error("repository listing returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Body preview.
        message: String,
    },
    /// The body was not a JSON array.
    #[error("repository listing could not be decoded: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },
}

/// Port for listing an account's public repositories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch every repository the host returns for `account`.
    async fn fetch_repositories(
        &self,
        account: &str,
    ) -> Result<Vec<RepositoryRecord>, FeedSourceError>;
}

/// Unauthenticated reqwest adapter for the GitHub REST API.
pub struct GithubRepositorySource {
    client: Client,
    api_base: Url,
    sort: FeedSort,
}

impl GithubRepositorySource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_base: Url, sort: FeedSort, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_base,
            sort,
        })
    }

    /// Listing URL for `account`, with the account percent-encoded as a path
    /// segment.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use portfolio_site::feed::{FeedSort, GithubRepositorySource};
    /// use reqwest::Url;
    ///
    /// let base = Url::parse("https://api.github.com").expect("valid base");
    /// let source = GithubRepositorySource::new(base, FeedSort::Updated, Duration::from_secs(5))
    ///     .expect("client builds");
    /// let url = source.listing_url("octo cat").expect("listing url");
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://api.github.com/users/octo%20cat/repos?sort=updated&direction=desc"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FeedSourceError::Transport`] when the API base cannot carry
    /// path segments.
    pub fn listing_url(&self, account: &str) -> Result<Url, FeedSourceError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| FeedSourceError::Transport {
                message: format!("api base {} cannot carry a path", self.api_base),
            })?
            .pop_if_empty()
            .extend(["users", account, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", self.sort.as_query())
            .append_pair("direction", "desc");
        Ok(url)
    }
}

#[async_trait]
impl RepositorySource for GithubRepositorySource {
    async fn fetch_repositories(
        &self,
        account: &str,
    ) -> Result<Vec<RepositoryRecord>, FeedSourceError> {
        let url = self.listing_url(account)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_records(body.as_ref())
    }
}

/// Decode a listing body, skipping entries that do not look like repositories.
///
/// # Errors
///
/// Returns [`FeedSourceError::Decode`] when the body is not a JSON array.
pub fn decode_records(body: &[u8]) -> Result<Vec<RepositoryRecord>, FeedSourceError> {
    let entries: Vec<Value> =
        serde_json::from_slice(body).map_err(|error| FeedSourceError::Decode {
            message: format!("expected a JSON array of repositories: {error}"),
        })?;

    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(index, %error, "skipping malformed repository entry");
                None
            }
        })
        .collect();
    Ok(records)
}

fn map_transport_error(error: reqwest::Error) -> FeedSourceError {
    if error.is_timeout() {
        FeedSourceError::Timeout {
            message: error.to_string(),
        }
    } else {
        FeedSourceError::Transport {
            message: error.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> FeedSourceError {
    let message = body_preview(body);
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            FeedSourceError::RateLimited { message }
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            FeedSourceError::Timeout { message }
        }
        _ => FeedSourceError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
