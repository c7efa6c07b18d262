//! Feed view state for the projects section.
//!
//! Records are prepared once per fetch: forks are dropped, the description
//! policy is applied, and the rest are stably sorted by stars, most first.
//! The view then shows the first three or all of them.

use tracing::{debug, warn};

use super::source::{FeedSourceError, RepositorySource};
use super::RepositoryRecord;

/// Number of cards shown while collapsed.
pub const COLLAPSED_LEN: usize = 3;
/// Card text for repositories without a description.
pub const NO_DESCRIPTION: &str = "No description provided.";

const LABEL_SHOW_MORE: &str = "Show More";
const LABEL_SHOW_LESS: &str = "Show Less";

/// Whether repositories without a description are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptionPolicy {
    /// List every non-fork repository.
    #[default]
    Keep,
    /// Drop repositories whose description is absent or blank.
    Require,
}

/// Side effect the UI should perform after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEffect {
    /// Nothing beyond re-rendering.
    None,
    /// Scroll back to the start of the projects section.
    ScrollToSectionTop,
}

/// What a refresh did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No account is configured; nothing was fetched.
    Skipped,
    /// The listing replaced the previous records.
    Updated {
        /// Records left after preparation.
        listed: usize,
    },
    /// The fetch failed; the previous records stay.
    KeptPrevious(FeedSourceError),
    /// A newer refresh started before this one finished.
    Stale,
}

/// Proof that a refresh started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RepositoryRecord {
    /// Card description, falling back to [`NO_DESCRIPTION`].
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// Drop forks, apply `policy` and sort by stars descending.
///
/// Ties keep the order the host returned them in.
///
/// # Examples
/// ```
/// use portfolio_site::feed::presenter::prepare;
/// use portfolio_site::feed::DescriptionPolicy;
///
/// assert!(prepare(&[], DescriptionPolicy::Keep).is_empty());
/// ```
#[must_use]
pub fn prepare(records: &[RepositoryRecord], policy: DescriptionPolicy) -> Vec<RepositoryRecord> {
    let mut prepared: Vec<RepositoryRecord> = records
        .iter()
        .filter(|record| !record.is_fork)
        .filter(|record| policy == DescriptionPolicy::Keep || record.has_description())
        .cloned()
        .collect();
    prepared.sort_by(|a, b| b.star_count.cmp(&a.star_count));
    prepared
}

/// Projects section state.
#[derive(Debug, Clone, Default)]
pub struct FeedView {
    fetched: Vec<RepositoryRecord>,
    prepared: Vec<RepositoryRecord>,
    show_all: bool,
    policy: DescriptionPolicy,
    generation: u64,
}

impl FeedView {
    /// Empty, collapsed view using `policy`.
    #[must_use]
    pub fn new(policy: DescriptionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Replace the fetched records and recompute the prepared list.
    pub fn set_records(&mut self, records: Vec<RepositoryRecord>) {
        self.prepared = prepare(&records, self.policy);
        self.fetched = records;
    }

    /// Records exactly as fetched.
    #[must_use]
    pub fn fetched(&self) -> &[RepositoryRecord] {
        &self.fetched
    }

    /// Filtered and sorted records.
    #[must_use]
    pub fn prepared(&self) -> &[RepositoryRecord] {
        &self.prepared
    }

    /// Cards to render: a prefix of [`Self::prepared`].
    #[must_use]
    pub fn visible(&self) -> &[RepositoryRecord] {
        if self.show_all {
            return &self.prepared;
        }
        let len = self.prepared.len().min(COLLAPSED_LEN);
        self.prepared.get(..len).unwrap_or_default()
    }

    /// Whether every prepared record is visible.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.show_all
    }

    /// Whether the Show More / Show Less control is rendered.
    #[must_use]
    pub fn shows_toggle(&self) -> bool {
        self.prepared.len() > COLLAPSED_LEN
    }

    /// Label for the toggle control.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if self.show_all {
            LABEL_SHOW_LESS
        } else {
            LABEL_SHOW_MORE
        }
    }

    /// Flip between collapsed and expanded.
    ///
    /// Collapsing asks the UI to scroll back to the section start.
    pub const fn toggle(&mut self) -> ToggleEffect {
        self.show_all = !self.show_all;
        if self.show_all {
            ToggleEffect::None
        } else {
            ToggleEffect::ScrollToSectionTop
        }
    }

    /// Start a refresh, invalidating any refresh still in flight.
    pub const fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result for `ticket`.
    ///
    /// Failures are logged and leave the current records untouched.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<RepositoryRecord>, FeedSourceError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            debug!("discarding stale repository listing");
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(records) => {
                self.set_records(records);
                RefreshOutcome::Updated {
                    listed: self.prepared.len(),
                }
            }
            Err(error) => {
                warn!(%error, kept = self.prepared.len(), "repository listing unavailable");
                RefreshOutcome::KeptPrevious(error)
            }
        }
    }

    /// Fetch the listing for `account` and apply it.
    ///
    /// Skipped when `account` is unset or blank.
    pub async fn refresh(
        &mut self,
        source: &dyn RepositorySource,
        account: Option<&str>,
    ) -> RefreshOutcome {
        let Some(account_name) = account.map(str::trim).filter(|name| !name.is_empty()) else {
            return RefreshOutcome::Skipped;
        };
        let ticket = self.begin_refresh();
        let result = source.fetch_repositories(account_name).await;
        self.finish_refresh(ticket, result)
    }
}
