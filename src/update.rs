//! Update notification.
//!
//! Once per session the latest release of the application's own distribution
//! repository is looked up and compared with the running version. The fetched
//! release is kept for the rest of the session so further checks never hit
//! the network again.

use semver::Version;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, IssueSource, Release};

/// The running application's version.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors produced while checking for updates.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Looking up the release failed.
    #[error("Release lookup failed: {0}")]
    Api(#[from] ApiError),

    /// The release tag is not a `v<major>.<minor>.<patch>` version.
    #[error("Invalid release tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },
}

/// Result of comparing a release with the running version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The running version is current (or newer).
    UpToDate,
    /// A newer release is published.
    Available {
        /// The running version.
        current: Version,
        /// The published version.
        latest: Version,
        /// The release tag as published.
        tag: String,
        /// URL of the release page.
        html_url: String,
    },
}

impl UpdateStatus {
    /// Whether a newer release is available.
    pub fn is_available(&self) -> bool {
        matches!(self, UpdateStatus::Available { .. })
    }
}

/// Whether the latest release has been looked up this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReleaseState {
    /// No lookup has happened yet.
    #[default]
    NotChecked,
    /// A lookup is in flight.
    Checking,
    /// The latest release is known.
    Known(Release),
}

/// Parse a release tag, dropping one leading `v`/`V`.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidTag`] if the rest is not a semantic version.
pub fn parse_tag(tag: &str) -> Result<Version, UpdateError> {
    let trimmed = tag.trim();
    let text = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    Version::parse(text).map_err(|e| UpdateError::InvalidTag {
        tag: tag.to_string(),
        reason: e.to_string(),
    })
}

/// Compare a published release with `current`.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidTag`] if the release tag does not parse.
pub fn compare_release(release: &Release, current: &Version) -> Result<UpdateStatus, UpdateError> {
    let latest = parse_tag(&release.tag_name)?;
    if &latest > current {
        Ok(UpdateStatus::Available {
            current: current.clone(),
            latest,
            tag: release.tag_name.clone(),
            html_url: release.html_url.clone(),
        })
    } else {
        Ok(UpdateStatus::UpToDate)
    }
}

/// The running version, falling back to 0.0.0 if the package version is odd.
pub fn current_version() -> Version {
    Version::parse(CURRENT_VERSION).unwrap_or_else(|_| Version::new(0, 0, 0))
}

/// One-shot update checker.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    owner: String,
    repo: String,
    current: Version,
    state: ReleaseState,
}

impl UpdateChecker {
    /// Create a checker for releases of `owner/repo`.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, current: Version) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            current,
            state: ReleaseState::NotChecked,
        }
    }

    /// The distribution repository as `owner/repo`.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// The distribution repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The distribution repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The running version.
    pub fn current(&self) -> &Version {
        &self.current
    }

    /// The lookup state.
    pub fn state(&self) -> &ReleaseState {
        &self.state
    }

    /// Claim the one lookup of this session.
    ///
    /// Returns `false` if a lookup already happened or is in flight, in which
    /// case the caller must not fetch.
    pub fn begin(&mut self) -> bool {
        if self.state != ReleaseState::NotChecked {
            return false;
        }
        self.state = ReleaseState::Checking;
        true
    }

    /// Record the outcome of a lookup started with [`begin`](Self::begin).
    ///
    /// A failed lookup returns the checker to `NotChecked` without retrying.
    ///
    /// # Errors
    ///
    /// Returns the lookup error, or [`UpdateError::InvalidTag`].
    pub fn complete(
        &mut self,
        result: Result<Release, ApiError>,
    ) -> Result<UpdateStatus, UpdateError> {
        match result {
            Ok(release) => {
                info!(tag = %release.tag_name, this = %self.current, "Found latest release");
                let status = compare_release(&release, &self.current);
                self.state = ReleaseState::Known(release);
                status
            }
            Err(e) => {
                warn!("Release lookup failed: {}", e);
                self.state = ReleaseState::NotChecked;
                Err(e.into())
            }
        }
    }

    /// Outcome from the cached release, if one is known.
    pub fn cached_status(&self) -> Option<Result<UpdateStatus, UpdateError>> {
        match &self.state {
            ReleaseState::Known(release) => Some(compare_release(release, &self.current)),
            _ => None,
        }
    }

    /// Check for a newer release, fetching at most once per session.
    ///
    /// Returns `Ok(None)` while another lookup is in flight.
    ///
    /// # Errors
    ///
    /// Returns the lookup error or an invalid-tag error.
    pub async fn check<S: IssueSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<Option<UpdateStatus>, UpdateError> {
        if let Some(cached) = self.cached_status() {
            return cached.map(Some);
        }
        if !self.begin() {
            return Ok(None);
        }

        info!(repository = %self.repository(), "Checking for new release");
        let result = source.latest_release(&self.owner, &self.repo).await;
        self.complete(result).map(Some)
    }
}
