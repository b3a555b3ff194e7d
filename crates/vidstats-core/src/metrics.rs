//! Report row and engagement counter types shared by the fetch and present
//! stages.
//!
//! A [`ReportRow`] is the unit of work for the fetcher and the unit of output
//! in the persisted report. Its metric fields are only meaningful when
//! `error` is empty; failed rows always carry zeroed counters.

use serde::{Deserialize, Serialize};

/// Description recorded when a failure arrives without any message of its own.
const UNKNOWN_FAILURE: &str = "unknown error";

/// The four engagement counters reported for a single video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// One URL's outcome: populated metrics or a failure description.
///
/// Field order matches the report header
/// `url,views,likes,comments,shares,error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub url: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub error: String,
}

impl ReportRow {
    /// Builds a successful row carrying `metrics` and an empty `error`.
    pub fn success(url: impl Into<String>, metrics: VideoMetrics) -> Self {
        Self {
            url: url.into(),
            views: metrics.views,
            likes: metrics.likes,
            comments: metrics.comments,
            shares: metrics.shares,
            error: String::new(),
        }
    }

    /// Builds a failed row with zeroed counters.
    ///
    /// A blank `description` is replaced with a generic message so that a
    /// failed row can never be mistaken for a successful one.
    pub fn failure(url: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        let error = if description.trim().is_empty() {
            UNKNOWN_FAILURE.to_owned()
        } else {
            description
        };
        Self {
            url: url.into(),
            views: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            error,
        }
    }

    /// `true` when the row has no recorded error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.trim().is_empty()
    }

    #[must_use]
    pub fn metrics(&self) -> VideoMetrics {
        VideoMetrics {
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        }
    }
}
