//! The contract between the fetch loop and whatever supplies video metrics.
//!
//! A source answers every query with a [`FetchOutcome`]. The retry policy in
//! [`crate::retry`] dispatches on the variant, never on error identity.

use async_trait::async_trait;
use vidstats_core::VideoMetrics;

use crate::error::ScraperError;

/// Result of a single metrics query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(VideoMetrics),
    /// The video does not exist or was removed.
    NotFound(String),
    /// A bot or verification challenge was served instead of the page.
    Challenged(String),
    /// Anything else: timeouts, network errors, rate limits, odd pages.
    Transient(String),
}

impl FetchOutcome {
    /// `true` for outcomes that retrying cannot change.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Challenged(_))
    }

    /// Classifies a client result into an outcome.
    ///
    /// [`ScraperError::NotFound`] and [`ScraperError::Challenged`] are
    /// permanent; every other error is transient.
    #[must_use]
    pub fn from_result(result: Result<VideoMetrics, ScraperError>) -> Self {
        match result {
            Ok(metrics) => Self::Success(metrics),
            Err(err @ ScraperError::NotFound { .. }) => Self::NotFound(err.to_string()),
            Err(err @ ScraperError::Challenged { .. }) => Self::Challenged(err.to_string()),
            Err(err) => Self::Transient(err.to_string()),
        }
    }
}

/// Anything that can be asked for a video's engagement counters.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn video_stats(&self, url: &str) -> FetchOutcome;
}
