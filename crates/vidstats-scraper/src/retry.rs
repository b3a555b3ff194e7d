//! Per-item retry policy for the fetch stage.
//!
//! Each URL gets a bounded number of attempts. Permanent outcomes
//! ([`FetchOutcome::NotFound`], [`FetchOutcome::Challenged`]) stop the loop
//! after the attempt that produced them; transient outcomes sleep a fixed
//! backoff and try again until the budget is spent.

use std::time::Duration;

use vidstats_core::ReportRow;

use crate::source::{FetchOutcome, MetricsSource};

/// Attempt budget and cooldown applied to every URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per URL, including the first. Never less than 1.
    pub max_attempts: u32,
    /// Fixed pause between a transient failure and the next attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    #[must_use]
    pub fn from_config(config: &vidstats_core::AppConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.retry_backoff_secs),
        )
    }
}

/// The row produced for one URL plus how many attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub row: ReportRow,
    pub attempts: u32,
}

/// Queries `source` for `url` under `policy` and always produces a row.
///
/// Failures never escape as errors: they are recorded in the row's `error`
/// field with zeroed counters.
pub async fn fetch_with_retry<S>(source: &S, url: &str, policy: RetryPolicy) -> ItemResult
where
    S: MetricsSource + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match source.video_stats(url).await {
            FetchOutcome::Success(metrics) => {
                return ItemResult {
                    row: ReportRow::success(url, metrics),
                    attempts: attempt,
                };
            }
            FetchOutcome::NotFound(reason) | FetchOutcome::Challenged(reason) => {
                tracing::warn!(url, attempt, error = %reason, "permanent failure — not retrying");
                return ItemResult {
                    row: ReportRow::failure(url, reason),
                    attempts: attempt,
                };
            }
            FetchOutcome::Transient(reason) => {
                if attempt >= max_attempts {
                    tracing::warn!(
                        url,
                        attempt,
                        max_attempts,
                        error = %reason,
                        "transient failure — attempts exhausted"
                    );
                    return ItemResult {
                        row: ReportRow::failure(url, reason),
                        attempts: attempt,
                    };
                }
                let delay_ms = u64::try_from(policy.backoff.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts,
                    delay_ms,
                    error = %reason,
                    "transient failure — retrying after backoff"
                );
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }
}
