//! The fetch stage: URL list in, report file out.
//!
//! URLs are processed strictly one at a time in input order. A failure on one
//! URL is captured in its row and never stops the loop; only input, session
//! setup, and report-writing failures abort a run.

use std::collections::HashSet;

use tokio::sync::mpsc::UnboundedSender;
use vidstats_core::{AppConfig, ReportRow};

use crate::client::{SessionSettings, TikTokClient};
use crate::error::ScraperError;
use crate::input::read_url_list;
use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::source::MetricsSource;

/// Structured progress emitted while a fetch run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Started {
        total: usize,
    },
    ItemFinished {
        /// Zero-based position in the input list.
        index: usize,
        url: String,
        attempts: u32,
        succeeded: bool,
    },
    Finished {
        succeeded: usize,
        failed: usize,
    },
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub rows: Vec<ReportRow>,
    pub succeeded: usize,
    pub failed: usize,
}

impl FetchSummary {
    #[must_use]
    pub fn from_rows(rows: Vec<ReportRow>) -> Self {
        let succeeded = rows.iter().filter(|r| r.is_success()).count();
        let failed = rows.len() - succeeded;
        Self {
            rows,
            succeeded,
            failed,
        }
    }
}

fn emit(progress: Option<&UnboundedSender<FetchEvent>>, event: FetchEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}

/// Fetches every URL in order and returns one row per URL.
///
/// The output has the same length and order as `urls`.
pub async fn fetch_all<S>(
    source: &S,
    urls: &[String],
    policy: RetryPolicy,
    progress: Option<&UnboundedSender<FetchEvent>>,
) -> Vec<ReportRow>
where
    S: MetricsSource + ?Sized,
{
    let total = urls.len();
    emit(progress, FetchEvent::Started { total });

    let mut seen: HashSet<&str> = HashSet::with_capacity(total);
    let mut rows = Vec::with_capacity(total);
    let mut succeeded = 0usize;

    for (index, url) in urls.iter().enumerate() {
        if !seen.insert(url.as_str()) {
            tracing::warn!(url = %url, index, "duplicate URL in input; fetching again");
        }

        let result = fetch_with_retry(source, url, policy).await;
        let ok = result.row.is_success();
        if ok {
            succeeded += 1;
            tracing::info!(
                url = %url,
                position = index + 1,
                total,
                views = result.row.views,
                "fetched video stats"
            );
        } else {
            tracing::warn!(
                url = %url,
                position = index + 1,
                total,
                attempts = result.attempts,
                error = %result.row.error,
                "video stats unavailable"
            );
        }

        emit(
            progress,
            FetchEvent::ItemFinished {
                index,
                url: url.clone(),
                attempts: result.attempts,
                succeeded: ok,
            },
        );
        rows.push(result.row);
    }

    emit(
        progress,
        FetchEvent::Finished {
            succeeded,
            failed: total - succeeded,
        },
    );
    rows
}

/// Runs the whole fetch stage described by `config`.
///
/// Reads `config.input_path`, opens one session, fetches every URL, closes
/// the session, then atomically writes `config.report_path`. An empty URL
/// list skips the session and writes a header-only report.
///
/// # Errors
///
/// Returns [`ScraperError::Input`] if the URL list cannot be read,
/// [`ScraperError::Session`] if the session cannot be established, or
/// [`ScraperError::Report`] if the report cannot be written. Per-URL
/// failures are recorded in the rows, not returned.
pub async fn run_fetch(
    config: &AppConfig,
    progress: Option<&UnboundedSender<FetchEvent>>,
) -> Result<FetchSummary, ScraperError> {
    let urls = read_url_list(&config.input_path)?;
    let policy = RetryPolicy::from_config(config);

    tracing::info!(
        input = %config.input_path.display(),
        count = urls.len(),
        max_attempts = policy.max_attempts,
        "starting fetch run"
    );

    let rows = if urls.is_empty() {
        tracing::warn!(input = %config.input_path.display(), "URL list is empty");
        emit(progress, FetchEvent::Started { total: 0 });
        emit(
            progress,
            FetchEvent::Finished {
                succeeded: 0,
                failed: 0,
            },
        );
        Vec::new()
    } else {
        let session = TikTokClient::connect(&SessionSettings::from_config(config)).await?;
        let rows = fetch_all(&session, &urls, policy, progress).await;
        session.close();
        rows
    };

    vidstats_report::write_report(&config.report_path, &rows)?;

    let summary = FetchSummary::from_rows(rows);
    tracing::info!(
        report = %config.report_path.display(),
        succeeded = summary.succeeded,
        failed = summary.failed,
        "fetch run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::source::FetchOutcome;
    use crate::test_support::{metrics, ScriptedSource};

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn no_wait() -> RetryPolicy {
        RetryPolicy::new(2, Duration::ZERO)
    }

    #[tokio::test]
    async fn produces_one_row_per_url_in_order() {
        let source = ScriptedSource::new()
            .script("a", vec![FetchOutcome::Success(metrics(100))])
            .script("b", vec![FetchOutcome::NotFound("video not found: b".to_owned())])
            .script("c", vec![FetchOutcome::Success(metrics(50))]);

        let rows = fetch_all(&source, &urls(&["a", "b", "c"]), no_wait(), None).await;

        let got: Vec<&str> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(got, vec!["a", "b", "c"]);
        assert!(rows[0].is_success());
        assert_eq!(rows[0].views, 100);
        assert!(!rows[1].is_success());
        assert_eq!(rows[1].metrics(), vidstats_core::VideoMetrics::default());
        assert_eq!(rows[2].views, 50);
        assert_eq!(source.calls("b"), 1);
    }

    #[tokio::test]
    async fn failure_does_not_stop_later_urls() {
        let source = ScriptedSource::new()
            .script("a", vec![FetchOutcome::Transient("timeout".to_owned())])
            .script("b", vec![FetchOutcome::Success(metrics(9))]);

        let rows = fetch_all(&source, &urls(&["a", "b"]), no_wait(), None).await;

        assert_eq!(rows.len(), 2);
        assert_eq!(source.calls("a"), 2);
        assert_eq!(rows[0].error, "timeout");
        assert!(rows[1].is_success());
    }

    #[tokio::test]
    async fn duplicate_urls_each_get_a_row() {
        let source = ScriptedSource::new().script("a", vec![FetchOutcome::Success(metrics(1))]);
        let rows = fetch_all(&source, &urls(&["a", "a"]), no_wait(), None).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(source.calls("a"), 2);
    }

    #[tokio::test]
    async fn emits_progress_events() {
        let source = ScriptedSource::new()
            .script("a", vec![FetchOutcome::Success(metrics(1))])
            .script("b", vec![FetchOutcome::Challenged("captcha".to_owned())]);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        fetch_all(&source, &urls(&["a", "b"]), no_wait(), Some(&tx)).await;
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                FetchEvent::Started { total: 2 },
                FetchEvent::ItemFinished {
                    index: 0,
                    url: "a".to_owned(),
                    attempts: 1,
                    succeeded: true
                },
                FetchEvent::ItemFinished {
                    index: 1,
                    url: "b".to_owned(),
                    attempts: 1,
                    succeeded: false
                },
                FetchEvent::Finished {
                    succeeded: 1,
                    failed: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn closed_progress_channel_is_ignored() {
        let source = ScriptedSource::new().script("a", vec![FetchOutcome::Success(metrics(1))]);
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let rows = fetch_all(&source, &urls(&["a"]), no_wait(), Some(&tx)).await;
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn summary_counts_outcomes() {
        let summary = FetchSummary::from_rows(vec![
            ReportRow::success("a", metrics(1)),
            ReportRow::failure("b", "gone"),
            ReportRow::success("c", metrics(2)),
        ]);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rows.len(), 3);
    }

    #[tokio::test]
    async fn missing_input_aborts_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config(dir.path());
        let err = run_fetch(&config, None).await.unwrap_err();
        assert!(matches!(err, ScraperError::Input { .. }), "got: {err:?}");
        assert!(!config.report_path.exists());
    }

    #[tokio::test]
    async fn empty_input_writes_header_only_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config(dir.path());
        std::fs::write(&config.input_path, "\n  \n").unwrap();

        let summary = run_fetch(&config, None).await.unwrap();

        assert!(summary.rows.is_empty());
        let written = std::fs::read_to_string(&config.report_path).unwrap();
        assert_eq!(written.trim_end(), "url,views,likes,comments,shares,error");
    }

    fn test_config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            input_path: dir.join("urls.txt"),
            report_path: dir.join("report.csv"),
            log_level: "info".to_owned(),
            // Unroutable: these tests must never reach the session step.
            base_url: "http://127.0.0.1:9".to_owned(),
            user_agent: "vidstats-test/0.1".to_owned(),
            ms_token: None,
            request_timeout_secs: 1,
            session_timeout_secs: 1,
            session_sleep_after_secs: 0,
            max_attempts: 2,
            retry_backoff_secs: 0,
            top_n: 10,
        }
    }
}
