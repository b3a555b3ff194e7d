//! Fetch-then-present pipeline.
//!
//! The fetch stage runs as its own tokio task and streams [`FetchEvent`]s
//! back over an unbounded channel. Presentation starts only once the task's
//! `JoinHandle` resolves, so the report is always fully persisted first.

use anyhow::Context;
use tokio::sync::mpsc;
use vidstats_core::AppConfig;
use vidstats_report::OutputFormat;
use vidstats_scraper::FetchEvent;

use crate::report::{present, show, Presented};

/// Turns progress events into terminal lines.
#[derive(Debug, Default)]
pub(crate) struct ProgressPrinter {
    total: usize,
}

impl ProgressPrinter {
    pub(crate) fn line(&mut self, event: &FetchEvent) -> String {
        match event {
            FetchEvent::Started { total } => {
                self.total = *total;
                format!("fetching {total} video(s)")
            }
            FetchEvent::ItemFinished {
                index,
                url,
                attempts,
                succeeded,
            } => {
                let status = if *succeeded { "ok" } else { "FAILED" };
                let retried = if *attempts > 1 {
                    format!(" after {attempts} attempts")
                } else {
                    String::new()
                };
                format!(
                    "[{}/{}] {status:<6} {url}{retried}",
                    index + 1,
                    self.total
                )
            }
            FetchEvent::Finished { succeeded, failed } => {
                format!("fetch finished: {succeeded} succeeded, {failed} failed")
            }
        }
    }
}

/// Runs the fetch stage in the background, prints progress as it arrives,
/// then presents the freshly written report.
///
/// # Errors
///
/// Returns an error if the fetch task fails or panics. Presentation
/// failures are handled by the display boundary and never returned.
pub(crate) async fn run_pipeline(config: &AppConfig) -> anyhow::Result<()> {
    let presented = fetch_then_present(config, |line| println!("{line}")).await?;
    println!();
    show(presented);
    Ok(())
}

/// Spawns the fetch task, hands each progress line to `on_progress`, and
/// loads the report only after the task has joined.
pub(crate) async fn fetch_then_present<F>(
    config: &AppConfig,
    mut on_progress: F,
) -> anyhow::Result<Presented>
where
    F: FnMut(&str),
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetch_config = config.clone();
    let handle = tokio::spawn(async move {
        // `tx` drops with the task, which closes the channel.
        vidstats_scraper::run_fetch(&fetch_config, Some(&tx)).await
    });

    let mut printer = ProgressPrinter::default();
    while let Some(event) = rx.recv().await {
        on_progress(&printer.line(&event));
    }

    let summary = handle.await.context("fetch task did not complete")??;
    tracing::debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "fetch task joined"
    );

    Ok(present(&config.report_path, OutputFormat::Text, config.top_n))
}
