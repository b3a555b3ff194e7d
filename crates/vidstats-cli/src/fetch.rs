//! Foreground fetch command.

use std::fmt::Write as _;

use vidstats_core::AppConfig;
use vidstats_scraper::FetchSummary;

/// Runs the fetch stage to completion and prints a one-screen summary.
///
/// # Errors
///
/// Returns an error if the URL list cannot be read, the session cannot be
/// established, or the report cannot be written.
pub(crate) async fn run_fetch_command(config: &AppConfig) -> anyhow::Result<()> {
    let summary = vidstats_scraper::run_fetch(config, None).await?;
    print!("{}", format_fetch_summary(config, &summary));
    Ok(())
}

pub(crate) fn format_fetch_summary(config: &AppConfig, summary: &FetchSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{:<14}{}", "INPUT", config.input_path.display());
    let _ = writeln!(out, "{:<14}{}", "REPORT", config.report_path.display());
    let _ = writeln!(out, "{:<14}{}", "SUCCEEDED", summary.succeeded);
    let _ = writeln!(out, "{:<14}{}", "FAILED", summary.failed);

    let mut failures = summary.rows.iter().filter(|r| !r.is_success()).peekable();
    if failures.peek().is_some() {
        let _ = writeln!(out);
        for row in failures {
            let _ = writeln!(out, "  {}  {}", row.url, row.error);
        }
    }
    out
}
