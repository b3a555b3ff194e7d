//! Report command and the display error boundary.
//!
//! Nothing that goes wrong while presenting a report is fatal: a missing
//! report gets a hint, any other failure is printed to stderr, and the
//! process exits normally either way.

use std::path::Path;

use chrono::Utc;
use vidstats_report::{OutputFormat, ReportError};

/// What the present stage produced for the terminal.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Presented {
    Rendered(String),
    NotYetRun(String),
    Failed(String),
}

pub(crate) fn run_report_command(path: &Path, format: OutputFormat, top_n: usize) {
    show(present(path, format, top_n));
}

pub(crate) fn show(presented: Presented) {
    match presented {
        Presented::Rendered(out) => print!("{out}"),
        Presented::NotYetRun(msg) => println!("{msg}"),
        Presented::Failed(msg) => eprintln!("{msg}"),
    }
}

pub(crate) fn present(path: &Path, format: OutputFormat, top_n: usize) -> Presented {
    match vidstats_report::load_summary(path, top_n) {
        Ok(summary) => Presented::Rendered(vidstats_report::render(&summary, format, Utc::now())),
        Err(ReportError::NotYetRun { path }) => Presented::NotYetRun(format!(
            "report file '{}' not found; run `vidstats fetch` first",
            path.display()
        )),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to display report");
            Presented::Failed(format!("error displaying analysis: {e}"))
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
