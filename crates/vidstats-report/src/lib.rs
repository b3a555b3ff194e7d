//! The present stage: load a persisted report, aggregate the successful rows,
//! and render rankings, totals and charts.

pub mod error;
pub mod format;
pub mod render;
pub mod store;
pub mod summary;

pub use error::ReportError;
pub use format::format_thousands;
pub use render::{render, render_markdown, render_text, OutputFormat};
pub use store::{load_report, write_report, REPORT_HEADER};
pub use summary::{RankedVideo, ReportSummary, Totals, DEFAULT_TOP_N};

/// Loads the report at `path` and summarises it.
///
/// # Errors
///
/// Propagates [`ReportError::NotYetRun`] when no report exists and any other
/// [`ReportError`] from reading the file.
pub fn load_summary(path: &std::path::Path, top_n: usize) -> Result<ReportSummary, ReportError> {
    let rows = load_report(path)?;
    Ok(ReportSummary::from_rows(&rows, top_n))
}
