//! Terminal and markdown presentation of a [`ReportSummary`].
//!
//! The text renderer draws the rankings as horizontal bar charts scaled to
//! the leading video; the markdown renderer emits the same sections as
//! tables.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};

use crate::format::format_thousands;
use crate::summary::{RankedVideo, ReportSummary};

/// Widest bar drawn in a chart, in characters.
const BAR_WIDTH: u64 = 40;
/// URLs longer than this are shortened in chart labels.
const LABEL_WIDTH: usize = 48;
const BAR_CHAR: &str = "\u{2588}";

/// How the present stage prints a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown format '{other}' (expected text or markdown)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Renders `summary` in the requested format.
#[must_use]
pub fn render(summary: &ReportSummary, format: OutputFormat, generated_at: DateTime<Utc>) -> String {
    match format {
        OutputFormat::Text => render_text(summary),
        OutputFormat::Markdown => render_markdown(summary, generated_at),
    }
}

#[must_use]
pub fn render_text(summary: &ReportSummary) -> String {
    let mut out = String::new();
    write_text(&mut out, summary).expect("writing to a String cannot fail");
    out
}

#[must_use]
pub fn render_markdown(summary: &ReportSummary, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    write_markdown(&mut out, summary, generated_at).expect("writing to a String cannot fail");
    out
}

/// Writes the plain-text report.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_text<W: Write>(out: &mut W, summary: &ReportSummary) -> fmt::Result {
    if summary.is_empty() {
        writeln!(out, "no successful rows to analyse")?;
        return write_failed_note(out, summary.failed);
    }

    writeln!(out, "Video Metrics Table")?;
    writeln!(
        out,
        "{:<6}{:>14}{:>12}{:>12}{:>10}  URL",
        "NO", "VIEWS", "LIKES", "COMMENTS", "SHARES"
    )?;
    for v in &summary.table {
        writeln!(
            out,
            "{:<6}{:>14}{:>12}{:>12}{:>10}  {}",
            v.video_no,
            format_thousands(v.metrics.views),
            format_thousands(v.metrics.likes),
            format_thousands(v.metrics.comments),
            format_thousands(v.metrics.shares),
            v.url
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Top {} Videos by Views", summary.top_n)?;
    write_bar_chart(out, &summary.top_by_views, |v| v.metrics.views)?;

    writeln!(out)?;
    writeln!(out, "Top {} Videos by Likes", summary.top_n)?;
    write_bar_chart(out, &summary.top_by_likes, |v| v.metrics.likes)?;

    writeln!(out)?;
    writeln!(out, "Engagement Breakdown")?;
    for (label, pct) in summary.totals.breakdown() {
        writeln!(
            out,
            "{:<10}{:>6.1}%  {}",
            label,
            pct,
            bar(percent_width(pct))
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Overall Totals")?;
    writeln!(out, "{:<16}VALUE", "METRIC")?;
    for (label, value) in summary.totals.formatted() {
        writeln!(out, "{label:<16}{value}")?;
    }

    write_failed_note(out, summary.failed)
}

/// Writes the markdown report.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_markdown<W: Write>(
    out: &mut W,
    summary: &ReportSummary,
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    writeln!(out, "# Video Analytics Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out, "**Videos analysed**: {}", summary.table.len())?;
    writeln!(out, "**Failed URLs**: {}", summary.failed)?;
    writeln!(out)?;
    writeln!(out, "---")?;

    if summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "No successful rows to analyse.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "## Video Metrics Table")?;
    writeln!(out)?;
    writeln!(out, "| No | Views | Likes | Comments | Shares | URL |")?;
    writeln!(out, "|----|-------|-------|----------|--------|-----|")?;
    for v in &summary.table {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            v.video_no,
            format_thousands(v.metrics.views),
            format_thousands(v.metrics.likes),
            format_thousands(v.metrics.comments),
            format_thousands(v.metrics.shares),
            escape_cell(&v.url)
        )?;
    }

    write_markdown_ranking(out, "Views", summary.top_n, &summary.top_by_views, |v| {
        v.metrics.views
    })?;
    write_markdown_ranking(out, "Likes", summary.top_n, &summary.top_by_likes, |v| {
        v.metrics.likes
    })?;

    writeln!(out)?;
    writeln!(out, "## Engagement Breakdown")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Share |")?;
    writeln!(out, "|--------|-------|")?;
    for (label, pct) in summary.totals.breakdown() {
        writeln!(out, "| {label} | {pct:.1}% |")?;
    }

    writeln!(out)?;
    writeln!(out, "## Overall Totals")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    for (label, value) in summary.totals.formatted() {
        writeln!(out, "| {label} | {value} |")?;
    }

    Ok(())
}

fn write_markdown_ranking<W, F>(
    out: &mut W,
    metric: &str,
    top_n: usize,
    videos: &[RankedVideo],
    value: F,
) -> fmt::Result
where
    W: Write,
    F: Fn(&RankedVideo) -> u64,
{
    writeln!(out)?;
    writeln!(out, "## Top {top_n} Videos by {metric}")?;
    writeln!(out)?;
    writeln!(out, "| Rank | No | URL | {metric} |")?;
    writeln!(out, "|------|----|-----|{}|", "-".repeat(metric.len() + 2))?;
    for (rank, v) in videos.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            rank + 1,
            v.video_no,
            escape_cell(&v.url),
            format_thousands(value(v))
        )?;
    }
    Ok(())
}

fn write_bar_chart<W, F>(out: &mut W, videos: &[RankedVideo], value: F) -> fmt::Result
where
    W: Write,
    F: Fn(&RankedVideo) -> u64,
{
    let max = videos.iter().map(&value).max().unwrap_or(0);
    for v in videos {
        let n = value(v);
        writeln!(
            out,
            "{:<width$}  {} {}",
            shorten(&v.url),
            bar(scaled_width(n, max)),
            format_thousands(n),
            width = LABEL_WIDTH
        )?;
    }
    Ok(())
}

fn write_failed_note<W: Write>(out: &mut W, failed: usize) -> fmt::Result {
    if failed > 0 {
        writeln!(out)?;
        writeln!(out, "({failed} URL(s) failed and were excluded)")?;
    }
    Ok(())
}

/// Bar length for `n` relative to the chart leader `max`.
fn scaled_width(n: u64, max: u64) -> usize {
    if max == 0 {
        return 0;
    }
    let width = u128::from(n) * u128::from(BAR_WIDTH) / u128::from(max);
    usize::try_from(width).unwrap_or(0)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn percent_width(pct: f64) -> usize {
    let width = (pct / 100.0 * BAR_WIDTH as f64).round();
    width.clamp(0.0, BAR_WIDTH as f64) as usize
}

fn bar(width: usize) -> String {
    BAR_CHAR.repeat(width)
}

fn shorten(url: &str) -> String {
    if url.chars().count() > LABEL_WIDTH {
        let kept: String = url.chars().take(LABEL_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        url.to_owned()
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
