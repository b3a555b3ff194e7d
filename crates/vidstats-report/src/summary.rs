//! Aggregation over a loaded report.
//!
//! Only successful rows take part: they are numbered, ranked and summed.
//! Failed rows are counted and otherwise ignored.

use vidstats_core::{ReportRow, VideoMetrics};

use crate::format::format_thousands;

/// Default length of the views/likes rankings.
pub const DEFAULT_TOP_N: usize = 10;

/// A successful row with its 1-based display number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedVideo {
    pub video_no: usize,
    pub url: String,
    pub metrics: VideoMetrics,
}

/// Sums of each counter across successful rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl Totals {
    fn add(&mut self, m: &VideoMetrics) {
        self.views = self.views.saturating_add(m.views);
        self.likes = self.likes.saturating_add(m.likes);
        self.comments = self.comments.saturating_add(m.comments);
        self.shares = self.shares.saturating_add(m.shares);
    }

    /// Sum of all four counters.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.views
            .saturating_add(self.likes)
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }

    /// Display labels and thousands-separated values, in the fixed order
    /// views, likes, comments, shares.
    #[must_use]
    pub fn formatted(&self) -> [(&'static str, String); 4] {
        [
            ("Total Views", format_thousands(self.views)),
            ("Total Likes", format_thousands(self.likes)),
            ("Total Comments", format_thousands(self.comments)),
            ("Total Shares", format_thousands(self.shares)),
        ]
    }

    /// Each counter's share of the grand total, in percent.
    ///
    /// All zero when nothing was counted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn breakdown(&self) -> [(&'static str, f64); 4] {
        let total = self.grand_total();
        let pct = |v: u64| {
            if total == 0 {
                0.0
            } else {
                v as f64 * 100.0 / total as f64
            }
        };
        [
            ("Views", pct(self.views)),
            ("Likes", pct(self.likes)),
            ("Comments", pct(self.comments)),
            ("Shares", pct(self.shares)),
        ]
    }
}

/// Everything the present stage shows for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Successful rows, numbered 1..=K in original order.
    pub table: Vec<RankedVideo>,
    pub top_by_views: Vec<RankedVideo>,
    pub top_by_likes: Vec<RankedVideo>,
    pub totals: Totals,
    /// Rows excluded because they carry an error.
    pub failed: usize,
    pub top_n: usize,
}

impl ReportSummary {
    /// Builds the summary from report rows in file order.
    ///
    /// Rankings use a stable sort, so equal counters keep their original
    /// relative order.
    #[must_use]
    pub fn from_rows(rows: &[ReportRow], top_n: usize) -> Self {
        let table: Vec<RankedVideo> = rows
            .iter()
            .filter(|r| r.is_success())
            .enumerate()
            .map(|(i, r)| RankedVideo {
                video_no: i + 1,
                url: r.url.clone(),
                metrics: r.metrics(),
            })
            .collect();

        let mut totals = Totals::default();
        for video in &table {
            totals.add(&video.metrics);
        }

        let top_by_views = top_by(&table, top_n, |m| m.views);
        let top_by_likes = top_by(&table, top_n, |m| m.likes);

        Self {
            failed: rows.len() - table.len(),
            table,
            top_by_views,
            top_by_likes,
            totals,
            top_n,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn top_by<F>(table: &[RankedVideo], n: usize, key: F) -> Vec<RankedVideo>
where
    F: Fn(&VideoMetrics) -> u64,
{
    let mut ranked = table.to_vec();
    // `sort_by` is stable: ties stay in original order.
    ranked.sort_by(|a, b| key(&b.metrics).cmp(&key(&a.metrics)));
    ranked.truncate(n);
    ranked
}
