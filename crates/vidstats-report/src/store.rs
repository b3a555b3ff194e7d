//! Report persistence.
//!
//! The report is a CSV file with the fixed header
//! `url,views,likes,comments,shares,error`, one row per requested URL in
//! input order. Writes go to a temporary file in the destination directory
//! and are renamed into place, so a reader never sees a partial report.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use vidstats_core::ReportRow;

use crate::error::ReportError;

/// Column order of the report file.
pub const REPORT_HEADER: [&str; 6] = ["url", "views", "likes", "comments", "shares", "error"];

/// Lenient on-disk shape: empty metric cells and a missing `error` column are
/// both accepted.
#[derive(Debug, Deserialize)]
struct StoredRow {
    url: String,
    #[serde(default)]
    views: Option<u64>,
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default)]
    comments: Option<u64>,
    #[serde(default)]
    shares: Option<u64>,
    #[serde(default)]
    error: Option<String>,
}

impl From<StoredRow> for ReportRow {
    fn from(row: StoredRow) -> Self {
        Self {
            url: row.url,
            views: row.views.unwrap_or_default(),
            likes: row.likes.unwrap_or_default(),
            comments: row.comments.unwrap_or_default(),
            shares: row.shares.unwrap_or_default(),
            error: row.error.unwrap_or_default(),
        }
    }
}

/// Atomically replaces the report at `path` with `rows`.
///
/// The header is always written, so an empty run still yields a valid file.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory or temp file cannot be
/// created or flushed, [`ReportError::Csv`] if a row cannot be serialised,
/// and [`ReportError::Persist`] if the final rename fails.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file());
        writer.write_record(REPORT_HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(path).map_err(|e| ReportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "report written");
    Ok(())
}

/// Loads every row of the report at `path`, in file order.
///
/// # Errors
///
/// Returns [`ReportError::NotYetRun`] if the file does not exist,
/// [`ReportError::Io`] for any other open failure, and [`ReportError::Csv`]
/// if the content cannot be parsed.
pub fn load_report(path: &Path) -> Result<Vec<ReportRow>, ReportError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReportError::NotYetRun {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ReportError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let rows = reader
        .deserialize::<StoredRow>()
        .map(|r| r.map(ReportRow::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
