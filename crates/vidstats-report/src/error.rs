use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting or loading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No report exists yet; the fetch stage has not been run.
    #[error("report file {} not found", path.display())]
    NotYetRun { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed report: {0}")]
    Csv(#[from] csv::Error),

    /// The temporary file could not be moved over the destination.
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
