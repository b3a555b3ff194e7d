use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("video not found: {url}")]
    NotFound { url: String },

    #[error("verification challenge for {url}: {reason}")]
    Challenged { url: String, reason: String },

    #[error("rate limited while fetching {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("could not read video stats from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("failed to establish session: {0}")]
    Session(String),

    #[error("failed to read URL list {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] vidstats_report::ReportError),
}
