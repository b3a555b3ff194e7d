//! Reading the uploaded URL list.

use std::path::Path;

use crate::error::ScraperError;

/// Splits `content` into URLs: one per line, trimmed, blank lines dropped.
#[must_use]
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads a UTF-8 URL list from `path`.
///
/// # Errors
///
/// Returns [`ScraperError::Input`] if the file is missing, unreadable, or not
/// valid UTF-8.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, ScraperError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScraperError::Input {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_url_list(&content))
}
