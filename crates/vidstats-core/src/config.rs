use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed or is out
/// of range.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed or is out
/// of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config. Decoupled from the real environment so tests can use a `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparseable or out-of-range values.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let input_path = PathBuf::from(or_default("VIDSTATS_INPUT_PATH", "uploads/urls.txt"));
    let report_path = PathBuf::from(or_default("VIDSTATS_REPORT_PATH", "report.csv"));
    let log_level = or_default("VIDSTATS_LOG_LEVEL", "info");
    let base_url = or_default("VIDSTATS_BASE_URL", "https://www.tiktok.com");
    let user_agent = or_default("VIDSTATS_USER_AGENT", DEFAULT_USER_AGENT);
    let ms_token = lookup("VIDSTATS_MS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let request_timeout_secs = parse_u64("VIDSTATS_REQUEST_TIMEOUT_SECS", "30")?;
    let session_timeout_secs = parse_u64("VIDSTATS_SESSION_TIMEOUT_SECS", "120")?;
    let session_sleep_after_secs = parse_u64("VIDSTATS_SESSION_SLEEP_AFTER_SECS", "2")?;

    let max_attempts = parse_u32("VIDSTATS_MAX_ATTEMPTS", "2")?;
    if max_attempts == 0 {
        return Err(invalid(
            "VIDSTATS_MAX_ATTEMPTS",
            "must be at least 1".to_owned(),
        ));
    }
    let retry_backoff_secs = parse_u64("VIDSTATS_RETRY_BACKOFF_SECS", "5")?;

    let top_n = parse_usize("VIDSTATS_TOP_N", "10")?;
    if top_n == 0 {
        return Err(invalid("VIDSTATS_TOP_N", "must be at least 1".to_owned()));
    }

    Ok(AppConfig {
        input_path,
        report_path,
        log_level,
        base_url,
        user_agent,
        ms_token,
        request_timeout_secs,
        session_timeout_secs,
        session_sleep_after_secs,
        max_attempts,
        retry_backoff_secs,
        top_n,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
