use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub report_path: PathBuf,
    pub log_level: String,
    pub base_url: String,
    pub user_agent: String,
    pub ms_token: Option<String>,
    pub request_timeout_secs: u64,
    pub session_timeout_secs: u64,
    pub session_sleep_after_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_secs: u64,
    pub top_n: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("input_path", &self.input_path)
            .field("report_path", &self.report_path)
            .field("log_level", &self.log_level)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("ms_token", &self.ms_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session_timeout_secs", &self.session_timeout_secs)
            .field("session_sleep_after_secs", &self.session_sleep_after_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("top_n", &self.top_n)
            .finish()
    }
}
