use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use vidstats_core::VideoMetrics;

use crate::error::ScraperError;
use crate::parse::parse_video_page;
use crate::source::{FetchOutcome, MetricsSource};

/// Everything needed to open a browsing session against the TikTok web
/// front-end.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Starting URL visited once to pick up session cookies.
    pub base_url: String,
    pub user_agent: String,
    /// Optional `msToken` cookie copied from a logged-in browser.
    pub ms_token: Option<String>,
    pub request_timeout: Duration,
    /// Upper bound on the warm-up request that opens the session.
    pub session_timeout: Duration,
    /// Pause after the warm-up request before the first video query.
    pub sleep_after: Duration,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &vidstats_core::AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            ms_token: config.ms_token.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            session_timeout: Duration::from_secs(config.session_timeout_secs),
            sleep_after: Duration::from_secs(config.session_sleep_after_secs),
        }
    }
}

/// A single authenticated browsing session against the TikTok web front-end.
///
/// Holds one cookie-carrying HTTP client for the whole run. Video pages are
/// fetched one at a time and classified into typed errors:
///
/// | Response                          | Error                                |
/// |-----------------------------------|--------------------------------------|
/// | 404, or `statusCode` 10204         | [`ScraperError::NotFound`]           |
/// | 403, or a verification page       | [`ScraperError::Challenged`]         |
/// | 429                               | [`ScraperError::RateLimited`]        |
/// | other non-2xx                     | [`ScraperError::UnexpectedStatus`]   |
pub struct TikTokClient {
    client: Client,
    base_url: Url,
}

impl TikTokClient {
    /// Opens the session: builds the client, installs the `msToken` cookie
    /// when configured, visits the starting URL and waits `sleep_after`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] if the base URL is invalid, the
    /// client cannot be built, or the warm-up request fails or times out.
    pub async fn connect(settings: &SessionSettings) -> Result<Self, ScraperError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            ScraperError::Session(format!("invalid base URL '{}': {e}", settings.base_url))
        })?;

        let jar = Arc::new(reqwest::cookie::Jar::default());
        if let Some(token) = settings.ms_token.as_deref() {
            jar.add_cookie_str(&format!("msToken={token}; Path=/"), &base_url);
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(settings.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ScraperError::Session(format!("failed to build HTTP client: {e}")))?;

        let response = client
            .get(base_url.clone())
            .timeout(settings.session_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScraperError::Session(format!(
                        "timed out after {}s opening {base_url}",
                        settings.session_timeout.as_secs()
                    ))
                } else {
                    ScraperError::Session(format!("could not reach {base_url}: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Session(format!(
                "starting URL {base_url} returned HTTP {}",
                status.as_u16()
            )));
        }

        tracing::info!(
            base_url = %base_url,
            authenticated = settings.ms_token.is_some(),
            "session established"
        );

        if !settings.sleep_after.is_zero() {
            tokio::time::sleep(settings.sleep_after).await;
        }

        Ok(Self { client, base_url })
    }

    /// Fetches one video page and extracts its counters.
    ///
    /// # Errors
    ///
    /// See the type-level table; network failures surface as
    /// [`ScraperError::Http`] and page-shape problems as
    /// [`ScraperError::Parse`] or [`ScraperError::Deserialize`].
    pub async fn fetch_video(&self, url: &str) -> Result<VideoMetrics, ScraperError> {
        let target = self.resolve(url)?;
        let response = self
            .client
            .get(target)
            .header(reqwest::header::REFERER, self.base_url.as_str())
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => {
                return Err(ScraperError::NotFound {
                    url: url.to_owned(),
                })
            }
            StatusCode::FORBIDDEN => {
                return Err(ScraperError::Challenged {
                    url: url.to_owned(),
                    reason: "HTTP 403 from video page".to_owned(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(ScraperError::RateLimited {
                    url: url.to_owned(),
                })
            }
            s if !s.is_success() => {
                return Err(ScraperError::UnexpectedStatus {
                    status: s.as_u16(),
                    url: url.to_owned(),
                })
            }
            _ => {}
        }

        let body = response.text().await?;
        parse_video_page(url, &body)
    }

    /// Ends the session. Cookies and pooled connections are released.
    pub fn close(self) {
        tracing::info!(base_url = %self.base_url, "session closed");
    }

    /// Absolute http(s) URLs are used as-is, `/`-rooted paths are joined onto
    /// the base URL, and a bare `host/path` gets an `https://` scheme.
    fn resolve(&self, url: &str) -> Result<Url, ScraperError> {
        let invalid = |reason: String| ScraperError::Parse {
            url: url.to_owned(),
            reason: format!("invalid video URL: {reason}"),
        };

        let parsed = if url.starts_with('/') {
            self.base_url.join(url)
        } else if !url.contains("://") && looks_like_host_path(url) {
            Url::parse(&format!("https://{url}"))
        } else {
            Url::parse(url)
        }
        .map_err(|e| invalid(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

/// `www.tiktok.com/@a/video/1`: a dotted host with no scheme.
fn looks_like_host_path(url: &str) -> bool {
    let host = url.split('/').next().unwrap_or_default();
    host.contains('.')
        && !host.contains(':')
        && !host.starts_with('.')
        && !host.chars().any(char::is_whitespace)
}

#[async_trait]
impl MetricsSource for TikTokClient {
    async fn video_stats(&self, url: &str) -> FetchOutcome {
        FetchOutcome::from_result(self.fetch_video(url).await)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
