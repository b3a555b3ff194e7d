use super::*;

fn offline_client(base: &str) -> TikTokClient {
    TikTokClient {
        client: Client::new(),
        base_url: Url::parse(base).unwrap(),
    }
}

#[test]
fn resolve_keeps_absolute_urls() {
    let client = offline_client("https://www.tiktok.com");
    let url = client
        .resolve("https://www.tiktok.com/@creator/video/123")
        .unwrap();
    assert_eq!(url.as_str(), "https://www.tiktok.com/@creator/video/123");
}

#[test]
fn resolve_joins_relative_paths_onto_base() {
    let client = offline_client("http://127.0.0.1:9000/");
    let url = client.resolve("/@creator/video/123").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9000/@creator/video/123");
}

#[test]
fn resolve_adds_scheme_to_bare_host() {
    let client = offline_client("http://127.0.0.1:9000/");
    let url = client.resolve("www.tiktok.com/@creator/video/123").unwrap();
    assert_eq!(url.as_str(), "https://www.tiktok.com/@creator/video/123");
}

#[test]
fn resolve_rejects_input_that_is_not_a_url() {
    let client = offline_client("https://www.tiktok.com");
    let err = client.resolve("creator video 123").unwrap_err();
    assert!(
        matches!(err, ScraperError::Parse { ref reason, .. } if reason.starts_with("invalid video URL")),
        "expected Parse, got: {err:?}"
    );
}

#[test]
fn resolve_rejects_non_http_schemes() {
    let client = offline_client("https://www.tiktok.com");
    let err = client.resolve("ftp://www.tiktok.com/@creator/video/123").unwrap_err();
    assert!(
        matches!(err, ScraperError::Parse { ref reason, .. } if reason.contains("unsupported scheme 'ftp'")),
        "expected Parse, got: {err:?}"
    );
}

#[test]
fn settings_from_config_converts_seconds() {
    let config = vidstats_core::AppConfig {
        input_path: "urls.txt".into(),
        report_path: "report.csv".into(),
        log_level: "info".to_owned(),
        base_url: "https://www.tiktok.com".to_owned(),
        user_agent: "vidstats-test/0.1".to_owned(),
        ms_token: Some("token".to_owned()),
        request_timeout_secs: 30,
        session_timeout_secs: 120,
        session_sleep_after_secs: 2,
        max_attempts: 2,
        retry_backoff_secs: 5,
        top_n: 10,
    };
    let settings = SessionSettings::from_config(&config);
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
    assert_eq!(settings.session_timeout, Duration::from_secs(120));
    assert_eq!(settings.sleep_after, Duration::from_secs(2));
    assert_eq!(settings.ms_token.as_deref(), Some("token"));
}

#[tokio::test]
async fn connect_rejects_invalid_base_url() {
    let settings = SessionSettings {
        base_url: "not a url".to_owned(),
        user_agent: "vidstats-test/0.1".to_owned(),
        ms_token: None,
        request_timeout: Duration::from_secs(5),
        session_timeout: Duration::from_secs(5),
        sleep_after: Duration::ZERO,
    };
    let result = TikTokClient::connect(&settings).await;
    assert!(
        matches!(result, Err(ScraperError::Session(ref m)) if m.contains("invalid base URL")),
        "expected Session error"
    );
}
