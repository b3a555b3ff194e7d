use serde_json::json;

use super::*;

const URL: &str = "https://www.tiktok.com/@creator/video/7300000000000000001";

fn page_with(payload: &serde_json::Value) -> String {
    format!(
        "<html><head></head><body>\
         <script id=\"__UNIVERSAL_DATA_FOR_REHYDRATION__\" type=\"application/json\">{payload}</script>\
         </body></html>"
    )
}

fn detail(status_code: i64, stats: &serde_json::Value) -> serde_json::Value {
    json!({
        "__DEFAULT_SCOPE__": {
            "webapp.video-detail": {
                "statusCode": status_code,
                "statusMsg": "",
                "itemInfo": { "itemStruct": { "id": "7300000000000000001", "stats": stats } }
            }
        }
    })
}

#[test]
fn parses_numeric_counters() {
    let html = page_with(&detail(
        0,
        &json!({"playCount": 15400, "diggCount": 1200, "commentCount": 88, "shareCount": 9}),
    ));
    let metrics = parse_video_page(URL, &html).unwrap();
    assert_eq!(
        metrics,
        VideoMetrics {
            views: 15_400,
            likes: 1_200,
            comments: 88,
            shares: 9
        }
    );
}

#[test]
fn parses_string_counters() {
    let html = page_with(&detail(
        0,
        &json!({"playCount": "2500000", "diggCount": "31000", "commentCount": "410", "shareCount": "77"}),
    ));
    let metrics = parse_video_page(URL, &html).unwrap();
    assert_eq!(metrics.views, 2_500_000);
    assert_eq!(metrics.shares, 77);
}

#[test]
fn missing_counters_default_to_zero() {
    let html = page_with(&detail(0, &json!({"playCount": 5})));
    let metrics = parse_video_page(URL, &html).unwrap();
    assert_eq!(metrics.views, 5);
    assert_eq!(metrics.likes, 0);
    assert_eq!(metrics.comments, 0);
    assert_eq!(metrics.shares, 0);
}

#[test]
fn falls_back_to_stats_v2() {
    let payload = json!({
        "__DEFAULT_SCOPE__": {
            "webapp.video-detail": {
                "statusCode": 0,
                "itemInfo": { "itemStruct": { "statsV2": {"playCount": "12", "diggCount": "3"} } }
            }
        }
    });
    let metrics = parse_video_page(URL, &page_with(&payload)).unwrap();
    assert_eq!(metrics.views, 12);
    assert_eq!(metrics.likes, 3);
}

#[test]
fn item_not_found_status_is_not_found() {
    let payload = json!({
        "__DEFAULT_SCOPE__": {
            "webapp.video-detail": { "statusCode": 10204, "statusMsg": "item doesn't exist" }
        }
    });
    let err = parse_video_page(URL, &page_with(&payload)).unwrap_err();
    assert!(
        matches!(err, ScraperError::NotFound { ref url } if url == URL),
        "expected NotFound, got: {err:?}"
    );
}

#[test]
fn other_nonzero_status_is_parse_error() {
    let payload = json!({
        "__DEFAULT_SCOPE__": {
            "webapp.video-detail": { "statusCode": 10000, "statusMsg": "server busy" }
        }
    });
    let err = parse_video_page(URL, &page_with(&payload)).unwrap_err();
    assert!(
        matches!(err, ScraperError::Parse { ref reason, .. } if reason.contains("server busy")),
        "expected Parse, got: {err:?}"
    );
}

#[test]
fn challenge_page_without_payload_is_challenged() {
    let html = r#"<html><body><div id="captcha_container"><div class="captcha-verify-container"></div></div></body></html>"#;
    let err = parse_video_page(URL, html).unwrap_err();
    assert!(
        matches!(err, ScraperError::Challenged { .. }),
        "expected Challenged, got: {err:?}"
    );
}

#[test]
fn captcha_asset_on_regular_page_is_ignored() {
    let mut html = page_with(&detail(0, &json!({"playCount": 1})));
    html.push_str(r#"<script src="/static/secsdk-captcha.js"></script>"#);
    assert_eq!(parse_video_page(URL, &html).unwrap().views, 1);
}

#[test]
fn page_without_payload_is_parse_error() {
    let err = parse_video_page(URL, "<html><body>hello</body></html>").unwrap_err();
    assert!(matches!(err, ScraperError::Parse { .. }), "got: {err:?}");
}

#[test]
fn malformed_payload_is_deserialize_error() {
    let html = "<script id=\"__UNIVERSAL_DATA_FOR_REHYDRATION__\">{not json</script>";
    let err = parse_video_page(URL, html).unwrap_err();
    assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
}

#[test]
fn negative_counter_is_rejected() {
    let html = page_with(&detail(0, &json!({"playCount": -1})));
    let err = parse_video_page(URL, &html).unwrap_err();
    assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
}

#[test]
fn extracts_multiline_script_body() {
    let html = "<script id=\"__UNIVERSAL_DATA_FOR_REHYDRATION__\" type=\"application/json\">\n{\"a\": 1}\n</script>";
    assert_eq!(extract_rehydration_json(html), Some("{\"a\": 1}"));
}
