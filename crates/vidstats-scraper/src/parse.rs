//! Extraction of engagement counters from a fetched video page.

use regex::Regex;
use vidstats_core::VideoMetrics;

use crate::error::ScraperError;
use crate::types::{RehydrationData, VideoStats};

/// `statusCode` reported in the video-detail scope when the item does not exist.
pub(crate) const STATUS_ITEM_NOT_FOUND: i64 = 10204;

/// Fragments that only appear on TikTok's verification / captcha interstitial.
const CHALLENGE_MARKERS: &[&str] = &[
    "captcha-verify",
    "captcha_container",
    "secsdk-captcha",
    "tiktok-verify-page",
    "verify-bar-close",
];

/// Returns the raw JSON text of the rehydration script, if present.
pub(crate) fn extract_rehydration_json(html: &str) -> Option<&str> {
    let pattern = Regex::new(
        r#"(?s)<script[^>]*id="__UNIVERSAL_DATA_FOR_REHYDRATION__"[^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");
    pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// `true` when the body looks like a bot-verification interstitial.
pub(crate) fn is_challenge_page(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    CHALLENGE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Parses a video page into metrics.
///
/// Challenge markers are only consulted when the rehydration payload is
/// missing; regular pages mention captcha assets in their script bundles.
///
/// # Errors
///
/// - [`ScraperError::Challenged`] — verification page served instead of the video.
/// - [`ScraperError::NotFound`] — the page reports the item does not exist.
/// - [`ScraperError::Deserialize`] — rehydration script is not valid JSON.
/// - [`ScraperError::Parse`] — payload present but missing the stats.
pub fn parse_video_page(url: &str, html: &str) -> Result<VideoMetrics, ScraperError> {
    let Some(raw) = extract_rehydration_json(html) else {
        if is_challenge_page(html) {
            return Err(ScraperError::Challenged {
                url: url.to_owned(),
                reason: "verification page served".to_owned(),
            });
        }
        return Err(ScraperError::Parse {
            url: url.to_owned(),
            reason: "rehydration script not found in page".to_owned(),
        });
    };

    let data: RehydrationData =
        serde_json::from_str(raw).map_err(|e| ScraperError::Deserialize {
            context: format!("rehydration data for {url}"),
            source: e,
        })?;

    let detail = data
        .default_scope
        .video_detail
        .ok_or_else(|| ScraperError::Parse {
            url: url.to_owned(),
            reason: "video-detail scope missing".to_owned(),
        })?;

    if detail.status_code == STATUS_ITEM_NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }
    if detail.status_code != 0 {
        return Err(ScraperError::Parse {
            url: url.to_owned(),
            reason: format!("status {} ({})", detail.status_code, detail.status_msg),
        });
    }

    let item = detail
        .item_info
        .and_then(|info| info.item_struct)
        .ok_or_else(|| ScraperError::Parse {
            url: url.to_owned(),
            reason: "item struct missing".to_owned(),
        })?;

    let stats = item
        .stats
        .or(item.stats_v2)
        .ok_or_else(|| ScraperError::Parse {
            url: url.to_owned(),
            reason: "stats missing".to_owned(),
        })?;

    Ok(to_metrics(&stats))
}

fn to_metrics(stats: &VideoStats) -> VideoMetrics {
    VideoMetrics {
        views: stats.play_count,
        likes: stats.digg_count,
        comments: stats.comment_count,
        shares: stats.share_count,
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
