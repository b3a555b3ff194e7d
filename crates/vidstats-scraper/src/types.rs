//! Shapes of the rehydration JSON embedded in TikTok video pages.
//!
//! The web front-end ships page state in
//! `<script id="__UNIVERSAL_DATA_FOR_REHYDRATION__">`. Only the video-detail
//! scope is modelled here:
//!
//! ```text
//! __DEFAULT_SCOPE__
//!   └─ "webapp.video-detail"
//!        ├─ statusCode   0 on success, 10204 when the item does not exist
//!        ├─ statusMsg
//!        └─ itemInfo.itemStruct
//!             ├─ stats     { playCount, diggCount, commentCount, shareCount }
//!             └─ statsV2   same counters, rendered as strings
//! ```
//!
//! Counters have been observed both as JSON numbers and as numeric strings,
//! so every counter goes through [`deserialize_counter`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct RehydrationData {
    #[serde(rename = "__DEFAULT_SCOPE__", default)]
    pub default_scope: DefaultScope,
}

#[derive(Debug, Default, Deserialize)]
pub struct DefaultScope {
    #[serde(rename = "webapp.video-detail")]
    pub video_detail: Option<VideoDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: String,
    pub item_info: Option<ItemInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInfo {
    pub item_struct: Option<ItemStruct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStruct {
    pub stats: Option<VideoStats>,
    pub stats_v2: Option<VideoStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub play_count: u64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub digg_count: u64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub comment_count: u64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub share_count: u64,
}

/// Accepts a non-negative integer, a numeric string, or `null` (as 0).
fn deserialize_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("counter is not a non-negative integer: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("counter string {s:?}: {e}"))),
        other => Err(D::Error::custom(format!("unexpected counter value: {other}"))),
    }
}
