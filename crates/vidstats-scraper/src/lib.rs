pub mod client;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod parse;
pub mod retry;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{SessionSettings, TikTokClient};
pub use error::ScraperError;
pub use fetcher::{fetch_all, run_fetch, FetchEvent, FetchSummary};
pub use input::{parse_url_list, read_url_list};
pub use parse::parse_video_page;
pub use retry::{fetch_with_retry, ItemResult, RetryPolicy};
pub use source::{FetchOutcome, MetricsSource};
