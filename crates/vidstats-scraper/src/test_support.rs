//! In-memory [`MetricsSource`] used by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use vidstats_core::VideoMetrics;

use crate::source::{FetchOutcome, MetricsSource};

pub(crate) fn metrics(views: u64) -> VideoMetrics {
    VideoMetrics {
        views,
        likes: views / 10,
        comments: views / 100,
        shares: 1,
    }
}

/// Replays a fixed sequence of outcomes per URL. The last outcome repeats
/// once the script runs out; unscripted URLs are transient failures.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    scripts: HashMap<String, Vec<FetchOutcome>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(mut self, url: &str, outcomes: Vec<FetchOutcome>) -> Self {
        self.scripts.insert(url.to_owned(), outcomes);
        self
    }

    pub(crate) fn calls(&self, url: &str) -> u32 {
        self.calls
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetricsSource for ScriptedSource {
    async fn video_stats(&self, url: &str) -> FetchOutcome {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(url.to_owned()).or_default();
            *entry += 1;
            *entry
        };
        let Some(script) = self.scripts.get(url) else {
            return FetchOutcome::Transient(format!("no script for {url}"));
        };
        let idx = usize::try_from(call - 1).unwrap_or(usize::MAX);
        script
            .get(idx)
            .or_else(|| script.last())
            .cloned()
            .unwrap_or_else(|| FetchOutcome::Transient("empty script".to_owned()))
    }
}
