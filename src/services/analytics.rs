//! Lightweight local analytics: daily event counters, no external service.
//!
//! Identical `(event, props)` pairs inside the debounce window are dropped.
//! In `Log` mode events only go to the tracing output; in `Persist` mode
//! they are counted per UTC day and the oldest days are pruned.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::services::store::{load_or_default, save_quietly, KeyValueStore};

pub const ANALYTICS_KEY: &str = "math_sprouts_analytics";

/// `date -> event -> count`
pub type DailyCounts = BTreeMap<String, BTreeMap<String, u64>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsMode {
    Log,
    #[default]
    Persist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub mode: AnalyticsMode,
    pub debounce_ms: i64,
    pub max_recent: usize,
    pub retention_days: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            mode: AnalyticsMode::Persist,
            debounce_ms: 2000,
            max_recent: 50,
            retention_days: 30,
        }
    }
}

pub struct Analytics {
    store: Arc<dyn KeyValueStore>,
    config: AnalyticsConfig,
    recent: Mutex<HashMap<String, DateTime<Utc>>>,
    /// Held across load, increment and save of the daily counters.
    counts: Mutex<()>,
}

impl Analytics {
    pub fn new(store: Arc<dyn KeyValueStore>, config: AnalyticsConfig) -> Self {
        Analytics { store, config, recent: Mutex::new(HashMap::new()), counts: Mutex::new(()) }
    }

    /// Fire-and-forget. Returns whether the event was counted.
    pub fn track(&self, event: &str, props: &Value) -> bool {
        self.track_at(event, props, Utc::now())
    }

    pub fn track_at(&self, event: &str, props: &Value, now: DateTime<Utc>) -> bool {
        if self.is_duplicate(event, props, now) {
            return false;
        }

        match self.config.mode {
            AnalyticsMode::Log => info!(target: "analytics", event, %props, "event"),
            AnalyticsMode::Persist => self.increment(event, now),
        }
        true
    }

    fn is_duplicate(&self, event: &str, props: &Value, now: DateTime<Utc>) -> bool {
        let key = format!("{event}:{props}");
        let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(last) = recent.get(&key) {
            if (now - *last).num_milliseconds() < self.config.debounce_ms {
                return true;
            }
        }
        recent.insert(key, now);

        if recent.len() > self.config.max_recent {
            let mut by_age: Vec<(String, DateTime<Utc>)> =
                recent.iter().map(|(k, t)| (k.clone(), *t)).collect();
            by_age.sort_by_key(|(_, t)| *t);
            let excess = by_age.len() - self.config.max_recent;
            for (k, _) in by_age.into_iter().take(excess) {
                recent.remove(&k);
            }
        }
        false
    }

    fn increment(&self, event: &str, now: DateTime<Utc>) {
        let _guard = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        let mut counts = self.snapshot();
        let day = now.format("%Y-%m-%d").to_string();
        *counts.entry(day).or_default().entry(event.to_string()).or_insert(0) += 1;

        while counts.len() > self.config.retention_days {
            counts.pop_first();
        }
        save_quietly(self.store.as_ref(), ANALYTICS_KEY, &counts);
    }

    pub fn snapshot(&self) -> DailyCounts {
        load_or_default(self.store.as_ref(), ANALYTICS_KEY)
    }

    pub fn clear(&self) {
        let _guard = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = self.store.remove(ANALYTICS_KEY) {
            warn!(error = %err, "failed to clear analytics");
        }
    }
}
