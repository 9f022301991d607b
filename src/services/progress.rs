use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::store::{load_or_default, save_quietly, KeyValueStore};

pub const PROGRESS_KEY: &str = "math_sprouts_progress";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub attempts: u32,
    pub correct: u32,
}

impl ModeStats {
    /// Share of correct answers, `0.0` before the first attempt.
    pub fn accuracy(&self) -> f32 {
        if self.attempts == 0 { 0.0 } else { self.correct as f32 / self.attempts as f32 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub total_attempts: u32,
    pub total_correct: u32,
    pub modes: BTreeMap<String, ModeStats>,
    pub sessions: u32,
    pub session_started_at: Option<DateTime<Utc>>,
    pub total_play_seconds: i64,
    pub last_played: Option<DateTime<Utc>>,
}

/// Progress persisted under one key, with a known set of modes.
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    modes: Vec<String>,
    /// Held across every load, modify and save.
    write: Mutex<()>,
}

impl ProgressStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, modes: &[&str]) -> Self {
        ProgressStore {
            store,
            key: key.into(),
            modes: modes.iter().map(|m| m.to_string()).collect(),
            write: Mutex::new(()),
        }
    }

    pub fn load(&self) -> Progress {
        let mut progress: Progress = load_or_default(self.store.as_ref(), &self.key);
        for mode in &self.modes {
            progress.modes.entry(mode.clone()).or_default();
        }
        progress
    }

    pub fn save(&self, progress: &Progress) {
        save_quietly(self.store.as_ref(), &self.key, progress);
    }

    pub fn record_answer(&self, mode: &str, correct: bool) -> Progress {
        self.record_answer_at(mode, correct, Utc::now())
    }

    fn update(&self, apply: impl FnOnce(&mut Progress)) -> Progress {
        let _guard = self.write.lock().unwrap_or_else(|e| e.into_inner());
        let mut progress = self.load();
        apply(&mut progress);
        self.save(&progress);
        progress
    }

    pub fn record_answer_at(&self, mode: &str, correct: bool, now: DateTime<Utc>) -> Progress {
        self.update(|progress| {
            let stats = progress.modes.entry(mode.to_string()).or_default();
            stats.attempts += 1;
            progress.total_attempts += 1;
            if correct {
                stats.correct += 1;
                progress.total_correct += 1;
            }
            progress.last_played = Some(now);
        })
    }

    pub fn record_session_start(&self) -> Progress {
        self.record_session_start_at(Utc::now())
    }

    pub fn record_session_start_at(&self, now: DateTime<Utc>) -> Progress {
        self.update(|progress| {
            progress.sessions += 1;
            progress.session_started_at = Some(now);
        })
    }

    pub fn record_session_end(&self) -> Progress {
        self.record_session_end_at(Utc::now())
    }

    /// Adds the session's duration to the play time. A missing start is ignored.
    pub fn record_session_end_at(&self, now: DateTime<Utc>) -> Progress {
        self.update(|progress| {
            if let Some(start) = progress.session_started_at.take() {
                let seconds = (now - start).num_seconds().max(0);
                progress.total_play_seconds += seconds;
                debug!(seconds, "session ended");
            }
            progress.last_played = Some(now);
        })
    }
}
