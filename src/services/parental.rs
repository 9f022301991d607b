use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    services::store::{load_or_default, save_quietly, KeyValueStore},
    sprouts_engine::models::{Difficulty, Theme},
};

pub const PARENT_SETTINGS_KEY: &str = "math_sprouts_parent_settings";

/// Allow-lists chosen by a parent. An empty list allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentSettings {
    pub allowed_themes: Vec<Theme>,
    pub allowed_difficulties: Vec<Difficulty>,
    pub allowed_modes: Vec<String>,
}

impl ParentSettings {
    pub fn is_theme_allowed(&self, theme: Theme) -> bool {
        self.allowed_themes.is_empty() || self.allowed_themes.contains(&theme)
    }

    pub fn is_difficulty_allowed(&self, difficulty: Difficulty) -> bool {
        self.allowed_difficulties.is_empty() || self.allowed_difficulties.contains(&difficulty)
    }

    pub fn is_mode_allowed(&self, mode: &str) -> bool {
        self.allowed_modes.is_empty() || self.allowed_modes.iter().any(|m| m == mode)
    }
}

pub struct ParentSettingsStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    known_modes: Vec<String>,
}

impl ParentSettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, known_modes: &[&str]) -> Self {
        ParentSettingsStore {
            store,
            key: key.into(),
            known_modes: known_modes.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Stored settings, with modes this pack does not know about dropped.
    pub fn load(&self) -> ParentSettings {
        let mut settings: ParentSettings = load_or_default(self.store.as_ref(), &self.key);
        settings.allowed_modes.retain(|m| self.known_modes.contains(m));
        settings
    }

    pub fn save(&self, settings: &ParentSettings) {
        save_quietly(self.store.as_ref(), &self.key, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn empty_lists_allow_everything() {
        let s = ParentSettings::default();
        assert!(s.is_theme_allowed(Theme::Space));
        assert!(s.is_difficulty_allowed(Difficulty::Advanced));
        assert!(s.is_mode_allowed("balance"));
    }

    #[test]
    fn lists_restrict() {
        let s = ParentSettings {
            allowed_themes: vec![Theme::Garden],
            allowed_difficulties: vec![Difficulty::Beginner],
            allowed_modes: vec!["garden".into()],
        };
        assert!(!s.is_theme_allowed(Theme::Ocean));
        assert!(!s.is_difficulty_allowed(Difficulty::Intermediate));
        assert!(s.is_mode_allowed("garden"));
        assert!(!s.is_mode_allowed("balance"));
    }

    #[test]
    fn load_drops_unknown_modes() {
        let kv = Arc::new(MemoryStore::new());
        kv.save(PARENT_SETTINGS_KEY, &json!({"allowedModes": ["balance", "racing"], "allowedThemes": ["ocean"]}))
            .unwrap();
        let store = ParentSettingsStore::new(kv, PARENT_SETTINGS_KEY, &["balance", "garden", "pollinator"]);
        let s = store.load();
        assert_eq!(s.allowed_modes, vec!["balance".to_string()]);
        assert_eq!(s.allowed_themes, vec![Theme::Ocean]);
    }
}
