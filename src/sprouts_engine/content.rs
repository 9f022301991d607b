//! Content packs: the declarative data the generator samples from.
//!
//! A pack is plain JSON. Every bank is optional and every lookup may miss;
//! accessors return an empty slice rather than failing so the strategies
//! can report `ContentMissing` themselves.

use std::{collections::BTreeMap, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sprouts_engine::{
    error::ContentError,
    models::{Difficulty, Theme},
    word_problems::WordProblemTemplate,
};

const MATH_PACK: &str = include_str!("../../content/math.json");
const READING_PACK: &str = include_str!("../../content/reading.json");
const SCIENCE_PACK: &str = include_str!("../../content/science.json");

/// Subject of a pack. Unrecognised `"type"` values load as `Unknown` and
/// degrade at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackKind {
    Math,
    Reading,
    Science,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackKind::Math    => write!(f, "math"),
            PackKind::Reading => write!(f, "reading"),
            PackKind::Science => write!(f, "science"),
            PackKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub key: String,
    pub label: String,
}

/// `{t, a, d}`: template with a `{__}` blank, the answer, distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTemplate {
    #[serde(rename = "t")]
    pub template: String,
    #[serde(rename = "a")]
    pub answer: String,
    #[serde(rename = "d", default)]
    pub distractors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub def: String,
}

/// `{q, a, d}`: lab question with a `{__}` blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTemplate {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub d: Vec<String>,
}

/// One true statement and two false ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTriple {
    #[serde(default)]
    pub t: String,
    #[serde(default)]
    pub f1: String,
    #[serde(default)]
    pub f2: String,
}

type ByTier<T> = BTreeMap<Difficulty, Vec<T>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banks {
    #[serde(default)]
    pub words: BTreeMap<Theme, ByTier<String>>,
    #[serde(default)]
    pub sightwords: ByTier<String>,
    #[serde(default)]
    pub stories: BTreeMap<Theme, Vec<StoryTemplate>>,
    #[serde(default)]
    pub vocab: BTreeMap<Theme, ByTier<VocabEntry>>,
    #[serde(default)]
    pub labs: BTreeMap<Theme, Vec<LabTemplate>>,
    #[serde(default)]
    pub facts: BTreeMap<Theme, ByTier<FactTriple>>,
}

fn tier<'a, T>(map: Option<&'a ByTier<T>>, difficulty: Difficulty) -> &'a [T] {
    map.and_then(|m| m.get(&difficulty)).map(Vec::as_slice).unwrap_or(&[])
}

impl Banks {
    pub fn words(&self, theme: Theme, difficulty: Difficulty) -> &[String] {
        tier(self.words.get(&theme), difficulty)
    }

    pub fn sight_words(&self, difficulty: Difficulty) -> &[String] {
        tier(Some(&self.sightwords), difficulty)
    }

    pub fn stories(&self, theme: Theme) -> &[StoryTemplate] {
        self.stories.get(&theme).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vocab(&self, theme: Theme, difficulty: Difficulty) -> &[VocabEntry] {
        tier(self.vocab.get(&theme), difficulty)
    }

    pub fn labs(&self, theme: Theme) -> &[LabTemplate] {
        self.labs.get(&theme).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn facts(&self, theme: Theme, difficulty: Difficulty) -> &[FactTriple] {
        tier(self.facts.get(&theme), difficulty)
    }
}

fn all_themes() -> Vec<Theme> {
    Theme::ALL.to_vec()
}

fn all_difficulties() -> Vec<Difficulty> {
    Difficulty::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPack {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PackKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub modes: Vec<ModeInfo>,
    #[serde(default = "all_themes")]
    pub themes: Vec<Theme>,
    #[serde(default = "all_difficulties")]
    pub difficulties: Vec<Difficulty>,
    #[serde(default)]
    pub banks: Banks,
    #[serde(default)]
    pub word_problems: BTreeMap<Theme, ByTier<WordProblemTemplate>>,
}

impl ContentPack {
    pub const BUILTIN: [&'static str; 3] = ["math", "reading", "science"];

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pack = Self::from_json_str(&raw)?;
        info!(id = %pack.id, kind = %pack.kind, path = %path.display(), "loaded content pack");
        Ok(pack)
    }

    /// One of the packs compiled into the crate.
    pub fn builtin(id: &str) -> Result<Self, ContentError> {
        let raw = match id {
            "math"    => MATH_PACK,
            "reading" => READING_PACK,
            "science" => SCIENCE_PACK,
            other => return Err(ContentError::UnknownPack(other.to_string())),
        };
        Self::from_json_str(raw)
    }

    /// Load `<dir>/<id>.json` when an override directory is configured and
    /// the file exists, otherwise fall back to the built-in pack.
    pub fn load(id: &str, content_dir: Option<&Path>) -> Result<Self, ContentError> {
        if let Some(dir) = content_dir {
            let path = dir.join(format!("{id}.json"));
            if path.is_file() {
                return Self::from_path(&path);
            }
            debug!(path = %path.display(), "no override pack, using built-in");
        }
        Self::builtin(id)
    }

    pub fn has_mode(&self, key: &str) -> bool {
        self.modes.iter().any(|m| m.key == key)
    }

    /// Key of the first listed mode, used when a caller has not chosen one.
    pub fn default_mode(&self) -> Option<&str> {
        self.modes.first().map(|m| m.key.as_str())
    }
}
