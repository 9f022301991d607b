use std::fmt;
use serde::{Deserialize, Serialize};

use crate::sprouts_engine::{content::PackKind, error::GenerateError};

// ---------------------------------------------------------------------------
// Selection dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] =
        [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced];

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Beginner     => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced     => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner"     => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced"     => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner     => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced     => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Garden,
    Ocean,
    Space,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Garden, Theme::Ocean, Theme::Space];

    pub fn key(self) -> &'static str {
        match self {
            Theme::Garden => "garden",
            Theme::Ocean  => "ocean",
            Theme::Space  => "space",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "garden" => Some(Theme::Garden),
            "ocean"  => Some(Theme::Ocean),
            "space"  => Some(Theme::Space),
            _ => None,
        }
    }

    /// Name of the reward token shown for this theme.
    pub fn seed_name(self) -> &'static str {
        match self {
            Theme::Garden => "Sprout",
            Theme::Ocean  => "Pearl",
            Theme::Space  => "Star",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Garden => write!(f, "Garden"),
            Theme::Ocean  => write!(f, "Ocean"),
            Theme::Space  => write!(f, "Space"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add      => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide   => "÷",
        }
    }

    /// Evaluate `a <op> b` with integer semantics.
    ///
    /// Division only succeeds when it is exact; `None` otherwise.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operator::Add      => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide   => {
                if b == 0 || a % b != 0 { None } else { Some(a / b) }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Problem kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    Phonics,
    Sight,
    Story,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScienceMode {
    Vocab,
    Labs,
    Facts,
}

/// What the generator will build for a given pack and mode key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Math,
    Reading(ReadingMode),
    Science(ScienceMode),
}

impl ProblemKind {
    /// Resolve a pack type plus the request's mode key.
    ///
    /// Math packs ignore the mode entirely: their modes only change how the
    /// problem is presented.
    pub fn resolve(pack_kind: PackKind, mode: &str) -> Result<Self, GenerateError> {
        match pack_kind {
            PackKind::Math => Ok(ProblemKind::Math),
            PackKind::Reading => match mode {
                "phonics" => Ok(ProblemKind::Reading(ReadingMode::Phonics)),
                "sight"   => Ok(ProblemKind::Reading(ReadingMode::Sight)),
                "story"   => Ok(ProblemKind::Reading(ReadingMode::Story)),
                _ => Err(GenerateError::UnknownMode { kind: pack_kind, mode: mode.to_string() }),
            },
            PackKind::Science => match mode {
                "vocab" => Ok(ProblemKind::Science(ScienceMode::Vocab)),
                "labs"  => Ok(ProblemKind::Science(ScienceMode::Labs)),
                "facts" => Ok(ProblemKind::Science(ScienceMode::Facts)),
                _ => Err(GenerateError::UnknownMode { kind: pack_kind, mode: mode.to_string() }),
            },
            PackKind::Unknown => Err(GenerateError::UnknownType),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorRequest {
    pub mode: String,
    pub theme: Theme,
    pub difficulty: Difficulty,
    /// Only meaningful for math packs; 9 and above is the mixed tier.
    pub level: u32,
}

impl GeneratorRequest {
    pub fn new(mode: impl Into<String>, theme: Theme, difficulty: Difficulty) -> Self {
        Self { mode: mode.into(), theme, difficulty, level: 1 }
    }

    /// Request for a math problem; mode and theme are irrelevant to the math strategy.
    pub fn math(level: u32, difficulty: Difficulty) -> Self {
        Self { mode: "balance".to_string(), theme: Theme::Garden, difficulty, level }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub num1: i64,
    pub num2: i64,
    #[serde(rename = "type")]
    pub op: Operator,
    pub answer: i64,
    pub options: Vec<i64>,
}

impl MathProblem {
    /// e.g. `"7 + 3"`.
    pub fn expression(&self) -> String {
        format!("{} {} {}", self.num1, self.op, self.num2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProblem {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Generator output. Serialized untagged, so the JSON is either
/// `{num1, num2, type, answer, options}` or `{prompt, options, answer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Problem {
    Math(MathProblem),
    Text(TextProblem),
}

impl Problem {
    /// Text shown to the player.
    pub fn prompt(&self) -> String {
        match self {
            Problem::Math(m) => format!("{} = ?", m.expression()),
            Problem::Text(t) => t.prompt.clone(),
        }
    }

    /// Options rendered as display strings, in display order.
    pub fn option_labels(&self) -> Vec<String> {
        match self {
            Problem::Math(m) => m.options.iter().map(|o| o.to_string()).collect(),
            Problem::Text(t) => t.options.clone(),
        }
    }

    pub fn answer_label(&self) -> String {
        match self {
            Problem::Math(m) => m.answer.to_string(),
            Problem::Text(t) => t.answer.clone(),
        }
    }

    pub fn is_correct(&self, candidate: &str) -> bool {
        match self {
            Problem::Math(m) => candidate.trim().parse::<i64>().is_ok_and(|v| v == m.answer),
            Problem::Text(t) => !t.answer.is_empty() && candidate == t.answer,
        }
    }

    /// Indices of the options that are not the answer.
    pub fn distractor_indices(&self) -> Vec<usize> {
        let answer = self.answer_label();
        self.option_labels()
            .iter()
            .enumerate()
            .filter(|(_, o)| **o != answer)
            .map(|(i, _)| i)
            .collect()
    }

    /// True for the degraded "nothing loaded" output.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Problem::Text(t) if t.options.is_empty() && t.answer.is_empty())
    }
}
