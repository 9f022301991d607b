use std::path::PathBuf;

use thiserror::Error;

use crate::sprouts_engine::{
    content::PackKind,
    models::{Problem, TextProblem},
};

/// Why a problem could not be generated. None of these are fatal; see
/// [`GenerateError::placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no {bank} loaded")]
    ContentMissing { bank: &'static str },

    #[error("unknown {kind} mode '{mode}'")]
    UnknownMode { kind: PackKind, mode: String },

    #[error("unknown content type")]
    UnknownType,
}

impl GenerateError {
    pub(crate) fn missing(bank: &'static str) -> Self {
        GenerateError::ContentMissing { bank }
    }

    /// The degraded problem shown in place of real content: a readable
    /// prompt with no options and an empty answer.
    pub fn placeholder(&self) -> Problem {
        let prompt = match self {
            GenerateError::ContentMissing { bank } => format!("No {bank} loaded."),
            GenerateError::UnknownMode { kind, .. } => format!("Unknown {kind} mode."),
            GenerateError::UnknownType => "Unknown content type.".to_string(),
        };
        Problem::Text(TextProblem { prompt, options: Vec::new(), answer: String::new() })
    }
}

/// Failure to load a content pack.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unknown built-in pack '{0}'")]
    UnknownPack(String),

    #[error("failed to read content pack {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content pack JSON")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_no_options_and_empty_answer() {
        let p = GenerateError::missing("words").placeholder();
        match p {
            Problem::Text(t) => {
                assert_eq!(t.prompt, "No words loaded.");
                assert!(t.options.is_empty());
                assert!(t.answer.is_empty());
            }
            other => panic!("expected text placeholder, got {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_placeholder_names_the_pack_kind() {
        let err = GenerateError::UnknownMode { kind: PackKind::Science, mode: "x".into() };
        assert_eq!(err.placeholder().prompt(), "Unknown science mode.");
        assert_eq!(GenerateError::UnknownType.placeholder().prompt(), "Unknown content type.");
    }
}
