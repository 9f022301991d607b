//! Shared builder functions used by the reading and science strategies.
//!
//! Text options are always compared and displayed lowercase, so every
//! strategy funnels its strings through [`lower`] before assembling the
//! final [`Problem`].

use crate::sprouts_engine::models::{Problem, TextProblem};

/// Marker for the blank in story and lab templates.
pub const BLANK_MARKER: &str = "{__}";
/// What the player sees in place of the blank.
pub const BLANK_DISPLAY: &str = "____";

pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn lower_all<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|s| lower(s.as_ref())).collect()
}

/// Replace the first blank marker with the visible placeholder.
pub fn fill_blank(template: &str) -> String {
    template.replacen(BLANK_MARKER, BLANK_DISPLAY, 1)
}

/// Uppercased first character of `word`, `None` for an empty word.
pub fn initial(word: &str) -> Option<String> {
    word.chars().next().map(|c| c.to_uppercase().collect())
}

/// Keep the first occurrence of each value.
pub fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Assemble the final text [`Problem`].
pub fn text_problem(prompt: impl Into<String>, options: Vec<String>, answer: impl Into<String>) -> Problem {
    Problem::Text(TextProblem {
        prompt: prompt.into(),
        options,
        answer: answer.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_blank_replaces_only_the_first_marker() {
        assert_eq!(fill_blank("The {__} and the {__}"), "The ____ and the {__}");
        assert_eq!(fill_blank("no blank"), "no blank");
    }

    #[test]
    fn initial_uppercases() {
        assert_eq!(initial("bee").as_deref(), Some("B"));
        assert_eq!(initial(""), None);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let v = vec!["a".to_string(), "b".into(), "a".into(), "c".into()];
        assert_eq!(dedup_in_order(v), vec!["a", "b", "c"]);
    }
}
