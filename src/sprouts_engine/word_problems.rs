//! Themed story prompts for math problems.
//!
//! The math pack carries sentence templates per theme and difficulty with
//! `{n1}` and `{n2}` placeholders. A template is only used for a problem
//! whose operator matches the template's operation.

use serde::{Deserialize, Serialize};

use crate::sprouts_engine::{
    content::ContentPack,
    models::{Difficulty, MathProblem, Operator, Theme},
    rng::SproutRng,
    sampling::pick,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl WordOperation {
    pub fn operator(self) -> Operator {
        match self {
            WordOperation::Add      => Operator::Add,
            WordOperation::Subtract => Operator::Subtract,
            WordOperation::Multiply => Operator::Multiply,
            WordOperation::Divide   => Operator::Divide,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProblemTemplate {
    pub template: String,
    pub operation: WordOperation,
    /// Short label such as "planting"; serialized as `theme` in pack JSON.
    #[serde(rename = "theme", default)]
    pub topic: String,
}

impl WordProblemTemplate {
    pub fn render(&self, num1: i64, num2: i64) -> String {
        self.template
            .replace("{n1}", &num1.to_string())
            .replace("{n2}", &num2.to_string())
    }
}

/// Phrase `problem` as a themed story, or `None` when the pack has no
/// template for this theme, difficulty and operator.
pub fn word_problem(
    rng: &mut SproutRng,
    pack: &ContentPack,
    theme: Theme,
    difficulty: Difficulty,
    problem: &MathProblem,
) -> Option<String> {
    let matching: Vec<&WordProblemTemplate> = pack
        .word_problems
        .get(&theme)?
        .get(&difficulty)?
        .iter()
        .filter(|t| t.operation.operator() == problem.op)
        .collect();
    pick(rng, &matching).map(|t| t.render(problem.num1, problem.num2))
}
