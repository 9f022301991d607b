//! Garden session: the game loop that drives the generator.
//!
//! Ten correct answers ("seeds") complete a level. Completing a level adds
//! a collectible to the garden and advances the level, wrapping 9 back to 1.
//! Wrong answers never cost seeds.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sprouts_engine::{
    generator::ProblemGenerator,
    models::{Difficulty, GeneratorRequest, Problem, Theme},
    sampling::pick,
};

pub const SEEDS_PER_LEVEL: u32 = 10;
pub const MAX_LEVEL: u32 = 9;
const COLLECTIBLES_PER_THEME: u32 = 8;

/// Collectible ids for a theme, e.g. `"garden-3"`.
pub fn collectibles(theme: Theme) -> Vec<String> {
    (1..=COLLECTIBLES_PER_THEME).map(|i| format!("{}-{}", theme.key(), i)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct { seeds: u32 },
    LevelUp { new_level: u32, collected: String },
    TryAgain,
}

pub struct GardenSession {
    generator: ProblemGenerator,
    mode: String,
    theme: Theme,
    difficulty: Difficulty,
    level: u32,
    seeds: u32,
    garden: Vec<String>,
    target: String,
    problem: Problem,
    hinted: Option<usize>,
}

impl GardenSession {
    pub fn new(mut generator: ProblemGenerator, theme: Theme, difficulty: Difficulty) -> Self {
        let mode = generator.pack().default_mode().unwrap_or_default().to_string();
        let target = Self::draw_target(&mut generator, theme);
        let request = GeneratorRequest::new(mode.clone(), theme, difficulty);
        let problem = generator.next_problem(&request);
        GardenSession {
            generator,
            mode,
            theme,
            difficulty,
            level: 1,
            seeds: 0,
            garden: Vec::new(),
            target,
            problem,
            hinted: None,
        }
    }

    fn draw_target(generator: &mut ProblemGenerator, theme: Theme) -> String {
        let pool = collectibles(theme);
        pick(generator.rng_mut(), &pool).cloned().unwrap_or_default()
    }

    fn request(&self) -> GeneratorRequest {
        GeneratorRequest::new(self.mode.clone(), self.theme, self.difficulty).with_level(self.level)
    }

    fn next_problem(&mut self) {
        let request = self.request();
        self.problem = self.generator.next_problem(&request);
        self.hinted = None;
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seeds(&self) -> u32 {
        self.seeds
    }

    pub fn garden(&self) -> &[String] {
        &self.garden
    }

    /// The collectible that completing this level will add.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: impl Into<String>) {
        self.mode = mode.into();
        self.next_problem();
    }

    /// Changing difficulty only changes the number ranges.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.next_problem();
    }

    /// Changing theme also picks a new target collectible.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.target = Self::draw_target(&mut self.generator, theme);
        self.next_problem();
    }

    pub fn submit(&mut self, candidate: &str) -> AnswerOutcome {
        if !self.problem.is_correct(candidate) {
            return AnswerOutcome::TryAgain;
        }

        self.seeds += 1;
        if self.seeds < SEEDS_PER_LEVEL {
            self.next_problem();
            return AnswerOutcome::Correct { seeds: self.seeds };
        }

        let collected = std::mem::take(&mut self.target);
        self.garden.push(collected.clone());
        self.level = if self.level < MAX_LEVEL { self.level + 1 } else { 1 };
        self.seeds = 0;
        self.target = Self::draw_target(&mut self.generator, self.theme);
        info!(level = self.level, collected = %collected, garden = self.garden.len(), "level complete");
        self.next_problem();
        AnswerOutcome::LevelUp { new_level: self.level, collected }
    }

    /// Index of one wrong option to grey out. Only one hint per problem.
    pub fn hint(&mut self) -> Option<usize> {
        if self.hinted.is_some() {
            return None;
        }
        let wrong = self.problem.distractor_indices();
        let idx = *pick(self.generator.rng_mut(), &wrong)?;
        self.hinted = Some(idx);
        Some(idx)
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.seeds = 0;
        self.garden.clear();
        self.target = Self::draw_target(&mut self.generator, self.theme);
        self.next_problem();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprouts_engine::{content::ContentPack, rng::SproutRng};

    fn session(seed: f64) -> GardenSession {
        let pack = ContentPack::builtin("math").unwrap();
        let generator = ProblemGenerator::with_rng(pack, SproutRng::with_seed(seed));
        GardenSession::new(generator, Theme::Garden, Difficulty::Beginner)
    }

    fn answer_correctly(s: &mut GardenSession) -> AnswerOutcome {
        let answer = s.problem().answer_label();
        s.submit(&answer)
    }

    #[test]
    fn ten_correct_answers_complete_a_level() {
        let mut s = session(4.0);
        let target = s.target().to_string();
        for i in 1..SEEDS_PER_LEVEL {
            assert_eq!(answer_correctly(&mut s), AnswerOutcome::Correct { seeds: i });
        }
        match answer_correctly(&mut s) {
            AnswerOutcome::LevelUp { new_level, collected } => {
                assert_eq!(new_level, 2);
                assert_eq!(collected, target);
            }
            other => panic!("expected level up, got {other:?}"),
        }
        assert_eq!(s.seeds(), 0);
        assert_eq!(s.garden().len(), 1);
    }

    #[test]
    fn level_wraps_after_nine() {
        let mut s = session(9.0);
        for _ in 0..(SEEDS_PER_LEVEL * MAX_LEVEL) {
            answer_correctly(&mut s);
        }
        assert_eq!(s.level(), 1);
        assert_eq!(s.garden().len(), MAX_LEVEL as usize);
    }

    #[test]
    fn wrong_answer_keeps_problem_and_seeds() {
        let mut s = session(2.0);
        let before = s.problem().clone();
        let wrong = before.option_labels()[before.distractor_indices()[0]].clone();
        assert_eq!(s.submit(&wrong), AnswerOutcome::TryAgain);
        assert_eq!(s.problem(), &before);
        assert_eq!(s.seeds(), 0);
    }

    #[test]
    fn hint_points_at_a_wrong_option_once() {
        let mut s = session(6.0);
        let idx = s.hint().unwrap();
        let labels = s.problem().option_labels();
        assert_ne!(labels[idx], s.problem().answer_label());
        assert_eq!(s.hint(), None);
    }

    #[test]
    fn theme_switch_redraws_target_and_keeps_progress() {
        let mut s = session(12.0);
        for _ in 0..3 {
            answer_correctly(&mut s);
        }
        s.hint();
        s.set_theme(Theme::Ocean);
        assert!(s.target().starts_with("ocean-"), "target {}", s.target());
        assert!(collectibles(Theme::Ocean).iter().any(|c| c == s.target()));
        assert_eq!((s.level(), s.seeds()), (1, 3));
        assert!(s.hint().is_some(), "a new problem gets a fresh hint");
    }

    #[test]
    fn difficulty_switch_keeps_level_seeds_and_target() {
        let mut s = session(13.0);
        for _ in 0..SEEDS_PER_LEVEL + 2 {
            answer_correctly(&mut s);
        }
        let target = s.target().to_string();
        s.set_difficulty(Difficulty::Advanced);
        assert_eq!((s.level(), s.seeds()), (2, 2));
        assert_eq!(s.target(), target);
        match s.problem() {
            Problem::Math(m) => assert_eq!(m.op.apply(m.num1, m.num2), Some(m.answer)),
            other => panic!("expected a math problem, got {other:?}"),
        }
    }

    #[test]
    fn mode_switch_changes_the_problem_kind() {
        let pack = ContentPack::builtin("reading").unwrap();
        let generator = ProblemGenerator::with_rng(pack, SproutRng::with_seed(14.0));
        let mut s = GardenSession::new(generator, Theme::Ocean, Difficulty::Beginner);
        assert_eq!(s.mode(), "phonics");
        assert!(s.problem().prompt().starts_with("Which word starts with"));

        s.set_mode("story");
        assert_eq!(s.mode(), "story");
        assert!(s.problem().prompt().contains("____"), "{:?}", s.problem());

        s.set_mode("poetry");
        assert!(s.problem().is_placeholder());
    }

    #[test]
    fn reset_clears_progress() {
        let mut s = session(8.0);
        for _ in 0..SEEDS_PER_LEVEL + 3 {
            answer_correctly(&mut s);
        }
        s.reset();
        assert_eq!((s.level(), s.seeds()), (1, 0));
        assert!(s.garden().is_empty());
    }
}
