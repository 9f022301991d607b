use crate::sprouts_engine::{
    content::Banks,
    error::GenerateError,
    helpers::{dedup_in_order, fill_blank, lower, lower_all, text_problem},
    models::{Difficulty, Problem, ScienceMode, Theme},
    rng::SproutRng,
    sampling::{pick, shuffle},
};

pub const FACTS_PROMPT: &str = "Which statement is TRUE?";

pub fn generate(
    rng: &mut SproutRng,
    mode: ScienceMode,
    theme: Theme,
    difficulty: Difficulty,
    banks: &Banks,
) -> Result<Problem, GenerateError> {
    match mode {
        ScienceMode::Vocab => vocab(rng, theme, difficulty, banks),
        ScienceMode::Labs  => labs(rng, theme, banks),
        ScienceMode::Facts => facts(rng, theme, difficulty, banks),
    }
}

/// Definition shown, term chosen.
fn vocab(
    rng: &mut SproutRng,
    theme: Theme,
    difficulty: Difficulty,
    banks: &Banks,
) -> Result<Problem, GenerateError> {
    let entries = banks.vocab(theme, difficulty);
    let item = pick(rng, entries).ok_or(GenerateError::missing("questions"))?;
    let correct = lower(&item.term);

    let pool = dedup_in_order(
        entries
            .iter()
            .map(|e| lower(&e.term))
            .filter(|t| *t != correct)
            .collect(),
    );
    let mut candidates = vec![correct.clone()];
    candidates.extend(shuffle(rng, &pool).into_iter().take(2));
    let options = shuffle(rng, &candidates);

    Ok(text_problem(format!("Which word matches: \"{}\"", item.def), options, correct))
}

/// Fill-in-the-blank lab question, at most three options.
fn labs(rng: &mut SproutRng, theme: Theme, banks: &Banks) -> Result<Problem, GenerateError> {
    let tpl = pick(rng, banks.labs(theme)).ok_or(GenerateError::missing("questions"))?;
    let correct = lower(&tpl.a);

    // Distractors are narrowed to two before mixing in the answer so the
    // truncation can never drop it.
    let mut candidates = vec![correct.clone()];
    let pool = dedup_in_order(lower_all(&tpl.d));
    candidates.extend(shuffle(rng, &pool).into_iter().filter(|d| *d != correct).take(2));
    let options = shuffle(rng, &candidates);

    Ok(text_problem(fill_blank(&tpl.q), options, correct))
}

/// One true statement among two false ones.
fn facts(
    rng: &mut SproutRng,
    theme: Theme,
    difficulty: Difficulty,
    banks: &Banks,
) -> Result<Problem, GenerateError> {
    let item = pick(rng, banks.facts(theme, difficulty)).ok_or(GenerateError::missing("questions"))?;
    let options = dedup_in_order(lower_all(&shuffle(rng, &[item.t.clone(), item.f1.clone(), item.f2.clone()])));

    Ok(text_problem(FACTS_PROMPT, options, lower(&item.t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprouts_engine::{
        content::{FactTriple, LabTemplate, VocabEntry},
        models::TextProblem,
    };
    use std::collections::BTreeMap;

    fn text(p: Problem) -> TextProblem {
        match p {
            Problem::Text(t) => t,
            other => panic!("expected a text problem, got {other:?}"),
        }
    }

    fn sample_banks() -> Banks {
        let mut banks = Banks::default();
        let vocab = vec![
            VocabEntry { term: "Root".into(), def: "drinks water".into() },
            VocabEntry { term: "Leaf".into(), def: "catches sunlight".into() },
            VocabEntry { term: "Seed".into(), def: "grows into a plant".into() },
            VocabEntry { term: "Stem".into(), def: "holds the plant up".into() },
        ];
        banks.vocab.insert(Theme::Garden, BTreeMap::from([(Difficulty::Beginner, vocab)]));
        banks.labs.insert(
            Theme::Space,
            vec![LabTemplate {
                q: "The Earth spins once every {__}.".into(),
                a: "Day".into(),
                d: vec!["year".into(), "hour".into(), "minute".into()],
            }],
        );
        let fact = FactTriple {
            t: "Fish live in water.".into(),
            f1: "Fish live in trees.".into(),
            f2: "Fish fly.".into(),
        };
        banks.facts.insert(Theme::Ocean, BTreeMap::from([(Difficulty::Beginner, vec![fact])]));
        banks
    }

    #[test]
    fn vocab_prompt_shows_definition() {
        let banks = sample_banks();
        let mut rng = SproutRng::with_seed(10.0);
        for _ in 0..30 {
            let p = text(vocab(&mut rng, Theme::Garden, Difficulty::Beginner, &banks).unwrap());
            assert!(p.prompt.starts_with("Which word matches: \""));
            assert!(p.options.contains(&p.answer));
            assert_eq!(p.options.len(), 3);
        }
    }

    #[test]
    fn vocab_case_variants_count_once() {
        let mut banks = Banks::default();
        let vocab = vec![
            VocabEntry { term: "Root".into(), def: "drinks water".into() },
            VocabEntry { term: "Seed".into(), def: "grows into a plant".into() },
            VocabEntry { term: "seed".into(), def: "a tiny plant starter".into() },
            VocabEntry { term: "ROOT".into(), def: "holds the soil".into() },
        ];
        banks.vocab.insert(Theme::Garden, BTreeMap::from([(Difficulty::Beginner, vocab)]));
        for seed in 0..50 {
            let mut rng = SproutRng::with_seed(seed as f64);
            let p = text(super::vocab(&mut rng, Theme::Garden, Difficulty::Beginner, &banks).unwrap());
            let mut sorted = p.options.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["root", "seed"], "seed {seed}: {p:?}");
        }
    }

    #[test]
    fn labs_duplicate_distractors_count_once() {
        let mut banks = Banks::default();
        banks.labs.insert(
            Theme::Garden,
            vec![LabTemplate {
                q: "Seeds need {__} to grow.".into(),
                a: "Water".into(),
                d: vec!["sand".into(), "Sand".into(), "water".into()],
            }],
        );
        let mut rng = SproutRng::with_seed(9.0);
        let p = text(labs(&mut rng, Theme::Garden, &banks).unwrap());
        let mut sorted = p.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["sand", "water"]);
    }

    #[test]
    fn labs_always_keeps_the_answer() {
        let banks = sample_banks();
        let mut rng = SproutRng::with_seed(13.0);
        for _ in 0..100 {
            let p = text(labs(&mut rng, Theme::Space, &banks).unwrap());
            assert_eq!(p.prompt, "The Earth spins once every ____.");
            assert_eq!(p.answer, "day");
            assert_eq!(p.options.len(), 3);
            assert!(p.options.contains(&p.answer), "{p:?}");
        }
    }

    #[test]
    fn facts_options_are_the_triple() {
        let banks = sample_banks();
        let mut rng = SproutRng::with_seed(21.0);
        let p = text(facts(&mut rng, Theme::Ocean, Difficulty::Beginner, &banks).unwrap());
        assert_eq!(p.prompt, FACTS_PROMPT);
        assert_eq!(p.answer, "fish live in water.");
        let mut sorted = p.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["fish fly.", "fish live in trees.", "fish live in water."]);
    }

    #[test]
    fn empty_slices_report_missing_questions() {
        let banks = sample_banks();
        let mut rng = SproutRng::with_seed(1.0);
        for mode in [ScienceMode::Vocab, ScienceMode::Labs, ScienceMode::Facts] {
            let err = generate(&mut rng, mode, Theme::Garden, Difficulty::Advanced, &banks).unwrap_err();
            assert_eq!(err, GenerateError::ContentMissing { bank: "questions" });
        }
    }
}
