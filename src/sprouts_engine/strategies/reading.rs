use crate::sprouts_engine::{
    content::Banks,
    error::GenerateError,
    helpers::{dedup_in_order, fill_blank, initial, lower, lower_all, text_problem},
    models::{Difficulty, Problem, ReadingMode, Theme},
    rng::SproutRng,
    sampling::{pick, shuffle},
};

pub fn generate(
    rng: &mut SproutRng,
    mode: ReadingMode,
    theme: Theme,
    difficulty: Difficulty,
    banks: &Banks,
) -> Result<Problem, GenerateError> {
    match mode {
        ReadingMode::Phonics => phonics(rng, theme, difficulty, banks),
        ReadingMode::Sight   => sight(rng, difficulty, banks),
        ReadingMode::Story   => story(rng, theme, banks),
    }
}

/// "Which word starts with X?"; distractors start with a different letter.
fn phonics(
    rng: &mut SproutRng,
    theme: Theme,
    difficulty: Difficulty,
    banks: &Banks,
) -> Result<Problem, GenerateError> {
    let words = banks.words(theme, difficulty);
    let correct = pick(rng, words).filter(|w| !w.is_empty()).ok_or(GenerateError::missing("words"))?;
    let letter = initial(correct).unwrap_or_default();
    let answer = lower(correct);

    // Lowercased and deduplicated, so case variants of one word count once.
    let distractor_pool = |list: &[String]| -> Vec<String> {
        dedup_in_order(
            lower_all(list)
                .into_iter()
                .filter(|w| *w != answer && initial(w).as_deref() != Some(letter.as_str()))
                .collect(),
        )
    };

    let pool = distractor_pool(words);
    let mut distractors: Vec<String> = shuffle(rng, &pool).into_iter().take(2).collect();

    // Top up from the theme's beginner tier when the pool is too small.
    let fallback_pool = distractor_pool(banks.words(theme, Difficulty::Beginner));
    while distractors.len() < 2 {
        match pick(rng, &fallback_pool) {
            Some(w) if !distractors.contains(w) => distractors.push(w.clone()),
            _ => break,
        }
    }

    let mut candidates = vec![answer.clone()];
    candidates.extend(distractors);
    let options = shuffle(rng, &candidates);

    Ok(text_problem(format!("Which word starts with \"{letter}\"?"), options, answer))
}

/// "Tap the sight word". Distractors come from the same tier plus its easier neighbour.
fn sight(rng: &mut SproutRng, difficulty: Difficulty, banks: &Banks) -> Result<Problem, GenerateError> {
    let list = banks.sight_words(difficulty);
    let target = pick(rng, list).map(|w| lower(w)).unwrap_or_default();
    if target.is_empty() {
        return Err(GenerateError::missing("sight words"));
    }

    let neighbour = match difficulty {
        Difficulty::Advanced => banks.sight_words(Difficulty::Intermediate),
        _ => banks.sight_words(Difficulty::Beginner),
    };
    // The neighbour tier may still hold the target: it is shuffled along
    // with the rest and only filtered out afterwards.
    let mut pool: Vec<String> = lower_all(list).into_iter().filter(|w| *w != target).collect();
    pool.extend(lower_all(neighbour));
    let mut shuffled = shuffle(rng, &pool);
    shuffled.retain(|w| *w != target);
    let candidates = dedup_in_order(shuffled);

    let mut chosen = vec![target.clone()];
    for slot in 0..2 {
        let word = match candidates.get(slot) {
            Some(w) => w.clone(),
            None => pick(rng, list).map(|w| lower(w)).unwrap_or_default(),
        };
        chosen.push(word);
    }

    let options = dedup_in_order(shuffle(rng, &chosen));
    Ok(text_problem(format!("Tap the sight word: \"{target}\""), options, target))
}

/// Fill-in-the-blank story sentence.
fn story(rng: &mut SproutRng, theme: Theme, banks: &Banks) -> Result<Problem, GenerateError> {
    let tpl = pick(rng, banks.stories(theme)).ok_or(GenerateError::missing("stories"))?;

    let mut candidates = vec![tpl.answer.clone()];
    candidates.extend(tpl.distractors.iter().cloned());
    let options = shuffle(rng, &dedup_in_order(lower_all(&candidates)));

    Ok(text_problem(fill_blank(&tpl.template), options, lower(&tpl.answer)))
}
