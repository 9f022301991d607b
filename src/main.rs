use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};

use sprouts_engine::{
    config::EngineConfig,
    services::{
        parental::PARENT_SETTINGS_KEY, progress::PROGRESS_KEY, Analytics, FileStore,
        KeyValueStore, ParentSettingsStore, ProgressStore, VersionInfo,
    },
    sprouts_engine::{strategies::math::LevelRule, word_problems::word_problem},
    generate_or_placeholder, telemetry, AnswerOutcome, ContentPack, Difficulty, GardenSession,
    GeneratorRequest, PackKind, Problem, ProblemGenerator, SproutRng, Theme,
};

#[derive(Parser)]
#[command(author, version, about = "Math Sprouts practice problem engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print generated problems.
    Problems {
        /// Content pack id: math, reading or science.
        #[arg(short, long, default_value = "math")]
        pack: String,
        /// Mode key; defaults to the pack's first mode.
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long, default_value = "garden", value_parser = parse_theme)]
        theme: Theme,
        #[arg(short, long, default_value = "beginner", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Fixed RNG seed for reproducible output.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Phrase math problems as themed stories where the pack has one.
        #[arg(long)]
        words: bool,
        /// Emit one JSON object per line.
        #[arg(long)]
        json: bool,
    },
    /// Play a session that always answers correctly and report level-ups.
    Play {
        #[arg(short, long, default_value = "garden", value_parser = parse_theme)]
        theme: Theme,
        #[arg(short, long, default_value = "beginner", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        #[arg(short = 'n', long, default_value_t = 30)]
        answers: usize,
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Write the version descriptor used for update checks.
    Version {
        #[arg(short, long, default_value = "version.json")]
        out: PathBuf,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (garden, ocean, space)"))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}' (beginner, intermediate, advanced)"))
}

fn make_rng(seed: Option<u64>) -> SproutRng {
    use rand::SeedableRng;
    match seed {
        Some(seed) => SproutRng::seed_from_u64(seed),
        None => SproutRng::from_session(),
    }
}

fn print_problem(index: usize, problem: &Problem, story: Option<String>) {
    println!("{:>3}. {}", index + 1, story.unwrap_or_else(|| problem.prompt()));
    let answer = problem.answer_label();
    for option in problem.option_labels() {
        let mark = if option == answer { "+" } else { " " };
        println!("     [{mark}] {option}");
    }
}

#[allow(clippy::too_many_arguments)]
fn run_problems(
    config: &EngineConfig,
    pack_id: &str,
    mode: Option<String>,
    theme: Theme,
    difficulty: Difficulty,
    level: u32,
    count: usize,
    seed: Option<u64>,
    words: bool,
    as_json: bool,
) -> anyhow::Result<()> {
    let pack = ContentPack::load(pack_id, config.content_dir.as_deref())
        .with_context(|| format!("loading content pack '{pack_id}'"))?;
    let mode = mode.or_else(|| pack.default_mode().map(str::to_string)).unwrap_or_default();
    if !pack.modes.is_empty() && !pack.has_mode(&mode) {
        warn!(pack = %pack.id, mode = %mode, "mode is not listed by the pack");
    }
    if pack.kind == PackKind::Math && !as_json {
        println!("Level {level}: {}", LevelRule::for_level(level));
    }

    let request = GeneratorRequest { mode, theme, difficulty, level };
    let mut rng = make_rng(seed);
    for i in 0..count {
        let problem = generate_or_placeholder(&pack, &request, &mut rng);
        if as_json {
            println!("{}", serde_json::to_string(&problem)?);
            continue;
        }
        let story = match (&problem, words) {
            (Problem::Math(m), true) => word_problem(&mut rng, &pack, theme, difficulty, m),
            _ => None,
        };
        print_problem(i, &problem, story);
    }
    Ok(())
}

fn run_play(
    config: &EngineConfig,
    theme: Theme,
    difficulty: Difficulty,
    answers: usize,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let files = FileStore::new(&config.storage_dir);
    info!(dir = %files.dir().display(), "using local storage");
    let store: Arc<dyn KeyValueStore> = Arc::new(files);
    let pack = ContentPack::load("math", config.content_dir.as_deref())?;
    let modes: Vec<&str> = pack.modes.iter().map(|m| m.key.as_str()).collect();

    let settings = ParentSettingsStore::new(store.clone(), PARENT_SETTINGS_KEY, &modes).load();
    if !settings.is_theme_allowed(theme) {
        bail!("theme {theme} is turned off in parent settings");
    }
    if !settings.is_difficulty_allowed(difficulty) {
        bail!("difficulty {difficulty} is turned off in parent settings");
    }

    let progress = ProgressStore::new(store.clone(), PROGRESS_KEY, &modes);
    let analytics = Analytics::new(store, config.analytics.clone());
    progress.record_session_start();
    analytics.track("game_start", &json!({ "theme": theme.key(), "difficulty": difficulty.key() }));

    let generator = ProblemGenerator::with_rng(pack, make_rng(seed));
    let mut session = GardenSession::new(generator, theme, difficulty);
    for _ in 0..answers {
        let answer = session.problem().answer_label();
        let outcome = session.submit(&answer);
        progress.record_answer(session.mode(), true);
        match outcome {
            AnswerOutcome::Correct { seeds } => {
                println!("{} {seeds}/10", theme.seed_name());
            }
            AnswerOutcome::LevelUp { new_level, collected } => {
                analytics.track("level_up", &json!({ "level": new_level }));
                println!("Level up! Now on level {new_level} ({}); collected {collected}", LevelRule::for_level(new_level));
            }
            AnswerOutcome::TryAgain => println!("Try again!"),
        }
    }

    let summary = progress.record_session_end();
    info!(
        attempts = summary.total_attempts,
        correct = summary.total_correct,
        garden = session.garden().len(),
        "session finished"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    match cli.command {
        Command::Problems { pack, mode, theme, difficulty, level, count, seed, words, json } => {
            run_problems(&config, &pack, mode, theme, difficulty, level, count, seed, words, json)
        }
        Command::Play { theme, difficulty, answers, seed } => {
            run_play(&config, theme, difficulty, answers, seed)
        }
        Command::Version { out } => {
            let info = VersionInfo::current();
            info.write_to(&out).with_context(|| format!("writing {}", out.display()))?;
            println!("Generated {}: v{} ({})", out.display(), info.version, info.build_date);
            Ok(())
        }
    }
}
