//! Tour of every content pack.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Math curve**: one problem per level 1..=9 from a fixed seed, so the
//!    output is the same on every run.
//! 2. **Reading and science**: one problem per mode in each theme.
//! 3. **Missing content**: an empty pack degrades to the placeholder problem
//!    instead of failing.
//! 4. **Garden session**: a short run that answers everything correctly and
//!    levels up once.

use sprouts_engine::{
    generate, generate_or_placeholder,
    sprouts_engine::{strategies::math::LevelRule, word_problems::word_problem},
    AnswerOutcome, ContentPack, Difficulty, GardenSession, GeneratorRequest, Problem,
    ProblemGenerator, SproutRng, Theme,
};

fn print_problem(label: &str, problem: &Problem) {
    println!("  [{label}] {}", problem.prompt());
    let answer = problem.answer_label();
    for option in problem.option_labels() {
        let marker = if option == answer { "✓" } else { " " };
        println!("      {marker} {option}");
    }
}

fn main() {
    let math = ContentPack::builtin("math").expect("math pack");
    let reading = ContentPack::builtin("reading").expect("reading pack");
    let science = ContentPack::builtin("science").expect("science pack");

    // ── Math curve ─────────────────────────────────────────────────────────
    println!();
    println!("══ Math levels (seed 42) ══");
    println!();
    let mut rng = SproutRng::with_seed(42.0);
    for level in 1..=9 {
        let req = GeneratorRequest::math(level, Difficulty::Intermediate);
        let problem = generate(&math, &req, &mut rng).expect("math never runs dry");
        print_problem(&format!("L{level} {}", LevelRule::for_level(level)), &problem);
        if let Problem::Math(m) = &problem {
            if let Some(story) = word_problem(&mut rng, &math, Theme::Garden, Difficulty::Beginner, m) {
                println!("      story: {story}");
            }
        }
    }

    // ── Reading and science ────────────────────────────────────────────────
    for pack in [&reading, &science] {
        println!();
        println!("══ {} ══", pack.title);
        for theme in Theme::ALL {
            println!();
            println!("  ── {theme} ──");
            for mode in &pack.modes {
                let req = GeneratorRequest::new(mode.key.as_str(), theme, Difficulty::Beginner);
                print_problem(&mode.label, &generate_or_placeholder(pack, &req, &mut rng));
            }
        }
    }

    // ── Missing content ────────────────────────────────────────────────────
    println!();
    println!("══ Empty pack ══");
    println!();
    let empty = ContentPack::from_json_str(r#"{"id":"empty","type":"reading"}"#).expect("valid JSON");
    let req = GeneratorRequest::new("phonics", Theme::Garden, Difficulty::Beginner);
    print_problem("phonics", &generate_or_placeholder(&empty, &req, &mut rng));

    // ── Garden session ─────────────────────────────────────────────────────
    println!();
    println!("══ Garden session ══");
    println!();
    let generator = ProblemGenerator::with_rng(math, SproutRng::with_seed(7.0));
    let mut session = GardenSession::new(generator, Theme::Ocean, Difficulty::Beginner);
    println!("  Collecting toward: {}", session.target());
    for _ in 0..10 {
        let answer = session.problem().answer_label();
        match session.submit(&answer) {
            AnswerOutcome::Correct { seeds } => println!("  {} {seeds}/10", Theme::Ocean.seed_name()),
            AnswerOutcome::LevelUp { new_level, collected } => {
                println!("  Level up! Level {new_level}, collected {collected}");
            }
            AnswerOutcome::TryAgain => println!("  Try again"),
        }
    }
    println!("  Garden: {:?}", session.garden());
}
