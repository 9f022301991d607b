//! # sprouts_engine
//!
//! Procedural practice problems for young children, plus the small amount
//! of local state a game around them needs.
//!
//! The engine turns a content pack and a request (mode, theme, difficulty,
//! level) into a [`Problem`] with three options, one of which is correct.
//! Math problems are generated from a nine-step difficulty curve; reading
//! and science problems are sampled from the pack's word lists, story
//! templates, vocabulary and fact banks.
//!
//! ## How it works
//!
//! 1. Load a [`ContentPack`] (built-in, or JSON from disk).
//! 2. Create a [`SproutRng`]: session-seeded, or fixed for reproducible runs.
//! 3. Call [`generate`] with the pack, a [`GeneratorRequest`] and the RNG.
//!    Draws happen in call order, so the same seed gives the same problems.
//! 4. An empty bank or unknown mode is an `Err(GenerateError)`;
//!    [`generate_or_placeholder`] turns that into a clearly labelled
//!    problem with no options.
//!
//! ## Quick start
//!
//! ```rust
//! use sprouts_engine::{generate, ContentPack, Difficulty, GeneratorRequest, Problem, SproutRng};
//!
//! let pack = ContentPack::builtin("math").unwrap();
//! let mut rng = SproutRng::with_seed(42.0);
//!
//! let problem = generate(&pack, &GeneratorRequest::math(1, Difficulty::Beginner), &mut rng).unwrap();
//! if let Problem::Math(m) = &problem {
//!     assert_eq!(m.num1 + m.num2, m.answer);
//!     assert!(m.options.contains(&m.answer));
//! }
//! println!("{}", problem.prompt());
//! ```

pub mod config;
pub mod services;
pub mod sprouts_engine;
pub mod telemetry;

pub use sprouts_engine::{
    generate, generate_or_placeholder, AnswerOutcome, ContentError, ContentPack, Difficulty,
    GardenSession, GenerateError, GeneratorRequest, MathProblem, Operator, PackKind, Problem,
    ProblemGenerator, ProblemKind, ReadingMode, ScienceMode, SharedGenerator, SproutRng,
    TextProblem, Theme,
};
