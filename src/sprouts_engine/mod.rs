//! Core engine: problem generation and the session loop around it.
//!
//! ## Module overview
//!
//! | Module          | Purpose |
//! |-----------------|---------|
//! | `models`        | Shared types: difficulty, theme, operator, request and problem structs |
//! | `error`         | `GenerateError` and `ContentError` |
//! | `rng`           | `SproutRng`, the session-seeded LCG |
//! | `sampling`      | Fisher-Yates `shuffle` and `pick` over the shared stream |
//! | `content`       | Content packs and their banks, plus the built-in packs |
//! | `helpers`       | Small builders shared by the text strategies |
//! | `strategies`    | Math, reading and science problem generators |
//! | `generator`     | Entry point `generate()` and the owning `ProblemGenerator` |
//! | `word_problems` | Themed story phrasing for math problems |
//! | `session`       | `GardenSession`: seeds, levels, garden collection, hints |

pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod rng;
pub mod sampling;
pub mod session;
pub mod strategies;
pub mod word_problems;

pub use content::{ContentPack, PackKind};
pub use error::{ContentError, GenerateError};
pub use generator::{generate, generate_or_placeholder, ProblemGenerator, SharedGenerator};
pub use models::{
    Difficulty, GeneratorRequest, MathProblem, Operator, Problem, ProblemKind, ReadingMode,
    ScienceMode, TextProblem, Theme,
};
pub use rng::SproutRng;
pub use session::{AnswerOutcome, GardenSession};
