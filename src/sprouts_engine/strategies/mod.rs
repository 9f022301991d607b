//! Problem strategies, one per content type.
//!
//! Each module exposes a `generate` function taking the shared
//! [`SproutRng`](crate::sprouts_engine::rng::SproutRng) by `&mut` so draws
//! happen in call order. The math strategy always succeeds; reading and
//! science return `GenerateError::ContentMissing` for an empty bank slice.

/// Leveled arithmetic curve (levels 1–8 plus the mixed tier).
pub mod math;
/// Phonics, sight words and story blanks.
pub mod reading;
/// Vocabulary, mini labs and true/false facts.
pub mod science;
