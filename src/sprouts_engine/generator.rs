use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::sprouts_engine::{
    content::ContentPack,
    error::GenerateError,
    models::{GeneratorRequest, Problem, ProblemKind},
    rng::SproutRng,
    strategies,
};

/// Core dispatch: routes to the strategy for the pack's type and the request's mode.
pub fn generate(
    pack: &ContentPack,
    request: &GeneratorRequest,
    rng: &mut SproutRng,
) -> Result<Problem, GenerateError> {
    let kind = ProblemKind::resolve(pack.kind, &request.mode)?;
    trace!(pack = %pack.id, ?kind, level = request.level, "generating problem");

    match kind {
        ProblemKind::Math =>
            Ok(Problem::Math(strategies::math::generate(rng, request.level, request.difficulty))),

        ProblemKind::Reading(mode) =>
            strategies::reading::generate(rng, mode, request.theme, request.difficulty, &pack.banks),

        ProblemKind::Science(mode) =>
            strategies::science::generate(rng, mode, request.theme, request.difficulty, &pack.banks),
    }
}

/// Like [`generate`], but folds any error into the degraded placeholder problem.
pub fn generate_or_placeholder(
    pack: &ContentPack,
    request: &GeneratorRequest,
    rng: &mut SproutRng,
) -> Problem {
    generate(pack, request, rng).unwrap_or_else(|err| {
        debug!(pack = %pack.id, mode = %request.mode, error = %err, "serving placeholder problem");
        err.placeholder()
    })
}

/// A content pack bound to its own RNG stream.
#[derive(Debug, Clone)]
pub struct ProblemGenerator {
    pack: ContentPack,
    rng: SproutRng,
}

impl ProblemGenerator {
    /// Session-seeded generator.
    pub fn new(pack: ContentPack) -> Self {
        Self::with_rng(pack, SproutRng::from_session())
    }

    pub fn with_rng(pack: ContentPack, rng: SproutRng) -> Self {
        ProblemGenerator { pack, rng }
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }

    pub fn rng_mut(&mut self) -> &mut SproutRng {
        &mut self.rng
    }

    pub fn try_next(&mut self, request: &GeneratorRequest) -> Result<Problem, GenerateError> {
        generate(&self.pack, request, &mut self.rng)
    }

    pub fn next_problem(&mut self, request: &GeneratorRequest) -> Problem {
        generate_or_placeholder(&self.pack, request, &mut self.rng)
    }

    pub fn into_shared(self) -> SharedGenerator {
        SharedGenerator { inner: Arc::new(Mutex::new(self)) }
    }
}

/// Cloneable handle for callers on several threads. Every call takes the
/// lock, so draws from the stream stay in a single, serialized order.
#[derive(Debug, Clone)]
pub struct SharedGenerator {
    inner: Arc<Mutex<ProblemGenerator>>,
}

impl SharedGenerator {
    pub fn next_problem(&self, request: &GeneratorRequest) -> Problem {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.next_problem(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprouts_engine::models::{Difficulty, Theme};

    #[test]
    fn math_pack_ignores_mode_and_theme() {
        let pack = ContentPack::builtin("math").unwrap();
        let req = GeneratorRequest::new("not-a-mode", Theme::Space, Difficulty::Beginner);
        let mut rng = SproutRng::with_seed(1.0);
        assert!(matches!(generate(&pack, &req, &mut rng), Ok(Problem::Math(_))));
    }

    #[test]
    fn unknown_reading_mode_degrades() {
        let pack = ContentPack::builtin("reading").unwrap();
        let req = GeneratorRequest::new("poetry", Theme::Garden, Difficulty::Beginner);
        let mut rng = SproutRng::with_seed(1.0);
        let p = generate_or_placeholder(&pack, &req, &mut rng);
        assert!(p.is_placeholder());
        assert_eq!(p.prompt(), "Unknown reading mode.");
    }

    #[test]
    fn try_next_surfaces_errors_without_degrading() {
        let empty = ContentPack::from_json_str(r#"{"id":"s","type":"science"}"#).unwrap();
        let mut gen = ProblemGenerator::with_rng(empty, SproutRng::with_seed(2.0));
        let req = GeneratorRequest::new("labs", Theme::Ocean, Difficulty::Beginner);
        assert_eq!(gen.try_next(&req), Err(GenerateError::ContentMissing { bank: "questions" }));

        let pack = ContentPack::builtin("science").unwrap();
        let mut gen = ProblemGenerator::with_rng(pack.clone(), SproutRng::with_seed(2.0));
        let mut rng = SproutRng::with_seed(2.0);
        assert_eq!(gen.try_next(&req).unwrap(), generate(&pack, &req, &mut rng).unwrap());
        assert_eq!(*gen.rng_mut(), rng);
    }

    #[test]
    fn shared_generator_serializes_draws() {
        let pack = ContentPack::builtin("math").unwrap();
        let req = GeneratorRequest::math(3, Difficulty::Intermediate);

        let mut solo = ProblemGenerator::with_rng(pack.clone(), SproutRng::with_seed(5.0));
        let expected: Vec<Problem> = (0..4).map(|_| solo.next_problem(&req)).collect();

        let shared = ProblemGenerator::with_rng(pack, SproutRng::with_seed(5.0)).into_shared();
        let got: Vec<Problem> = (0..4).map(|_| shared.clone().next_problem(&req)).collect();
        assert_eq!(got, expected);
    }
}
