//! Session-seeded linear-congruential generator.
//!
//! `state' = (state * 9301 + 49297) mod 233280`, output `state' / 233280`.
//! The state is an `f64`; fractional session seeds (wall clock millis plus
//! an entropy sample) are carried through the recurrence unrounded.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Error, RngCore, SeedableRng};
use tracing::debug;

const MULTIPLIER: f64 = 9301.0;
const INCREMENT: f64 = 49297.0;
const MODULUS: f64 = 233280.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SproutRng {
    state: f64,
}

impl SproutRng {
    /// Deterministic stream starting from `seed`.
    pub fn with_seed(seed: f64) -> Self {
        SproutRng { state: seed }
    }

    /// Seed from the wall clock plus one `rand` entropy sample.
    pub fn from_session() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        let seed = millis + rand::random::<f64>();
        debug!(seed, "seeded session rng");
        SproutRng::with_seed(seed)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state / MODULUS
    }

    /// `floor(next() * n)`, i.e. an index-style draw in `[0, n)`.
    pub fn below(&mut self, n: i64) -> i64 {
        (self.next_f64() * n as f64).floor() as i64
    }

    /// `next() > 0.5`.
    pub fn coin(&mut self) -> bool {
        self.next_f64() > 0.5
    }

    pub fn state(&self) -> f64 {
        self.state
    }
}

impl RngCore for SproutRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SproutRng {
    type Seed = [u8; 8];

    /// Seeds are reduced into the LCG's modulus range.
    fn from_seed(seed: Self::Seed) -> Self {
        let raw = u64::from_le_bytes(seed);
        SproutRng::with_seed((raw % MODULUS as u64) as f64)
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::from_seed(state.to_le_bytes())
    }
}
