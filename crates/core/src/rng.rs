//! RNG module - random sources for piece and rotation selection
//!
//! The engine only needs `uniform_int(max)`. Seeding and determinism are up to
//! whoever builds the source:
//!
//! - [`SimpleRng`]: tiny LCG, fully deterministic, used by tests and replays
//! - [`StdRandom`]: `rand`'s `StdRng`, seeded or drawn from OS entropy
//! - [`ScriptedRng`]: replays a fixed list of values, for pinning exact pieces

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform value in `[0, max_exclusive)`. Returns 0 when `max_exclusive`
    /// is 0.
    fn uniform_int(&mut self, max_exclusive: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        (**self).uniform_int(max_exclusive)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        (**self).uniform_int(max_exclusive)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // The low bits of an LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (restarting from it replays the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        self.next_range(max_exclusive)
    }
}

/// `rand`-backed source for normal play.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 {
            return 0;
        }
        self.rng.gen_range(0..max_exclusive)
    }
}

/// Replays a fixed list of values in a loop (each reduced modulo the range).
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRng {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 || self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % max_exclusive
    }
}
