//! Injected randomness for death rolls.
//!
//! The engine never calls an RNG directly; it draws through the [`Entropy`]
//! trait so production can use ambient OS entropy while tests script the
//! exact outcome of every roll. The source only needs to be unpredictable
//! to the caller at call time, not cryptographically strong.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A capability yielding one uniform draw per call.
pub trait Entropy {
    /// A uniform draw in `0..bound`. `bound` is always at least 1; the
    /// engine never draws for a harmless death chance.
    fn uniform(&mut self, bound: u32) -> u32;
}

/// Production entropy: a standard RNG seeded from the operating system.
#[derive(Debug)]
pub struct OsEntropy {
    rng: StdRng,
}

impl OsEntropy {
    /// Create a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for OsEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Entropy for OsEntropy {
    fn uniform(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound)
    }
}

/// A reproducible source seeded from a fixed value.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    /// Create a source from a u64 seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Entropy for SeededEntropy {
    fn uniform(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound)
    }
}

/// A scripted source that replays a fixed sequence of draws, then falls
/// back to the highest value below the bound (which never kills when the
/// numerator is below the denominator).
///
/// Intended for tests that need to force the dies or survives branch.
#[derive(Debug, Default)]
pub struct SequenceEntropy {
    draws: VecDeque<u32>,
    exhausted_low: bool,
}

impl SequenceEntropy {
    /// Create a source replaying `draws` in order, surviving once the
    /// script runs out.
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            exhausted_low: false,
        }
    }

    /// A source whose every draw is 0, the fatal outcome for any nonzero
    /// numerator.
    pub fn always_lowest() -> Self {
        Self {
            draws: VecDeque::new(),
            exhausted_low: true,
        }
    }
}

impl Entropy for SequenceEntropy {
    fn uniform(&mut self, bound: u32) -> u32 {
        match self.draws.pop_front() {
            Some(draw) => draw.min(bound - 1),
            None if self.exhausted_low => 0,
            None => bound - 1,
        }
    }
}
