//! Injectable randomness
//!
//! Every random decision in the simulation (robot speed and direction,
//! fruit type, orb jitter, fire rolls, spawn columns) goes through
//! [`Randomness`], so a run is fully determined by its source.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Source of random draws used by the simulation
pub trait Randomness {
    /// Uniform integer in `low..=high`
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize;
}

/// Pick one element uniformly
pub fn choose<T: Copy>(rng: &mut dyn Randomness, items: &[T]) -> T {
    items[rng.index(items.len())]
}

/// Fisher-Yates shuffle in place
pub fn shuffle<T>(rng: &mut dyn Randomness, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Seeded PCG source
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw a seed for a child source
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl Randomness for SimRng {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        self.inner.random_range(low..=high)
    }

    fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }
}

/// Test double that replays queued draws.
///
/// Once a queue runs dry it falls back to the low end of every range
/// and to `0.99` for unit draws (so probability rolls fail by default).
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedRng {
    pub ints: std::collections::VecDeque<i32>,
    pub units: std::collections::VecDeque<f64>,
    pub indices: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: &[f64]) -> Self {
        self.units.extend(units.iter().copied());
        self
    }

    pub fn with_ints(mut self, ints: &[i32]) -> Self {
        self.ints.extend(ints.iter().copied());
        self
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }
}

#[cfg(test)]
impl Randomness for ScriptedRng {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        self.ints.pop_front().unwrap_or(low).clamp(low, high)
    }

    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.99)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len - 1)
    }
}
