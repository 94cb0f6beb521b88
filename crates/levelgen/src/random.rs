//! Sequential random stream consumed by every generation stage.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// A single seeded stream. Stages draw from it in a fixed order, so the same
/// seed and configuration always reproduce the same level.
pub trait RandomSource {
    fn next_bits(&mut self) -> u32;

    /// Uniform integer in `min..max`. An empty range yields `min`.
    fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = max.abs_diff(min);
        min + (self.next_bits() % span) as i32
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick an index from an empty collection");
        (self.next_bits() as usize) % len
    }

    /// Uniform float in `[0, 1)` built from the top 24 bits.
    fn next_f32(&mut self) -> f32 {
        (self.next_bits() >> 8) as f32 / 16_777_216.0
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_bits(&mut self) -> u32 {
        self.next_u32()
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: Vec<u32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_bits(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
