use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of randomness for the generators.
pub trait RandomSource: Send {
    /// Uniform integer in `min..=max`.
    fn next_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;
}

/// Picks one element uniformly. `items` must be non-empty.
pub(crate) fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    let idx = rng.next_int(0, items.len() as i64 - 1);
    &items[idx.clamp(0, items.len() as i64 - 1) as usize]
}

/// Process thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn next_float(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible generator for a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }

    fn next_float(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays fixed values in order. Integers are clamped into the requested
/// range; an exhausted queue yields `min` (or `0.0` for floats).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<i64>,
    floats: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = i64>, floats: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: floats.into_iter().collect(),
        }
    }

    pub fn ints(ints: impl IntoIterator<Item = i64>) -> Self {
        Self::new(ints, [])
    }

    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.floats.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        self.ints
            .pop_front()
            .map(|v| v.clamp(min, max.max(min)))
            .unwrap_or(min)
    }

    fn next_float(&mut self) -> f64 {
        self.floats
            .pop_front()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .unwrap_or(0.0)
    }
}
