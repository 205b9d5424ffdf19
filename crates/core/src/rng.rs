//! Inclusive uniform integer draws behind a single seam, so generation and
//! combat can be replayed from a seed or scripted exactly in tests.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of uniform integers over `[min, max]`, both ends inclusive.
pub trait RangeRng {
    fn range(&mut self, min: i32, max: i32) -> i32;
}

/// Seedable production RNG. Two instances built from the same seed yield the
/// same draw sequence, which is what makes whole runs reproducible.
#[derive(Clone, Debug)]
pub struct GameRng {
    rng: ChaCha8Rng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RangeRng for GameRng {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "inverted range [{min}, {max}]");
        let span = (max as i64 - min as i64 + 1) as u64;
        min + (self.rng.next_u64() % span) as i32
    }
}

/// Replays a pre-recorded draw sequence. Test support: lets reducer and
/// placement tests pin the exact value of each draw.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    draws: VecDeque<i32>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        Self { draws: draws.into_iter().collect() }
    }

    pub fn push(&mut self, draw: i32) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RangeRng for ScriptedRng {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        let Some(value) = self.draws.pop_front() else {
            panic!("scripted rng exhausted for range [{min}, {max}]");
        };
        assert!(
            (min..=max).contains(&value),
            "scripted draw {value} outside requested range [{min}, {max}]"
        );
        value
    }
}
