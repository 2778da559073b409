use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};

use crate::{
    config::{
        DEFAULT_MAX_LEVEL,
        DEFAULT_PROBABILITY,
        HARD_MAX_LEVEL,
    },
    errs::{
        Result,
        SkipListError,
    },
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate a level for a new node in the range `[1, total]`.
    ///
    /// A level outside of that range is rejected by the list when the node is
    /// created.
    fn next_level(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// The probability of generating level `n` is `p` times the probability of
/// generating level `n-1`, with the probability truncated at the maximum number
/// of levels allowed.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator<R = SmallRng> {
    total: usize,
    p: f64,
    rng: R,
}

impl GeometricalLevelGenerator<SmallRng> {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level. The generator is seeded from system entropy.
    pub fn new(total: usize, p: f64) -> Result<Self> {
        Self::with_rng(total, p, SmallRng::from_entropy())
    }

    /// Same as [`GeometricalLevelGenerator::new`] with a fixed seed, so the
    /// produced levels are reproducible.
    pub fn seeded(total: usize, p: f64, seed: u64) -> Result<Self> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GeometricalLevelGenerator<R> {
    /// Builds a generator on top of a caller provided source of randomness.
    ///
    /// `p` must be in `(0, 1)` and `total` must be in `1..=HARD_MAX_LEVEL`.
    pub fn with_rng(total: usize, p: f64, rng: R) -> Result<Self> {
        if total == 0 || total > HARD_MAX_LEVEL {
            return Err(SkipListError::InvalidMaxLevel(total));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(SkipListError::InvalidProbability(p));
        }
        Ok(GeometricalLevelGenerator { total, p, rng })
    }
}

impl Default for GeometricalLevelGenerator<SmallRng> {
    /// [`DEFAULT_MAX_LEVEL`] levels at [`DEFAULT_PROBABILITY`], seeded from
    /// system entropy.
    fn default() -> Self {
        GeometricalLevelGenerator {
            total: DEFAULT_MAX_LEVEL,
            p: DEFAULT_PROBABILITY,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl<R: Rng> LevelGenerator for GeometricalLevelGenerator<R> {
    fn next_level(&mut self) -> usize {
        let mut h = 1;
        let mut x = self.p;
        let f = 1.0 - self.rng.gen::<f64>();
        while x > f && h < self.total {
            h += 1;
            x *= self.p
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}

/// Replays a fixed sequence of levels, wrapping around when it runs out.
/// Useful when a test or a benchmark needs an exact tower layout.
#[derive(Debug, Clone)]
pub struct ScriptedLevelGenerator {
    total: usize,
    levels: Vec<usize>,
    cursor: usize,
}

impl ScriptedLevelGenerator {
    pub fn new(total: usize, levels: impl IntoIterator<Item = usize>) -> Self {
        ScriptedLevelGenerator {
            total,
            levels: levels.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl LevelGenerator for ScriptedLevelGenerator {
    fn next_level(&mut self) -> usize {
        if self.levels.is_empty() {
            return 1;
        }
        let level = self.levels[self.cursor % self.levels.len()];
        self.cursor += 1;
        level
    }

    fn total(&self) -> usize {
        self.total
    }
}
