// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::{
    Result,
    SkipListError,
};

/// The tallest node a list builds by default. 32 levels comfortably covers
/// 2^32 keys at `p = 0.5`.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// The chance that a node is promoted to the next level.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Upper bound for a configured maximum level.
pub const HARD_MAX_LEVEL: usize = 64;

/// Construction-time settings for a [`crate::skiplist::SkipList`]. These can't
/// be changed once the list exists.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// The tallest level a node can reach, including the head.
    max_level: usize,
    /// The promotion probability used by the default level generator.
    probability: f64,
    /// Seed for the default level generator. `None` seeds from entropy.
    seed: Option<u64>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks that the settings describe a buildable list.
    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level > HARD_MAX_LEVEL {
            return Err(SkipListError::InvalidMaxLevel(self.max_level));
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(SkipListError::InvalidProbability(self.probability));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn max_level(&mut self, max_level: usize) -> &mut Self {
        self.config.max_level = max_level;
        self
    }

    pub fn probability(&mut self, probability: f64) -> &mut Self {
        self.config.probability = probability;
        self
    }

    /// Makes level assignment reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(&self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder::new()
    }
}
