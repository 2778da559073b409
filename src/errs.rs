// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkipListError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("node level {level} is outside of 1..={max}")]
    InvalidLevel { level: usize, max: usize },
    #[error("maximum level {0} is outside of the supported range")]
    InvalidMaxLevel(usize),
    #[error("level probability {0} must be in (0, 1)")]
    InvalidProbability(f64),
    #[error("level generator produces {generator} levels but the list allows {max_level}")]
    GeneratorMismatch { generator: usize, max_level: usize },
    #[error("rank {rank} is outside of 1..={len}")]
    RankOutOfRange { rank: usize, len: usize },
    #[error("skip list is corrupted: {0}")]
    Corrupted(String),
}
