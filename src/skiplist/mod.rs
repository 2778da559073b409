//! An arena-backed skip list which answers order-statistic queries next to
//! the usual search, insert and delete.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 1) contains all the nodes, and each
//! level `n > 1` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`).
//!
//! Every link also records how many base-level positions it jumps over. Summing
//! those widths along a search path yields the rank of a key, which is what
//! makes [`SkipList::select`] and [`SkipList::rank`] logarithmic.
//!
//! It is very unlikely that the level generator will need to be changed as the
//! default should suffice, but if need be custom level generators can be
//! implemented.

mod arena;
mod level_generator;
mod node;
mod render;
#[allow(clippy::module_inception)]
mod skiplist;
mod test;

pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
    ScriptedLevelGenerator,
};
pub use render::NODE_WIDTH;
pub use skiplist::{
    Iter,
    SkipList,
};
