// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    collections::HashMap,
    fmt,
    iter::FusedIterator,
};

use rand::{
    rngs::SmallRng,
    SeedableRng,
};
use tracing::{
    debug,
    instrument,
};

use crate::{
    config::{
        Config,
        DEFAULT_MAX_LEVEL,
        HARD_MAX_LEVEL,
    },
    errs::{
        Result,
        SkipListError,
    },
    skiplist::{
        arena::Arena,
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        node::{
            Node,
            NodeId,
        },
    },
};

/// An ordered set backed by a skip list, with rank and select queries.
///
/// Every node lives in an arena owned by the list, the head being slot 0.
/// Each forward link carries its width, the number of base-level hops it
/// covers, which lets [`SkipList::select`] and [`SkipList::rank`] run in
/// expected `O(log n)` next to search, insert and delete.
///
/// Keys are unique. Inserting a key that is already stored leaves the list
/// untouched.
///
/// The list does no internal synchronization; wrap it in a lock to share it.
pub struct SkipList<K, G = GeometricalLevelGenerator<SmallRng>> {
    pub(crate) arena: Arena<K>,
    generator: G,
    /// The tallest level any node can reach, which is also the head's height.
    capacity_level: usize,
    /// The highest level holding at least one node, 1 when empty.
    pub(crate) max_level: usize,
    len: usize,
}

/// For every level, the rightmost node whose key is strictly less than the
/// target, along with that node's rank (the head has rank 0).
#[derive(Debug)]
pub(crate) struct SearchTrail {
    nodes: Vec<NodeId>,
    ranks: Vec<usize>,
}

impl SearchTrail {
    fn new(levels: usize) -> Self {
        SearchTrail {
            nodes: vec![NodeId::HEAD; levels],
            ranks: vec![0; levels],
        }
    }

    #[inline]
    fn record(&mut self, level: usize, node: NodeId, rank: usize) {
        self.nodes[level - 1] = node;
        self.ranks[level - 1] = rank;
    }

    #[inline]
    pub(crate) fn node(&self, level: usize) -> NodeId {
        self.nodes[level - 1]
    }

    #[inline]
    pub(crate) fn rank(&self, level: usize) -> usize {
        self.ranks[level - 1]
    }
}

impl<K: Ord> SkipList<K> {
    /// Creates an empty list with [`DEFAULT_MAX_LEVEL`] levels and a level
    /// generator seeded from system entropy.
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_MAX_LEVEL, GeometricalLevelGenerator::default())
    }

    /// Creates an empty list from a validated [`Config`].
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let generator = match config.seed() {
            | Some(seed) => {
                GeometricalLevelGenerator::seeded(config.max_level(), config.probability(), seed)?
            },
            | None => GeometricalLevelGenerator::with_rng(
                config.max_level(),
                config.probability(),
                SmallRng::from_entropy(),
            )?,
        };
        Ok(Self::from_parts(config.max_level(), generator))
    }
}

impl<K, G> SkipList<K, G>
where
    K: Ord,
    G: LevelGenerator,
{
    /// Creates an empty list that draws node levels from `generator`.
    ///
    /// `max_level` bounds the tallest node; the generator can't produce more
    /// levels than that.
    pub fn with_generator(max_level: usize, generator: G) -> Result<Self> {
        if max_level == 0 || max_level > HARD_MAX_LEVEL {
            return Err(SkipListError::InvalidMaxLevel(max_level));
        }
        if generator.total() > max_level {
            return Err(SkipListError::GeneratorMismatch {
                generator: generator.total(),
                max_level,
            });
        }
        Ok(Self::from_parts(max_level, generator))
    }

    fn from_parts(max_level: usize, generator: G) -> Self {
        SkipList {
            arena: Arena::new(Node::head(max_level)),
            generator,
            capacity_level: max_level,
            max_level: 1,
            len: 0,
        }
    }

    /// The number of keys in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The highest level currently holding a node.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// The tallest level a node of this list can reach.
    #[inline]
    pub fn capacity_level(&self) -> usize {
        self.capacity_level
    }

    fn random_level(&mut self) -> usize {
        self.generator.next_level()
    }

    /// Walks from the top level down, stopping on each level at the last node
    /// whose key is strictly less than `key`. Levels above the current
    /// `max_level` point at the head.
    pub(crate) fn build_search_trail(&self, key: &K) -> SearchTrail {
        let mut trail = SearchTrail::new(self.capacity_level);
        let mut current = NodeId::HEAD;
        let mut rank = 0;

        for level in (1..=self.max_level).rev() {
            while let Some(next) = self.arena[current].forward(level) {
                match self.arena[next].key() {
                    | Some(next_key) if next_key < key => {
                        rank += self.arena[current].width(level);
                        current = next;
                    },
                    | _ => break,
                }
            }
            trail.record(level, current, rank);
        }

        trail
    }

    /// The node right after the trail's base entry, if it holds `key`.
    fn candidate(&self, trail: &SearchTrail, key: &K) -> Option<NodeId> {
        let id = self.arena[trail.node(1)].forward(1)?;
        match self.arena[id].key() {
            | Some(found) if found == key => Some(id),
            | _ => None,
        }
    }

    /// Returns the stored key equal to `key`, if any.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn search(&self, key: &K) -> Option<&K> {
        let trail = self.build_search_trail(key);
        self.candidate(&trail, key)
            .and_then(|id| self.arena[id].key())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `key`, returning `Ok(false)` when it was already present.
    ///
    /// Fails with [`SkipListError::InvalidLevel`] only when the level
    /// generator hands out a level outside of `1..=capacity_level`; the list
    /// is left unchanged in that case.
    #[instrument(level = "trace", skip_all, fields(len = self.len, max_level = self.max_level))]
    pub fn insert(&mut self, key: K) -> Result<bool> {
        let trail = self.build_search_trail(&key);
        if self.candidate(&trail, &key).is_some() {
            return Ok(false);
        }

        let level = self.random_level();
        let node = Node::new(level, Some(key), self.capacity_level)?;
        let id = self.arena.insert(node);

        if level > self.max_level {
            // empty lanes of the head span every existing node
            for lane in self.max_level + 1..=level {
                self.arena[NodeId::HEAD].set_width(lane, self.len);
            }
            debug!(from = self.max_level, to = level, "raising skip list level");
            self.max_level = level;
        }

        let rank = trail.rank(1) + 1;
        for lane in 1..=level {
            let prev = trail.node(lane);
            let prev_rank = trail.rank(lane);
            let next = self.arena[prev].forward(lane);
            let span = self.arena[prev].width(lane);

            // split the old hop in two around the new node
            let node = &mut self.arena[id];
            node.set_forward(lane, next);
            node.set_width(lane, prev_rank + span + 1 - rank);

            let prev = &mut self.arena[prev];
            prev.set_forward(lane, Some(id));
            prev.set_width(lane, rank - prev_rank);
        }

        for lane in level + 1..=self.max_level {
            let prev = &mut self.arena[trail.node(lane)];
            prev.set_width(lane, prev.width(lane) + 1);
        }

        self.len += 1;
        Ok(true)
    }

    /// Removes `key`, returning the stored key when it was present.
    #[instrument(level = "trace", skip_all, fields(len = self.len, max_level = self.max_level))]
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let trail = self.build_search_trail(key);
        let id = self.candidate(&trail, key)?;
        let height = self.arena[id].level_count();

        for lane in 1..=self.max_level {
            let prev = trail.node(lane);
            if lane <= height {
                debug_assert_eq!(self.arena[prev].forward(lane), Some(id));
                let next = self.arena[id].forward(lane);
                let span = self.arena[id].width(lane);

                let prev = &mut self.arena[prev];
                prev.set_forward(lane, next);
                prev.set_width(lane, prev.width(lane) + span - 1);
            } else {
                let prev = &mut self.arena[prev];
                prev.set_width(lane, prev.width(lane) - 1);
            }
        }

        let before = self.max_level;
        while self.max_level > 1 && self.arena[NodeId::HEAD].forward(self.max_level).is_none() {
            self.max_level -= 1;
        }
        if self.max_level != before {
            debug!(from = before, to = self.max_level, "lowering skip list level");
        }

        self.len -= 1;
        self.arena.remove(id).and_then(Node::into_key)
    }

    /// Returns the key of 1-based `rank` in ascending order.
    #[instrument(level = "trace", skip(self), fields(len = self.len))]
    pub fn select(&self, rank: usize) -> Result<&K> {
        if rank < 1 || rank > self.len {
            return Err(SkipListError::RankOutOfRange {
                rank,
                len: self.len,
            });
        }

        let mut current = NodeId::HEAD;
        let mut remaining = rank;
        for level in (1..=self.max_level).rev() {
            while let Some(next) = self.arena[current].forward(level) {
                let width = self.arena[current].width(level);
                if width > remaining {
                    break;
                }
                remaining -= width;
                current = next;
            }
            if remaining == 0 {
                break;
            }
        }

        match self.arena[current].key() {
            | Some(key) if remaining == 0 => Ok(key),
            | _ => Err(SkipListError::Corrupted(format!(
                "rank walk for {} stopped {} short",
                rank, remaining
            ))),
        }
    }

    /// The 1-based rank of `key`, if it's stored.
    pub fn rank(&self, key: &K) -> Option<usize> {
        let trail = self.build_search_trail(key);
        self.candidate(&trail, key).map(|_| trail.rank(1) + 1)
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        let id = self.arena[NodeId::HEAD].forward(1)?;
        self.arena[id].key()
    }

    /// The largest key, found by running along the top lanes.
    pub fn last(&self) -> Option<&K> {
        let mut current = NodeId::HEAD;
        for level in (1..=self.max_level).rev() {
            while let Some(next) = self.arena[current].forward(level) {
                current = next;
            }
        }
        self.arena[current].key()
    }

    /// Drops every key. The configuration and the level generator are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.arena[NodeId::HEAD] = Node::head(self.capacity_level);
        self.max_level = 1;
        self.len = 0;
        debug!("cleared skip list");
    }
}

impl<K, G> SkipList<K, G> {
    /// Iterates the keys in ascending order along the base level.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            next: self.arena[NodeId::HEAD].forward(1),
            remaining: self.len,
        }
    }
}

impl<K, G> SkipList<K, G>
where
    K: Ord,
{
    /// Walks every lane and checks ordering, tower shape, widths and counts.
    ///
    /// This is `O(n * max_level)` and meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<()> {
        let corrupted = |msg: String| Err(SkipListError::Corrupted(msg));

        if self.max_level < 1 || self.max_level > self.capacity_level {
            return corrupted(format!(
                "max level {} is outside of 1..={}",
                self.max_level, self.capacity_level
            ));
        }
        if !self.arena[NodeId::HEAD].is_head() {
            return corrupted("head holds a key".to_string());
        }
        if self.arena.occupied() != self.len + 1 {
            return corrupted(format!(
                "arena holds {} nodes for {} keys",
                self.arena.occupied() - 1,
                self.len
            ));
        }

        // base lane: ordering and ranks
        let mut ranks = HashMap::with_capacity(self.len);
        ranks.insert(NodeId::HEAD, 0);
        let mut prev: Option<&K> = None;
        let mut cursor = self.arena[NodeId::HEAD].forward(1);
        while let Some(id) = cursor {
            let node = &self.arena[id];
            let key = match node.key() {
                | Some(key) => key,
                | None => return corrupted(format!("node {} has no key", id.index())),
            };
            if prev.is_some_and(|prev| prev >= key) {
                return corrupted(format!("keys out of order at rank {}", ranks.len()));
            }
            if node.level_count() > self.max_level {
                return corrupted(format!(
                    "node at rank {} reaches level {} above max level {}",
                    ranks.len(),
                    node.level_count(),
                    self.max_level
                ));
            }
            ranks.insert(id, ranks.len());
            prev = Some(key);
            cursor = node.forward(1);
        }
        if ranks.len() != self.len + 1 {
            return corrupted(format!(
                "base lane holds {} keys, expected {}",
                ranks.len() - 1,
                self.len
            ));
        }

        // every lane: membership and widths
        for level in 1..=self.max_level {
            let mut current = NodeId::HEAD;
            let mut rank = 0;
            loop {
                let node = &self.arena[current];
                match node.forward(level) {
                    | Some(next) => {
                        let next_rank = match ranks.get(&next) {
                            | Some(next_rank) => *next_rank,
                            | None => {
                                return corrupted(format!(
                                    "level {} links to a node missing from the base lane",
                                    level
                                ))
                            },
                        };
                        if next_rank <= rank {
                            return corrupted(format!("level {} goes backwards", level));
                        }
                        if node.width(level) != next_rank - rank {
                            return corrupted(format!(
                                "level {} width {} from rank {} should be {}",
                                level,
                                node.width(level),
                                rank,
                                next_rank - rank
                            ));
                        }
                        // nodes skipped over must not reach this level
                        let mut skipped = self.arena[current].forward(1);
                        while let Some(id) = skipped {
                            if id == next {
                                break;
                            }
                            if self.arena[id].level_count() >= level {
                                return corrupted(format!(
                                    "level {} skips over a node that reaches it",
                                    level
                                ));
                            }
                            skipped = self.arena[id].forward(1);
                        }
                        current = next;
                        rank = next_rank;
                    },
                    | None => {
                        if node.width(level) != self.len - rank {
                            return corrupted(format!(
                                "level {} tail width {} should be {}",
                                level,
                                node.width(level),
                                self.len - rank
                            ));
                        }
                        // the tail of a lane is the last node reaching it
                        let mut rest = node.forward(1);
                        while let Some(id) = rest {
                            if self.arena[id].level_count() >= level {
                                return corrupted(format!(
                                    "level {} ends before a node that reaches it",
                                    level
                                ));
                            }
                            rest = self.arena[id].forward(1);
                        }
                        break;
                    },
                }
            }
        }

        if self.max_level > 1 && self.arena[NodeId::HEAD].forward(self.max_level).is_none() {
            return corrupted(format!("top level {} is empty", self.max_level));
        }

        Ok(())
    }
}

impl<K: Ord> Default for SkipList<K> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<K: fmt::Debug, G> fmt::Debug for SkipList<K, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K, G> IntoIterator for &'a SkipList<K, G> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the keys of a [`SkipList`].
#[derive(Clone)]
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.next?];
        self.next = node.forward(1);
        self.remaining = self.remaining.saturating_sub(1);
        node.key()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
