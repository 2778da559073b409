use crate::errs::{
    Result,
    SkipListError,
};

/// A stable handle to a node living in an [`crate::skiplist::arena::Arena`].
/// The head of every list is always [`NodeId::HEAD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const HEAD: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Nodes make up the skip list. Every node is owned by the list's arena and
/// refers to its neighbours by [`NodeId`], so nodes never own one another.
///
/// A node reaches `level_count` levels and carries one forward link and one
/// width per level. Levels are 1-indexed: level 1 is the base lane holding
/// every key. The width of a link is the number of base-level hops it
/// spans; for a link with no successor it is the number of nodes after this
/// one.
///
/// The key is `None` only for the sentinel head.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    key: Option<K>,
    forward: Vec<Option<NodeId>>,
    width: Vec<usize>,
}

impl<K> Node<K> {
    /// Create a node reaching `level_count` levels with all links empty and
    /// all widths zero.
    pub(crate) fn new(level_count: usize, key: Option<K>, max_level: usize) -> Result<Self> {
        if level_count < 1 || level_count > max_level {
            return Err(SkipListError::InvalidLevel {
                level: level_count,
                max: max_level,
            });
        }
        Ok(Node {
            key,
            forward: vec![None; level_count],
            width: vec![0; level_count],
        })
    }

    /// Create the sentinel head, which spans every level.
    pub(crate) fn head(max_level: usize) -> Self {
        Node {
            key: None,
            forward: vec![None; max_level],
            width: vec![0; max_level],
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub(crate) fn into_key(self) -> Option<K> {
        self.key
    }

    #[inline]
    pub(crate) fn level_count(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn is_head(&self) -> bool {
        self.key.is_none()
    }

    /// # Panics
    ///
    /// Panics when `level` is not in `1..=level_count`.
    #[inline]
    pub(crate) fn forward(&self, level: usize) -> Option<NodeId> {
        self.forward[self.slot(level)]
    }

    #[inline]
    pub(crate) fn set_forward(&mut self, level: usize, target: Option<NodeId>) {
        let slot = self.slot(level);
        self.forward[slot] = target;
    }

    #[inline]
    pub(crate) fn width(&self, level: usize) -> usize {
        self.width[self.slot(level)]
    }

    #[inline]
    pub(crate) fn set_width(&mut self, level: usize, width: usize) {
        let slot = self.slot(level);
        self.width[slot] = width;
    }

    #[inline]
    fn slot(&self, level: usize) -> usize {
        assert!(
            level >= 1 && level <= self.level_count(),
            "level {} is outside of 1..={}",
            level,
            self.level_count()
        );
        level - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = Node::new(3, Some(10), 32).unwrap();
        assert_eq!(node.level_count(), 3);
        assert_eq!(node.key(), Some(&10));
        assert!(!node.is_head());
        for level in 1..=3 {
            assert_eq!(node.forward(level), None);
            assert_eq!(node.width(level), 0);
        }
    }

    #[test]
    fn test_invalid_levels() {
        assert_eq!(
            Node::new(0, Some(1), 32).unwrap_err(),
            SkipListError::InvalidLevel { level: 0, max: 32 }
        );
        assert_eq!(
            Node::new(33, Some(1), 32).unwrap_err(),
            SkipListError::InvalidLevel { level: 33, max: 32 }
        );
        assert!(Node::new(32, Some(1), 32).is_ok());
    }

    #[test]
    fn test_head() {
        let head: Node<u32> = Node::head(16);
        assert!(head.is_head());
        assert_eq!(head.level_count(), 16);
        assert_eq!(head.key(), None);
    }

    #[test]
    fn test_links_and_widths() {
        let mut node = Node::new(2, Some("a"), 4).unwrap();
        node.set_forward(1, Some(NodeId::new(7)));
        node.set_width(1, 1);
        node.set_forward(2, Some(NodeId::new(9)));
        node.set_width(2, 3);

        assert_eq!(node.forward(1), Some(NodeId::new(7)));
        assert_eq!(node.forward(2), Some(NodeId::new(9)));
        assert_eq!(node.width(1), 1);
        assert_eq!(node.width(2), 3);
        assert_eq!(node.into_key(), Some("a"));
    }

    #[test]
    #[should_panic]
    fn test_level_zero_panics() {
        let node = Node::new(2, Some(1), 4).unwrap();
        node.forward(0);
    }

    #[test]
    #[should_panic]
    fn test_level_above_count_panics() {
        let mut node = Node::new(2, Some(1), 4).unwrap();
        node.set_width(3, 1);
    }
}
