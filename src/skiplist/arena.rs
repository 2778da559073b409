use std::ops::{
    Index,
    IndexMut,
};

use crate::skiplist::node::{
    Node,
    NodeId,
};

/// Slab-like storage for the nodes of a single list. Slot 0 always holds the
/// head. Released slots are reused by later inserts, so a [`NodeId`] stays
/// valid until its node is removed.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<NodeId>,
}

impl<K> Arena<K> {
    pub(crate) fn new(head: Node<K>) -> Self {
        Arena {
            slots: vec![Some(head)],
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its handle.
    pub(crate) fn insert(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            | Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            },
            | None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            },
        }
    }

    /// Takes a node out of the arena. The head can't be removed.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<K>> {
        if id == NodeId::HEAD {
            return None;
        }
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id);
        Some(node)
    }

    /// Drops every node except the head.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.free.clear();
    }

    /// Count of occupied slots, the head included.
    pub(crate) fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    /// # Panics
    ///
    /// Panics when `id` doesn't refer to a live node.
    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots[id.index()] {
            | Some(ref node) => node,
            | None => panic!("node {} has been released", id.index()),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots[id.index()] {
            | Some(ref mut node) => node,
            | None => panic!("node {} has been released", id.index()),
        }
    }
}
