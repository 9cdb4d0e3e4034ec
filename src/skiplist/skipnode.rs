// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::fmt;

/// Index of a node within the list's arena.
pub(crate) type NodeId = usize;

/// Where a link starts from. The header is not stored in the arena, so the
/// predecessor of a node at some level is either the header or another node.
pub(crate) type Anchor = Option<NodeId>;

/// One rung of a node: the next node on this level and how many level-0 hops
/// it takes to get there.
///
/// When `forward` is `None` the span counts the nodes remaining after this
/// one, so the header's span on an empty level is the list length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SkipLevel {
    pub(crate) forward: Option<NodeId>,
    pub(crate) span: usize,
}

/// SkipNodes make up the SkipList. The list owns every node through its arena
/// and nodes refer to one another only by index.
///
/// `levels` has exactly one entry per level the node participates in, so its
/// length is the height drawn when the node was inserted and never changes.
/// `backward` is the immediately previous node on level 0, or `None` for the
/// first element.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<T> {
    pub(crate) payload: T,
    pub(crate) backward: Option<NodeId>,
    pub(crate) levels: Vec<SkipLevel>,
}

impl<T> SkipNode<T> {
    pub(crate) fn new(payload: T, backward: Option<NodeId>, levels: Vec<SkipLevel>) -> Self {
        debug_assert!(!levels.is_empty(), "a node must occupy level 0");
        SkipNode {
            payload,
            backward,
            levels,
        }
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<NodeId> {
        self.levels[0].forward
    }
}

/// The node storage. Vacated slots are recycled so indices held by live nodes
/// stay stable for as long as those nodes exist.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<SkipNode<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: SkipNode<T>) -> NodeId {
        match self.free.pop() {
            | Some(id) => {
                self.slots[id] = Some(node);
                id
            },
            | None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> SkipNode<T> {
        match self.slots[id].take() {
            | Some(node) => {
                self.free.push(id);
                node
            },
            | None => unreachable!("released vacant slot {id}"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &SkipNode<T> {
        match &self.slots[id] {
            | Some(node) => node,
            | None => unreachable!("link to vacant slot {id}"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut SkipNode<T> {
        match &mut self.slots[id] {
            | Some(node) => node,
            | None => unreachable!("link to vacant slot {id}"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

/// A borrowed view of an element stored in a [`SkipList`](crate::SkipList).
///
/// Handles are cheap to copy and let callers walk the list in either
/// direction from any element they have found.
pub struct Node<'a, T> {
    arena: &'a Arena<T>,
    id: NodeId,
}

impl<'a, T> Node<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, id: NodeId) -> Self {
        Node { arena, id }
    }

    #[inline]
    fn inner(&self) -> &'a SkipNode<T> {
        self.arena.get(self.id)
    }

    /// The stored element.
    pub fn payload(&self) -> &'a T {
        &self.inner().payload
    }

    /// How many levels this node participates in.
    pub fn height(&self) -> usize {
        self.inner().height()
    }

    /// Number of level-0 hops from this node to its successor at `level`, or
    /// `None` if the node does not reach that level.
    pub fn span(&self, level: usize) -> Option<usize> {
        self.inner().levels.get(level).map(|l| l.span)
    }

    /// The next element in ascending order.
    pub fn next(&self) -> Option<Node<'a, T>> {
        self.inner().next().map(|id| Node::new(self.arena, id))
    }

    /// The previous element in ascending order.
    pub fn prev(&self) -> Option<Node<'a, T>> {
        self.inner().backward.map(|id| Node::new(self.arena, id))
    }
}

impl<T> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Node<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("payload", self.payload())
            .field("height", &self.height())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Arena,
        Node,
        SkipLevel,
        SkipNode,
    };

    fn leaf(payload: u32) -> SkipNode<u32> {
        SkipNode::new(payload, None, vec![SkipLevel::default()])
    }

    #[test]
    fn test_arena_recycles_slots() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf(1));
        let b = arena.alloc(leaf(2));
        assert_ne!(a, b);
        assert_eq!(arena.live(), 2);

        let node = arena.release(a);
        assert_eq!(node.payload, 1);
        assert_eq!(arena.live(), 1);

        let c = arena.alloc(leaf(3));
        assert_eq!(c, a, "vacated slot must be reused");
        assert_eq!(arena.get(c).payload, 3);
        assert_eq!(arena.get(b).payload, 2);
    }

    #[test]
    fn test_node_navigation() {
        let mut arena = Arena::new();
        let first = arena.alloc(leaf(10));
        let second = arena.alloc(SkipNode::new(
            20,
            Some(first),
            vec![SkipLevel::default(), SkipLevel::default()],
        ));
        arena.get_mut(first).levels[0] = SkipLevel {
            forward: Some(second),
            span: 1,
        };

        let head = Node::new(&arena, first);
        assert_eq!(*head.payload(), 10);
        assert!(head.prev().is_none());
        assert_eq!(head.span(0), Some(1));
        assert_eq!(head.span(1), None);

        let next = head.next().unwrap();
        assert_eq!(*next.payload(), 20);
        assert_eq!(next.height(), 2);
        assert_eq!(*next.prev().unwrap().payload(), 10);
        assert!(next.next().is_none());
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        arena.alloc(leaf(1));
        arena.alloc(leaf(2));
        arena.clear();
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.alloc(leaf(3)), 0);
    }
}
