// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt,
};

use tracing::{
    debug,
    instrument,
    trace,
    warn,
};

use crate::{
    compare::{
        Comparator,
        Natural,
    },
    config::{
        Config,
        MAX_LEVEL_LIMIT,
    },
    errs::SkipListError,
    skiplist::{
        iter::{
            IntoIter,
            Iter,
        },
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        skipnode::{
            Anchor,
            Arena,
            Node,
            NodeId,
            SkipLevel,
            SkipNode,
        },
    },
};

/// Predecessors and ranks gathered on the way down to a target.
struct Descent {
    /// `update[i]` is the last anchor on level `i` that sorts before the
    /// target.
    update: Vec<Anchor>,
    /// `rank[i]` is the 1-based position of `update[i]` (0 for the header).
    rank: Vec<usize>,
    /// The level-0 successor of `update[0]`, if it compares equal to the
    /// target.
    found: Option<NodeId>,
}

/// An ordered set with no duplicates, kept sorted by a caller-supplied
/// [`Comparator`].
///
/// Insertion, removal, lookup and rank queries all run in `O(log n)` expected
/// time. Each level link records how many elements it jumps over, which is
/// what lets [`SkipList::rank`] and [`SkipList::get_by_rank`] stay
/// logarithmic.
///
/// ```rust
/// use zskiplist::SkipList;
///
/// let mut list = SkipList::with_comparator(|a: &&str, b: &&str| a.cmp(b));
/// for name in ["xargin", "a", "name", "b"] {
///     assert!(list.insert(name).is_some());
/// }
/// assert!(list.insert("a").is_none());
///
/// assert_eq!(list.rank(&"name"), Some(3));
/// assert_eq!(list.pop_head(), Some("a"));
/// assert_eq!(list.pop_tail(), Some("xargin"));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Clone)]
pub struct SkipList<T, C = Natural, G = GeometricalLevelGenerator> {
    /// The header's links. Always `max_level` long, only the first `level`
    /// entries are meaningful.
    head: Vec<SkipLevel>,
    nodes: Arena<T>,
    tail: Option<NodeId>,
    /// Number of active levels, in `[1, max_level]`.
    level: usize,
    len: usize,
    compare: C,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Constructors
// ///////////////////////////////////////////////

impl<T: Ord> SkipList<T> {
    /// Create an empty list ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        SkipList::with_comparator(Natural)
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<T, C> SkipList<T, C>
where
    C: Comparator<T>,
{
    /// Create an empty list ordered by `compare`, with the default shape.
    pub fn with_comparator(compare: C) -> Self {
        SkipList::with_config(compare, &Config::default())
    }

    /// Create an empty list ordered by `compare`, shaped by `config`.
    pub fn with_config(compare: C, config: &Config) -> Self {
        SkipList::with_level_generator(compare, GeometricalLevelGenerator::from_config(config))
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Create an empty list ordered by `compare` whose node heights are drawn
    /// from `level_generator`. The header is as tall as the generator's
    /// `total()`, capped at [`MAX_LEVEL_LIMIT`].
    pub fn with_level_generator(compare: C, level_generator: G) -> Self {
        let max_level = level_generator.total().clamp(1, MAX_LEVEL_LIMIT);
        debug!(max_level, "creating skiplist");
        SkipList {
            head: vec![SkipLevel::default(); max_level],
            nodes: Arena::new(),
            tail: None,
            level: 1,
            len: 0,
            compare,
            level_generator,
        }
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T, C, G> SkipList<T, C, G> {
    /// Number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The tallest a node in this list can be.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// The smallest element.
    pub fn first(&self) -> Option<Node<'_, T>> {
        self.head[0].forward.map(|id| Node::new(&self.nodes, id))
    }

    /// The largest element.
    pub fn last(&self) -> Option<Node<'_, T>> {
        self.tail.map(|id| Node::new(&self.nodes, id))
    }

    /// The element at the 1-based position `rank`, if there is one.
    pub fn get_by_rank(&self, rank: usize) -> Option<Node<'_, T>> {
        if rank == 0 || rank > self.len {
            return None;
        }

        let mut x: Anchor = None;
        let mut traversed = 0;
        for i in (0..self.level).rev() {
            loop {
                let link = self.links(x)[i];
                match link.forward {
                    | Some(next) if traversed + link.span <= rank => {
                        traversed += link.span;
                        x = Some(next);
                    },
                    | _ => break,
                }
            }
            if traversed == rank {
                return x.map(|id| Node::new(&self.nodes, id));
            }
        }
        None
    }

    /// Ascending iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head[0].forward, self.tail, self.len)
    }

    /// Remove every element. The list keeps its comparator, level generator
    /// and maximum height.
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing skiplist");
        self.nodes.clear();
        self.head.fill(SkipLevel::default());
        self.tail = None;
        self.level = 1;
        self.len = 0;
    }

    #[inline]
    fn links(&self, at: Anchor) -> &[SkipLevel] {
        match at {
            | None => &self.head,
            | Some(id) => &self.nodes.get(id).levels,
        }
    }

    #[inline]
    fn link_mut(&mut self, at: Anchor, level: usize) -> &mut SkipLevel {
        match at {
            | None => &mut self.head[level],
            | Some(id) => &mut self.nodes.get_mut(id).levels[level],
        }
    }

    /// Detach `id` given its predecessors on every active level and hand back
    /// the node.
    fn unlink(&mut self, id: NodeId, update: &[Anchor]) -> SkipNode<T> {
        for i in 0..self.level {
            let removed = self.nodes.get(id).levels.get(i).copied();
            let prev = self.link_mut(update[i], i);
            match removed {
                | Some(link) if prev.forward == Some(id) => {
                    prev.span = prev.span + link.span - 1;
                    prev.forward = link.forward;
                },
                | _ => prev.span -= 1,
            }
        }

        let node = self.nodes.release(id);
        match node.next() {
            | Some(next) => self.nodes.get_mut(next).backward = node.backward,
            | None => self.tail = node.backward,
        }

        while self.level > 1 && self.head[self.level - 1].forward.is_none() {
            self.level -= 1;
            trace!(active = self.level, "shrank active levels");
        }

        self.len -= 1;
        node
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Walk from the top active level down to level 0, stopping on each level
    /// at the last node that sorts strictly before `target`.
    fn descend(&self, target: &T) -> Descent {
        let mut update: Vec<Anchor> = vec![None; self.level];
        let mut rank = vec![0usize; self.level];

        let mut x: Anchor = None;
        for i in (0..self.level).rev() {
            rank[i] = if i == self.level - 1 { 0 } else { rank[i + 1] };
            loop {
                let link = self.links(x)[i];
                match link.forward {
                    | Some(next)
                        if self.compare.compare(&self.nodes.get(next).payload, target)
                            == Ordering::Less =>
                    {
                        rank[i] += link.span;
                        x = Some(next);
                    },
                    | _ => break,
                }
            }
            update[i] = x;
        }

        let found = self.links(x)[0].forward.filter(|&next| {
            self.compare.compare(&self.nodes.get(next).payload, target) == Ordering::Equal
        });

        Descent {
            update,
            rank,
            found,
        }
    }

    /// Insert `payload`, returning a handle to the new node. If an element
    /// comparing equal is already present nothing changes and `None` is
    /// returned.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn insert(&mut self, payload: T) -> Option<Node<'_, T>> {
        let Descent {
            mut update,
            mut rank,
            found,
        } = self.descend(&payload);
        if found.is_some() {
            trace!("rejected duplicate");
            return None;
        }

        let height = self.level_generator.random().clamp(1, self.max_level());
        if height > self.level {
            update.resize(height, None);
            rank.resize(height, 0);
            for i in self.level..height {
                self.head[i] = SkipLevel {
                    forward: None,
                    span: self.len,
                };
            }
            trace!(from = self.level, to = height, "grew active levels");
            self.level = height;
        }

        // the new node takes over the tail end of each predecessor's span
        let levels = (0..height)
            .map(|i| {
                let prev = self.links(update[i])[i];
                SkipLevel {
                    forward: prev.forward,
                    span: prev.span - (rank[0] - rank[i]),
                }
            })
            .collect::<Vec<_>>();
        let next = levels[0].forward;
        let id = self.nodes.alloc(SkipNode::new(payload, update[0], levels));

        for i in 0..height {
            let prev = self.link_mut(update[i], i);
            prev.forward = Some(id);
            prev.span = (rank[0] - rank[i]) + 1;
        }
        for i in height..self.level {
            self.link_mut(update[i], i).span += 1;
        }

        match next {
            | Some(next) => self.nodes.get_mut(next).backward = Some(id),
            | None => self.tail = Some(id),
        }

        self.len += 1;
        Some(Node::new(&self.nodes, id))
    }

    /// Remove the element comparing equal to `payload`. Returns whether one
    /// was found.
    pub fn delete(&mut self, payload: &T) -> bool {
        self.remove(payload).is_some()
    }

    /// Remove the element comparing equal to `payload` and return it.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn remove(&mut self, payload: &T) -> Option<T> {
        let Descent { update, found, .. } = self.descend(payload);
        let id = found?;
        Some(self.unlink(id, &update).payload)
    }

    /// Find the element comparing equal to `payload`.
    pub fn find(&self, payload: &T) -> Option<Node<'_, T>> {
        let mut x: Anchor = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.links(x)[i].forward {
                if self.compare.compare(&self.nodes.get(next).payload, payload) != Ordering::Less {
                    break;
                }
                x = Some(next);
            }
        }

        self.links(x)[0]
            .forward
            .filter(|&next| {
                self.compare.compare(&self.nodes.get(next).payload, payload) == Ordering::Equal
            })
            .map(|id| Node::new(&self.nodes, id))
    }

    /// The stored element comparing equal to `payload`.
    pub fn get(&self, payload: &T) -> Option<&T> {
        self.find(payload).map(|node| node.payload())
    }

    pub fn contains(&self, payload: &T) -> bool {
        self.find(payload).is_some()
    }

    /// The 1-based position of the element comparing equal to `payload`.
    pub fn rank(&self, payload: &T) -> Option<usize> {
        let mut x: Anchor = None;
        let mut rank = 0;
        for i in (0..self.level).rev() {
            loop {
                let link = self.links(x)[i];
                match link.forward {
                    | Some(next)
                        if self.compare.compare(&self.nodes.get(next).payload, payload)
                            != Ordering::Greater =>
                    {
                        rank += link.span;
                        x = Some(next);
                    },
                    | _ => break,
                }
            }
            if let Some(id) = x {
                if self.compare.compare(&self.nodes.get(id).payload, payload) == Ordering::Equal {
                    return Some(rank);
                }
            }
        }
        None
    }

    /// Remove and return the smallest element.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn pop_head(&mut self) -> Option<T> {
        let id = self.head[0].forward?;
        self.remove_node(id)
    }

    /// Remove and return the largest element.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn pop_tail(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove_node(id)
    }

    /// Remove a node that is known to be linked, locating its predecessors
    /// with a regular descent on its own payload. Gives up if the descent
    /// lands elsewhere, which only a comparator that is not a total order can
    /// cause.
    fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let Descent { update, found, .. } = self.descend(&self.nodes.get(id).payload);
        if found != Some(id) {
            warn!(len = self.len, "descent missed a linked node, comparator is not a total order");
            return None;
        }
        Some(self.unlink(id, &update).payload)
    }

    /// Check every structural invariant of the list.
    ///
    /// This walks every active level in full, so it costs `O(n * level)`. It
    /// can only fail if the comparator is not a total order.
    pub fn validate(&self) -> Result<(), SkipListError> {
        if self.level == 0 || self.level > self.max_level() {
            return Err(SkipListError::corrupted(
                self.level,
                format!("active level outside [1, {}]", self.max_level()),
            ));
        }
        if self.level > 1 && self.head[self.level - 1].forward.is_none() {
            return Err(SkipListError::corrupted(
                self.level - 1,
                "top active level is empty",
            ));
        }
        if self.nodes.live() != self.len {
            return Err(SkipListError::corrupted(
                0,
                format!("{} live nodes for length {}", self.nodes.live(), self.len),
            ));
        }

        // level 0: order, backward links, tail and positions
        let mut positions = Vec::with_capacity(self.len);
        let mut prev: Anchor = None;
        let mut cursor = self.head[0].forward;
        while let Some(id) = cursor {
            let node = self.nodes.get(id);
            if node.backward != prev {
                return Err(SkipListError::corrupted(0, "backward link out of sync"));
            }
            if let Some(p) = prev {
                if self.compare.compare(&self.nodes.get(p).payload, &node.payload)
                    != Ordering::Less
                {
                    return Err(SkipListError::corrupted(0, "elements out of order"));
                }
            }
            if node.height() > self.level {
                return Err(SkipListError::corrupted(
                    node.height() - 1,
                    "node taller than the active level",
                ));
            }
            positions.push(id);
            prev = Some(id);
            cursor = node.next();
            if positions.len() > self.len {
                return Err(SkipListError::corrupted(0, "chain longer than length"));
            }
        }
        if positions.len() != self.len {
            return Err(SkipListError::corrupted(
                0,
                format!("chain holds {} of {} elements", positions.len(), self.len),
            ));
        }
        if self.tail != prev {
            return Err(SkipListError::corrupted(0, "tail is not the last element"));
        }

        // every level: forwards follow level-0 order and spans match positions
        let position_of = positions
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i + 1))
            .collect::<HashMap<_, _>>();
        for i in 0..self.level {
            let mut x: Anchor = None;
            let mut at = 0;
            loop {
                let link = self.links(x)[i];
                match link.forward {
                    | Some(next) => {
                        let Some(&pos) = position_of.get(&next) else {
                            return Err(SkipListError::corrupted(i, "link leaves the list"));
                        };
                        if pos <= at {
                            return Err(SkipListError::corrupted(i, "link points backwards"));
                        }
                        if link.span != pos - at {
                            return Err(SkipListError::corrupted(
                                i,
                                format!("span {} should be {}", link.span, pos - at),
                            ));
                        }
                        if positions[at..pos - 1]
                            .iter()
                            .any(|&skipped| self.nodes.get(skipped).height() > i)
                        {
                            return Err(SkipListError::corrupted(
                                i,
                                "link skips a node of this level",
                            ));
                        }
                        x = Some(next);
                        at = pos;
                    },
                    | None => {
                        if positions[at..].iter().any(|&p| self.nodes.get(p).height() > i) {
                            return Err(SkipListError::corrupted(
                                i,
                                "level ends before its last node",
                            ));
                        }
                        if link.span != self.len - at {
                            return Err(SkipListError::corrupted(
                                i,
                                format!("trailing span {} should be {}", link.span, self.len - at),
                            ));
                        }
                        break;
                    },
                }
            }
        }

        Ok(())
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, C, G> Extend<T> for SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Duplicates are dropped, as with [`SkipList::insert`].
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for payload in iter {
            self.insert(payload);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, C, G> IntoIterator for &'a SkipList<T, C, G> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C, G> IntoIterator for SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    type IntoIter = IntoIter<T, C, G>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T: fmt::Debug, C, G> fmt::Debug for SkipList<T, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C, G> fmt::Display for SkipList<T, C, G> {
    /// One line per active level, lowest first, listing the chain on that
    /// level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.level {
            write!(f, "level {i}:")?;
            let mut cursor = self.head[i].forward;
            while let Some(id) = cursor {
                let node = self.nodes.get(id);
                write!(f, " {}", node.payload)?;
                cursor = node.levels[i].forward;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
