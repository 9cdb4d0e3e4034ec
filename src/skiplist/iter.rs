// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::iter::FusedIterator;

use crate::{
    compare::Comparator,
    skiplist::{
        level_generator::LevelGenerator,
        skipnode::{
            Arena,
            NodeId,
        },
        skiplist::SkipList,
    },
};

/// Borrowing iterator over a [`SkipList`] in ascending order. Walks level-0
/// links from the front and backward links from the back.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        nodes: &'a Arena<T>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        remaining: usize,
    ) -> Self {
        Iter {
            nodes,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?);
        self.front = node.next();
        self.remaining -= 1;
        Some(&node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?);
        self.back = node.backward;
        self.remaining -= 1;
        Some(&node.payload)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Owning iterator over a [`SkipList`], draining it from either end.
pub struct IntoIter<T, C, G> {
    list: SkipList<T, C, G>,
}

impl<T, C, G> IntoIter<T, C, G> {
    pub(crate) fn new(list: SkipList<T, C, G>) -> Self {
        IntoIter { list }
    }
}

impl<T, C, G> Iterator for IntoIter<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, C, G> DoubleEndedIterator for IntoIter<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_tail()
    }
}

impl<T, C, G> ExactSizeIterator for IntoIter<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
}

#[cfg(test)]
mod tests {
    use crate::SkipList;

    #[test]
    fn test_iter_sorted() {
        let list: SkipList<i32> = [5, -1, 3, 9, 0].into_iter().collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![-1, 0, 3, 5, 9]);
        assert_eq!(list.iter().len(), 5);
    }

    #[test]
    fn test_iter_rev() {
        let list: SkipList<i32> = (0..10).collect();
        assert_eq!(
            list.iter().rev().copied().collect::<Vec<_>>(),
            (0..10).rev().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let list: SkipList<i32> = (0..5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_empty() {
        let list: SkipList<i32> = SkipList::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
        assert_eq!((&list).into_iter().size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_into_iter() {
        let list: SkipList<u8> = [3, 1, 2].into_iter().collect();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        let list: SkipList<u8> = [3, 1, 2].into_iter().collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 1);
    }

    #[test]
    fn test_for_loop_over_reference() {
        let list: SkipList<u32> = (1..=4).collect();
        let mut sum = 0;
        for value in &list {
            sum += value;
        }
        assert_eq!(sum, 10);
    }
}
