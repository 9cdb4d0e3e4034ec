// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::cmp::Ordering;

/// A total order over payloads.
///
/// The ordering **must** be well-behaved: consistent across calls,
/// anti-symmetric (`compare(a, b) == Less` iff `compare(b, a) == Greater`) and
/// transitive. Payloads that compare [`Ordering::Equal`] are duplicates as far
/// as the list is concerned. A misbehaving comparator never causes memory
/// unsafety, but the results of every operation become unspecified and an
/// operation may panic.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders payloads by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{
        Comparator,
        Natural,
    };

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Natural.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &2), Ordering::Equal);
    }
}
