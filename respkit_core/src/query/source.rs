use std::cmp::Reverse;

use super::filter::SortDirection;
use super::schema::Accessor;

/// An ordered sequence of records that a [`QueryPlan`](super::QueryPlan)
/// can be applied to.
///
/// Implementations may stay lazy (for example by translating each call into
/// a remote query) and only do work in [`to_list`](QuerySource::to_list) and
/// [`count`](QuerySource::count). `order_by` must be stable.
pub trait QuerySource: Sized {
    type Item;

    fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&Self::Item) -> bool;

    fn order_by(self, key: &Accessor<Self::Item>, direction: SortDirection) -> Self;

    fn skip(self, n: usize) -> Self;

    fn take(self, n: usize) -> Self;

    fn count(&self) -> usize;

    fn to_list(self) -> Vec<Self::Item>;
}

impl<T> QuerySource for Vec<T> {
    type Item = T;

    fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.retain(|item| predicate(item));
        self
    }

    fn order_by(mut self, key: &Accessor<T>, direction: SortDirection) -> Self {
        // sort_by_cached_key is stable, so ties keep source order either way
        match direction {
            SortDirection::Asc => self.sort_by_cached_key(|item| key(item)),
            SortDirection::Desc => self.sort_by_cached_key(|item| Reverse(key(item))),
        }
        self
    }

    fn skip(mut self, n: usize) -> Self {
        let n = n.min(self.len());
        self.drain(..n);
        self
    }

    fn take(mut self, n: usize) -> Self {
        self.truncate(n);
        self
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn to_list(self) -> Vec<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::query::SortKey;

    #[test]
    fn vec_skip_and_take_clamp() {
        let v = vec![1, 2, 3, 4];
        assert_eq!(v.clone().skip(3).take(5).to_list(), vec![4]);
        assert!(v.skip(10).to_list().is_empty());
    }

    #[test]
    fn vec_order_by_is_stable_both_ways() {
        let key: Accessor<(i32, char)> = Arc::new(|r: &(i32, char)| SortKey::from(r.0));
        let v = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];

        let asc = v.clone().order_by(&key, SortDirection::Asc);
        assert_eq!(asc, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);

        let desc = v.order_by(&key, SortDirection::Desc);
        assert_eq!(desc, vec![(2, 'a'), (2, 'c'), (1, 'b'), (1, 'd')]);
    }
}
