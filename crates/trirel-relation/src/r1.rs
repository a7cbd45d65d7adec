//! Unary relations: the base case, a plain ordered set with no indices.

use std::fmt;

use serde::Serialize;
use trirel_collections::{Iter, OrdSet};
use trirel_core::error::Result;
use trirel_core::hash::{hash_serde, Hash256};
use trirel_core::monoid::{Monoid, Semigroup};
use trirel_core::order::Order;

use crate::verify;

/// The extension of a unary predicate.
pub struct R1<A> {
    body: OrdSet<A>,
}

impl<A> Clone for R1<A> {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
        }
    }
}

impl<A: Clone> R1<A> {
    /// Wrap an ordered set; the set's order becomes the attribute order.
    pub fn new(body: OrdSet<A>) -> Self {
        Self { body }
    }

    pub fn empty(order: Order<A>) -> Self {
        Self::new(OrdSet::empty(order))
    }

    pub fn single(a: A, order: Order<A>) -> Self {
        Self::new(OrdSet::single(order, a))
    }

    pub fn from_values<I>(values: I, order: Order<A>) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(OrdSet::from_iter_with(order, values))
    }

    /// The empty relation plus union.
    pub fn union_monoid(order: Order<A>) -> Monoid<Self> {
        Monoid::new(Self::empty(order))
    }

    pub fn order(&self) -> &Order<A> {
        self.body.order()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, a: &A) -> bool {
        self.body.contains(a)
    }

    pub fn insert(&self, a: A) -> Self {
        Self::new(self.body.insert(a))
    }

    /// Union with a relation sharing this relation's order.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.body.union(&other.body))
    }

    /// `union` that first checks both relations declare the same order.
    pub fn try_union(&self, other: &Self) -> Result<Self> {
        verify::check_order(1, self.order(), other.order())?;
        Ok(self.union(other))
    }

    pub fn to_set(&self) -> &OrdSet<A> {
        &self.body
    }

    pub fn into_set(self) -> OrdSet<A> {
        self.body
    }

    pub fn iter(&self) -> Iter<'_, A> {
        self.body.iter()
    }

    /// The membership predicate this relation is the extension of.
    pub fn to_predicate(&self) -> impl Fn(&A) -> bool {
        let body = self.body.clone();
        move |a: &A| body.contains(a)
    }

    pub fn fingerprint(&self) -> Result<Hash256>
    where
        A: Serialize,
    {
        hash_serde(&self.body)
    }
}

impl<A: Clone> Semigroup for R1<A> {
    fn combine(&self, other: &Self) -> Self {
        self.union(other)
    }
}

impl<A> PartialEq for R1<A> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl<A: fmt::Debug> fmt::Debug for R1<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.body.iter()).finish()
    }
}

impl<'a, A> IntoIterator for &'a R1<A> {
    type Item = &'a A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(values: &[i32]) -> R1<i32> {
        R1::from_values(values.iter().copied(), Order::natural())
    }

    #[test]
    fn membership_and_predicate() {
        let rel = r(&[3, 1]);
        assert!(rel.contains(&1));
        assert!(!rel.contains(&2));
        let p = rel.to_predicate();
        assert!(p(&3));
        assert!(!p(&4));
    }

    #[test]
    fn insert_leaves_original_untouched() {
        let rel = r(&[1]);
        let more = rel.insert(2);
        assert_eq!(rel.len(), 1);
        assert_eq!(more.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(more.insert(2), more);
    }

    #[test]
    fn monoid_sum_is_union() {
        let m = R1::union_monoid(Order::<i32>::natural());
        let parts = vec![r(&[1, 2]), r(&[2, 3]), r(&[])];
        assert_eq!(m.sum(&parts), r(&[1, 2, 3]));
        assert!(m.zero().is_empty());
    }

    #[test]
    fn try_union_rejects_foreign_order() {
        let a = r(&[1]);
        let b = R1::from_values([2], Order::<i32>::natural().reverse());
        assert!(a.try_union(&b).is_err());
        assert_eq!(a.try_union(&r(&[2])).unwrap(), r(&[1, 2]));
    }

    #[test]
    fn fingerprint_tracks_content() {
        assert_eq!(r(&[2, 1]).fingerprint().unwrap(), r(&[1, 2]).fingerprint().unwrap());
        assert_ne!(r(&[1]).fingerprint().unwrap(), r(&[2]).fingerprint().unwrap());
    }
}
