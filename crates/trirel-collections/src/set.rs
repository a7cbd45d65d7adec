//! Persistent ordered set under an explicit `Order<T>`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use trirel_core::order::Order;

use crate::tree::{self, Iter, Tree};

/// An immutable set ordered by the comparator it was created with.
///
/// Every "update" returns a new set sharing unchanged subtrees with `self`.
pub struct OrdSet<T> {
    root: Tree<T>,
    order: Order<T>,
}

impl<T> Clone for OrdSet<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T> OrdSet<T> {
    pub fn empty(order: Order<T>) -> Self {
        Self { root: None, order }
    }

    /// Collect `items` under `order`. Elements equal under the order collapse
    /// to their first occurrence.
    pub fn from_iter_with<I>(order: Order<T>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by(|a, b| order.compare(a, b));
        items.dedup_by(|later, kept| order.equal(kept, later));
        Self {
            root: tree::from_sorted(items),
            order,
        }
    }

    pub fn order(&self) -> &Order<T> {
        &self.order
    }

    pub fn len(&self) -> usize {
        tree::size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// The stored element equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        tree::find(&self.root, |x| self.order.compare(value, x))
    }

    /// Search with a custom probe consistent with the set's order.
    ///
    /// `probe(x)` must answer where the sought element sits relative to `x`.
    pub fn find_by<P>(&self, probe: P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        tree::find(&self.root, probe)
    }

    pub fn first(&self) -> Option<&T> {
        tree::first(&self.root)
    }

    pub fn last(&self) -> Option<&T> {
        tree::last(&self.root)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    /// Whether both sets share the same root node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => std::sync::Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Image of this set under `f`, collected under `order`.
    pub fn map<U, F>(&self, order: Order<U>, f: F) -> OrdSet<U>
    where
        F: FnMut(&T) -> U,
    {
        OrdSet::from_iter_with(order, self.iter().map(f))
    }
}

impl<T: Clone> OrdSet<T> {
    pub fn single(order: Order<T>, value: T) -> Self {
        Self {
            root: tree::from_sorted(vec![value]),
            order,
        }
    }

    /// A set that also contains `value`. Returns a shared clone when the
    /// value is already present.
    pub fn insert(&self, value: T) -> Self {
        if self.contains(&value) {
            return self.clone();
        }
        let order = &self.order;
        Self {
            root: tree::insert(&self.root, value, &|a: &T, b: &T| order.compare(a, b)),
            order: self.order.clone(),
        }
    }

    /// Set union under `self`'s order; on ties the element from `self` wins.
    pub fn union(&self, other: &Self) -> Self {
        let order = &self.order;
        Self {
            root: tree::union(&self.root, &other.root, &|a: &T, b: &T| order.compare(a, b)),
            order: self.order.clone(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a OrdSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> PartialEq for OrdSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.order.equal(a, b))
    }
}

impl<T: fmt::Debug> fmt::Debug for OrdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Serialize> Serialize for OrdSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
