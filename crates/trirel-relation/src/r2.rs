//! Binary relations with an index over each attribute.

use std::fmt;

use serde::Serialize;
use trirel_collections::{Iter, OrdMap, OrdSet};
use trirel_core::config::RelationConfig;
use trirel_core::error::Result;
use trirel_core::hash::{hash_serde, Hash256};
use trirel_core::monoid::{Monoid, Semigroup};
use trirel_core::order::Order;

use crate::index;
use crate::r1::R1;
use crate::trace;
use crate::verify;

/// A position-indexed binary relation, or a bi-directional multimap.
///
/// `body` is the source of truth; `by_first` and `by_second` are rebuilt
/// from it whenever a new relation is produced and always describe exactly
/// the tuples in `body`.
pub struct R2<A, B> {
    body: OrdSet<(A, B)>,
    by_first: OrdMap<A, R1<B>>,
    by_second: OrdMap<B, R1<A>>,
    order_a: Order<A>,
    order_b: Order<B>,
}

impl<A, B> Clone for R2<A, B> {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
            by_first: self.by_first.clone(),
            by_second: self.by_second.clone(),
            order_a: self.order_a.clone(),
            order_b: self.order_b.clone(),
        }
    }
}

impl<A, B> R2<A, B>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Build from any collection of pairs; duplicates collapse.
    pub fn from_tuples<I>(tuples: I, oa: Order<A>, ob: Order<B>) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
    {
        let body = OrdSet::from_iter_with(Order::pair(&oa, &ob), tuples);
        Self::indexed(body, oa, ob)
    }

    /// Build from an existing set of pairs.
    ///
    /// The set is reused as the body when it is already ordered by the
    /// lexicographic combination of `oa` and `ob`; otherwise it is re-sorted.
    pub fn from_set(body: OrdSet<(A, B)>, oa: Order<A>, ob: Order<B>) -> Self {
        let pair = Order::pair(&oa, &ob);
        let body = if body.order().same_label(&pair) {
            body
        } else {
            OrdSet::from_iter_with(pair, body.iter().cloned())
        };
        Self::indexed(body, oa, ob)
    }

    /// `from_tuples`, then the checks and tracing `config` asks for.
    pub fn build<I>(config: &RelationConfig, tuples: I, oa: Order<A>, ob: Order<B>) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
    {
        let r = Self::from_tuples(tuples, oa, ob);
        if config.trace_index_builds {
            trace::relation_built(2, r.len(), &[r.by_first.len(), r.by_second.len()]);
        }
        if config.verify_indices {
            verify::check_r2(&r)?;
        }
        Ok(r)
    }

    pub fn empty(oa: Order<A>, ob: Order<B>) -> Self {
        Self::indexed(OrdSet::empty(Order::pair(&oa, &ob)), oa, ob)
    }

    pub fn single(a: A, b: B, oa: Order<A>, ob: Order<B>) -> Self {
        Self::indexed(OrdSet::single(Order::pair(&oa, &ob), (a, b)), oa, ob)
    }

    /// The empty relation plus union.
    pub fn union_monoid(oa: Order<A>, ob: Order<B>) -> Monoid<Self> {
        Monoid::new(Self::empty(oa, ob))
    }

    fn indexed(body: OrdSet<(A, B)>, oa: Order<A>, ob: Order<B>) -> Self {
        let by_first = index::build(
            2,
            1,
            body.iter(),
            &oa,
            |t: &(A, B)| (t.0.clone(), t.1.clone()),
            |bs: Vec<B>| R1::from_values(bs, ob.clone()),
        );
        let by_second = index::build(
            2,
            2,
            body.iter(),
            &ob,
            |t: &(A, B)| (t.1.clone(), t.0.clone()),
            |as_: Vec<A>| R1::from_values(as_, oa.clone()),
        );
        Self {
            body,
            by_first,
            by_second,
            order_a: oa,
            order_b: ob,
        }
    }

    /// Same orders, new body.
    fn with_body(&self, body: OrdSet<(A, B)>) -> Self {
        Self::indexed(body, self.order_a.clone(), self.order_b.clone())
    }

    pub fn order_a(&self) -> &Order<A> {
        &self.order_a
    }

    pub fn order_b(&self) -> &Order<B> {
        &self.order_b
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, a: &A, b: &B) -> bool {
        self.body
            .find_by(|t| {
                self.order_a
                    .compare(a, &t.0)
                    .then_with(|| self.order_b.compare(b, &t.1))
            })
            .is_some()
    }

    pub fn index1(&self) -> &OrdMap<A, R1<B>> {
        &self.by_first
    }

    pub fn index2(&self) -> &OrdMap<B, R1<A>> {
        &self.by_second
    }

    /// Second attributes paired with `a`; empty when `a` never occurs.
    pub fn image1(&self, a: &A) -> R1<B> {
        self.by_first
            .get(a)
            .cloned()
            .unwrap_or_else(|| R1::empty(self.order_b.clone()))
    }

    /// First attributes paired with `b`; empty when `b` never occurs.
    pub fn image2(&self, b: &B) -> R1<A> {
        self.by_second
            .get(b)
            .cloned()
            .unwrap_or_else(|| R1::empty(self.order_a.clone()))
    }

    /// Distinct values of the first attribute.
    pub fn project1(&self) -> R1<A> {
        R1::new(self.body.map(self.order_a.clone(), |t| t.0.clone()))
    }

    /// Distinct values of the second attribute.
    pub fn project2(&self) -> R1<B> {
        R1::new(self.body.map(self.order_b.clone(), |t| t.1.clone()))
    }

    /// Tuples whose first attribute equals `a`.
    pub fn select_by1(&self, a: &A) -> Self {
        let body = self
            .image1(a)
            .to_set()
            .map(self.body.order().clone(), |b| (a.clone(), b.clone()));
        self.with_body(body)
    }

    /// Tuples whose second attribute equals `b`.
    pub fn select_by2(&self, b: &B) -> Self {
        let body = self
            .image2(b)
            .to_set()
            .map(self.body.order().clone(), |a| (a.clone(), b.clone()));
        self.with_body(body)
    }

    /// Union with a relation sharing this relation's orders.
    pub fn union(&self, other: &Self) -> Self {
        self.with_body(self.body.union(&other.body))
    }

    /// `union` that first checks both relations declare the same orders.
    pub fn try_union(&self, other: &Self) -> Result<Self> {
        verify::check_order(1, &self.order_a, &other.order_a)?;
        verify::check_order(2, &self.order_b, &other.order_b)?;
        Ok(self.union(other))
    }

    /// A relation that also holds `(a, b)`.
    pub fn insert(&self, a: A, b: B) -> Self {
        if self.contains(&a, &b) {
            return self.clone();
        }
        self.union(&Self::single(a, b, self.order_a.clone(), self.order_b.clone()))
    }

    pub fn to_set(&self) -> &OrdSet<(A, B)> {
        &self.body
    }

    pub fn into_set(self) -> OrdSet<(A, B)> {
        self.body
    }

    pub fn iter(&self) -> Iter<'_, (A, B)> {
        self.body.iter()
    }

    /// The binary predicate this relation is the extension of.
    pub fn to_predicate(&self) -> impl Fn(&A, &B) -> bool {
        let r = self.clone();
        move |a: &A, b: &B| r.contains(a, b)
    }

    pub fn fingerprint(&self) -> Result<Hash256>
    where
        A: Serialize,
        B: Serialize,
    {
        hash_serde(&self.body)
    }
}

impl<A, B> Semigroup for R2<A, B>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    fn combine(&self, other: &Self) -> Self {
        self.union(other)
    }

    /// Union all bodies, then index once.
    fn combine_all<'a, I>(first: Self, rest: I) -> Self
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let body = rest
            .into_iter()
            .fold(first.body.clone(), |acc, r| acc.union(&r.body));
        if body.ptr_eq(&first.body) {
            return first;
        }
        first.with_body(body)
    }
}

impl<A, B> PartialEq for R2<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for R2<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.body.iter()).finish()
    }
}

impl<'a, A, B> IntoIterator for &'a R2<A, B> {
    type Item = &'a (A, B);
    type IntoIter = Iter<'a, (A, B)>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}
