//! Ternary relations with an index over each attribute.
//!
//! Each index maps one attribute's value to the binary relation formed by
//! the other two attributes of the tuples carrying that value. Projections
//! onto two attributes are recovered from those indices: the sub-relations
//! of one index partition the body by the dropped attribute, so their union
//! is the projection.

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
use crate::r2::R2;
use crate::trace;
use crate::verify;

/// A position-indexed ternary relation, or a tri-directional map.
pub struct R3<A, B, C> {
    body: OrdSet<(A, B, C)>,
    by_first: OrdMap<A, R2<B, C>>,
    by_second: OrdMap<B, R2<A, C>>,
    by_third: OrdMap<C, R2<A, B>>,
    order_a: Order<A>,
    order_b: Order<B>,
    order_c: Order<C>,
}

impl<A, B, C> Clone for R3<A, B, C> {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
            by_first: self.by_first.clone(),
            by_second: self.by_second.clone(),
            by_third: self.by_third.clone(),
            order_a: self.order_a.clone(),
            order_b: self.order_b.clone(),
            order_c: self.order_c.clone(),
        }
    }
}

impl<A, B, C> R3<A, B, C>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    /// Build from any collection of triples; duplicates collapse.
    pub fn from_tuples<I>(tuples: I, oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Self
    where
        I: IntoIterator<Item = (A, B, C)>,
    {
        let body = OrdSet::from_iter_with(Order::triple(&oa, &ob, &oc), tuples);
        Self::indexed(body, oa, ob, oc)
    }

    /// Build from an existing set of triples, reusing it when it is already
    /// ordered by the combination of `oa`, `ob` and `oc`.
    pub fn from_set(body: OrdSet<(A, B, C)>, oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Self {
        let triple = Order::triple(&oa, &ob, &oc);
        let body = if body.order().same_label(&triple) {
            body
        } else {
            OrdSet::from_iter_with(triple, body.iter().cloned())
        };
        Self::indexed(body, oa, ob, oc)
    }

    /// `from_tuples`, then the checks and tracing `config` asks for.
    pub fn build<I>(
        config: &RelationConfig,
        tuples: I,
        oa: Order<A>,
        ob: Order<B>,
        oc: Order<C>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B, C)>,
    {
        let r = Self::from_tuples(tuples, oa, ob, oc);
        if config.trace_index_builds {
            trace::relation_built(
                3,
                r.len(),
                &[r.by_first.len(), r.by_second.len(), r.by_third.len()],
            );
        }
        if config.verify_indices {
            verify::check_r3(&r)?;
        }
        Ok(r)
    }

    pub fn empty(oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Self {
        Self::indexed(OrdSet::empty(Order::triple(&oa, &ob, &oc)), oa, ob, oc)
    }

    pub fn single(a: A, b: B, c: C, oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Self {
        let body = OrdSet::single(Order::triple(&oa, &ob, &oc), (a, b, c));
        Self::indexed(body, oa, ob, oc)
    }

    /// The empty relation plus union.
    pub fn union_monoid(oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Monoid<Self> {
        Monoid::new(Self::empty(oa, ob, oc))
    }

    fn indexed(body: OrdSet<(A, B, C)>, oa: Order<A>, ob: Order<B>, oc: Order<C>) -> Self {
        let by_first = index::build(
            3,
            1,
            body.iter(),
            &oa,
            |t: &(A, B, C)| (t.0.clone(), (t.1.clone(), t.2.clone())),
            |rest: Vec<(B, C)>| R2::from_tuples(rest, ob.clone(), oc.clone()),
        );
        let by_second = index::build(
            3,
            2,
            body.iter(),
            &ob,
            |t: &(A, B, C)| (t.1.clone(), (t.0.clone(), t.2.clone())),
            |rest: Vec<(A, C)>| R2::from_tuples(rest, oa.clone(), oc.clone()),
        );
        let by_third = index::build(
            3,
            3,
            body.iter(),
            &oc,
            |t: &(A, B, C)| (t.2.clone(), (t.0.clone(), t.1.clone())),
            |rest: Vec<(A, B)>| R2::from_tuples(rest, oa.clone(), ob.clone()),
        );
        Self {
            body,
            by_first,
            by_second,
            by_third,
            order_a: oa,
            order_b: ob,
            order_c: oc,
        }
    }

    fn with_body(&self, body: OrdSet<(A, B, C)>) -> Self {
        Self::indexed(
            body,
            self.order_a.clone(),
            self.order_b.clone(),
            self.order_c.clone(),
        )
    }

    pub fn order_a(&self) -> &Order<A> {
        &self.order_a
    }

    pub fn order_b(&self) -> &Order<B> {
        &self.order_b
    }

    pub fn order_c(&self) -> &Order<C> {
        &self.order_c
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, a: &A, b: &B, c: &C) -> bool {
        self.body
            .find_by(|t| {
                self.order_a
                    .compare(a, &t.0)
                    .then_with(|| self.order_b.compare(b, &t.1))
                    .then_with(|| self.order_c.compare(c, &t.2))
            })
            .is_some()
    }

    pub fn index1(&self) -> &OrdMap<A, R2<B, C>> {
        &self.by_first
    }

    pub fn index2(&self) -> &OrdMap<B, R2<A, C>> {
        &self.by_second
    }

    pub fn index3(&self) -> &OrdMap<C, R2<A, B>> {
        &self.by_third
    }

    pub fn image1(&self, a: &A) -> R2<B, C> {
        self.by_first
            .get(a)
            .cloned()
            .unwrap_or_else(|| R2::empty(self.order_b.clone(), self.order_c.clone()))
    }

    pub fn image2(&self, b: &B) -> R2<A, C> {
        self.by_second
            .get(b)
            .cloned()
            .unwrap_or_else(|| R2::empty(self.order_a.clone(), self.order_c.clone()))
    }

    pub fn image3(&self, c: &C) -> R2<A, B> {
        self.by_third
            .get(c)
            .cloned()
            .unwrap_or_else(|| R2::empty(self.order_a.clone(), self.order_b.clone()))
    }

    pub fn project1(&self) -> R1<A> {
        R1::new(self.body.map(self.order_a.clone(), |t| t.0.clone()))
    }

    pub fn project2(&self) -> R1<B> {
        R1::new(self.body.map(self.order_b.clone(), |t| t.1.clone()))
    }

    pub fn project3(&self) -> R1<C> {
        R1::new(self.body.map(self.order_c.clone(), |t| t.2.clone()))
    }

    /// Projection onto the second and third attributes.
    pub fn project_but1(&self) -> R2<B, C> {
        R2::union_monoid(self.order_b.clone(), self.order_c.clone()).sum(self.by_first.values())
    }

    /// Projection onto the first and third attributes.
    pub fn project_but2(&self) -> R2<A, C> {
        R2::union_monoid(self.order_a.clone(), self.order_c.clone()).sum(self.by_second.values())
    }

    /// Projection onto the first and second attributes.
    pub fn project_but3(&self) -> R2<A, B> {
        R2::union_monoid(self.order_a.clone(), self.order_b.clone()).sum(self.by_third.values())
    }

    /// Tuples whose first attribute equals `a`.
    pub fn select_by1(&self, a: &A) -> Self {
        let body = self
            .image1(a)
            .to_set()
            .map(self.body.order().clone(), |(b, c)| (a.clone(), b.clone(), c.clone()));
        self.with_body(body)
    }

    /// Tuples whose second attribute equals `b`.
    pub fn select_by2(&self, b: &B) -> Self {
        let body = self
            .image2(b)
            .to_set()
            .map(self.body.order().clone(), |(a, c)| (a.clone(), b.clone(), c.clone()));
        self.with_body(body)
    }

    /// Tuples whose third attribute equals `c`.
    pub fn select_by3(&self, c: &C) -> Self {
        let body = self
            .image3(c)
            .to_set()
            .map(self.body.order().clone(), |(a, b)| (a.clone(), b.clone(), c.clone()));
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
        verify::check_order(3, &self.order_c, &other.order_c)?;
        Ok(self.union(other))
    }

    /// A relation that also holds `(a, b, c)`.
    pub fn insert(&self, a: A, b: B, c: C) -> Self {
        if self.contains(&a, &b, &c) {
            return self.clone();
        }
        self.union(&Self::single(
            a,
            b,
            c,
            self.order_a.clone(),
            self.order_b.clone(),
            self.order_c.clone(),
        ))
    }

    pub fn to_set(&self) -> &OrdSet<(A, B, C)> {
        &self.body
    }

    pub fn into_set(self) -> OrdSet<(A, B, C)> {
        self.body
    }

    pub fn iter(&self) -> Iter<'_, (A, B, C)> {
        self.body.iter()
    }

    /// The ternary predicate this relation is the extension of.
    pub fn to_predicate(&self) -> impl Fn(&A, &B, &C) -> bool {
        let r = self.clone();
        move |a: &A, b: &B, c: &C| r.contains(a, b, c)
    }

    pub fn fingerprint(&self) -> Result<Hash256>
    where
        A: Serialize,
        B: Serialize,
        C: Serialize,
    {
        hash_serde(&self.body)
    }
}

impl<A, B, C> Semigroup for R3<A, B, C>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    fn combine(&self, other: &Self) -> Self {
        self.union(other)
    }

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

impl<A, B, C> PartialEq for R3<A, B, C> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl<A: fmt::Debug, B: fmt::Debug, C: fmt::Debug> fmt::Debug for R3<A, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.body.iter()).finish()
    }
}

impl<'a, A, B, C> IntoIterator for &'a R3<A, B, C> {
    type Item = &'a (A, B, C);
    type IntoIter = Iter<'a, (A, B, C)>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{assert_r2, assert_r3};

    type Rel = R3<i32, &'static str, bool>;

    fn rel(items: &[(i32, &'static str, bool)]) -> Rel {
        R3::from_tuples(
            items.iter().copied(),
            Order::natural(),
            Order::natural(),
            Order::natural(),
        )
    }

    fn sample() -> Rel {
        rel(&[(1, "a", true), (1, "b", false), (2, "a", true)])
    }

    #[test]
    fn indices_cover_shared_values() {
        let r = sample();
        assert_r3(&r);
        assert_eq!(r.image1(&1).len(), 2);
        assert_eq!(r.image2(&"a").len(), 2);
        assert_eq!(r.image3(&true).len(), 2);
        assert_eq!(r.image3(&false).len(), 1);
        assert_eq!(r.index1().len(), 2);
    }

    #[test]
    fn select_by_each_position() {
        let r = sample();
        assert_eq!(
            r.select_by1(&1).iter().copied().collect::<Vec<_>>(),
            vec![(1, "a", true), (1, "b", false)]
        );
        assert_eq!(
            r.select_by2(&"a").iter().copied().collect::<Vec<_>>(),
            vec![(1, "a", true), (2, "a", true)]
        );
        assert_eq!(
            r.select_by3(&false).iter().copied().collect::<Vec<_>>(),
            vec![(1, "b", false)]
        );
        assert!(r.select_by1(&7).is_empty());
        assert_r3(&r.select_by2(&"a"));
    }

    #[test]
    fn projections() {
        let r = sample();
        assert_eq!(r.project1().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(r.project2().iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(r.project3().iter().copied().collect::<Vec<_>>(), vec![false, true]);

        let but1 = r.project_but1();
        assert_eq!(but1.iter().copied().collect::<Vec<_>>(), vec![("a", true), ("b", false)]);
        assert_r2(&but1);
        assert_eq!(
            r.project_but2().iter().copied().collect::<Vec<_>>(),
            vec![(1, false), (1, true), (2, true)]
        );
        assert_eq!(
            r.project_but3().iter().copied().collect::<Vec<_>>(),
            vec![(1, "a"), (1, "b"), (2, "a")]
        );
    }

    #[test]
    fn empty_projections() {
        let e = rel(&[]);
        assert!(e.project_but1().is_empty());
        assert!(e.project1().is_empty());
        assert!(e.index2().is_empty());
    }

    #[test]
    fn insert_is_idempotent() {
        let r = sample();
        let same = r.insert(2, "a", true);
        assert_eq!(same, r);
        assert!(same.to_set().ptr_eq(r.to_set()));
        let grown = r.insert(3, "c", false);
        assert_eq!(grown.len(), 4);
        assert_eq!(r.len(), 3);
        assert_r3(&grown);
    }

    #[test]
    fn predicate() {
        let p = sample().to_predicate();
        assert!(p(&1, &"b", &false));
        assert!(!p(&1, &"b", &true));
    }

    #[test]
    fn try_union_checks_every_position() {
        let a = sample();
        let b = R3::from_tuples(
            [(5, "z", true)],
            Order::natural(),
            Order::natural(),
            Order::<bool>::natural().reverse(),
        );
        assert!(matches!(
            a.try_union(&b),
            Err(trirel_core::Error::OrderMismatch { position: 3, .. })
        ));
        assert_eq!(a.try_union(&rel(&[(5, "z", true)])).unwrap().len(), 4);
    }

    #[test]
    fn build_with_verification() {
        let cfg = RelationConfig {
            verify_indices: true,
            ..Default::default()
        };
        let r = R3::build(
            &cfg,
            [(1, 'x', 0u8), (1, 'y', 0), (2, 'x', 1)],
            Order::natural(),
            Order::natural(),
            Order::natural(),
        )
        .unwrap();
        assert_eq!(r.image3(&0).len(), 2);
    }
}
