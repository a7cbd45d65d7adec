//! Weight-balanced persistent binary trees (Adams' trees).
//!
//! Nodes are immutable and shared through `Arc`; every update path-copies
//! from the root down to the changed node and reuses every other subtree.
//! Ordering is supplied per call, so the same node type backs both sets
//! (ordered by element) and maps (ordered by entry key).

use std::cmp::Ordering;
use std::sync::Arc;

const DELTA: usize = 3;
const RATIO: usize = 2;

pub(crate) type Tree<T> = Option<Arc<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Tree<T>,
    pub(crate) right: Tree<T>,
    size: usize,
}

pub(crate) fn size<T>(t: &Tree<T>) -> usize {
    t.as_ref().map_or(0, |n| n.size)
}

fn node<T>(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
    let size = size(&left) + size(&right) + 1;
    Some(Arc::new(Node {
        value,
        left,
        right,
        size,
    }))
}

/// Rebuild a node whose subtrees are off balance by at most one step.
fn balance<T: Clone>(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
    let (ln, rn) = (size(&left), size(&right));
    if ln + rn <= 1 {
        node(value, left, right)
    } else if rn > DELTA * ln {
        rotate_left(value, left, right)
    } else if ln > DELTA * rn {
        rotate_right(value, left, right)
    } else {
        node(value, left, right)
    }
}

fn rotate_left<T: Clone>(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
    let Some(r) = right else {
        return node(value, left, None);
    };
    match &r.left {
        Some(rl) if size(&r.left) >= RATIO * size(&r.right) => node(
            rl.value.clone(),
            node(value, left, rl.left.clone()),
            node(r.value.clone(), rl.right.clone(), r.right.clone()),
        ),
        _ => node(
            r.value.clone(),
            node(value, left, r.left.clone()),
            r.right.clone(),
        ),
    }
}

fn rotate_right<T: Clone>(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
    let Some(l) = left else {
        return node(value, None, right);
    };
    match &l.right {
        Some(lr) if size(&l.right) >= RATIO * size(&l.left) => node(
            lr.value.clone(),
            node(l.value.clone(), l.left.clone(), lr.left.clone()),
            node(value, lr.right.clone(), right),
        ),
        _ => node(
            l.value.clone(),
            l.left.clone(),
            node(value, l.right.clone(), right),
        ),
    }
}

/// Look up the element for which `probe` answers `Equal`.
///
/// `probe(x)` reports where the target sits relative to `x`.
pub(crate) fn find<'a, T, P>(t: &'a Tree<T>, probe: P) -> Option<&'a T>
where
    P: Fn(&T) -> Ordering,
{
    let mut cur = t.as_deref();
    while let Some(n) = cur {
        match probe(&n.value) {
            Ordering::Less => cur = n.left.as_deref(),
            Ordering::Greater => cur = n.right.as_deref(),
            Ordering::Equal => return Some(&n.value),
        }
    }
    None
}

/// Insert `value`, replacing an element that compares equal.
pub(crate) fn insert<T, C>(t: &Tree<T>, value: T, cmp: &C) -> Tree<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    match t {
        None => node(value, None, None),
        Some(n) => match cmp(&value, &n.value) {
            Ordering::Less => balance(n.value.clone(), insert(&n.left, value, cmp), n.right.clone()),
            Ordering::Greater => {
                balance(n.value.clone(), n.left.clone(), insert(&n.right, value, cmp))
            }
            Ordering::Equal => node(value, n.left.clone(), n.right.clone()),
        },
    }
}

fn insert_min<T: Clone>(value: T, t: &Tree<T>) -> Tree<T> {
    match t {
        None => node(value, None, None),
        Some(n) => balance(n.value.clone(), insert_min(value, &n.left), n.right.clone()),
    }
}

fn insert_max<T: Clone>(value: T, t: &Tree<T>) -> Tree<T> {
    match t {
        None => node(value, None, None),
        Some(n) => balance(n.value.clone(), n.left.clone(), insert_max(value, &n.right)),
    }
}

/// Join `left < value < right` into one balanced tree.
fn link<T: Clone>(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
    match (&left, &right) {
        (None, _) => insert_min(value, &right),
        (_, None) => insert_max(value, &left),
        (Some(l), Some(r)) => {
            if DELTA * l.size < r.size {
                balance(
                    r.value.clone(),
                    link(value, left.clone(), r.left.clone()),
                    r.right.clone(),
                )
            } else if DELTA * r.size < l.size {
                balance(
                    l.value.clone(),
                    l.left.clone(),
                    link(value, l.right.clone(), right.clone()),
                )
            } else {
                node(value, left.clone(), right.clone())
            }
        }
    }
}

/// Partition `t` around the probe target: `(below, matching, above)`.
fn split<T, P>(t: &Tree<T>, probe: &P) -> (Tree<T>, Option<T>, Tree<T>)
where
    T: Clone,
    P: Fn(&T) -> Ordering,
{
    match t {
        None => (None, None, None),
        Some(n) => match probe(&n.value) {
            Ordering::Less => {
                let (lt, found, gt) = split(&n.left, probe);
                (lt, found, link(n.value.clone(), gt, n.right.clone()))
            }
            Ordering::Greater => {
                let (lt, found, gt) = split(&n.right, probe);
                (link(n.value.clone(), n.left.clone(), lt), found, gt)
            }
            Ordering::Equal => (n.left.clone(), Some(n.value.clone()), n.right.clone()),
        },
    }
}

/// Left-biased union: on equal elements the one from `a` is kept.
pub(crate) fn union<T, C>(a: &Tree<T>, b: &Tree<T>, cmp: &C) -> Tree<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (None, _) => b.clone(),
        (_, None) => a.clone(),
        (Some(x), Some(y)) if Arc::ptr_eq(x, y) => a.clone(),
        (Some(n), _) => {
            let (lt, _, gt) = split(b, &|v: &T| cmp(&n.value, v));
            link(
                n.value.clone(),
                union(&n.left, &lt, cmp),
                union(&n.right, &gt, cmp),
            )
        }
    }
}

/// Build a perfectly balanced tree from strictly ascending values.
pub(crate) fn from_sorted<T>(values: Vec<T>) -> Tree<T> {
    let n = values.len();
    build_exact(n, &mut values.into_iter())
}

fn build_exact<T, I: Iterator<Item = T>>(n: usize, it: &mut I) -> Tree<T> {
    if n == 0 {
        return None;
    }
    let left_n = n / 2;
    let left = build_exact(left_n, it);
    match it.next() {
        Some(v) => {
            let right = build_exact(n - left_n - 1, it);
            node(v, left, right)
        }
        None => left,
    }
}

pub(crate) fn first<T>(t: &Tree<T>) -> Option<&T> {
    let mut cur = t.as_deref()?;
    while let Some(l) = cur.left.as_deref() {
        cur = l;
    }
    Some(&cur.value)
}

pub(crate) fn last<T>(t: &Tree<T>) -> Option<&T> {
    let mut cur = t.as_deref()?;
    while let Some(r) = cur.right.as_deref() {
        cur = r;
    }
    Some(&cur.value)
}

/// In-order iterator over a tree.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(t: &'a Tree<T>) -> Self {
        let mut it = Self {
            stack: Vec::new(),
            remaining: size(t),
        };
        it.push_left(t.as_deref());
        it
    }

    fn push_left(&mut self, mut cur: Option<&'a Node<T>>) {
        while let Some(n) = cur {
            self.stack.push(n);
            cur = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(n.right.as_deref());
        self.remaining -= 1;
        Some(&n.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
pub(crate) fn is_valid<T, C>(t: &Tree<T>, cmp: &C) -> bool
where
    C: Fn(&T, &T) -> Ordering,
{
    fn walk<T>(t: &Tree<T>) -> bool {
        match t {
            None => true,
            Some(n) => {
                let (ln, rn) = (size(&n.left), size(&n.right));
                let balanced = ln + rn <= 1 || (ln <= DELTA * rn && rn <= DELTA * ln);
                balanced && n.size == ln + rn + 1 && walk(&n.left) && walk(&n.right)
            }
        }
    }
    let items: Vec<&T> = Iter::new(t).collect();
    let sorted = items
        .windows(2)
        .all(|w| cmp(w[0], w[1]) == Ordering::Less);
    sorted && walk(t)
}
