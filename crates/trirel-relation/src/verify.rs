//! Consistency checks between a relation's body and its indices.
//!
//! `check_*` report violations as `Error::Invariant`; `assert_*` panic and are
//! meant for tests and debug builds. A full check visits every tuple once per
//! index plus every indexed entry once, so keep them out of hot paths.

use trirel_core::error::{Error, Result};
use trirel_core::order::Order;

use crate::r2::R2;
use crate::r3::R3;

/// Orders at the same attribute position must declare the same identity.
pub(crate) fn check_order<T>(position: usize, left: &Order<T>, right: &Order<T>) -> Result<()> {
    if left.same_label(right) {
        Ok(())
    } else {
        Err(Error::OrderMismatch {
            position,
            left: left.label().to_string(),
            right: right.label().to_string(),
        })
    }
}

fn violation(msg: String) -> Result<()> {
    Err(Error::Invariant(msg))
}

/// Every tuple is found in both indices, and every indexed entry is a tuple.
pub fn check_r2<A, B>(r: &R2<A, B>) -> Result<()>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    for (a, b) in r.iter() {
        if !r.image1(a).contains(b) {
            return violation(format!("index 1 is missing a tuple ({}/{})", r.len(), r.index1().len()));
        }
        if !r.image2(b).contains(a) {
            return violation(format!("index 2 is missing a tuple ({}/{})", r.len(), r.index2().len()));
        }
    }

    for (a, bs) in r.index1() {
        if bs.is_empty() {
            return violation("index 1 holds an empty sub-relation".into());
        }
        if bs.iter().any(|b| !r.contains(a, b)) {
            return violation("index 1 holds a tuple missing from the body".into());
        }
    }

    for (b, as_) in r.index2() {
        if as_.is_empty() {
            return violation("index 2 holds an empty sub-relation".into());
        }
        if as_.iter().any(|a| !r.contains(a, b)) {
            return violation("index 2 holds a tuple missing from the body".into());
        }
    }

    Ok(())
}

/// `check_r2` lifted to arity 3, including every sub-relation's own indices.
pub fn check_r3<A, B, C>(r: &R3<A, B, C>) -> Result<()>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    for (a, b, c) in r.iter() {
        if !r.image1(a).contains(b, c) {
            return violation(format!("index 1 is missing a tuple ({}/{})", r.len(), r.index1().len()));
        }
        if !r.image2(b).contains(a, c) {
            return violation(format!("index 2 is missing a tuple ({}/{})", r.len(), r.index2().len()));
        }
        if !r.image3(c).contains(a, b) {
            return violation(format!("index 3 is missing a tuple ({}/{})", r.len(), r.index3().len()));
        }
    }

    for (a, sub) in r.index1() {
        if sub.is_empty() || sub.iter().any(|(b, c)| !r.contains(a, b, c)) {
            return violation("index 1 disagrees with the body".into());
        }
        check_r2(sub)?;
    }

    for (b, sub) in r.index2() {
        if sub.is_empty() || sub.iter().any(|(a, c)| !r.contains(a, b, c)) {
            return violation("index 2 disagrees with the body".into());
        }
        check_r2(sub)?;
    }

    for (c, sub) in r.index3() {
        if sub.is_empty() || sub.iter().any(|(a, b)| !r.contains(a, b, c)) {
            return violation("index 3 disagrees with the body".into());
        }
        check_r2(sub)?;
    }

    Ok(())
}

pub fn assert_r2<A, B>(r: &R2<A, B>)
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    if let Err(e) = check_r2(r) {
        panic!("binary relation indices out of sync: {e}");
    }
}

pub fn assert_r3<A, B, C>(r: &R3<A, B, C>)
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    if let Err(e) = check_r3(r) {
        panic!("ternary relation indices out of sync: {e}");
    }
}
