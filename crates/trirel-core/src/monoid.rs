//! Union-style algebra shared by every relation arity.
//!
//! Relation identities depend on orderings, so the identity element is a
//! value carried by `Monoid<T>` rather than an associated function.

/// An associative binary operation.
pub trait Semigroup: Sized {
    fn combine(&self, other: &Self) -> Self;

    /// Combine `first` with every element of `rest`, left to right.
    ///
    /// Implementors may override this when combining many values at once is
    /// cheaper than a chain of pairwise combines.
    fn combine_all<'a, I>(first: Self, rest: I) -> Self
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        rest.into_iter().fold(first, |acc, next| acc.combine(next))
    }
}

/// A semigroup together with an explicit identity element.
#[derive(Debug, Clone)]
pub struct Monoid<T> {
    zero: T,
}

impl<T: Semigroup + Clone> Monoid<T> {
    /// `zero` must be an identity for `T::combine`.
    pub fn new(zero: T) -> Self {
        Self { zero }
    }

    pub fn zero(&self) -> &T {
        &self.zero
    }

    pub fn combine(&self, a: &T, b: &T) -> T {
        a.combine(b)
    }

    /// Left fold of `items` starting from the identity.
    pub fn sum<'a, I>(&self, items: I) -> T
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        T::combine_all(self.zero.clone(), items)
    }
}
