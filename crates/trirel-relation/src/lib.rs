#![forbid(unsafe_code)]
//! trirel-relation: finite relations of arity 1, 2 and 3.
//!
//! A relation of arity k is an ordered set of k-tuples (its *body*) plus, for
//! k >= 2, one index per attribute position mapping each value of that
//! attribute to the relation of arity k-1 formed by the other attributes:
//!
//! - `R1<A>`: the base case, an `OrdSet<A>`.
//! - `R2<A, B>`: pairs, indexed into `R1`s.
//! - `R3<A, B, C>`: triples, indexed into `R2`s.
//!
//! Relations are immutable. Every operation returns a new relation whose
//! indices are rebuilt from its body, so an index always describes exactly
//! the tuples of the body it belongs to. A lookup for an absent value yields
//! an empty relation, never an error.
//!
//! Relations combined with `union` must use the same per-position orders.
//! That is a caller contract; `try_union` checks order labels instead.

mod index;
mod trace;

pub mod r1;
pub mod r2;
pub mod r3;
pub mod verify;

pub use r1::R1;
pub use r2::R2;
pub use r3::R3;
