#![forbid(unsafe_code)]
//! trirel-collections: persistent ordered containers.
//!
//! `OrdSet` and `OrdMap` are weight-balanced trees with `Arc`-shared nodes.
//! Both take their ordering as a value at construction; nothing here relies
//! on a type's own `Ord`. Old versions stay valid after every operation and
//! may be read from any number of threads.

pub mod map;
pub mod set;
mod tree;

pub use map::{MapIter, OrdMap};
pub use set::OrdSet;
pub use tree::Iter;
