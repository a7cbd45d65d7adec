#![forbid(unsafe_code)]
//! trirel-core: comparator values, union monoids, errors, config, and hashing.
//!
//! Everything here is pure data or pure functions. The persistent containers
//! live in `trirel-collections` and the relations in `trirel-relation`.

pub mod config;
pub mod error;
pub mod hash;
pub mod monoid;
pub mod order;
pub mod prelude;

pub use error::{Error, Result};
pub use monoid::{Monoid, Semigroup};
pub use order::Order;
