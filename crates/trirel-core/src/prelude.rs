//! Convenient re-exports for downstream crates.

pub use crate::config::RelationConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::monoid::{Monoid, Semigroup};
pub use crate::order::Order;
