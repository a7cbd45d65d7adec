//! Tracing hooks for index builds.
//!
//! Compiled to no-ops unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
pub(crate) fn index_built(arity: usize, position: usize, tuples: usize, keys: usize) {
    tracing::trace!(arity, position, tuples, keys, "index built");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn index_built(_arity: usize, _position: usize, _tuples: usize, _keys: usize) {}

/// Summary of a configured build, one entry of `keys` per attribute index.
#[cfg(feature = "tracing")]
pub(crate) fn relation_built(arity: usize, tuples: usize, keys: &[usize]) {
    tracing::debug!(arity, tuples, keys = ?keys, "relation built");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn relation_built(_arity: usize, _tuples: usize, _keys: &[usize]) {}
