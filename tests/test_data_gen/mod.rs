//! Shared generators for relation tests.
#![allow(dead_code)]

use proptest::prelude::*;
use trirel_core::order::Order;
use trirel_relation::{R2, R3};

pub type Triple = (u8, char, bool);

pub fn nat<T: Ord + 'static>() -> Order<T> {
    Order::natural()
}

/// Small domains so generated tuples share attribute values often.
pub fn arb_triple() -> impl Strategy<Value = Triple> {
    (0u8..5, prop::sample::select(vec!['a', 'b', 'c', 'd']), any::<bool>())
}

pub fn arb_triples() -> impl Strategy<Value = Vec<Triple>> {
    prop::collection::vec(arb_triple(), 0..40)
}

pub fn arb_pairs() -> impl Strategy<Value = Vec<(u8, char)>> {
    prop::collection::vec((0u8..6, prop::sample::select(vec!['x', 'y', 'z'])), 0..30)
}

pub fn r3(items: Vec<Triple>) -> R3<u8, char, bool> {
    R3::from_tuples(items, nat(), nat(), nat())
}

pub fn r2(items: Vec<(u8, char)>) -> R2<u8, char> {
    R2::from_tuples(items, nat(), nat())
}

pub fn sorted_unique<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let set: std::collections::BTreeSet<T> = items.iter().cloned().collect();
    set.into_iter().collect()
}
