//! Index construction shared by every arity.
//!
//! An index maps each distinct value of one attribute to the relation of the
//! remaining attributes of every tuple carrying that value. Tuples are
//! grouped with a stable sort on the indexed attribute, and each group is
//! extended tuple by tuple before its sub-relation is built, so a key shared
//! by many tuples indexes all of them.

use trirel_collections::OrdMap;
use trirel_core::order::Order;

use crate::trace;

/// Build one attribute index.
///
/// `split` separates a tuple into the indexed value and the remaining
/// attributes; `make` turns one key's remaining attributes into the
/// sub-relation stored under that key.
pub(crate) fn build<'a, T, K, Rest, R, S, M>(
    arity: usize,
    position: usize,
    tuples: impl Iterator<Item = &'a T>,
    order: &Order<K>,
    split: S,
    make: M,
) -> OrdMap<K, R>
where
    T: 'a,
    S: Fn(&T) -> (K, Rest),
    M: Fn(Vec<Rest>) -> R,
{
    let mut pairs: Vec<(K, Rest)> = tuples.map(split).collect();
    let tuple_count = pairs.len();
    pairs.sort_by(|a, b| order.compare(&a.0, &b.0));

    let mut entries = Vec::new();
    let mut pairs = pairs.into_iter().peekable();
    while let Some((key, rest)) = pairs.next() {
        let mut group = vec![rest];
        while let Some((_, rest)) = pairs.next_if(|(k, _)| order.equal(k, &key)) {
            group.push(rest);
        }
        entries.push((key, make(group)));
    }

    trace::index_built(arity, position, tuple_count, entries.len());
    OrdMap::from_entries(order.clone(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_every_tuple_sharing_a_key() {
        let tuples = vec![(1, 'a'), (2, 'b'), (1, 'c'), (1, 'd')];
        let idx = build(
            2,
            1,
            tuples.iter(),
            &Order::<i32>::natural(),
            |t: &(i32, char)| (t.0, t.1),
            |rest: Vec<char>| rest.into_iter().collect::<String>(),
        );
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.get(&1).map(String::as_str), Some("acd"));
        assert_eq!(idx.get(&2).map(String::as_str), Some("b"));
        assert_eq!(idx.get(&3), None);
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let tuples: Vec<(i32, i32)> = Vec::new();
        let idx = build(
            2,
            2,
            tuples.iter(),
            &Order::<i32>::natural(),
            |t: &(i32, i32)| (t.1, t.0),
            |rest: Vec<i32>| rest.len(),
        );
        assert!(idx.is_empty());
    }
}
