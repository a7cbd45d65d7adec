//! Persistent ordered map keyed under an explicit `Order<K>`.

use std::fmt;

use trirel_core::order::Order;

use crate::tree::{self, Iter, Tree};

pub struct OrdMap<K, V> {
    root: Tree<(K, V)>,
    order: Order<K>,
}

impl<K, V> Clone for OrdMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            order: self.order.clone(),
        }
    }
}

impl<K, V> OrdMap<K, V> {
    pub fn empty(order: Order<K>) -> Self {
        Self { root: None, order }
    }

    /// Collect entries under `order`; on duplicate keys the last entry wins.
    pub fn from_entries<I>(order: Order<K>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(K, V)> = entries.into_iter().collect();
        entries.reverse();
        entries.sort_by(|a, b| order.compare(&a.0, &b.0));
        entries.dedup_by(|later, kept| order.equal(&kept.0, &later.0));
        Self {
            root: tree::from_sorted(entries),
            order,
        }
    }

    pub fn order(&self) -> &Order<K> {
        &self.order
    }

    pub fn len(&self) -> usize {
        tree::size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Lookup; absence is an ordinary `None`, never an error.
    pub fn get(&self, key: &K) -> Option<&V> {
        tree::find(&self.root, |entry| self.order.compare(key, &entry.0)).map(|entry| &entry.1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Entries in key order.
    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter(Iter::new(&self.root))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Clone, V: Clone> OrdMap<K, V> {
    /// A map with `key` bound to `value`, replacing any previous binding.
    pub fn insert(&self, key: K, value: V) -> Self {
        let order = &self.order;
        Self {
            root: tree::insert(&self.root, (key, value), &|a: &(K, V), b: &(K, V)| {
                order.compare(&a.0, &b.0)
            }),
            order: self.order.clone(),
        }
    }
}

pub struct MapIter<'a, K, V>(Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for MapIter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a OrdMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrdMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_or_replace() {
        let m = OrdMap::empty(Order::<&'static str>::natural());
        let m1 = m.insert("b", 1).insert("a", 2);
        let m2 = m1.insert("b", 3);
        assert_eq!(m1.get(&"b"), Some(&1));
        assert_eq!(m2.get(&"b"), Some(&3));
        assert_eq!(m2.len(), 2);
        assert_eq!(m2.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(m.is_empty());
    }

    #[test]
    fn miss_is_none() {
        let m = OrdMap::from_entries(Order::<i32>::natural(), [(1, "x")]);
        assert_eq!(m.get(&2), None);
        assert!(!m.contains_key(&2));
        assert!(m.contains_key(&1));
    }

    #[test]
    fn from_entries_last_write_wins() {
        let m = OrdMap::from_entries(Order::<i32>::natural(), [(2, "a"), (1, "b"), (2, "c")]);
        assert_eq!(m.values().copied().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn values_follow_key_order() {
        let m = OrdMap::from_entries(Order::<i32>::natural().reverse(), [(1, 'a'), (3, 'c'), (2, 'b')]);
        assert_eq!(m.values().copied().collect::<String>(), "cba");
        assert_eq!(m.iter().len(), 3);
    }
}
