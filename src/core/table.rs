// Shared-handle ordered table: a BTreeMap behind an RwLock with clone-out reads.
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::trace;

/// Cloneable handle to a concurrently usable ordered table.
///
/// Cloning shares the underlying map; the map is freed when the last handle
/// drops. Every operation holds the lock for the duration of a single call,
/// so single-key operations are linearizable and never observed half-applied.
/// No operation spans multiple keys atomically; `snapshot` is the only wholly
/// consistent view.
pub struct Table<K, V> {
    entries: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> Clone for Table<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K: Ord + Clone, V: Clone> Table<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Builds a table from pairs in input order; later duplicates overwrite.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let table = Self::new();
        for (key, value) in pairs {
            table.insert(key, value);
        }
        table
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write();
        let replaced = entries.insert(key, value).is_some();
        trace!(replaced, len = entries.len(), "insert");
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    /// Removes the entry if present; absent keys are a no-op returning `None`.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write();
        let prior = entries.remove(key);
        trace!(removed = prior.is_some(), len = entries.len(), "remove");
        prior
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn first_key(&self) -> Option<K> {
        self.entries.read().keys().next().cloned()
    }

    /// Smallest key strictly greater than `key`, computed against the live
    /// order. `key` itself does not need to be present.
    pub fn next_key(&self, key: &K) -> Option<K> {
        self.entries
            .read()
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(next, _)| next.clone())
    }

    /// Ordered point-in-time copy of every entry. Does not see mutations made
    /// after the call returns.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.entries
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<V> {
        self.entries.read().values().cloned().collect()
    }

    /// Write-locked view for compound operations that must stay atomic.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<K, V>> {
        self.entries.write()
    }
}

impl<K: Ord + Clone, V: Clone> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for Table<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<K: Ord + Clone, V: Clone> Extend<(K, V)> for Table<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for Table<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn insert_overwrites_and_len_counts_distinct_keys() {
        let table = Table::new();
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("a", 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"a"), Some(3));
    }

    #[test]
    fn remove_returns_prior_value_and_is_idempotent() {
        let table = Table::new();
        table.insert("a", 1);
        assert_eq!(table.remove(&"a"), Some(1));
        assert_eq!(table.remove(&"a"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn first_and_next_key_follow_ascending_order() {
        let table = Table::from_pairs([("b", 2), ("a", 1), ("c", 3)]);
        assert_eq!(table.first_key(), Some("a"));
        assert_eq!(table.next_key(&"a"), Some("b"));
        assert_eq!(table.next_key(&"c"), None);
    }

    #[test]
    fn next_key_works_for_absent_probe() {
        let table = Table::from_pairs([("a", 1), ("c", 3)]);
        // "b" was never inserted; the successor comes from the live order.
        assert_eq!(table.next_key(&"b"), Some("c"));
    }

    #[test]
    fn snapshot_is_ordered_and_detached() {
        let table = Table::from_pairs([("b", 2), ("a", 1)]);
        let snap = table.snapshot();
        table.insert("c", 3);
        assert_eq!(snap, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn cloned_handles_share_the_same_map() {
        let table = Table::new();
        let other = table.clone();
        other.insert("a", 1);
        drop(other);
        assert_eq!(table.get(&"a"), Some(1));
    }

    #[test]
    fn from_pairs_keeps_later_duplicates() {
        let table = Table::from_pairs([("a", 1), ("a", 9)]);
        assert_eq!(table.get(&"a"), Some(9));
        assert_eq!(table.keys(), vec!["a"]);
        assert_eq!(table.values(), vec![9]);
    }
}
