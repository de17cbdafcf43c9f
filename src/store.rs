//! Insertion-ordered name → value store.
//!
//! Backs the `helpers` and `support` fields of the registry state. Helper
//! loading iterates entries in insertion order (later helpers may depend on
//! earlier ones being constructed), so a plain `HashMap` is not enough.

use std::collections::HashMap;

/// A map from `String` keys to values that remembers first-insertion order.
///
/// Re-inserting under an existing key replaces the value but keeps the key's
/// original position.
#[derive(Debug, Clone)]
pub struct Store<V> {
    entries: HashMap<String, V>,
    ordered: Vec<String>,
}

impl<V> Store<V> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            ordered: Vec::new(),
        }
    }

    /// Insert a value under a key.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        if !self.entries.contains_key(&name) {
            self.ordered.push(name.clone());
        }
        self.entries.insert(name, value)
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Get a mutable value by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(name)
    }

    /// Check if a key is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a value by name.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.ordered.retain(|n| n != name);
        self.entries.remove(name)
    }

    /// Keys in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.ordered.iter().map(|s| s.as_str()).collect()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.ordered
            .iter()
            .filter_map(move |name| self.entries.get(name).map(|v| (name.as_str(), v)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ordered.clear();
    }

    /// Merge another store into this one.
    ///
    /// Keys present in `other` overwrite the corresponding keys here; keys
    /// absent from `other` are preserved. This is the merge primitive behind
    /// [`Container::append`](crate::Container::append).
    pub fn merge(&mut self, other: Store<V>) {
        let mut entries = other.entries;
        for name in other.ordered {
            if let Some(value) = entries.remove(&name) {
                self.insert(name, value);
            }
        }
    }
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for Store<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    /// Consume the store, yielding `(name, value)` pairs in insertion order.
    fn into_iter(self) -> Self::IntoIter {
        let mut entries = self.entries;
        self.ordered
            .into_iter()
            .filter_map(|name| entries.remove(&name).map(|v| (name, v)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = Store::new();
        store.insert("a", 1);
        assert_eq!(store.get("a"), Some(&1));
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = Store::new();
        store.insert("first", 1);
        store.insert("second", 2);
        store.insert("third", 3);
        assert_eq!(store.names(), vec!["first", "second", "third"]);

        // Replacing a value keeps the original position.
        store.insert("second", 20);
        assert_eq!(store.names(), vec!["first", "second", "third"]);
        assert_eq!(store.get("second"), Some(&20));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut store = Store::new();
        store.insert("a", 1);
        store.insert("b", 2);
        assert_eq!(store.remove("a"), Some(1));
        assert_eq!(store.names(), vec!["b"]);
        assert!(store.remove("a").is_none());
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut base = Store::new();
        base.insert("a", 0);
        base.insert("b", 2);

        let mut overlay = Store::new();
        overlay.insert("a", 1);
        base.merge(overlay);

        assert_eq!(base.get("a"), Some(&1));
        assert_eq!(base.get("b"), Some(&2));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_merge_appends_new_keys_in_order() {
        let mut base = Store::new();
        base.insert("a", 1);

        let mut overlay = Store::new();
        overlay.insert("c", 3);
        overlay.insert("b", 2);
        base.merge(overlay);

        assert_eq!(base.names(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut store = Store::new();
        store.insert("a", 1);
        store.clear();
        assert!(store.is_empty());
        assert!(store.names().is_empty());
    }
}
