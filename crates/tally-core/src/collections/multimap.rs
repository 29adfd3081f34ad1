//! Key to ordered-values index
//!
//! Used to group transactions by category or by normalized description.
//! Keys iterate in first-insertion order; values keep their append order
//! and are never deduplicated.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    entries: Vec<(K, Vec<V>)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the key's sequence, creating it if absent
    pub fn set(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// Values for a key, or an empty slice if the key was never set
    pub fn get(&self, key: &K) -> &[V] {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// (key, values) pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(k, vs)| (k, vs.as_slice()))
    }

    /// Sum of the key's values through `projector`; 0 when absent
    pub fn total_by<F>(&self, key: &K, projector: F) -> f64
    where
        F: Fn(&V) -> f64,
    {
        self.get(key).iter().map(projector).sum()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for MultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
