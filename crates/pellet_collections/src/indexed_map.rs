use std::hash::Hash;
use std::{borrow::Borrow, collections::HashMap, ops::Index};

use thiserror::Error;

/// Returned by [`IndexedMap::try_insert`] when the key is already present.
/// Holds the rejected key and the index of the existing entry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("key is already present at index {index}")]
pub struct DuplicateKey<K> {
    pub key: K,
    pub index: usize,
}

/// A map which stores values in a dense vector, giving each one a stable index.
///
/// Values are never removed, so an index handed out by [`IndexedMap::insert`]
/// stays valid for the lifetime of the map and can be used as a lightweight
/// handle instead of hashing the key on every access.
#[derive(Debug, Clone)]
pub struct IndexedMap<K, V> {
    index_to_value: Vec<V>,
    index_to_key: Vec<K>,
    key_to_index: HashMap<K, usize>,
}

impl<K, V> Default for IndexedMap<K, V> {
    fn default() -> Self {
        Self {
            index_to_value: Default::default(),
            index_to_key: Default::default(),
            key_to_index: Default::default(),
        }
    }
}

impl<K, V> IndexedMap<K, V> {
    pub fn len(&self) -> usize {
        self.index_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_value.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.index_to_value.get(index)
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.index_to_key.get(index)
    }

    /// Iterates `(index, key, value)` in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &K, &V)> {
        self.index_to_key
            .iter()
            .zip(self.index_to_value.iter())
            .enumerate()
            .map(|(i, (k, v))| (i, k, v))
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.index_to_value.iter()
    }
}

impl<K: Eq + Hash + Clone, V> IndexedMap<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index_to_value: Vec::with_capacity(capacity),
            index_to_key: Vec::with_capacity(capacity),
            key_to_index: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.index_to_value.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.index_to_value.reserve(additional);
        self.index_to_key.reserve(additional);
        self.key_to_index.reserve(additional);
    }

    /// Inserts a value, replacing the previous one in place if the key exists.
    pub fn insert(&mut self, key: K, value: V) -> usize {
        match self.key_to_index.get(&key) {
            Some(&index) => {
                self.index_to_value[index] = value;
                index
            }
            None => self.push(key, value),
        }
    }

    /// Inserts a value only if the key is not present yet.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<usize, DuplicateKey<K>> {
        match self.key_to_index.get(&key) {
            Some(&index) => Err(DuplicateKey { key, index }),
            None => Ok(self.push(key, value)),
        }
    }

    fn push(&mut self, key: K, value: V) -> usize {
        let index = self.index_to_value.len();
        self.index_to_value.push(value);
        self.index_to_key.push(key.clone());
        self.key_to_index.insert(key, index);
        index
    }

    pub fn get_index<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.key_to_index.get(key).cloned()
    }

    pub fn get_by_key<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.get_index(key).map(|i| &self.index_to_value[i])
    }

    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.key_to_index.contains_key(key)
    }
}

impl<K, V> Index<usize> for IndexedMap<K, V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        &self.index_to_value[index]
    }
}

impl<K: Eq + Hash, V> Index<&K> for IndexedMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        let index = self.key_to_index[key];
        &self.index_to_value[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexes_are_stable() {
        let mut map = IndexedMap::default();
        let a = map.insert("a".to_string(), 1);
        let b = map.insert("b".to_string(), 2);
        let a2 = map.insert("a".to_string(), 3);

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(a, a2);
        assert_eq!(map[a], 3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_try_insert_rejects_duplicates() {
        let mut map = IndexedMap::default();
        map.try_insert("bat".to_string(), 1).unwrap();

        let err = map.try_insert("bat".to_string(), 2).unwrap_err();
        assert_eq!(err.key, "bat");
        assert_eq!(err.index, 0);
        assert_eq!(map.get_by_key("bat"), Some(&1));
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut map = IndexedMap::default();
        for (i, name) in ["c", "a", "b"].into_iter().enumerate() {
            map.insert(name.to_string(), i);
        }

        let keys: Vec<_> = map.iter().map(|(_, k, _)| k.as_str()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(map.key(2).map(String::as_str), Some("b"));
    }
}
