use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// A map which associates a set of values to each key.
#[derive(Debug)]
pub struct MultiMap<K, V> {
    map: FxHashMap<K, FxHashSet<V>>,
    empty: FxHashSet<V>,
}

impl<K, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.map.values().flatten()
    }
}

impl<K, V> MultiMap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    pub fn get<Q>(&self, key: &Q) -> &FxHashSet<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key).unwrap_or(&self.empty)
    }

    /// Adds a mapping from a key to a value. Returns whether it is new.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.map.entry(key).or_default().insert(value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        !self.get(key).is_empty()
    }
}

impl<K, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            empty: FxHashSet::default(),
        }
    }
}
