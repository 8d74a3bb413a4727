//! Position indexes for quad lookups.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Identifier of a stored quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadId(u64);

/// Allocator for quad identifiers.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn alloc(&mut self) -> QuadId {
        let id = QuadId(self.next);
        self.next += 1;
        id
    }
}

/// Index from one quad position to the quads holding that value:
/// K -> Set<QuadId>
#[derive(Debug)]
pub struct PositionIndex<K> {
    index: HashMap<K, HashSet<QuadId>>,
}

impl<K> Default for PositionIndex<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> PositionIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &K, id: QuadId) {
        self.index.entry(key.clone()).or_default().insert(id);
    }

    pub fn remove(&mut self, key: &K, id: QuadId) {
        if let Some(set) = self.index.get_mut(key) {
            set.remove(&id);
            if set.is_empty() {
                self.index.remove(key);
            }
        }
    }

    /// The quads holding `key`, or `None` if there are none.
    pub fn get(&self, key: &K) -> Option<&HashSet<QuadId>> {
        self.index.get(key)
    }

    /// Number of quads holding `key`.
    pub fn count(&self, key: &K) -> usize {
        self.index.get(key).map_or(0, HashSet::len)
    }

    /// Iterate over all indexed keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }
}
