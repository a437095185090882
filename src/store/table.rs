//! Quad table: composite key -> original quad value

use super::interner::EntityId;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

/// Composite key of a stored quad: graph identifier plus interned components
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuadKey {
    pub graph: Arc<str>,
    pub subject: EntityId,
    pub predicate: EntityId,
    pub object: EntityId,
}

impl QuadKey {
    pub fn new(graph: Arc<str>, subject: EntityId, predicate: EntityId, object: EntityId) -> Self {
        Self {
            graph,
            subject,
            predicate,
            object,
        }
    }
}

/// Authoritative set of stored quads
///
/// Values are kept exactly as supplied, so payloads richer than the four
/// components come back unchanged. Iteration follows insertion order until
/// a removal swaps the last entry into the freed slot.
#[derive(Debug, Clone)]
pub struct QuadTable<Q> {
    quads: IndexMap<QuadKey, Q, FxBuildHasher>,
}

impl<Q> QuadTable<Q> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            quads: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Store a quad, replacing any previous value under the same key
    pub fn put(&mut self, key: QuadKey, quad: Q) {
        self.quads.insert(key, quad);
    }

    pub fn get(&self, key: &QuadKey) -> Option<&Q> {
        self.quads.get(key)
    }

    pub fn delete(&mut self, key: &QuadKey) -> Option<Q> {
        self.quads.swap_remove(key)
    }

    /// Number of distinct quads across all graphs
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Q> + '_ {
        self.quads.values()
    }
}

impl<Q> Default for QuadTable<Q> {
    fn default() -> Self {
        Self::new()
    }
}
