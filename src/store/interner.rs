//! Entity interning
//!
//! Entities are often long IRIs, so the indexes never store them directly:
//! each distinct identifier gets a small integer, and the indexes key on that.

use rustc_hash::FxHashMap;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;

/// Interned entity identifier
///
/// IDs start at 1; zero is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(NonZeroU64);

impl EntityId {
    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Bidirectional identifier <-> [`EntityId`] table
///
/// Grows monotonically: IDs are never reclaimed, even once no quad
/// references them anymore.
#[derive(Debug, Clone, Default)]
pub struct EntityInterner {
    ids: FxHashMap<Arc<str>, EntityId>,
    /// `entities[id - 1]` is the identifier of `id`
    entities: Vec<Arc<str>>,
}

impl EntityInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing ID of the identifier, or a freshly allocated one
    pub fn resolve(&mut self, identifier: &str) -> EntityId {
        if let Some(&id) = self.ids.get(identifier) {
            return id;
        }
        let next = NonZeroU64::MIN.saturating_add(self.entities.len() as u64);
        let id = EntityId(next);
        let identifier: Arc<str> = Arc::from(identifier);
        self.entities.push(Arc::clone(&identifier));
        self.ids.insert(identifier, id);
        id
    }

    /// Read-only probe; `None` if the identifier was never interned
    pub fn lookup(&self, identifier: &str) -> Option<EntityId> {
        self.ids.get(identifier).copied()
    }

    /// Identifier of an allocated ID
    pub fn reverse(&self, id: EntityId) -> &str {
        // Only this interner mints IDs, and its table never shrinks
        &self.entities[(id.as_u64() - 1) as usize]
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.ids.contains_key(identifier)
    }

    /// Number of interned entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
