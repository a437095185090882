//! Three-layered indexes
//!
//! Every graph owns three indexes over the same triples, each nesting the
//! components in a different order:
//! - subjects:   subject -> predicate -> object
//! - predicates: predicate -> object -> subject
//! - objects:    object -> subject -> predicate
//!
//! This allows O(1) existence tests and keeps the first levels narrow for
//! any combination of bound components.

use super::interner::EntityId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::ControlFlow;
use std::sync::Arc;

type Level2 = FxHashSet<EntityId>;
type Level1 = FxHashMap<EntityId, Level2>;

/// Component nesting of a [`TripleIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrder {
    /// subject, predicate, object
    Subjects,
    /// predicate, object, subject
    Predicates,
    /// object, subject, predicate
    Objects,
}

impl IndexOrder {
    /// Arrange subject/predicate/object values into this index's key order
    pub fn keys<T>(self, subject: T, predicate: T, object: T) -> [T; 3] {
        match self {
            IndexOrder::Subjects => [subject, predicate, object],
            IndexOrder::Predicates => [predicate, object, subject],
            IndexOrder::Objects => [object, subject, predicate],
        }
    }

    /// Inverse of [`IndexOrder::keys`]: back to (subject, predicate, object)
    pub fn to_spo<T>(self, keys: [T; 3]) -> (T, T, T) {
        let [k0, k1, k2] = keys;
        match self {
            IndexOrder::Subjects => (k0, k1, k2),
            IndexOrder::Predicates => (k2, k0, k1),
            IndexOrder::Objects => (k1, k2, k0),
        }
    }
}

/// Nested `key0 -> key1 -> {key2}` mapping
///
/// Empty inner levels are pruned on removal, so a present key always has at
/// least one leaf beneath it.
#[derive(Debug, Clone, Default)]
pub struct TripleIndex {
    root: FxHashMap<EntityId, Level1>,
}

impl TripleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, creating levels as needed.
    /// Returns whether the entry is new.
    pub fn insert(&mut self, key0: EntityId, key1: EntityId, key2: EntityId) -> bool {
        self.root
            .entry(key0)
            .or_default()
            .entry(key1)
            .or_default()
            .insert(key2)
    }

    /// Remove an entry and any level it leaves empty.
    /// Returns whether the entry existed.
    pub fn remove(&mut self, key0: EntityId, key1: EntityId, key2: EntityId) -> bool {
        let Some(level1) = self.root.get_mut(&key0) else {
            return false;
        };
        let Some(level2) = level1.get_mut(&key1) else {
            return false;
        };
        if !level2.remove(&key2) {
            return false;
        }

        if level2.is_empty() {
            level1.remove(&key1);
            if level1.is_empty() {
                self.root.remove(&key0);
            }
        }
        true
    }

    pub fn contains(&self, key0: EntityId, key1: EntityId, key2: EntityId) -> bool {
        self.root
            .get(&key0)
            .and_then(|level1| level1.get(&key1))
            .is_some_and(|level2| level2.contains(&key2))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk all entries matching the keys; `None` is a wildcard.
    ///
    /// Entries are reported in key order `[key0, key1, key2]`. The walk stops
    /// as soon as the visitor breaks, and the break is passed on.
    pub fn find<F>(
        &self,
        key0: Option<EntityId>,
        key1: Option<EntityId>,
        key2: Option<EntityId>,
        visitor: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut([EntityId; 3]) -> ControlFlow<()>,
    {
        match key0 {
            Some(k0) => match self.root.get(&k0) {
                Some(level1) => Self::find_in_level1(k0, level1, key1, key2, visitor),
                None => ControlFlow::Continue(()),
            },
            None => {
                for (&k0, level1) in &self.root {
                    Self::find_in_level1(k0, level1, key1, key2, visitor)?;
                }
                ControlFlow::Continue(())
            }
        }
    }

    fn find_in_level1<F>(
        k0: EntityId,
        level1: &Level1,
        key1: Option<EntityId>,
        key2: Option<EntityId>,
        visitor: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut([EntityId; 3]) -> ControlFlow<()>,
    {
        match key1 {
            Some(k1) => match level1.get(&k1) {
                Some(level2) => Self::find_in_level2(k0, k1, level2, key2, visitor),
                None => ControlFlow::Continue(()),
            },
            None => {
                for (&k1, level2) in level1 {
                    Self::find_in_level2(k0, k1, level2, key2, visitor)?;
                }
                ControlFlow::Continue(())
            }
        }
    }

    fn find_in_level2<F>(
        k0: EntityId,
        k1: EntityId,
        level2: &Level2,
        key2: Option<EntityId>,
        visitor: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut([EntityId; 3]) -> ControlFlow<()>,
    {
        match key2 {
            Some(k2) if level2.contains(&k2) => visitor([k0, k1, k2]),
            Some(_) => ControlFlow::Continue(()),
            None => {
                for &k2 in level2 {
                    visitor([k0, k1, k2])?;
                }
                ControlFlow::Continue(())
            }
        }
    }

    /// Number of entries matching the keys; `None` is a wildcard
    pub fn count(
        &self,
        key0: Option<EntityId>,
        key1: Option<EntityId>,
        key2: Option<EntityId>,
    ) -> usize {
        let count_level2 = |level2: &Level2| match key2 {
            Some(k2) => usize::from(level2.contains(&k2)),
            None => level2.len(),
        };
        let count_level1 = |level1: &Level1| match key1 {
            Some(k1) => level1.get(&k1).map_or(0, count_level2),
            None => level1.values().map(count_level2).sum(),
        };

        match key0 {
            Some(k0) => self.root.get(&k0).map_or(0, count_level1),
            None => self.root.values().map(count_level1).sum(),
        }
    }

    /// Visit the keys of one level, at most two levels deep:
    /// - no keys: every key0
    /// - key0: every key1 beneath it
    /// - key1: every key0 that has key1 beneath it
    /// - key0 and key1: every key2 beneath them
    pub fn for_each_key<F>(&self, key0: Option<EntityId>, key1: Option<EntityId>, mut visitor: F)
    where
        F: FnMut(EntityId),
    {
        match (key0, key1) {
            (None, None) => self.root.keys().copied().for_each(visitor),
            (Some(k0), None) => {
                if let Some(level1) = self.root.get(&k0) {
                    level1.keys().copied().for_each(visitor);
                }
            }
            (None, Some(k1)) => {
                for (&k0, level1) in &self.root {
                    if level1.contains_key(&k1) {
                        visitor(k0);
                    }
                }
            }
            (Some(k0), Some(k1)) => {
                if let Some(level2) = self.root.get(&k0).and_then(|level1| level1.get(&k1)) {
                    level2.iter().copied().for_each(visitor);
                }
            }
        }
    }
}

/// The three indexes holding every triple of one graph
#[derive(Debug, Clone)]
pub struct GraphPartition {
    name: Arc<str>,
    subjects: TripleIndex,
    predicates: TripleIndex,
    objects: TripleIndex,
}

impl GraphPartition {
    pub fn new(name: Arc<str>) -> Self {
        Self {
            name,
            subjects: TripleIndex::new(),
            predicates: TripleIndex::new(),
            objects: TripleIndex::new(),
        }
    }

    /// Graph identifier (empty for the default graph)
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn index(&self, order: IndexOrder) -> &TripleIndex {
        match order {
            IndexOrder::Subjects => &self.subjects,
            IndexOrder::Predicates => &self.predicates,
            IndexOrder::Objects => &self.objects,
        }
    }

    /// Add a triple to all three indexes.
    ///
    /// The subject index decides whether the triple is new; the other two
    /// are kept in lockstep with it.
    pub fn insert(&mut self, subject: EntityId, predicate: EntityId, object: EntityId) -> bool {
        let changed = self.subjects.insert(subject, predicate, object);
        self.predicates.insert(predicate, object, subject);
        self.objects.insert(object, subject, predicate);
        changed
    }

    /// Remove a triple from all three indexes
    pub fn remove(&mut self, subject: EntityId, predicate: EntityId, object: EntityId) -> bool {
        if !self.subjects.remove(subject, predicate, object) {
            return false;
        }
        self.predicates.remove(predicate, object, subject);
        self.objects.remove(object, subject, predicate);
        true
    }

    pub fn contains(&self, subject: EntityId, predicate: EntityId, object: EntityId) -> bool {
        self.subjects.contains(subject, predicate, object)
    }

    /// A partition without subjects holds no triples at all
    pub fn is_empty(&self) -> bool {
        let empty = self.subjects.is_empty();
        debug_assert!(
            !empty || (self.predicates.is_empty() && self.objects.is_empty()),
            "graph partition {:?} has predicate/object entries without subjects",
            self.name
        );
        empty
    }

    /// Number of triples in this graph
    pub fn len(&self) -> usize {
        self.subjects.count(None, None, None)
    }
}
