//! In-memory quad store
//!
//! Quads are partitioned by graph. Each partition keeps three layered
//! indexes over interned entity IDs (see [`index`]), and a single quad
//! table maps `(graph, subject, predicate, object)` back to the value the
//! caller added.
//!
//! # Example
//!
//! ```rust
//! use samyama_quadstore::{Quad, QuadPattern, QuadStore, Term};
//!
//! let mut store = QuadStore::new();
//!
//! let alice = Term::named_node("http://example.org/alice").unwrap();
//! let knows = Term::named_node("http://xmlns.com/foaf/0.1/knows").unwrap();
//! let bob = Term::named_node("http://example.org/bob").unwrap();
//!
//! assert!(store.add_quad(Quad::triple(alice.clone(), knows.clone(), bob.clone())));
//! assert!(!store.add_quad(Quad::triple(alice.clone(), knows.clone(), bob)));
//!
//! let pattern = QuadPattern::any().subject(&alice);
//! assert_eq!(store.count_quads(&pattern), 1);
//! assert_eq!(store.get_objects(&QuadPattern::any().predicate(&knows)).len(), 1);
//! ```

pub mod config;
pub mod index;
pub mod interner;
pub mod pattern;
pub mod table;

pub use config::StoreConfig;
pub use index::{GraphPartition, IndexOrder, TripleIndex};
pub use interner::{EntityId, EntityInterner};
pub use pattern::{select_index, QuadPattern};
pub use table::{QuadKey, QuadTable};

use crate::rdf::{decode, CodecError, DataFactory, EncodeTerm, Quad, QuadLike, TermFactory};
use indexmap::IndexMap;
use pattern::ResolvedPattern;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::ops::ControlFlow;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Quad store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Term could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Upstream failure while importing; committed quads stay in the store
    #[error("Import failed after {committed} quads: {source}")]
    Import {
        committed: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Component enumerated by the distinct-entity walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Subject,
    Predicate,
    Object,
}

/// In-memory RDF quad store
///
/// `Q` is the stored quad value, handed back by reference on lookup;
/// `F` builds the terms reported by the entity enumerations and by
/// [`QuadStore::create_blank_node`].
///
/// Mutation takes `&mut self`; share a store between threads behind a lock
/// (e.g. `Arc<RwLock<QuadStore>>`) so an update to the three indexes is
/// never observed half-way.
#[derive(Debug, Clone)]
pub struct QuadStore<Q = Quad, F = DataFactory> {
    /// Graph identifier -> its three indexes
    graphs: IndexMap<Arc<str>, GraphPartition, FxBuildHasher>,
    /// Composite key -> quad value
    quads: QuadTable<Q>,
    /// Entity identifier <-> ID
    interner: EntityInterner,
    /// Index of the last generated anonymous blank node
    blank_node_index: u64,
    blank_node_prefix: String,
    factory: F,
}

impl<Q: QuadLike> QuadStore<Q, DataFactory> {
    /// Create an empty store producing [`crate::Term`] values
    pub fn new() -> Self {
        Self::with_factory(DataFactory)
    }

    /// Create a store holding the given quads
    pub fn from_quads(quads: impl IntoIterator<Item = Q>) -> Self {
        let mut store = Self::new();
        store.add_quads(quads);
        store
    }
}

impl<Q: QuadLike, F: TermFactory + Default> Default for QuadStore<Q, F> {
    fn default() -> Self {
        Self::with_factory(F::default())
    }
}

impl<Q: QuadLike, F: TermFactory> QuadStore<Q, F> {
    /// Create an empty store that builds terms with `factory`
    pub fn with_factory(factory: F) -> Self {
        Self::with_config(factory, StoreConfig::default())
    }

    pub fn with_config(factory: F, config: StoreConfig) -> Self {
        Self {
            graphs: IndexMap::with_hasher(FxBuildHasher),
            quads: QuadTable::with_capacity(config.quad_capacity),
            interner: EntityInterner::new(),
            blank_node_index: 0,
            blank_node_prefix: config.blank_node_prefix,
            factory,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Number of quads in the store
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Number of graphs holding at least one quad
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Number of entities interned so far, including ones no quad uses anymore
    pub fn entity_count(&self) -> usize {
        self.interner.len()
    }

    /// All stored quads
    pub fn iter(&self) -> impl Iterator<Item = &Q> + '_ {
        self.quads.iter()
    }

    /// Add a quad.
    /// Returns whether the store grew, i.e. the quad was not present yet.
    ///
    /// Adding a quad that is already present replaces the stored value.
    pub fn add_quad(&mut self, quad: Q) -> bool {
        let (key, changed) = {
            let graph = quad.graph().encode_term();
            let subject = self.interner.resolve(&quad.subject().encode_term());
            let predicate = self.interner.resolve(&quad.predicate().encode_term());
            let object = self.interner.resolve(&quad.object().encode_term());

            let partition = self.partition_mut(&graph);
            let changed = partition.insert(subject, predicate, object);
            let key = QuadKey::new(Arc::clone(partition.name()), subject, predicate, object);
            (key, changed)
        };
        trace!(graph = %key.graph, changed, "add quad");
        self.quads.put(key, quad);
        changed
    }

    /// Add several quads; returns how many were new
    pub fn add_quads(&mut self, quads: impl IntoIterator<Item = Q>) -> usize {
        quads
            .into_iter()
            .map(|quad| self.add_quad(quad))
            .filter(|&changed| changed)
            .count()
    }

    fn partition_mut(&mut self, graph: &str) -> &mut GraphPartition {
        let index = match self.graphs.get_index_of(graph) {
            Some(index) => index,
            None => {
                debug!(graph, "creating graph partition");
                let name: Arc<str> = Arc::from(graph);
                self.graphs
                    .insert_full(Arc::clone(&name), GraphPartition::new(name))
                    .0
            }
        };
        &mut self.graphs[index]
    }

    /// Remove a quad; returns whether it was present
    pub fn remove_quad(&mut self, quad: &Q) -> bool {
        self.remove_quad_components(quad.subject(), quad.predicate(), quad.object(), quad.graph())
    }

    /// Remove the quad with the given components; returns whether it was present.
    ///
    /// Components the store has never seen simply mean there is nothing to remove.
    pub fn remove_quad_components<S, P, O, G>(
        &mut self,
        subject: &S,
        predicate: &P,
        object: &O,
        graph: &G,
    ) -> bool
    where
        S: EncodeTerm + ?Sized,
        P: EncodeTerm + ?Sized,
        O: EncodeTerm + ?Sized,
        G: EncodeTerm + ?Sized,
    {
        let (Some(subject), Some(predicate), Some(object)) = (
            self.interner.lookup(&subject.encode_term()),
            self.interner.lookup(&predicate.encode_term()),
            self.interner.lookup(&object.encode_term()),
        ) else {
            return false;
        };
        let graph = graph.encode_term();
        let Some((graph, _)) = self.graphs.get_key_value(&*graph) else {
            return false;
        };
        let key = QuadKey::new(Arc::clone(graph), subject, predicate, object);
        self.remove_key(&key)
    }

    fn remove_key(&mut self, key: &QuadKey) -> bool {
        let Some(index) = self.graphs.get_index_of(&*key.graph) else {
            return false;
        };
        let partition = &mut self.graphs[index];
        if !partition.remove(key.subject, key.predicate, key.object) {
            return false;
        }
        let emptied = partition.is_empty();

        self.quads.delete(key);
        trace!(graph = %key.graph, "remove quad");
        if emptied {
            debug!(graph = %key.graph, "dropping empty graph partition");
            self.graphs.shift_remove_index(index);
        }
        true
    }

    /// Remove several quads; returns how many were present
    pub fn remove_quads<'q>(&mut self, quads: impl IntoIterator<Item = &'q Q>) -> usize
    where
        Q: 'q,
    {
        quads
            .into_iter()
            .map(|quad| self.remove_quad(quad))
            .filter(|&removed| removed)
            .count()
    }

    /// Remove every quad matching the pattern; returns how many were removed
    pub fn remove_matches(&mut self, pattern: &QuadPattern<'_>) -> usize {
        let mut keys = Vec::new();
        let _ = self.visit_keys(pattern, |key| {
            keys.push(key);
            ControlFlow::Continue(())
        });
        keys.iter().filter(|key| self.remove_key(key)).count()
    }

    /// Whether the store holds the quad
    pub fn has_quad(&self, quad: &Q) -> bool {
        let (Some(subject), Some(predicate), Some(object)) = (
            self.interner.lookup(&quad.subject().encode_term()),
            self.interner.lookup(&quad.predicate().encode_term()),
            self.interner.lookup(&quad.object().encode_term()),
        ) else {
            return false;
        };
        let graph = quad.graph().encode_term();
        self.graphs
            .get(&*graph)
            .is_some_and(|partition| partition.contains(subject, predicate, object))
    }

    /// Partitions a pattern's graph component selects
    fn partitions<'s>(&'s self, graph: Option<&str>) -> impl Iterator<Item = &'s GraphPartition> + 's {
        let (all, single) = match graph {
            None => (Some(self.graphs.values()), None),
            Some(graph) => (None, self.graphs.get(graph)),
        };
        all.into_iter().flatten().chain(single)
    }

    /// Walk the keys of all quads matching the pattern, graph by graph
    fn visit_keys<V>(&self, pattern: &QuadPattern<'_>, mut visitor: V) -> ControlFlow<()>
    where
        V: FnMut(QuadKey) -> ControlFlow<()>,
    {
        let Some(resolved) = pattern.resolve(&self.interner) else {
            return ControlFlow::Continue(());
        };
        let (order, [key0, key1, key2]) = resolved.plan();

        for partition in self.partitions(resolved.graph) {
            let graph = partition.name();
            partition.index(order).find(key0, key1, key2, &mut |keys| {
                let (subject, predicate, object) = order.to_spo(keys);
                visitor(QuadKey::new(Arc::clone(graph), subject, predicate, object))
            })?;
        }
        ControlFlow::Continue(())
    }

    /// Walk all quads matching the pattern, stopping when the visitor breaks
    fn visit<'s, V>(&'s self, pattern: &QuadPattern<'_>, mut visitor: V) -> ControlFlow<()>
    where
        V: FnMut(&'s Q) -> ControlFlow<()>,
    {
        self.visit_keys(pattern, |key| match self.quads.get(&key) {
            Some(quad) => visitor(quad),
            None => ControlFlow::Continue(()),
        })
    }

    /// All quads matching the pattern
    pub fn get_quads(&self, pattern: &QuadPattern<'_>) -> Vec<&Q> {
        let mut quads = Vec::new();
        let _ = self.visit(pattern, |quad| {
            quads.push(quad);
            ControlFlow::Continue(())
        });
        quads
    }

    /// Number of quads matching the pattern, without touching the quad table
    pub fn count_quads(&self, pattern: &QuadPattern<'_>) -> usize {
        let Some(resolved) = pattern.resolve(&self.interner) else {
            return 0;
        };
        let (order, [key0, key1, key2]) = resolved.plan();
        self.partitions(resolved.graph)
            .map(|partition| partition.index(order).count(key0, key1, key2))
            .sum()
    }

    /// Whether the predicate holds for any matching quad.
    ///
    /// Stops at the first quad it holds for.
    pub fn some<P>(&self, pattern: &QuadPattern<'_>, mut predicate: P) -> bool
    where
        P: FnMut(&Q) -> bool,
    {
        self.visit(pattern, |quad| {
            if predicate(quad) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Call the visitor on every matching quad
    pub fn for_each<V>(&self, pattern: &QuadPattern<'_>, mut visitor: V)
    where
        V: FnMut(&Q),
    {
        let _ = self.visit(pattern, |quad| {
            visitor(quad);
            ControlFlow::Continue(())
        });
    }

    /// Whether the predicate holds for all matching quads.
    ///
    /// Unlike `Iterator::all`, an empty match set yields `false`.
    /// Stops at the first quad the predicate fails for.
    pub fn every<P>(&self, pattern: &QuadPattern<'_>, mut predicate: P) -> bool
    where
        P: FnMut(&Q) -> bool,
    {
        let mut matched = false;
        let failed = self.some(pattern, |quad| {
            matched = true;
            !predicate(quad)
        });
        matched && !failed
    }

    /// Visit each distinct entity in one component of the matching quads
    fn for_entities<V>(&self, component: Component, pattern: &QuadPattern<'_>, mut visitor: V)
    where
        V: FnMut(EntityId),
    {
        let Some(resolved) = pattern.resolve(&self.interner) else {
            return;
        };
        let ResolvedPattern {
            subject,
            predicate,
            object,
            graph,
        } = resolved;

        // Walk only as deep as needed to reach the wanted component
        let (order, key0, key1, wanted) = match component {
            Component::Subject => match (predicate, object) {
                (Some(_), Some(_)) => (IndexOrder::Predicates, predicate, object, subject),
                (Some(_), None) => (IndexOrder::Subjects, None, predicate, subject),
                (None, Some(_)) => (IndexOrder::Objects, object, None, subject),
                (None, None) => (IndexOrder::Subjects, None, None, subject),
            },
            Component::Predicate => match (subject, object) {
                (Some(_), Some(_)) => (IndexOrder::Objects, object, subject, predicate),
                (Some(_), None) => (IndexOrder::Subjects, subject, None, predicate),
                (None, Some(_)) => (IndexOrder::Predicates, None, object, predicate),
                (None, None) => (IndexOrder::Predicates, None, None, predicate),
            },
            Component::Object => match (subject, predicate) {
                (Some(_), Some(_)) => (IndexOrder::Subjects, subject, predicate, object),
                (Some(_), None) => (IndexOrder::Objects, None, subject, object),
                (None, Some(_)) => (IndexOrder::Predicates, predicate, None, object),
                (None, None) => (IndexOrder::Objects, None, None, object),
            },
        };

        let mut seen = FxHashSet::default();
        for partition in self.partitions(graph) {
            partition.index(order).for_each_key(key0, key1, |id| {
                if wanted.map_or(true, |wanted| wanted == id) && seen.insert(id) {
                    visitor(id);
                }
            });
        }
    }

    fn for_decoded<V>(&self, component: Component, pattern: &QuadPattern<'_>, mut visitor: V)
    where
        V: FnMut(F::Term),
    {
        self.for_entities(component, pattern, |id| {
            visitor(decode(self.interner.reverse(id), &self.factory))
        });
    }

    /// Call the visitor once per distinct subject of the matching quads
    pub fn for_subjects<V: FnMut(F::Term)>(&self, pattern: &QuadPattern<'_>, visitor: V) {
        self.for_decoded(Component::Subject, pattern, visitor);
    }

    /// Call the visitor once per distinct predicate of the matching quads
    pub fn for_predicates<V: FnMut(F::Term)>(&self, pattern: &QuadPattern<'_>, visitor: V) {
        self.for_decoded(Component::Predicate, pattern, visitor);
    }

    /// Call the visitor once per distinct object of the matching quads
    pub fn for_objects<V: FnMut(F::Term)>(&self, pattern: &QuadPattern<'_>, visitor: V) {
        self.for_decoded(Component::Object, pattern, visitor);
    }

    /// Call the visitor once per graph containing a matching quad
    pub fn for_graphs<V: FnMut(F::Term)>(&self, pattern: &QuadPattern<'_>, mut visitor: V) {
        let Some(resolved) = pattern.resolve(&self.interner) else {
            return;
        };
        let (order, [key0, key1, key2]) = resolved.plan();
        for partition in self.partitions(resolved.graph) {
            let found = partition
                .index(order)
                .find(key0, key1, key2, &mut |_| ControlFlow::Break(()))
                .is_break();
            if found {
                visitor(decode(partition.name(), &self.factory));
            }
        }
    }

    /// Distinct subjects of the matching quads
    pub fn get_subjects(&self, pattern: &QuadPattern<'_>) -> Vec<F::Term> {
        let mut subjects = Vec::new();
        self.for_subjects(pattern, |term| subjects.push(term));
        subjects
    }

    /// Distinct predicates of the matching quads
    pub fn get_predicates(&self, pattern: &QuadPattern<'_>) -> Vec<F::Term> {
        let mut predicates = Vec::new();
        self.for_predicates(pattern, |term| predicates.push(term));
        predicates
    }

    /// Distinct objects of the matching quads
    pub fn get_objects(&self, pattern: &QuadPattern<'_>) -> Vec<F::Term> {
        let mut objects = Vec::new();
        self.for_objects(pattern, |term| objects.push(term));
        objects
    }

    /// Graphs containing a matching quad
    pub fn get_graphs(&self, pattern: &QuadPattern<'_>) -> Vec<F::Term> {
        let mut graphs = Vec::new();
        self.for_graphs(pattern, |term| graphs.push(term));
        graphs
    }

    /// Create a blank node that no stored entity uses.
    ///
    /// Without a suggestion the label is `{prefix}{n}` with a growing `n`;
    /// with one it is the suggestion itself, or the suggestion followed by
    /// the first free number. The label is reserved right away.
    pub fn create_blank_node(&mut self, suggested: Option<&str>) -> F::Term {
        let name = match suggested.filter(|suggested| !suggested.is_empty()) {
            Some(suggested) => {
                let base = format!("_:{}", suggested);
                let mut name = base.clone();
                let mut index = 1u64;
                while self.interner.contains(&name) {
                    name = format!("{}{}", base, index);
                    index += 1;
                }
                name
            }
            None => loop {
                let name = format!("_:{}{}", self.blank_node_prefix, self.blank_node_index);
                self.blank_node_index += 1;
                if !self.interner.contains(&name) {
                    break name;
                }
            },
        };

        self.interner.resolve(&name);
        debug!(blank_node = %name, "reserved blank node");
        self.factory.blank_node(&name[2..])
    }
}

impl<Q: QuadLike, F: TermFactory> Extend<Q> for QuadStore<Q, F> {
    fn extend<I: IntoIterator<Item = Q>>(&mut self, quads: I) {
        self.add_quads(quads);
    }
}

impl<Q: QuadLike, F: TermFactory + Default> FromIterator<Q> for QuadStore<Q, F> {
    fn from_iter<I: IntoIterator<Item = Q>>(quads: I) -> Self {
        let mut store = Self::default();
        store.add_quads(quads);
        store
    }
}
