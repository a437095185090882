//! Dataset: set algebra over a quad store
//!
//! A [`Dataset`] owns a [`QuadStore`] and adds whole-dataset operations
//! (union, intersection, filter, map...). Derived datasets are built with a
//! clone of the source's term factory.
//!
//! Equality and containment compare quads by their term identifiers; two
//! datasets that differ only by blank node labels are not equal.

mod stream;

use crate::rdf::{DataFactory, Quad, QuadLike, TermFactory};
use crate::store::{QuadPattern, QuadStore};

/// Quad dataset backed by a [`QuadStore`]
#[derive(Debug, Clone)]
pub struct Dataset<Q = Quad, F = DataFactory> {
    store: QuadStore<Q, F>,
}

impl<Q: QuadLike> Dataset<Q, DataFactory> {
    pub fn new() -> Self {
        Self::with_factory(DataFactory)
    }

    pub fn from_quads(quads: impl IntoIterator<Item = Q>) -> Self {
        Self::from_store(QuadStore::from_quads(quads))
    }
}

impl<Q: QuadLike, F: TermFactory + Default> Default for Dataset<Q, F> {
    fn default() -> Self {
        Self::from_store(QuadStore::default())
    }
}

impl<Q: QuadLike, F: TermFactory> Dataset<Q, F> {
    pub fn with_factory(factory: F) -> Self {
        Self::from_store(QuadStore::with_factory(factory))
    }

    pub fn from_store(store: QuadStore<Q, F>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &QuadStore<Q, F> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut QuadStore<Q, F> {
        &mut self.store
    }

    pub fn into_store(self) -> QuadStore<Q, F> {
        self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Q> + '_ {
        self.store.iter()
    }

    pub fn add(&mut self, quad: Q) -> &mut Self {
        self.store.add_quad(quad);
        self
    }

    pub fn add_all(&mut self, quads: impl IntoIterator<Item = Q>) -> &mut Self {
        self.store.add_quads(quads);
        self
    }

    pub fn delete(&mut self, quad: &Q) -> &mut Self {
        self.store.remove_quad(quad);
        self
    }

    pub fn has(&self, quad: &Q) -> bool {
        self.store.has_quad(quad)
    }

    /// Remove every quad matching the pattern
    pub fn remove_matches(&mut self, pattern: &QuadPattern<'_>) -> &mut Self {
        self.store.remove_matches(pattern);
        self
    }

    pub fn some<P: FnMut(&Q) -> bool>(&self, predicate: P) -> bool {
        self.store.some(&QuadPattern::any(), predicate)
    }

    /// Whether the predicate holds for every quad; `false` when empty
    pub fn every<P: FnMut(&Q) -> bool>(&self, predicate: P) -> bool {
        self.store.every(&QuadPattern::any(), predicate)
    }

    pub fn for_each<V: FnMut(&Q)>(&self, visitor: V) {
        self.store.for_each(&QuadPattern::any(), visitor);
    }

    pub fn reduce<A, R>(&self, init: A, reducer: R) -> A
    where
        R: FnMut(A, &Q) -> A,
    {
        self.iter().fold(init, reducer)
    }

    /// Whether every quad of `other` is in this dataset
    pub fn contains<G: TermFactory>(&self, other: &Dataset<Q, G>) -> bool {
        other.len() <= self.len() && other.iter().all(|quad| self.has(quad))
    }

    /// Same quads on both sides, compared by identifier
    pub fn equals<G: TermFactory>(&self, other: &Dataset<Q, G>) -> bool {
        self.len() == other.len() && self.contains(other)
    }
}

impl<Q: QuadLike + Clone, F: TermFactory + Clone> Dataset<Q, F> {
    /// New dataset of `quads`, sharing this one's factory
    fn derive<R: QuadLike>(&self, quads: impl IntoIterator<Item = R>) -> Dataset<R, F> {
        let mut store = QuadStore::with_factory(self.store.factory().clone());
        store.add_quads(quads);
        Dataset { store }
    }

    pub fn to_vec(&self) -> Vec<Q> {
        self.iter().cloned().collect()
    }

    /// New dataset holding the quads matching the pattern
    pub fn match_pattern(&self, pattern: &QuadPattern<'_>) -> Self {
        self.derive(self.store.get_quads(pattern).into_iter().cloned())
    }

    /// Add every quad of `other` to this dataset
    pub fn merge<G: TermFactory>(&mut self, other: &Dataset<Q, G>) -> &mut Self {
        self.add_all(other.iter().cloned())
    }

    pub fn union<G: TermFactory>(&self, other: &Dataset<Q, G>) -> Self {
        let mut union = self.clone();
        union.merge(other);
        union
    }

    pub fn intersection<G: TermFactory>(&self, other: &Dataset<Q, G>) -> Self {
        self.filter(|quad| other.has(quad))
    }

    pub fn difference<G: TermFactory>(&self, other: &Dataset<Q, G>) -> Self {
        self.filter(|quad| !other.has(quad))
    }

    pub fn filter<P: FnMut(&Q) -> bool>(&self, mut predicate: P) -> Self {
        self.derive(self.iter().filter(|quad| predicate(quad)).cloned())
    }

    /// New dataset of the mapped quads; quads mapped onto the same
    /// components collapse into one
    pub fn map<R, M>(&self, mapper: M) -> Dataset<R, F>
    where
        R: QuadLike,
        M: FnMut(&Q) -> R,
    {
        self.derive(self.iter().map(mapper))
    }
}

impl<Q: QuadLike, F: TermFactory, G: TermFactory> PartialEq<Dataset<Q, G>>
    for Dataset<Q, F>
{
    fn eq(&self, other: &Dataset<Q, G>) -> bool {
        self.equals(other)
    }
}

impl<Q: QuadLike, F: TermFactory> Extend<Q> for Dataset<Q, F> {
    fn extend<I: IntoIterator<Item = Q>>(&mut self, quads: I) {
        self.add_all(quads);
    }
}

impl<Q: QuadLike, F: TermFactory + Default> FromIterator<Q> for Dataset<Q, F> {
    fn from_iter<I: IntoIterator<Item = Q>>(quads: I) -> Self {
        Self::from_store(quads.into_iter().collect())
    }
}

impl<Q: QuadLike, F: TermFactory> From<QuadStore<Q, F>> for Dataset<Q, F> {
    fn from(store: QuadStore<Q, F>) -> Self {
        Self { store }
    }
}
