//! Quad patterns and index selection

use super::index::IndexOrder;
use super::interner::{EntityId, EntityInterner};
use crate::rdf::{EncodeTerm, QuadLike};
use std::borrow::Cow;

/// Quad pattern for queries; an unset component is a wildcard
///
/// Bound components are held as encoded identifiers, borrowed from the terms
/// where possible.
///
/// ```rust
/// use samyama_quadstore::{QuadPattern, Term};
///
/// let alice = Term::named_node("http://example.org/alice").unwrap();
/// let pattern = QuadPattern::any().subject(&alice).in_default_graph();
/// assert!(pattern.is_bound_subject());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadPattern<'a> {
    subject: Option<Cow<'a, str>>,
    predicate: Option<Cow<'a, str>>,
    object: Option<Cow<'a, str>>,
    graph: Option<Cow<'a, str>>,
}

impl<'a> QuadPattern<'a> {
    /// Pattern matching every quad in every graph
    pub fn any() -> Self {
        Self::default()
    }

    /// Pattern matching exactly the given quad
    pub fn from_quad<Q: QuadLike + ?Sized>(quad: &'a Q) -> Self {
        Self {
            subject: Some(quad.subject().encode_term()),
            predicate: Some(quad.predicate().encode_term()),
            object: Some(quad.object().encode_term()),
            graph: Some(quad.graph().encode_term()),
        }
    }

    pub fn subject<T: EncodeTerm + ?Sized>(mut self, term: &'a T) -> Self {
        self.subject = Some(term.encode_term());
        self
    }

    pub fn predicate<T: EncodeTerm + ?Sized>(mut self, term: &'a T) -> Self {
        self.predicate = Some(term.encode_term());
        self
    }

    pub fn object<T: EncodeTerm + ?Sized>(mut self, term: &'a T) -> Self {
        self.object = Some(term.encode_term());
        self
    }

    pub fn graph<T: EncodeTerm + ?Sized>(mut self, term: &'a T) -> Self {
        self.graph = Some(term.encode_term());
        self
    }

    /// Restrict the pattern to the default graph
    pub fn in_default_graph(mut self) -> Self {
        self.graph = Some(Cow::Borrowed(""));
        self
    }

    pub fn is_bound_subject(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn predicate_id(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object.as_deref()
    }

    pub fn graph_id(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    /// Translate bound components into entity IDs.
    ///
    /// `None` when a bound component was never interned: nothing can match.
    pub(crate) fn resolve(&self, interner: &EntityInterner) -> Option<ResolvedPattern<'_>> {
        let probe = |id: Option<&str>| match id {
            Some(id) => interner.lookup(id).map(Some),
            None => Some(None),
        };
        Some(ResolvedPattern {
            subject: probe(self.subject_id())?,
            predicate: probe(self.predicate_id())?,
            object: probe(self.object_id())?,
            graph: self.graph_id(),
        })
    }
}

/// Pattern with its bound components translated to entity IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedPattern<'p> {
    pub subject: Option<EntityId>,
    pub predicate: Option<EntityId>,
    pub object: Option<EntityId>,
    pub graph: Option<&'p str>,
}

impl ResolvedPattern<'_> {
    /// Index to walk and its keys for this pattern
    pub fn plan(&self) -> (IndexOrder, [Option<EntityId>; 3]) {
        let order = select_index(
            self.subject.is_some(),
            self.predicate.is_some(),
            self.object.is_some(),
        );
        (order, order.keys(self.subject, self.predicate, self.object))
    }
}

/// Choose the index whose leading levels cover the bound components.
///
/// Fixed heuristic: with subject and object known the object index avoids
/// scanning the (usually largest) subject index.
pub fn select_index(subject: bool, predicate: bool, object: bool) -> IndexOrder {
    match (subject, predicate, object) {
        (true, _, true) => IndexOrder::Objects,
        (true, _, false) => IndexOrder::Subjects,
        (false, true, _) => IndexOrder::Predicates,
        (false, false, true) => IndexOrder::Objects,
        (false, false, false) => IndexOrder::Subjects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Quad, Term};

    #[test]
    fn test_index_selection() {
        assert_eq!(select_index(true, false, true), IndexOrder::Objects);
        assert_eq!(select_index(true, true, true), IndexOrder::Objects);
        assert_eq!(select_index(true, false, false), IndexOrder::Subjects);
        assert_eq!(select_index(true, true, false), IndexOrder::Subjects);
        assert_eq!(select_index(false, true, false), IndexOrder::Predicates);
        assert_eq!(select_index(false, true, true), IndexOrder::Predicates);
        assert_eq!(select_index(false, false, true), IndexOrder::Objects);
        assert_eq!(select_index(false, false, false), IndexOrder::Subjects);
    }

    #[test]
    fn test_plan_places_bound_keys_first() {
        let mut interner = EntityInterner::new();
        let s = interner.resolve("s");
        let o = interner.resolve("o");

        let pattern = QuadPattern::any().subject("s").object("o");
        let resolved = pattern.resolve(&interner).unwrap();
        assert_eq!(resolved.plan(), (IndexOrder::Objects, [Some(o), Some(s), None]));
    }

    #[test]
    fn test_resolve_fails_fast_on_unknown_terms() {
        let mut interner = EntityInterner::new();
        interner.resolve("s");

        assert!(QuadPattern::any().subject("s").resolve(&interner).is_some());
        assert!(QuadPattern::any().subject("unknown").resolve(&interner).is_none());
        // Graphs are partition keys, not entities
        assert!(QuadPattern::any().graph("g").resolve(&interner).is_some());
    }

    #[test]
    fn test_from_quad() {
        let quad = Quad::new(
            Term::named_node("http://example.org/s").unwrap(),
            Term::named_node("http://example.org/p").unwrap(),
            Term::blank_node("o").unwrap(),
            Term::DefaultGraph,
        );
        let pattern = QuadPattern::from_quad(&quad);

        assert_eq!(pattern.subject_id(), Some("http://example.org/s"));
        assert_eq!(pattern.object_id(), Some("_:o"));
        assert_eq!(pattern.graph_id(), Some(""));
    }
}
