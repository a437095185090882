//! RDF type definitions
//!
//! Node payloads are the oxrdf primitives; [`Term`] closes them into the five
//! kinds the store can index, and [`Quad`] groups four terms of any
//! representation.

use super::codec::{CodecError, CodecResult, EncodeTerm};
use oxrdf::{
    GraphName as OxGraphName,
    Quad as OxQuad,
    Subject as OxSubject,
    Term as OxTerm,
};
use std::fmt;

pub use oxrdf::{BlankNode, Literal, NamedNode, Variable};

/// RDF term (any value that can appear in a quad or a pattern)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
    /// Query variable
    Variable(Variable),
    /// The default graph marker
    DefaultGraph,
}

impl Term {
    /// Create a named node term, validating the IRI
    pub fn named_node(iri: &str) -> CodecResult<Self> {
        NamedNode::new(iri)
            .map(Term::NamedNode)
            .map_err(|e| CodecError::InvalidTerm(format!("{}: {}", iri, e)))
    }

    /// Create a blank node term, validating the label
    pub fn blank_node(label: &str) -> CodecResult<Self> {
        BlankNode::new(label)
            .map(Term::BlankNode)
            .map_err(|e| CodecError::InvalidTerm(format!("_:{}: {}", label, e)))
    }

    /// Create a variable term, validating the name
    pub fn variable(name: &str) -> CodecResult<Self> {
        Variable::new(name)
            .map(Term::Variable)
            .map_err(|e| CodecError::InvalidTerm(format!("?{}: {}", name, e)))
    }

    /// Name of the term kind, as used in error messages and RDF/JS `termType`
    pub fn kind(&self) -> &'static str {
        match self {
            Term::NamedNode(_) => "NamedNode",
            Term::BlankNode(_) => "BlankNode",
            Term::Literal(_) => "Literal",
            Term::Variable(_) => "Variable",
            Term::DefaultGraph => "DefaultGraph",
        }
    }

    pub fn is_named_node(&self) -> bool {
        matches!(self, Term::NamedNode(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_default_graph(&self) -> bool {
        matches!(self, Term::DefaultGraph)
    }
}

impl Default for Term {
    fn default() -> Self {
        Term::DefaultGraph
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(n) => write!(f, "{}", n),
            Term::BlankNode(b) => write!(f, "{}", b),
            Term::Literal(l) => write!(f, "{}", l),
            Term::Variable(v) => write!(f, "{}", v),
            Term::DefaultGraph => Ok(()),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Term::Variable(var)
    }
}

impl TryFrom<OxSubject> for Term {
    type Error = CodecError;

    fn try_from(subject: OxSubject) -> CodecResult<Self> {
        match subject {
            OxSubject::NamedNode(n) => Ok(Term::NamedNode(n)),
            OxSubject::BlankNode(b) => Ok(Term::BlankNode(b)),
            #[allow(unreachable_patterns)]
            _ => Err(CodecError::UnsupportedTermType("Quad".to_string())),
        }
    }
}

impl TryFrom<OxTerm> for Term {
    type Error = CodecError;

    fn try_from(term: OxTerm) -> CodecResult<Self> {
        match term {
            OxTerm::NamedNode(n) => Ok(Term::NamedNode(n)),
            OxTerm::BlankNode(b) => Ok(Term::BlankNode(b)),
            OxTerm::Literal(l) => Ok(Term::Literal(l)),
            #[allow(unreachable_patterns)]
            _ => Err(CodecError::UnsupportedTermType("Quad".to_string())),
        }
    }
}

impl From<OxGraphName> for Term {
    fn from(graph: OxGraphName) -> Self {
        match graph {
            OxGraphName::NamedNode(n) => Term::NamedNode(n),
            OxGraphName::BlankNode(b) => Term::BlankNode(b),
            OxGraphName::DefaultGraph => Term::DefaultGraph,
        }
    }
}

/// Access to the four components of a quad-shaped value
///
/// The store indexes a quad through these accessors and otherwise treats the
/// value as an opaque payload, handing back the same instance on lookup.
pub trait QuadLike {
    type Term: EncodeTerm + ?Sized;

    fn subject(&self) -> &Self::Term;
    fn predicate(&self) -> &Self::Term;
    fn object(&self) -> &Self::Term;
    fn graph(&self) -> &Self::Term;
}

/// RDF quad (subject, predicate, object, graph)
///
/// Generic over the term representation; `Quad<Term>` is the default and
/// `Quad<String>` holds pre-encoded identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad<T = Term> {
    pub subject: T,
    pub predicate: T,
    pub object: T,
    /// Graph name (`Term::DefaultGraph` / `""` for the default graph)
    pub graph: T,
}

impl<T> Quad<T> {
    pub fn new(subject: T, predicate: T, object: T, graph: T) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Same quad moved to another graph
    pub fn in_graph(self, graph: T) -> Self {
        Self { graph, ..self }
    }
}

impl Quad<Term> {
    /// Create a triple, i.e. a quad in the default graph
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Self::new(subject, predicate, object, Term::DefaultGraph)
    }
}

impl<T: EncodeTerm> QuadLike for Quad<T> {
    type Term = T;

    fn subject(&self) -> &T {
        &self.subject
    }

    fn predicate(&self) -> &T {
        &self.predicate
    }

    fn object(&self) -> &T {
        &self.object
    }

    fn graph(&self) -> &T {
        &self.graph
    }
}

impl<T: fmt::Display> fmt::Display for Quad<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.graph.to_string();
        if graph.is_empty() {
            write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
        } else {
            write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, graph
            )
        }
    }
}

impl TryFrom<OxQuad> for Quad<Term> {
    type Error = CodecError;

    fn try_from(quad: OxQuad) -> CodecResult<Self> {
        Ok(Self {
            subject: quad.subject.try_into()?,
            predicate: Term::NamedNode(quad.predicate),
            object: quad.object.try_into()?,
            graph: quad.graph_name.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let term = Term::named_node("http://example.org/alice").unwrap();
        assert!(term.is_named_node());
        assert_eq!(term.to_string(), "<http://example.org/alice>");

        assert!(matches!(
            Term::named_node("not an iri"),
            Err(CodecError::InvalidTerm(_))
        ));
    }

    #[test]
    fn test_term_kinds() {
        assert_eq!(Term::blank_node("b0").unwrap().kind(), "BlankNode");
        assert_eq!(Term::variable("x").unwrap().kind(), "Variable");
        assert_eq!(Term::from(Literal::new_simple_literal("a")).kind(), "Literal");
        assert!(Term::default().is_default_graph());
    }

    #[test]
    fn test_quad_from_oxrdf() {
        let ox = OxQuad::new(
            oxrdf::NamedNode::new_unchecked("http://example.org/s"),
            oxrdf::NamedNode::new_unchecked("http://example.org/p"),
            Literal::new_simple_literal("o"),
            OxGraphName::DefaultGraph,
        );

        let quad = Quad::try_from(ox).unwrap();
        assert!(quad.subject.is_named_node());
        assert!(quad.object.is_literal());
        assert!(quad.graph.is_default_graph());
    }

    #[test]
    fn test_quad_display() {
        let quad = Quad::triple(
            Term::named_node("http://example.org/s").unwrap(),
            Term::named_node("http://example.org/p").unwrap(),
            Literal::new_simple_literal("o").into(),
        );
        assert_eq!(
            quad.to_string(),
            "<http://example.org/s> <http://example.org/p> \"o\" ."
        );

        let quad = quad.in_graph(Term::named_node("http://example.org/g").unwrap());
        assert!(quad.to_string().ends_with("<http://example.org/g> ."));
    }
}
