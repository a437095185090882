//! Term <-> identifier codec
//!
//! Every term is reduced to a canonical string identifier before it reaches
//! the indexes:
//!
//! | term          | identifier            |
//! |---------------|-----------------------|
//! | IRI           | `http://example.org/` |
//! | blank node    | `_:label`             |
//! | variable      | `?name`               |
//! | literal       | `"value"`, `"value"@lang`, `"value"^^datatype` |
//! | default graph | empty string          |
//!
//! Decoding goes through a [`TermFactory`], so identifiers can be turned back
//! into any concrete term representation.

use super::types::{BlankNode, Literal, NamedNode, Term, Variable};
use oxrdf::vocab::xsd;
use std::borrow::Cow;
use thiserror::Error;

/// Codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Term kind outside {IRI, blank node, literal, variable, default graph}
    #[error("Unexpected termType: {0}")]
    UnsupportedTermType(String),

    /// Term value rejected by the RDF syntax rules
    #[error("Invalid term: {0}")]
    InvalidTerm(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Conversion of a term into its string identifier
pub trait EncodeTerm {
    fn encode_term(&self) -> Cow<'_, str>;
}

/// A bare string is an identifier already
impl EncodeTerm for str {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl EncodeTerm for String {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: EncodeTerm + ?Sized> EncodeTerm for &T {
    fn encode_term(&self) -> Cow<'_, str> {
        (**self).encode_term()
    }
}

impl EncodeTerm for Term {
    fn encode_term(&self) -> Cow<'_, str> {
        match self {
            Term::NamedNode(n) => Cow::Borrowed(n.as_str()),
            Term::BlankNode(b) => Cow::Owned(format!("_:{}", b.as_str())),
            Term::Literal(l) => Cow::Owned(encode_literal(l)),
            Term::Variable(v) => Cow::Owned(format!("?{}", v.as_str())),
            Term::DefaultGraph => Cow::Borrowed(""),
        }
    }
}

impl EncodeTerm for NamedNode {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl EncodeTerm for BlankNode {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Owned(format!("_:{}", self.as_str()))
    }
}

impl EncodeTerm for Literal {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Owned(encode_literal(self))
    }
}

impl EncodeTerm for Variable {
    fn encode_term(&self) -> Cow<'_, str> {
        Cow::Owned(format!("?{}", self.as_str()))
    }
}

/// Encode a term into an owned identifier
pub fn encode<T: EncodeTerm + ?Sized>(term: &T) -> String {
    term.encode_term().into_owned()
}

fn encode_literal(literal: &Literal) -> String {
    let value = literal.value();
    if let Some(language) = literal.language() {
        format!("\"{}\"@{}", value, language)
    } else if literal.datatype() == xsd::STRING {
        format!("\"{}\"", value)
    } else {
        format!("\"{}\"^^{}", value, literal.datatype().as_str())
    }
}

/// Language tag or datatype attached to a decoded literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralAnnotation<'a> {
    Language(&'a str),
    Datatype(&'a str),
}

/// Constructors used to turn identifiers back into terms
pub trait TermFactory {
    type Term;

    fn named_node(&self, iri: &str) -> Self::Term;
    fn blank_node(&self, label: &str) -> Self::Term;
    fn literal(&self, value: &str, annotation: Option<LiteralAnnotation<'_>>) -> Self::Term;
    fn variable(&self, name: &str) -> Self::Term;
    fn default_graph(&self) -> Self::Term;
}

/// Factory producing [`Term`] values
///
/// Identifiers handed to the factory come out of the store, so the node
/// constructors skip syntax validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataFactory;

impl TermFactory for DataFactory {
    type Term = Term;

    fn named_node(&self, iri: &str) -> Term {
        Term::NamedNode(NamedNode::new_unchecked(iri))
    }

    fn blank_node(&self, label: &str) -> Term {
        Term::BlankNode(BlankNode::new_unchecked(label))
    }

    fn literal(&self, value: &str, annotation: Option<LiteralAnnotation<'_>>) -> Term {
        let literal = match annotation {
            None => Literal::new_simple_literal(value),
            Some(LiteralAnnotation::Language(language)) => {
                Literal::new_language_tagged_literal_unchecked(value, language)
            }
            Some(LiteralAnnotation::Datatype(datatype)) => {
                Literal::new_typed_literal(value, NamedNode::new_unchecked(datatype))
            }
        };
        Term::Literal(literal)
    }

    fn variable(&self, name: &str) -> Term {
        Term::Variable(Variable::new_unchecked(name))
    }

    fn default_graph(&self) -> Term {
        Term::DefaultGraph
    }
}

/// Factory that hands identifiers back unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierFactory;

impl TermFactory for IdentifierFactory {
    type Term = String;

    fn named_node(&self, iri: &str) -> String {
        iri.to_string()
    }

    fn blank_node(&self, label: &str) -> String {
        format!("_:{}", label)
    }

    fn literal(&self, value: &str, annotation: Option<LiteralAnnotation<'_>>) -> String {
        match annotation {
            None => format!("\"{}\"", value),
            Some(LiteralAnnotation::Language(language)) => format!("\"{}\"@{}", value, language),
            Some(LiteralAnnotation::Datatype(datatype)) => format!("\"{}\"^^{}", value, datatype),
        }
    }

    fn variable(&self, name: &str) -> String {
        format!("?{}", name)
    }

    fn default_graph(&self) -> String {
        String::new()
    }
}

/// Construct a term from an identifier
pub fn decode<F: TermFactory + ?Sized>(id: &str, factory: &F) -> F::Term {
    match id.as_bytes().first() {
        None => factory.default_graph(),
        Some(b'_') => factory.blank_node(id.strip_prefix("_:").unwrap_or(&id[1..])),
        Some(b'?') => factory.variable(&id[1..]),
        Some(b'"') => decode_literal(id, factory),
        Some(_) => factory.named_node(id),
    }
}

fn decode_literal<F: TermFactory + ?Sized>(id: &str, factory: &F) -> F::Term {
    // Plain literal: the identifier ends with the closing quote
    if id.len() > 1 && id.ends_with('"') {
        return factory.literal(&id[1..id.len() - 1], None);
    }

    // The lexical value may contain quotes; the closing one is the last
    let end = match id.rfind('"') {
        Some(end) if end > 0 => end,
        _ => return factory.literal(&id[1..], None),
    };
    let value = &id[1..end];
    let suffix = &id[end + 1..];
    if let Some(language) = suffix.strip_prefix('@') {
        factory.literal(value, Some(LiteralAnnotation::Language(language)))
    } else if let Some(datatype) = suffix.strip_prefix("^^") {
        factory.literal(value, Some(LiteralAnnotation::Datatype(datatype)))
    } else {
        factory.literal(value, None)
    }
}
