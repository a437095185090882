//! RDF/JS JSON term objects
//!
//! Deserialized input is the one place term kinds outside the closed
//! [`Term`] set can show up, so the conversion is fallible.

use super::codec::{CodecError, CodecResult};
use super::types::{Literal, NamedNode, Quad, Term};
use serde::{Deserialize, Serialize};

/// Term in RDF/JS object shape, e.g. `{"termType": "NamedNode", "value": "…"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTerm {
    pub term_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Box<JsonTerm>>,
}

/// Quad in RDF/JS object shape; a missing graph means the default graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonQuad {
    pub subject: JsonTerm,
    pub predicate: JsonTerm,
    pub object: JsonTerm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<JsonTerm>,
}

impl TryFrom<JsonTerm> for Term {
    type Error = CodecError;

    fn try_from(term: JsonTerm) -> CodecResult<Self> {
        match term.term_type.as_str() {
            "NamedNode" => Term::named_node(&term.value),
            "BlankNode" => Term::blank_node(&term.value),
            "Variable" => Term::variable(&term.value),
            "DefaultGraph" => Ok(Term::DefaultGraph),
            "Literal" => literal_from_json(term).map(Term::Literal),
            other => Err(CodecError::UnsupportedTermType(other.to_string())),
        }
    }
}

fn literal_from_json(term: JsonTerm) -> CodecResult<Literal> {
    if let Some(language) = term.language.filter(|l| !l.is_empty()) {
        return Literal::new_language_tagged_literal(term.value, language)
            .map_err(|e| CodecError::InvalidTerm(e.to_string()));
    }
    match term.datatype {
        Some(datatype) => {
            let datatype = NamedNode::new(datatype.value)
                .map_err(|e| CodecError::InvalidTerm(e.to_string()))?;
            Ok(Literal::new_typed_literal(term.value, datatype))
        }
        None => Ok(Literal::new_simple_literal(term.value)),
    }
}

impl From<&Term> for JsonTerm {
    fn from(term: &Term) -> Self {
        let (value, language, datatype) = match term {
            Term::NamedNode(n) => (n.as_str().to_string(), None, None),
            Term::BlankNode(b) => (b.as_str().to_string(), None, None),
            Term::Variable(v) => (v.as_str().to_string(), None, None),
            Term::DefaultGraph => (String::new(), None, None),
            Term::Literal(l) => {
                let datatype = JsonTerm::named_node(l.datatype().as_str());
                (
                    l.value().to_string(),
                    Some(l.language().unwrap_or_default().to_string()),
                    Some(Box::new(datatype)),
                )
            }
        };
        Self {
            term_type: term.kind().to_string(),
            value,
            language,
            datatype,
        }
    }
}

impl JsonTerm {
    fn named_node(iri: &str) -> Self {
        Self {
            term_type: "NamedNode".to_string(),
            value: iri.to_string(),
            language: None,
            datatype: None,
        }
    }
}

impl TryFrom<JsonQuad> for Quad<Term> {
    type Error = CodecError;

    fn try_from(quad: JsonQuad) -> CodecResult<Self> {
        Ok(Quad::new(
            quad.subject.try_into()?,
            quad.predicate.try_into()?,
            quad.object.try_into()?,
            match quad.graph {
                Some(graph) => graph.try_into()?,
                None => Term::DefaultGraph,
            },
        ))
    }
}

impl From<&Quad<Term>> for JsonQuad {
    fn from(quad: &Quad<Term>) -> Self {
        Self {
            subject: (&quad.subject).into(),
            predicate: (&quad.predicate).into(),
            object: (&quad.object).into(),
            graph: Some((&quad.graph).into()),
        }
    }
}

/// Parse a JSON array of RDF/JS quads
pub fn parse_quads(json: &str) -> CodecResult<Vec<Quad<Term>>> {
    let quads: Vec<JsonQuad> =
        serde_json::from_str(json).map_err(|e| CodecError::InvalidTerm(e.to_string()))?;
    quads.into_iter().map(Quad::try_from).collect()
}

/// Serialize quads as a JSON array of RDF/JS quads
pub fn quads_to_json<'a>(quads: impl IntoIterator<Item = &'a Quad<Term>>) -> String {
    let quads: Vec<JsonQuad> = quads.into_iter().map(JsonQuad::from).collect();
    // Plain structs of strings never fail to serialize
    serde_json::to_string(&quads).unwrap_or_default()
}
