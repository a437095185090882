//! RDF terms, quads and their identifier encoding
//!
//! Terms wrap the [`oxrdf`] node types in a single closed [`Term`] enum, which
//! also covers the default graph. The store never indexes terms directly:
//! [`codec`] turns them into canonical string identifiers and back.
//!
//! # Example
//!
//! ```rust
//! use samyama_quadstore::rdf::{decode, encode, DataFactory, Literal, Term};
//!
//! let term: Term = Literal::new_language_tagged_literal("chat", "fr").unwrap().into();
//! let id = encode(&term);
//! assert_eq!(id, "\"chat\"@fr");
//! assert_eq!(decode(&id, &DataFactory), term);
//! ```

pub mod codec;
pub mod json;
mod types;

pub use codec::{
    decode, encode, CodecError, CodecResult, DataFactory, EncodeTerm, IdentifierFactory,
    LiteralAnnotation, TermFactory,
};
pub use json::{parse_quads, quads_to_json, JsonQuad, JsonTerm};
pub use types::{BlankNode, Literal, NamedNode, Quad, QuadLike, Term, Variable};
