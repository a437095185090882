//! Samyama Quad Store
//!
//! An in-memory RDF quad store. Terms are encoded to string identifiers,
//! interned to integer IDs, and indexed per graph in three nested orders
//! (subject-predicate-object, predicate-object-subject and
//! object-subject-predicate), so any combination of bound pattern
//! components is answered from the narrowest index.
//!
//! # Modules
//!
//! - [`rdf`]: terms, quads, the identifier codec and RDF/JS JSON terms
//! - [`store`]: entity interning, layered indexes and the [`QuadStore`] engine
//! - [`dataset`]: set algebra and stream import/export on top of the store
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_quadstore::{Literal, Quad, QuadPattern, QuadStore, Term};
//!
//! let mut store = QuadStore::new();
//!
//! let alice = Term::named_node("http://example.org/alice").unwrap();
//! let name = Term::named_node("http://xmlns.com/foaf/0.1/name").unwrap();
//! let graph = Term::named_node("http://example.org/people").unwrap();
//!
//! let value = Term::from(Literal::new_simple_literal("Alice"));
//! store.add_quad(Quad::new(alice.clone(), name.clone(), value, graph.clone()));
//!
//! // Query by subject
//! let quads = store.get_quads(&QuadPattern::any().subject(&alice));
//! assert_eq!(quads.len(), 1);
//!
//! // Graphs holding a name
//! assert_eq!(store.get_graphs(&QuadPattern::any().predicate(&name)), vec![graph]);
//!
//! // Fresh blank node
//! let node = store.create_blank_node(None);
//! assert!(node.is_blank_node());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod rdf;
pub mod store;

// Re-export main types for convenience
pub use rdf::{
    decode, encode, BlankNode, CodecError, CodecResult, DataFactory, EncodeTerm,
    IdentifierFactory, Literal, LiteralAnnotation, NamedNode, Quad, QuadLike, Term, TermFactory,
    Variable,
};

pub use store::{QuadPattern, QuadStore, StoreConfig, StoreError, StoreResult};

pub use dataset::Dataset;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
