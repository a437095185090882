use samyama_quadstore::rdf::{encode, JsonTerm};
use samyama_quadstore::{
    decode, DataFactory, IdentifierFactory, Literal, NamedNode, Quad, QuadLike, QuadPattern,
    QuadStore, StoreConfig, Term,
};
use std::collections::HashSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn iri(name: &str) -> Term {
    Term::NamedNode(NamedNode::new_unchecked(format!("http://example.org/{}", name)))
}

fn triple(s: &str, p: &str, o: &str) -> Quad {
    Quad::triple(iri(s), iri(p), iri(o))
}

fn term_set(terms: Vec<Term>) -> HashSet<String> {
    terms.iter().map(encode).collect()
}

#[test]
fn test_three_quad_scenario() {
    init_tracing();
    let mut store = QuadStore::new();
    store.add_quads([triple("s1", "p1", "o1"), triple("s1", "p1", "o2"), triple("s2", "p1", "o1")]);

    let (s1, p1, o1) = (iri("s1"), iri("p1"), iri("o1"));

    let found: HashSet<String> = store
        .get_quads(&QuadPattern::any().subject(&s1).predicate(&p1))
        .into_iter()
        .map(|quad| quad.to_string())
        .collect();
    let expected: HashSet<String> = [triple("s1", "p1", "o1"), triple("s1", "p1", "o2")]
        .iter()
        .map(|quad| quad.to_string())
        .collect();
    assert_eq!(found, expected);

    assert_eq!(store.count_quads(&QuadPattern::any().predicate(&p1).object(&o1)), 2);
    assert_eq!(
        term_set(store.get_subjects(&QuadPattern::any().predicate(&p1).object(&o1))),
        term_set(vec![iri("s1"), iri("s2")])
    );
}

#[test]
fn test_default_graph_scenario() {
    let mut store = QuadStore::new();
    store.add_quad(triple("s1", "p1", "o1"));
    store.add_quad(triple("s1", "p1", "o1").in_graph(iri("c4")));

    assert_eq!(store.count_quads(&QuadPattern::any().graph(&Term::DefaultGraph)), 1);
    assert_eq!(store.count_quads(&QuadPattern::any()), 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_add_remove_round_trip_restores_contents() {
    let mut store = QuadStore::new();
    store.add_quads([triple("a", "p", "b"), triple("b", "p", "c")]);
    let before: Vec<String> = store.iter().map(|quad| quad.to_string()).collect();

    let extra = triple("c", "q", "a").in_graph(iri("g"));
    assert!(store.add_quad(extra.clone()));
    assert!(!store.add_quad(extra.clone()));
    assert_eq!(store.len(), 3);

    assert!(store.remove_quad(&extra));
    let after: Vec<String> = store.iter().map(|quad| quad.to_string()).collect();
    assert_eq!(before, after);
    assert_eq!(store.graph_count(), 1);
}

#[test]
fn test_removal_of_absent_components() {
    let mut store = QuadStore::new();
    store.add_quad(triple("s", "p", "o").in_graph(iri("g")));

    let g = iri("g");
    let missing = iri("missing");
    assert!(!store.remove_quad_components(&missing, &iri("p"), &iri("o"), &g));
    assert!(!store.remove_quad_components(&iri("s"), &missing, &iri("o"), &g));
    assert!(!store.remove_quad_components(&iri("s"), &iri("p"), &missing, &g));
    assert!(!store.remove_quad_components(&iri("s"), &iri("p"), &iri("o"), &missing));
    assert_eq!(store.len(), 1);

    assert!(store.remove_quad_components(&iri("s"), &iri("p"), &iri("o"), &g));
    assert!(store.is_empty());
    assert!(store.get_graphs(&QuadPattern::any()).is_empty());
}

#[test]
fn test_every_short_circuits_on_failure() {
    let mut store = QuadStore::new();
    store.add_quads((0..10).map(|n| triple("s", "p", &format!("o{}", n))));

    let mut calls = 0;
    let all = store.every(&QuadPattern::any(), |_| {
        calls += 1;
        false
    });
    assert!(!all);
    assert_eq!(calls, 1);

    let mut calls = 0;
    assert!(store.every(&QuadPattern::any(), |_| {
        calls += 1;
        true
    }));
    assert_eq!(calls, 10);
}

#[test]
fn test_empty_store_predicates() {
    let store: QuadStore = QuadStore::new();
    assert!(!store.every(&QuadPattern::any(), |_| true));
    assert!(!store.some(&QuadPattern::any(), |_| true));
}

#[test]
fn test_blank_nodes_never_collide() {
    init_tracing();
    let mut store = QuadStore::new();
    let taken = Term::blank_node("b0").unwrap();
    store.add_quad(Quad::triple(taken.clone(), iri("p"), iri("o")));

    let mut seen = HashSet::new();
    for _ in 0..20 {
        let node = store.create_blank_node(None);
        assert_ne!(node, taken);
        assert!(seen.insert(encode(&node)));
    }

    let suggested: Vec<Term> = (0..3).map(|_| store.create_blank_node(Some("x"))).collect();
    assert_eq!(
        suggested,
        vec![
            Term::blank_node("x").unwrap(),
            Term::blank_node("x1").unwrap(),
            Term::blank_node("x2").unwrap(),
        ]
    );
}

#[test]
fn test_literal_round_trips() {
    let tagged: Term = Literal::new_language_tagged_literal("text", "en").unwrap().into();
    let typed: Term = Literal::new_typed_literal("text", NamedNode::new_unchecked("http://example.org/type")).into();
    let quoted: Term = Literal::new_simple_literal("a \"quoted\" value").into();

    for term in [tagged, typed, quoted] {
        let mut store = QuadStore::new();
        store.add_quad(Quad::triple(iri("s"), iri("p"), term.clone()));
        assert_eq!(store.get_objects(&QuadPattern::any()), vec![term.clone()]);
        assert_eq!(decode(&encode(&term), &DataFactory), term);
    }
}

/// A quad value carrying extra data beyond its four components
#[derive(Debug, Clone)]
struct SourcedQuad {
    quad: Quad,
    line: usize,
}

impl QuadLike for SourcedQuad {
    type Term = Term;

    fn subject(&self) -> &Term {
        &self.quad.subject
    }

    fn predicate(&self) -> &Term {
        &self.quad.predicate
    }

    fn object(&self) -> &Term {
        &self.quad.object
    }

    fn graph(&self) -> &Term {
        &self.quad.graph
    }
}

#[test]
fn test_stored_values_come_back_unchanged() {
    let mut store = QuadStore::new();
    store.add_quad(SourcedQuad { quad: triple("a", "p", "b"), line: 1 });
    store.add_quad(SourcedQuad { quad: triple("a", "p", "c"), line: 2 });

    let c = iri("c");
    let found = store.get_quads(&QuadPattern::any().object(&c));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].line, 2);

    let probe = SourcedQuad { quad: triple("a", "p", "b"), line: 0 };
    assert!(store.has_quad(&probe));
    assert!(store.remove_quad(&probe));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_identifier_store() {
    let mut store: QuadStore<Quad<String>, IdentifierFactory> =
        QuadStore::with_config(IdentifierFactory, StoreConfig::default());
    let quad = |s: &str, o: &str, g: &str| {
        Quad::new(s.to_string(), "http://example.org/p".to_string(), o.to_string(), g.to_string())
    };

    store.add_quad(quad("http://example.org/a", "\"1\"^^http://www.w3.org/2001/XMLSchema#integer", ""));
    store.add_quad(quad("_:b0", "http://example.org/a", "http://example.org/g"));

    assert_eq!(store.count_quads(&QuadPattern::any().subject("_:b0")), 1);
    assert_eq!(store.get_graphs(&QuadPattern::any()), vec!["".to_string(), "http://example.org/g".to_string()]);
    assert_eq!(
        store.get_objects(&QuadPattern::any().subject("http://example.org/a")),
        vec!["\"1\"^^http://www.w3.org/2001/XMLSchema#integer".to_string()]
    );
    // `_:b0` is in use, so generation skips it
    assert_eq!(store.create_blank_node(None), "_:b1");
}

#[test]
fn test_json_terms_feed_the_store() {
    let json = r#"[
        {
            "subject": {"termType": "NamedNode", "value": "http://example.org/a"},
            "predicate": {"termType": "NamedNode", "value": "http://example.org/p"},
            "object": {"termType": "Literal", "value": "hello", "language": "en"},
            "graph": {"termType": "DefaultGraph", "value": ""}
        }
    ]"#;
    let quads = samyama_quadstore::rdf::parse_quads(json).unwrap();
    let store = QuadStore::from_quads(quads);

    let objects = store.get_objects(&QuadPattern::any());
    assert_eq!(objects.len(), 1);
    assert_eq!(JsonTerm::from(&objects[0]).language.as_deref(), Some("en"));
}
