use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use samyama_quadstore::{NamedNode, Quad, QuadPattern, QuadStore, Term};

const PREFIX: &str = "http://example.org/#";

fn iri(n: usize) -> Term {
    Term::NamedNode(NamedNode::new_unchecked(format!("{}{}", PREFIX, n)))
}

/// dim³ triples in the default graph
fn triple_store(dim: usize) -> QuadStore {
    let mut store = QuadStore::new();
    for i in 0..dim {
        for j in 0..dim {
            for k in 0..dim {
                store.add_quad(Quad::triple(iri(i), iri(j), iri(k)));
            }
        }
    }
    store
}

/// dim⁴ quads spread over dim graphs
fn quad_store(dim: usize) -> QuadStore {
    let mut store = QuadStore::new();
    for i in 0..dim {
        for j in 0..dim {
            for k in 0..dim {
                for l in 0..dim {
                    store.add_quad(Quad::new(iri(i), iri(j), iri(k), iri(l)));
                }
            }
        }
    }
    store
}

/// Benchmark triple insertion throughput
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("triple_insertion");

    for dim in [8usize, 16, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(dim * dim * dim), dim, |b, &dim| {
            b.iter(|| black_box(triple_store(dim)));
        });
    }
    group.finish();
}

/// Benchmark lookups with 0, 1 and 2 unbound components
fn bench_lookup(c: &mut Criterion) {
    let dim = 32;
    let store = triple_store(dim);
    let terms: Vec<Term> = (0..dim).map(iri).collect();
    let mut group = c.benchmark_group("triple_lookup");

    group.bench_function("0_variables", |b| {
        b.iter(|| {
            for s in &terms {
                for o in &terms {
                    let pattern = QuadPattern::any()
                        .subject(s)
                        .predicate(&terms[0])
                        .object(o)
                        .in_default_graph();
                    assert_eq!(store.get_quads(&pattern).len(), 1);
                }
            }
        });
    });

    group.bench_function("1_variable", |b| {
        b.iter(|| {
            for x in &terms {
                for y in &terms {
                    let patterns = [
                        QuadPattern::any().subject(x).predicate(y),
                        QuadPattern::any().subject(x).object(y),
                        QuadPattern::any().predicate(x).object(y),
                    ];
                    for pattern in &patterns {
                        assert_eq!(store.get_quads(&pattern.clone().in_default_graph()).len(), dim);
                    }
                }
            }
        });
    });

    group.bench_function("2_variables", |b| {
        b.iter(|| {
            for x in &terms {
                assert_eq!(store.get_quads(&QuadPattern::any().subject(x)).len(), dim * dim);
                assert_eq!(store.get_quads(&QuadPattern::any().predicate(x)).len(), dim * dim);
                assert_eq!(store.get_quads(&QuadPattern::any().object(x)).len(), dim * dim);
            }
        });
    });

    group.bench_function("count_2_variables", |b| {
        b.iter(|| {
            for x in &terms {
                assert_eq!(store.count_quads(&QuadPattern::any().subject(x)), dim * dim);
            }
        });
    });
    group.finish();
}

/// Benchmark lookups across named graphs
fn bench_quads(c: &mut Criterion) {
    let dim = 8;
    let store = quad_store(dim);
    let terms: Vec<Term> = (0..dim).map(iri).collect();
    let dim_cubed = dim * dim * dim;

    c.bench_function("quad_lookup_3_variables", |b| {
        b.iter(|| {
            for x in &terms {
                assert_eq!(store.get_quads(&QuadPattern::any().subject(x)).len(), dim_cubed);
                assert_eq!(store.get_quads(&QuadPattern::any().predicate(x)).len(), dim_cubed);
                assert_eq!(store.get_quads(&QuadPattern::any().object(x)).len(), dim_cubed);
                assert_eq!(store.get_quads(&QuadPattern::any().graph(x)).len(), dim_cubed);
            }
        });
    });
}

criterion_group!(benches, bench_insertion, bench_lookup, bench_quads);
criterion_main!(benches);
