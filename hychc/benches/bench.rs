use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use hychc::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const RELATIONS: usize = 16;

fn relation(i: usize) -> Symbol {
    Symbol::intern(format!("R{}", i))
}

fn build_formulas(count: usize) -> Vec<Expr> {
    // Seeded so every run measures the same system
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let vars: Vec<Symbol> = (0..4).map(|i| Symbol::intern(format!("v{}", i))).collect();

    let application = |rng: &mut ChaCha20Rng| {
        let rel = relation(rng.random_range(0..RELATIONS));
        app(rel, [sym(vars[rng.random_range(0..vars.len())])])
    };

    (0..count)
        .map(|_| {
            let guard = lt(
                sym(vars[rng.random_range(0..vars.len())]),
                int(rng.random_range(-100..100)),
            );
            let matrix = match rng.random_range(0..=5) {
                0 => implies(guard, application(&mut rng)),
                1 => implies(application(&mut rng) & guard, ff()),
                _ => {
                    let body: Vec<Expr> = (0..rng.random_range(1..=3))
                        .map(|_| application(&mut rng))
                        .chain(std::iter::once(guard))
                        .collect();
                    implies(and(body), application(&mut rng))
                }
            };
            forall(vars.iter().map(|&v| (v, Sort::Int)), matrix)
        })
        .collect()
}

fn populated_database(formulas: &[Expr]) -> ClauseDatabase {
    let mut db = ClauseDatabase::new();
    for i in 0..RELATIONS {
        db.register_relation(relation(i));
    }
    for formula in formulas {
        let _ = db.add_clause(formula.clone());
    }
    db
}

fn bench_insert(c: &mut Criterion) {
    let formulas = build_formulas(500);

    c.bench_function("database_insert_500", |b| {
        b.iter(|| black_box(populated_database(&formulas)))
    });
}

fn bench_indices(c: &mut Criterion) {
    let db = populated_database(&build_formulas(2000));

    c.bench_function("database_build_indices_2000", |b| {
        b.iter_batched(
            || db.clone(),
            |mut db| {
                db.build_indices();
                black_box(db)
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_graph(c: &mut Criterion) {
    let db = populated_database(&build_formulas(2000));

    c.bench_function("graph_build_2000", |b| {
        b.iter(|| black_box(DependencyGraph::build(&db)))
    });

    let graph = DependencyGraph::build(&db);
    c.bench_function("graph_sccs_2000", |b| b.iter(|| black_box(graph.sccs())));
}

criterion_group!(benches, bench_insert, bench_indices, bench_graph);
criterion_main!(benches);
