use std::collections::BTreeSet;

use hychc::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const RELATIONS: usize = 6;

fn relation(i: usize) -> Symbol {
    Symbol::intern(&format!("rs_R{}", i))
}

fn var_sym(i: usize) -> Symbol {
    Symbol::intern(&format!("rs_v{}", i))
}

fn constraint(rng: &mut impl Rng) -> Expr {
    let v = sym(var_sym(rng.random_range(0..3)));
    let c = int(rng.random_range(-5..=5));
    match rng.random_range(0..=2) {
        0 => eq(v, c),
        1 => lt(v, c),
        _ => ge(add(v, int(1)), c),
    }
}

fn application(rng: &mut impl Rng) -> Expr {
    let rel = relation(rng.random_range(0..RELATIONS));
    app(rel, [sym(var_sym(rng.random_range(0..3)))])
}

fn random_clause(rng: &mut impl Rng) -> Expr {
    let binders = (0..3).map(|i| (var_sym(i), Sort::Int));
    let matrix = match rng.random_range(0..=3) {
        // Fact
        0 => implies(constraint(rng), application(rng)),
        // Query
        1 => implies(application(rng) & constraint(rng), ff()),
        // Transition
        _ => {
            let body_len = rng.random_range(1..=3);
            let mut body: Vec<Expr> = (0..body_len).map(|_| application(rng)).collect();
            if rng.random_bool(0.5) {
                body.push(constraint(rng));
            }
            implies(and(body), application(rng))
        }
    };
    forall(binders, matrix)
}

fn random_database(seed: u64, clauses: usize) -> (ClauseDatabase, Vec<Expr>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut db = ClauseDatabase::new();
    for i in 0..RELATIONS {
        db.register_relation(relation(i));
    }

    let formulas: Vec<Expr> = (0..clauses).map(|_| random_clause(&mut rng)).collect();
    for formula in &formulas {
        db.add_clause(formula.clone()).expect("generated clauses are quantified");
    }
    (db, formulas)
}

#[test]
fn reinserting_everything_changes_nothing() {
    for seed in 0..8 {
        let (mut db, formulas) = random_database(seed, 60);
        let len = db.len();
        let distinct: BTreeSet<&Expr> = formulas.iter().collect();
        assert_eq!(len, distinct.len(), "seed {}", seed);

        for formula in formulas {
            assert_eq!(db.add_clause(formula).unwrap(), None);
        }
        assert_eq!(db.len(), len);
    }
}

#[test]
fn built_indices_are_complete_and_exact() {
    for seed in 0..8 {
        let (mut db, _) = random_database(0x1000 + seed, 80);
        db.build_indices();

        for (idx, clause) in db.iter().enumerate() {
            if let Some(head) = clause.head_relation(&db) {
                assert!(db.defs(head).contains(&idx));
            }
            for used in clause.used_relations(&db) {
                assert!(db.uses(used).contains(&idx));
            }
        }

        for r in 0..RELATIONS {
            let rel = relation(r);
            for &idx in db.defs(rel) {
                assert_eq!(db.get_clause(idx).head_relation(&db), Some(rel));
            }
            for &idx in db.uses(rel) {
                assert!(db.get_clause(idx).used_relations(&db).any(|u| u == rel));
            }
        }
    }
}

#[test]
fn kinds_partition_the_database() {
    for seed in 0..8 {
        let (db, _) = random_database(0x2000 + seed, 50);
        let total = db.facts().count() + db.queries().count() + db.transitions().count();
        assert_eq!(total, db.len());
    }
}

#[test]
fn graph_is_symmetric_and_matches_transitions() {
    for seed in 0..8 {
        let (db, _) = random_database(0x3000 + seed, 70);
        let graph = DependencyGraph::build(&db);

        let mut edges = 0;
        for r in graph.relations() {
            for &s in graph.outgoing(r) {
                assert!(graph.incoming(s).contains(&r), "seed {}: {} -> {}", seed, r, s);
                assert!(!graph.edge_clauses(r, s).is_empty());
                edges += 1;
            }
            for &s in graph.incoming(r) {
                assert!(graph.outgoing(s).contains(&r), "seed {}: {} <- {}", seed, r, s);
            }
        }
        assert_eq!(edges, graph.edge_count());

        for (idx, clause) in db.transitions() {
            let Some(head) = clause.head_relation(&db) else {
                continue;
            };
            for used in clause.used_relations(&db) {
                assert!(graph.edge_clauses(used, head).contains(&idx));
            }
        }

        if graph.has_entry() {
            let entry = graph.entry();
            assert!(db.facts().any(|(_, c)| c.head_relation(&db) == Some(entry)));
            assert!(graph.incoming(entry).iter().all(|&src| src == entry));
            assert!(graph.reachable_from_entry().contains(&entry));
        }
    }
}

#[test]
fn scc_partition_covers_every_relation() {
    for seed in 0..4 {
        let (db, _) = random_database(0x4000 + seed, 40);
        let graph = DependencyGraph::build(&db);

        let covered: BTreeSet<Symbol> = graph.sccs().iter().flatten().copied().collect();
        let vertices: BTreeSet<Symbol> = graph.relations().collect();
        assert_eq!(covered, vertices);

        if let Some(order) = graph.topological_order() {
            let position = |s: Symbol| order.iter().position(|&o| o == s);
            for r in graph.relations() {
                for &s in graph.outgoing(r) {
                    assert!(position(r) < position(s));
                }
            }
        }
    }
}
