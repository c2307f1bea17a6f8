//! The single-relation counter system: `x = 0` initially, `x` increases by one, and `x < 0`
//! must be unreachable.
use hychc::prelude::*;

struct System {
    db: ClauseDatabase,
    inv: Symbol,
}

fn counter_system() -> System {
    let inv = Symbol::intern("Inv");
    let x = Symbol::intern("x");
    let y = Symbol::intern("y");

    let mut db = ClauseDatabase::new();
    db.register_relation(inv);

    let fact = forall(
        [(x, Sort::Int)],
        implies(eq(sym(x), int(0)), app(inv, [sym(x)])),
    );
    let step = forall(
        [(x, Sort::Int), (y, Sort::Int)],
        implies(
            app(inv, [sym(x)]) & eq(sym(y), add(sym(x), int(1))),
            app(inv, [sym(y)]),
        ),
    );
    let query = forall(
        [(x, Sort::Int)],
        implies(app(inv, [sym(x)]) & lt(sym(x), int(0)), ff()),
    );

    assert_eq!(db.add_clause(fact).unwrap(), Some(0));
    assert_eq!(db.add_clause(step).unwrap(), Some(1));
    assert_eq!(db.add_clause(query).unwrap(), Some(2));

    System { db, inv }
}

#[test]
fn indices_of_counter_system() {
    let System { mut db, inv } = counter_system();

    assert!(db.defs(inv).is_empty(), "index must not be trusted before building");
    db.build_indices();

    assert_eq!(db.defs(inv).len(), 2);
    assert_eq!(db.uses(inv).len(), 2);
    assert!(db.defs(inv).contains(&0) && db.defs(inv).contains(&1));
    assert!(db.uses(inv).contains(&1) && db.uses(inv).contains(&2));
    assert!(db.validate().is_ok());
}

#[test]
fn classification_of_counter_system() {
    let System { db, .. } = counter_system();
    let kinds: Vec<ClauseKind> = db.iter().map(|c| c.kind_for(&db)).collect();
    assert_eq!(
        kinds,
        vec![ClauseKind::Fact, ClauseKind::Transition, ClauseKind::Query]
    );

    let query = db.get_clause(2);
    assert!(query.is_query());
    assert_eq!(
        query.used_func_app(&db).collect::<Vec<_>>(),
        vec![app(Symbol::intern("Inv"), [var("x")])]
    );
}

#[test]
fn graph_of_counter_system() {
    let System { db, inv } = counter_system();
    let graph = DependencyGraph::build(&db);

    assert!(graph.outgoing(inv).contains(&inv));
    assert!(graph.incoming(inv).contains(&inv));
    assert_eq!(graph.edge_count(), 1, "the query adds no edge");
    assert_eq!(graph.edge_clauses(inv, inv).iter().copied().collect::<Vec<_>>(), vec![1]);

    assert!(graph.has_entry());
    assert_eq!(graph.entry(), inv);
    assert!(graph.is_recursive(inv));
    assert!(graph.topological_order().is_none());
}
