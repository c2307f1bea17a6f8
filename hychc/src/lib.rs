//! Hychc: bookkeeping for systems of constrained Horn clauses (CHCs).
//!
//! A CHC is a universally quantified implication between applications of uninterpreted
//! relations and background-theory constraints. This crate stores such clauses without
//! duplication, classifies them, indexes which relations each clause uses and defines, and
//! derives the dependency graph over relations together with its entry relation. It does not
//! solve, simplify or prove anything.
//!
//! Layers
//!  - [`clause::HornClause`]: body/head view and fact/query classification of one formula.
//!  - [`database::ClauseDatabase`]: registered relations, clauses and the use/def indices.
//!  - [`graph::DependencyGraph`]: relation graph built from a database snapshot.
//!
//! Example
//! ```
//! use hychc::prelude::*;
//!
//! let inv = Symbol::intern("Inv");
//! let (x, y) = (Symbol::intern("x"), Symbol::intern("y"));
//!
//! let mut db = ClauseDatabase::new();
//! db.register_relation(inv);
//! db.add_clause(forall([(x, Sort::Int)], implies(eq(sym(x), int(0)), app(inv, [sym(x)]))))
//!     .unwrap();
//! db.add_clause(forall(
//!     [(x, Sort::Int), (y, Sort::Int)],
//!     implies(
//!         app(inv, [sym(x)]) & eq(sym(y), add(sym(x), int(1))),
//!         app(inv, [sym(y)]),
//!     ),
//! ))
//! .unwrap();
//! db.build_indices();
//!
//! let graph = DependencyGraph::build(&db);
//! assert!(graph.outgoing(inv).contains(&inv));
//! assert_eq!(graph.entry(), inv);
//! ```

/// Horn clause wrapper and classification.
pub mod clause;
/// TOML configuration.
pub mod config;
/// Clause storage and use/def indices.
pub mod database;
/// Relation dependency graph.
pub mod graph;
pub mod utils;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! Everything from [`hyterm::prelude`] plus the database types.
    pub use crate::clause::{ClauseKind, HornClause};
    pub use crate::config::{ChcConfig, EntryPolicy, GraphConfig};
    pub use crate::database::{ClauseDatabase, ClauseIndex, ClauseSet, RelationFilter};
    pub use crate::graph::DependencyGraph;
    pub use crate::utils::error::{ChcError, ChcResult};
    pub use hyterm::prelude::*;
}
