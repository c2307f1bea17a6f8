//! Hyterm: immutable, structurally hashed expression trees.
//!
//! This crate provides the term language consumed by the Horn clause database in `hychc`:
//! interned [`symbol::Symbol`]s, binder [`sort::Sort`]s, and [`expr::Expr`] trees whose
//! equality, ordering and hashing are all structural. Two formulas built independently
//! compare equal iff they are syntactically identical, which is what clause deduplication
//! and relation indexing rely on.
//!
//! Expression shape
//!  - Every node carries a 64-bit structural hash computed once at construction, so
//!    hashing a whole tree is O(1) and inequality is usually decided without recursion.
//!  - Nodes are reference counted; cloning an expression never copies the tree.
//!
//! Traversal
//!  - [`walker`] offers explicit-stack, pre-order traversal guided by each node's
//!    [`expr::variant::NodeKind`], plus free-symbol and application collectors.
//!
//! Example
//! ```
//! use hyterm::prelude::*;
//!
//! let inv = Symbol::intern("Inv");
//! let x = var("x");
//! let clause = forall([(Symbol::intern("x"), Sort::Int)], implies(eq(x.clone(), int(0)), app(inv, [x])));
//!
//! assert_eq!(clause.node_kind(), NodeKind::Quantifier);
//! assert_eq!(clause.to_string(), "forall x: Int. x = 0 => Inv(x)");
//! ```

/// Expressions: node kinds, constructors and pretty-printing.
pub mod expr;
/// Sorts attached to quantifier binders.
pub mod sort;
/// Process-wide interned symbols.
pub mod symbol;
/// Tree walker and symbol/application collectors.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Expr` with its kind enums
    //! - Free-function builders from `func::*`
    //! - Symbols and sorts
    //! - Walker entry points
    pub use crate::expr::{
        Expr, ExprKind,
        func::*,
        variant::{BinOp, ExprType, NodeKind},
    };
    pub use crate::sort::Sort;
    pub use crate::symbol::Symbol;
    pub use crate::walker::{Walk, applications, contains, free_symbols, walk};
}
