//! Expressions: immutable trees with structural equality, ordering and hashing.
//!
//! Role
//! - [`Expr`] is a reference-counted node; cloning is O(1) and never copies the tree.
//! - [`ExprKind`] describes the constructor and children of a node.
//! - Builders live in [`func`]; operator sugar (`&`, `|`, `!`) is provided on [`Expr`].
//!
//! Equality semantics
//! - Expressions compare by structure: two independently constructed trees are equal iff
//!   they have the same constructors, payloads and pairwise-equal children.
//! - Fast paths: identical allocations are equal without inspection; differing cached hashes
//!   are unequal without inspecting children.
//! - Comparison, ordering and drop use explicit stacks, so the depth of a tree is only
//!   bounded by memory.
//!
//! Example
//! ```
//! use hyterm::prelude::*;
//!
//! let a = and([var("p"), not(var("q"))]);
//! let b = var("p") & !var("q");
//! assert_eq!(a, b);
//! assert_eq!(a.structural_hash(), b.structural_hash());
//! ```
pub mod func;
pub mod pretty;
pub mod variant;

use std::{
    cmp::Ordering,
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use smallvec::SmallVec;

use crate::{
    expr::variant::{BinOp, ExprType, NodeKind},
    sort::Sort,
    symbol::Symbol,
};

/// Operand list of n-ary nodes and applications.
pub type Operands = SmallVec<[Expr; 2]>;

/// Binder list of a quantifier.
pub type Binders = SmallVec<[(Symbol, Sort); 2]>;

/// Constructor and children of an expression node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExprKind {
    /// Boolean constant.
    Bool(bool),
    /// Integer constant.
    Int(i64),
    /// Reference to a named symbol (variable or constant).
    Symbol(Symbol),
    /// Negation.
    Not(Expr),
    /// Conjunction of at least two operands.
    And(Operands),
    /// Disjunction of at least two operands.
    Or(Operands),
    /// Implication `antecedent => consequent`.
    Implies(Expr, Expr),
    /// Interpreted binary operator.
    Binary(BinOp, Expr, Expr),
    /// `if c then a else b`.
    Ite(Expr, Expr, Expr),
    /// Universal quantification.
    Forall(Binders, Expr),
    /// Existential quantification.
    Exists(Binders, Expr),
    /// Application of an uninterpreted named symbol.
    App(Symbol, Operands),
}

impl ExprKind {
    /// Return the discriminant identifying the kind of this node.
    pub fn type_(&self) -> ExprType {
        match self {
            ExprKind::Bool(_) => ExprType::Bool,
            ExprKind::Int(_) => ExprType::Int,
            ExprKind::Symbol(_) => ExprType::Symbol,
            ExprKind::Not(_) => ExprType::Not,
            ExprKind::And(_) => ExprType::And,
            ExprKind::Or(_) => ExprType::Or,
            ExprKind::Implies(_, _) => ExprType::Implies,
            ExprKind::Binary(_, _, _) => ExprType::Binary,
            ExprKind::Ite(_, _, _) => ExprType::Ite,
            ExprKind::Forall(_, _) => ExprType::Forall,
            ExprKind::Exists(_, _) => ExprType::Exists,
            ExprKind::App(_, _) => ExprType::App,
        }
    }
}

struct ExprNode {
    kind: ExprKind,
    hash: u64,
}

/// Owned, immutable expression.
///
/// Role
/// - Shares its node through an [`Arc`]; all children are themselves [`Expr`]s.
/// - Caches a structural hash so [`Hash`] is O(1) and usable as a content address for
///   deduplication and index keys.
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    /// Wrap a node description into an expression, computing its structural hash.
    pub fn new(kind: ExprKind) -> Self {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        let hash = hasher.finish();
        Expr(Arc::new(ExprNode { kind, hash }))
    }

    /// Describe the node's constructor and expose its children.
    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Return the discriminant identifying the kind of this node.
    #[inline]
    pub fn type_(&self) -> ExprType {
        self.0.kind.type_()
    }

    /// Same as [`Expr::type_`]
    #[inline]
    pub fn r#type(&self) -> ExprType {
        self.type_()
    }

    /// Coarse classification used by traversals.
    #[inline]
    pub fn node_kind(&self) -> NodeKind {
        self.type_().into()
    }

    /// Hash of the whole tree, computed once at construction.
    #[inline]
    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    /// Whether both handles share the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Direct children in left-to-right order.
    pub fn children(&self) -> SmallVec<[&Expr; 4]> {
        match self.kind() {
            ExprKind::Bool(_) | ExprKind::Int(_) | ExprKind::Symbol(_) => SmallVec::new(),
            ExprKind::Not(inner) => smallvec::smallvec![inner],
            ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::App(_, ops) => {
                ops.iter().collect()
            }
            ExprKind::Implies(lhs, rhs) | ExprKind::Binary(_, lhs, rhs) => {
                smallvec::smallvec![lhs, rhs]
            }
            ExprKind::Ite(c, t, e) => smallvec::smallvec![c, t, e],
            ExprKind::Forall(_, body) | ExprKind::Exists(_, body) => smallvec::smallvec![body],
        }
    }

    /// Whether this is the literal `true`.
    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self.kind(), ExprKind::Bool(true))
    }

    /// Whether this is the literal `false`.
    #[inline]
    pub fn is_false(&self) -> bool {
        matches!(self.kind(), ExprKind::Bool(false))
    }

    /// The referenced symbol, if this is a symbol node.
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self.kind() {
            ExprKind::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    /// `(antecedent, consequent)` if this is an implication.
    pub fn as_implies(&self) -> Option<(&Expr, &Expr)> {
        match self.kind() {
            ExprKind::Implies(lhs, rhs) => Some((lhs, rhs)),
            _ => None,
        }
    }

    /// `(binders, body)` if this is a universal quantification.
    pub fn as_forall(&self) -> Option<(&[(Symbol, Sort)], &Expr)> {
        match self.kind() {
            ExprKind::Forall(binders, body) => Some((binders.as_slice(), body)),
            _ => None,
        }
    }

    /// `(function, arguments)` if this is an application of a named symbol.
    pub fn as_app(&self) -> Option<(Symbol, &[Expr])> {
        match self.kind() {
            ExprKind::App(func, args) => Some((*func, args.as_slice())),
            _ => None,
        }
    }

    /// Build `self => consequent`.
    #[inline]
    pub fn implies(self, consequent: Expr) -> Expr {
        func::implies(self, consequent)
    }

    /// Build `self = other`.
    #[inline]
    pub fn equals(self, other: Expr) -> Expr {
        func::eq(self, other)
    }
}

/// Compare the constructors and payloads of two nodes, ignoring their children.
///
/// Nodes that compare equal here have the same number of children.
fn shallow_cmp(lhs: &ExprKind, rhs: &ExprKind) -> Ordering {
    let by_type = (lhs.type_() as u8).cmp(&(rhs.type_() as u8));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (lhs, rhs) {
        (ExprKind::Bool(a), ExprKind::Bool(b)) => a.cmp(b),
        (ExprKind::Int(a), ExprKind::Int(b)) => a.cmp(b),
        (ExprKind::Symbol(a), ExprKind::Symbol(b)) => a.cmp(b),
        (ExprKind::And(a), ExprKind::And(b)) | (ExprKind::Or(a), ExprKind::Or(b)) => {
            a.len().cmp(&b.len())
        }
        (ExprKind::Binary(a, ..), ExprKind::Binary(b, ..)) => a.cmp(b),
        (ExprKind::Forall(a, _), ExprKind::Forall(b, _))
        | (ExprKind::Exists(a, _), ExprKind::Exists(b, _)) => a.as_slice().cmp(b.as_slice()),
        (ExprKind::App(f, a), ExprKind::App(g, b)) => f.cmp(g).then(a.len().cmp(&b.len())),
        _ => Ordering::Equal,
    }
}

/// Push the children of `lhs` and `rhs` pairwise so the leftmost pair is popped first.
fn push_child_pairs<'a>(stack: &mut Vec<(&'a Expr, &'a Expr)>, lhs: &'a Expr, rhs: &'a Expr) {
    let lhs_children = lhs.children();
    let rhs_children = rhs.children();
    debug_assert_eq!(lhs_children.len(), rhs_children.len());
    stack.extend(lhs_children.into_iter().zip(rhs_children).rev());
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut stack: Vec<(&Expr, &Expr)> = vec![(self, other)];

        while let Some((lhs, rhs)) = stack.pop() {
            // Quick paths: shared allocation, then cached hash mismatch
            if lhs.ptr_eq(rhs) {
                continue;
            }
            if lhs.0.hash != rhs.0.hash {
                return false;
            }
            if shallow_cmp(lhs.kind(), rhs.kind()) != Ordering::Equal {
                return false;
            }
            push_child_pairs(&mut stack, lhs, rhs);
        }

        true
    }
}

impl Eq for Expr {}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    /// Lexicographic order over the pre-order sequence of nodes.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut stack: Vec<(&Expr, &Expr)> = vec![(self, other)];

        while let Some((lhs, rhs)) = stack.pop() {
            if lhs.ptr_eq(rhs) {
                continue;
            }
            let ordering = shallow_cmp(lhs.kind(), rhs.kind());
            if ordering != Ordering::Equal {
                return ordering;
            }
            push_child_pairs(&mut stack, lhs, rhs);
        }

        Ordering::Equal
    }
}

impl ExprNode {
    /// Move the children out of this node, leaving a leaf behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match std::mem::replace(&mut self.kind, ExprKind::Bool(false)) {
            ExprKind::Bool(_) | ExprKind::Int(_) | ExprKind::Symbol(_) => {}
            ExprKind::Not(inner) => out.push(inner),
            ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::App(_, ops) => out.extend(ops),
            ExprKind::Implies(lhs, rhs) | ExprKind::Binary(_, lhs, rhs) => {
                out.push(lhs);
                out.push(rhs);
            }
            ExprKind::Ite(c, t, e) => out.extend([c, t, e]),
            ExprKind::Forall(_, body) | ExprKind::Exists(_, body) => out.push(body),
        }
    }
}

impl Drop for ExprNode {
    // Children whose last reference is held here are unlinked onto a heap stack, so
    // dropping a deep tree never recurses.
    fn drop(&mut self) {
        let mut pending: Vec<Expr> = Vec::new();
        self.take_children(&mut pending);

        while let Some(expr) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(expr.0) {
                node.take_children(&mut pending);
            }
        }
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl From<Symbol> for Expr {
    fn from(value: Symbol) -> Self {
        func::sym(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        func::boolean(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        func::int(value)
    }
}

impl std::ops::BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Self::Output {
        func::and([self, rhs])
    }
}

impl std::ops::BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Self::Output {
        func::or([self, rhs])
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        func::not(self)
    }
}
