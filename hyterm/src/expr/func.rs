//! Free-function builders for [`Expr`].
//!
//! Builders perform no simplification beyond collapsing degenerate n-ary nodes:
//! `and([])` is `true`, `or([])` is `false`, and a single operand is returned as-is.
use crate::{
    expr::{Binders, Expr, ExprKind, Operands, variant::BinOp},
    sort::Sort,
    symbol::Symbol,
};

/// The literal `true`.
pub fn tt() -> Expr {
    Expr::new(ExprKind::Bool(true))
}

/// The literal `false`.
pub fn ff() -> Expr {
    Expr::new(ExprKind::Bool(false))
}

/// A boolean literal.
pub fn boolean(value: bool) -> Expr {
    Expr::new(ExprKind::Bool(value))
}

/// An integer literal.
pub fn int(value: i64) -> Expr {
    Expr::new(ExprKind::Int(value))
}

/// Reference to `symbol`.
pub fn sym(symbol: Symbol) -> Expr {
    Expr::new(ExprKind::Symbol(symbol))
}

/// Reference to the symbol interned under `name`.
pub fn var(name: &str) -> Expr {
    sym(Symbol::intern(name))
}

pub fn not(inner: Expr) -> Expr {
    Expr::new(ExprKind::Not(inner))
}

pub fn and(operands: impl IntoIterator<Item = Expr>) -> Expr {
    let mut operands: Operands = operands.into_iter().collect();
    match operands.len() {
        0 => tt(),
        1 => operands.remove(0),
        _ => Expr::new(ExprKind::And(operands)),
    }
}

pub fn or(operands: impl IntoIterator<Item = Expr>) -> Expr {
    let mut operands: Operands = operands.into_iter().collect();
    match operands.len() {
        0 => ff(),
        1 => operands.remove(0),
        _ => Expr::new(ExprKind::Or(operands)),
    }
}

pub fn implies(antecedent: Expr, consequent: Expr) -> Expr {
    Expr::new(ExprKind::Implies(antecedent, consequent))
}

/// Interpreted binary operator application.
pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::new(ExprKind::Binary(op, lhs, rhs))
}

pub fn eq(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Eq, lhs, rhs)
}

pub fn lt(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Lt, lhs, rhs)
}

pub fn le(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Le, lhs, rhs)
}

pub fn gt(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Gt, lhs, rhs)
}

pub fn ge(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Ge, lhs, rhs)
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Add, lhs, rhs)
}

pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Sub, lhs, rhs)
}

pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Mul, lhs, rhs)
}

/// `if condition then then_branch else else_branch`.
pub fn ite(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::new(ExprKind::Ite(condition, then_branch, else_branch))
}

/// Universal quantification over `binders`. An empty binder list still yields a
/// quantifier node.
pub fn forall(binders: impl IntoIterator<Item = (Symbol, Sort)>, body: Expr) -> Expr {
    let binders: Binders = binders.into_iter().collect();
    Expr::new(ExprKind::Forall(binders, body))
}

/// Existential quantification over `binders`.
pub fn exists(binders: impl IntoIterator<Item = (Symbol, Sort)>, body: Expr) -> Expr {
    let binders: Binders = binders.into_iter().collect();
    Expr::new(ExprKind::Exists(binders, body))
}

/// Application `func(args...)` of an uninterpreted named symbol.
pub fn app(func: Symbol, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::App(func, args.into_iter().collect()))
}
