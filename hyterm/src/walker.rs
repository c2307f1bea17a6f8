//! Iterative walkers over expressions.
//!
//! This module provides explicit-stack, pre-order traversals that never recurse on the
//! expression depth:
//! - [`walk`]: the visitor decides, per node, whether to descend, skip the subtree, or stop.
//! - [`walk_with`]: same, but threads a user input from each node down to its children.
//!
//! The collectors built on top ([`contains`], [`free_symbols`], [`applications`]) are what
//! Horn clause classification and relation extraction are made of.
//!
//! Example: count nodes in an expression
//! ```
//! use hyterm::prelude::*;
//!
//! let e = var("p") & !var("q");
//! let mut count = 0usize;
//! walk(&e, |_| {
//!     count += 1;
//!     Walk::Continue
//! });
//! assert_eq!(count, 4); // And(p, Not(q)) has 4 nodes
//! ```
use std::{collections::BTreeSet, ops::ControlFlow};

use smallvec::SmallVec;

use crate::{
    expr::{Expr, ExprKind, variant::NodeKind},
    symbol::Symbol,
};

/// Decision returned by a [`walk`] visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the children of the current node.
    Continue,
    /// Do not visit the children of the current node.
    Skip,
    /// Abort the traversal.
    Stop,
}

/// Decision returned by a [`walk_with`] visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkWith<I> {
    /// Visit the children of the current node, each receiving a clone of the input.
    Continue(I),
    /// Do not visit the children of the current node.
    Skip,
    /// Abort the traversal.
    Stop,
}

/// Pre-order traversal threading `input` from parents to children.
///
/// Children are visited left to right. Returns [`ControlFlow::Break`] if the visitor stopped
/// the traversal.
pub fn walk_with<'a, I, F>(root: &'a Expr, input: I, mut visitor: F) -> ControlFlow<()>
where
    I: Clone,
    F: FnMut(&'a Expr, &I) -> WalkWith<I>,
{
    let mut stack: Vec<(&'a Expr, I)> = vec![(root, input)];

    while let Some((node, input)) = stack.pop() {
        match visitor(node, &input) {
            WalkWith::Continue(next) => {
                // Reverse push keeps left-to-right visiting order
                let children = node.children();
                for child in children.into_iter().rev() {
                    stack.push((child, next.clone()));
                }
            }
            WalkWith::Skip => {}
            WalkWith::Stop => return ControlFlow::Break(()),
        }
    }

    ControlFlow::Continue(())
}

/// Pre-order traversal without threaded input.
pub fn walk<'a, F>(root: &'a Expr, mut visitor: F) -> ControlFlow<()>
where
    F: FnMut(&'a Expr) -> Walk,
{
    walk_with(root, (), |node, _| match visitor(node) {
        Walk::Continue => WalkWith::Continue(()),
        Walk::Skip => WalkWith::Skip,
        Walk::Stop => WalkWith::Stop,
    })
}

/// Whether any node of `root` satisfies `predicate`. Stops at the first match.
pub fn contains<F>(root: &Expr, mut predicate: F) -> bool
where
    F: FnMut(&Expr) -> bool,
{
    walk(root, |node| {
        if predicate(node) {
            Walk::Stop
        } else {
            Walk::Continue
        }
    })
    .is_break()
}

/// Whether `root` contains an application node whose function symbol satisfies `accept`.
pub fn contains_application<F>(root: &Expr, mut accept: F) -> bool
where
    F: FnMut(Symbol) -> bool,
{
    contains(root, |node| match node.kind() {
        ExprKind::App(func, _) => accept(*func),
        _ => false,
    })
}

/// Every symbol occurring free in `root`, in canonical order.
///
/// Function symbols of applications count as occurrences. Symbols bound by a quantifier
/// inside `root` are excluded within that quantifier's scope.
pub fn free_symbols(root: &Expr) -> BTreeSet<Symbol> {
    let mut symbols = BTreeSet::new();
    let bound: SmallVec<[Symbol; 4]> = SmallVec::new();

    let _ = walk_with(root, bound, |node, bound| match node.kind() {
        ExprKind::Symbol(s) => {
            if !bound.contains(s) {
                symbols.insert(*s);
            }
            WalkWith::Skip
        }
        ExprKind::App(func, _) => {
            if !bound.contains(func) {
                symbols.insert(*func);
            }
            WalkWith::Continue(bound.clone())
        }
        ExprKind::Forall(binders, _) | ExprKind::Exists(binders, _) => {
            let mut inner = bound.clone();
            inner.extend(binders.iter().map(|(s, _)| *s));
            WalkWith::Continue(inner)
        }
        _ => WalkWith::Continue(bound.clone()),
    });

    symbols
}

/// Every distinct application node of `root`, in canonical (structural) order.
pub fn applications(root: &Expr) -> BTreeSet<Expr> {
    let mut apps = BTreeSet::new();
    let _ = walk(root, |node| {
        if node.node_kind() == NodeKind::Application {
            apps.insert(node.clone());
        }
        Walk::Continue
    });
    apps
}
