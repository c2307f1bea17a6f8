//! Horn clauses: universally quantified formulas with a body/head decomposition.
//!
//! A clause wraps `forall vars. F`. When `F` is an implication `A => B`, the body is `A` and
//! the head is `B`; otherwise the body is `F` itself and there is no head.
//!
//! Classification comes in two flavours:
//! - [`HornClause::is_fact`] / [`HornClause::is_query`] look at every application node,
//!   registered relation or not.
//! - [`HornClause::is_fact_for`] / [`HornClause::is_query_for`] only count applications of
//!   symbols a [`RelationFilter`] accepts. The database and the dependency graph use these.
use std::fmt;

use hyterm::{prelude::*, walker::contains_application};

use crate::{
    database::RelationFilter,
    utils::error::{ChcError, ChcResult},
};

/// Role of a clause in a CHC system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIs)]
pub enum ClauseKind {
    /// Body without relation applications.
    Fact,
    /// Implication whose head has no relation application.
    Query,
    /// Anything else: a relation defined from other relations.
    Transition,
}

/// A universally quantified formula viewed as a Horn clause.
///
/// Equality, ordering and hashing are those of the wrapped formula.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HornClause {
    formula: Expr,
}

impl HornClause {
    /// Build `forall vars. matrix`.
    pub fn new(vars: impl IntoIterator<Item = (Symbol, Sort)>, matrix: Expr) -> Self {
        Self {
            formula: forall(vars, matrix),
        }
    }

    /// Wrap an existing formula, which must be a universal quantification.
    pub fn try_from_formula(formula: Expr) -> ChcResult<Self> {
        if formula.as_forall().is_some() {
            Ok(Self { formula })
        } else {
            Err(ChcError::NotUniversallyQuantified { formula })
        }
    }

    /// The wrapped `forall` formula.
    #[inline]
    pub fn formula(&self) -> &Expr {
        &self.formula
    }

    /// Quantified variables with their sorts.
    pub fn variables(&self) -> &[(Symbol, Sort)] {
        self.formula
            .as_forall()
            .map(|(binders, _)| binders)
            .unwrap_or_default()
    }

    /// The formula under the quantifier.
    pub fn matrix(&self) -> &Expr {
        self.formula
            .as_forall()
            .map(|(_, matrix)| matrix)
            .unwrap_or(&self.formula)
    }

    pub fn body(&self) -> &Expr {
        let matrix = self.matrix();
        match matrix.as_implies() {
            Some((antecedent, _)) => antecedent,
            None => matrix,
        }
    }

    pub fn head(&self) -> Option<&Expr> {
        self.matrix().as_implies().map(|(_, consequent)| consequent)
    }

    /// Whether the body has no application node at all.
    pub fn is_fact(&self) -> bool {
        !contains_application(self.body(), |_| true)
    }

    /// Whether the clause is an implication whose head has no application node.
    pub fn is_query(&self) -> bool {
        self.head()
            .is_some_and(|head| !contains_application(head, |_| true))
    }

    /// Whether the body applies no relation accepted by `filter`.
    pub fn is_fact_for<F: RelationFilter + ?Sized>(&self, filter: &F) -> bool {
        !contains_application(self.body(), |s| filter.is_relation(s))
    }

    /// Whether the clause is an implication whose head applies no relation accepted by
    /// `filter`.
    pub fn is_query_for<F: RelationFilter + ?Sized>(&self, filter: &F) -> bool {
        self.head()
            .is_some_and(|head| !contains_application(head, |s| filter.is_relation(s)))
    }

    /// Fact, query or transition with respect to `filter`. A clause that is both a fact and
    /// a query (e.g. `x < 0 => false`) is a query.
    pub fn kind_for<F: RelationFilter + ?Sized>(&self, filter: &F) -> ClauseKind {
        if self.is_query_for(filter) {
            ClauseKind::Query
        } else if self.is_fact_for(filter) {
            ClauseKind::Fact
        } else {
            ClauseKind::Transition
        }
    }

    /// Distinct relations occurring free in the body, in canonical symbol order.
    pub fn used_relations<'a, F: RelationFilter + ?Sized>(
        &'a self,
        filter: &'a F,
    ) -> impl Iterator<Item = Symbol> + 'a {
        free_symbols(self.body())
            .into_iter()
            .filter(move |s| filter.is_relation(*s))
    }

    /// Distinct relation applications of the body, arguments included.
    pub fn used_func_app<'a, F: RelationFilter + ?Sized>(
        &'a self,
        filter: &'a F,
    ) -> impl Iterator<Item = Expr> + 'a {
        applications(self.body())
            .into_iter()
            .filter(move |app| app.as_app().is_some_and(|(func, _)| filter.is_relation(func)))
    }

    /// The head, if it is a single application of a relation.
    pub fn head_app<F: RelationFilter + ?Sized>(&self, filter: &F) -> Option<&Expr> {
        self.head()
            .filter(|head| head.as_app().is_some_and(|(func, _)| filter.is_relation(func)))
    }

    /// The relation defined by this clause, if any.
    pub fn head_relation<F: RelationFilter + ?Sized>(&self, filter: &F) -> Option<Symbol> {
        self.head_app(filter)
            .and_then(Expr::as_app)
            .map(|(func, _)| func)
    }
}

impl TryFrom<Expr> for HornClause {
    type Error = ChcError;

    fn try_from(formula: Expr) -> ChcResult<Self> {
        Self::try_from_formula(formula)
    }
}

impl From<HornClause> for Expr {
    fn from(clause: HornClause) -> Self {
        clause.formula
    }
}

impl fmt::Display for HornClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula)
    }
}
