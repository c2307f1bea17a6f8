//! Clause database: registered relations, deduplicated clauses and the use/def indices.
//!
//! Relations are plain [`Symbol`]s that must be registered before they are recognised; any
//! other applied symbol is an ordinary uninterpreted function and is ignored by every
//! relation-oriented query.
//!
//! The use/def indices are derived data. Inserting a clause marks them [`ClauseIndex::Dirty`],
//! and they stay that way until [`ClauseDatabase::build_indices`] is called explicitly. A dirty
//! index answers every lookup with the empty set.
//!
//! Example:
//! ```
//! use hychc::prelude::*;
//!
//! let inv = Symbol::intern("Inv");
//! let x = Symbol::intern("x");
//! let mut db = ClauseDatabase::new();
//! db.register_relation(inv);
//!
//! let fact = forall([(x, Sort::Int)], implies(eq(sym(x), int(0)), app(inv, [sym(x)])));
//! assert_eq!(db.add_clause(fact.clone()).unwrap(), Some(0));
//! assert_eq!(db.add_clause(fact).unwrap(), None); // duplicate
//!
//! assert!(db.defs(inv).is_empty()); // not indexed yet
//! db.build_indices();
//! assert!(db.defs(inv).contains(&0));
//! ```
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::BuildHasher,
};

use hyterm::{prelude::*, walker::contains_application};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    clause::{ClauseKind, HornClause},
    utils::error::{ChcError, ChcResult},
};

/// Set of clause indices, in insertion order.
pub type ClauseSet = BTreeSet<usize>;

static EMPTY_CLAUSE_SET: ClauseSet = BTreeSet::new();

/// Relation membership test consumed by clause-level extraction routines.
pub trait RelationFilter {
    fn is_relation(&self, symbol: Symbol) -> bool;
}

impl RelationFilter for BTreeSet<Symbol> {
    fn is_relation(&self, symbol: Symbol) -> bool {
        self.contains(&symbol)
    }
}

impl<S: BuildHasher> RelationFilter for HashSet<Symbol, S> {
    fn is_relation(&self, symbol: Symbol) -> bool {
        self.contains(&symbol)
    }
}

impl<F: Fn(Symbol) -> bool> RelationFilter for F {
    fn is_relation(&self, symbol: Symbol) -> bool {
        self(symbol)
    }
}

/// Body-use and head-definition indices.
#[derive(Debug, Clone, Default)]
pub enum ClauseIndex {
    /// Out of date with the clause sequence; every lookup is empty.
    #[default]
    Dirty,
    Built {
        uses: BTreeMap<Symbol, ClauseSet>,
        defs: BTreeMap<Symbol, ClauseSet>,
    },
}

impl ClauseIndex {
    fn build(clauses: &[HornClause], filter: &impl RelationFilter) -> Self {
        let mut uses: BTreeMap<Symbol, ClauseSet> = BTreeMap::new();
        let mut defs: BTreeMap<Symbol, ClauseSet> = BTreeMap::new();

        for (idx, clause) in clauses.iter().enumerate() {
            for relation in clause.used_relations(filter) {
                uses.entry(relation).or_default().insert(idx);
            }
            if let Some(relation) = clause.head_relation(filter) {
                defs.entry(relation).or_default().insert(idx);
            }
        }

        ClauseIndex::Built { uses, defs }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, ClauseIndex::Built { .. })
    }

    /// Clauses whose body mentions `relation`.
    pub fn uses(&self, relation: Symbol) -> &ClauseSet {
        match self {
            ClauseIndex::Built { uses, .. } => uses.get(&relation).unwrap_or(&EMPTY_CLAUSE_SET),
            ClauseIndex::Dirty => &EMPTY_CLAUSE_SET,
        }
    }

    /// Clauses whose head is an application of `relation`.
    pub fn defs(&self, relation: Symbol) -> &ClauseSet {
        match self {
            ClauseIndex::Built { defs, .. } => defs.get(&relation).unwrap_or(&EMPTY_CLAUSE_SET),
            ClauseIndex::Dirty => &EMPTY_CLAUSE_SET,
        }
    }
}

/// Insertion-ordered, duplicate-free store of Horn clauses over registered relations.
///
/// A clause's index is its insertion position and never changes.
#[derive(Debug, Clone, Default)]
pub struct ClauseDatabase {
    relations: BTreeSet<Symbol>,
    clauses: Vec<HornClause>,
    // Structural hash -> clause positions sharing it
    by_hash: HashMap<u64, SmallVec<[usize; 1]>>,
    index: ClauseIndex,
}

/// Whether `formula` holds regardless of its variables, judged syntactically.
fn is_trivially_true(formula: &Expr) -> bool {
    let matrix = formula.as_forall().map(|(_, m)| m).unwrap_or(formula);
    match matrix.as_implies() {
        Some((antecedent, consequent)) => antecedent.is_false() || consequent.is_true(),
        None => matrix.is_true(),
    }
}

impl ClauseDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `relation`. Returns `false` if it was already registered.
    pub fn register_relation(&mut self, relation: Symbol) -> bool {
        let inserted = self.relations.insert(relation);
        if inserted {
            debug!("Registered relation {}", relation);
        }
        inserted
    }

    pub fn is_relation(&self, symbol: Symbol) -> bool {
        self.relations.contains(&symbol)
    }

    /// Registered relations, in canonical order.
    pub fn relations(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.relations.iter().copied()
    }

    /// Insert a universally quantified formula.
    ///
    /// Returns `Ok(None)` when the formula is trivially true or already stored, and the new
    /// clause index otherwise. Fails if `formula` is not a `forall`.
    pub fn add_clause(&mut self, formula: Expr) -> ChcResult<Option<usize>> {
        if is_trivially_true(&formula) {
            trace!("Rejected trivially true formula `{}`", formula);
            return Ok(None);
        }

        let clause = HornClause::try_from_formula(formula)?;
        Ok(self.add_horn_clause(clause))
    }

    /// Insert an already built clause. See [`Self::add_clause`].
    pub fn add_horn_clause(&mut self, clause: HornClause) -> Option<usize> {
        if is_trivially_true(clause.formula()) {
            trace!("Rejected trivially true clause `{}`", clause);
            return None;
        }

        let hash = clause.formula().structural_hash();
        let candidates = self.by_hash.entry(hash).or_default();
        if let Some(&existing) = candidates.iter().find(|&&i| self.clauses[i] == clause) {
            trace!("Rejected duplicate of clause #{}: `{}`", existing, clause);
            return None;
        }

        let idx = self.clauses.len();
        candidates.push(idx);
        debug!("Inserted clause #{}: `{}`", idx, clause);
        self.clauses.push(clause);
        self.reset_indices();
        Some(idx)
    }

    /// Clause at `idx`.
    ///
    /// # Panics
    /// If `idx` is out of range.
    pub fn get_clause(&self, idx: usize) -> &HornClause {
        assert!(
            idx < self.clauses.len(),
            "Clause index {} out of range (database holds {} clauses)",
            idx,
            self.clauses.len()
        );
        &self.clauses[idx]
    }

    /// Clause at `idx`, if any.
    pub fn clause(&self, idx: usize) -> Option<&HornClause> {
        self.clauses.get(idx)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HornClause> {
        self.clauses.iter()
    }

    /// Recompute the use/def indices from the current clauses.
    pub fn build_indices(&mut self) {
        let index = ClauseIndex::build(&self.clauses, &self.relations);
        if let ClauseIndex::Built { uses, defs } = &index {
            debug!(
                "Built clause indices over {} clauses: {} used relations, {} defined relations",
                self.clauses.len(),
                uses.len(),
                defs.len()
            );
        }
        self.index = index;
    }

    pub fn reset_indices(&mut self) {
        self.index = ClauseIndex::Dirty;
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_built()
    }

    pub fn index(&self) -> &ClauseIndex {
        &self.index
    }

    /// Clauses whose body mentions `relation`. Empty while the index is dirty.
    pub fn uses(&self, relation: Symbol) -> &ClauseSet {
        self.index.uses(relation)
    }

    /// Clauses defining `relation` in their head. Empty while the index is dirty.
    pub fn defs(&self, relation: Symbol) -> &ClauseSet {
        self.index.defs(relation)
    }

    fn clauses_of_kind(&self, kind: ClauseKind) -> impl Iterator<Item = (usize, &HornClause)> {
        self.clauses
            .iter()
            .enumerate()
            .filter(move |(_, clause)| clause.kind_for(self) == kind)
    }

    /// Clauses whose body applies no relation, excluding queries.
    pub fn facts(&self) -> impl Iterator<Item = (usize, &HornClause)> {
        self.clauses_of_kind(ClauseKind::Fact)
    }

    pub fn queries(&self) -> impl Iterator<Item = (usize, &HornClause)> {
        self.clauses_of_kind(ClauseKind::Query)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (usize, &HornClause)> {
        self.clauses_of_kind(ClauseKind::Transition)
    }

    /// Check that every relation is applied with a single arity across all clauses, and that
    /// every head mentioning a relation is exactly one relation application.
    pub fn validate(&self) -> ChcResult<()> {
        let mut arities: BTreeMap<Symbol, usize> = BTreeMap::new();

        for (idx, clause) in self.clauses.iter().enumerate() {
            for application in applications(clause.matrix()) {
                let Some((relation, args)) = application.as_app() else {
                    continue;
                };
                if !self.is_relation(relation) {
                    continue;
                }

                let expected = *arities.entry(relation).or_insert(args.len());
                if expected != args.len() {
                    return Err(ChcError::ArityMismatch {
                        relation,
                        expected,
                        found: args.len(),
                        clause: idx,
                    });
                }
            }

            if let Some(head) = clause.head() {
                if clause.head_app(self).is_none()
                    && contains_application(head, |s| self.is_relation(s))
                {
                    return Err(ChcError::NonHornHead {
                        clause: idx,
                        head: head.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl RelationFilter for ClauseDatabase {
    fn is_relation(&self, symbol: Symbol) -> bool {
        self.relations.contains(&symbol)
    }
}

impl<'a> IntoIterator for &'a ClauseDatabase {
    type Item = &'a HornClause;
    type IntoIter = std::slice::Iter<'a, HornClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivially_true_shapes() {
        let a = var("db_a");
        assert!(is_trivially_true(&tt()));
        assert!(is_trivially_true(&forall([], tt())));
        assert!(is_trivially_true(&forall([], implies(a.clone(), tt()))));
        assert!(is_trivially_true(&forall([], implies(ff(), a.clone()))));
        assert!(!is_trivially_true(&forall([], implies(a.clone(), ff()))));
        assert!(!is_trivially_true(&forall([], a)));
    }

    #[test]
    fn dirty_index_answers_empty() {
        let index = ClauseIndex::Dirty;
        assert!(!index.is_built());
        assert!(index.uses(Symbol::intern("db_R")).is_empty());
        assert!(index.defs(Symbol::intern("db_R")).is_empty());
    }
}
