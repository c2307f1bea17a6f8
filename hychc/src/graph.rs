//! Relation dependency graph derived from a [`ClauseDatabase`].
//!
//! Vertices are relations. A transition clause whose body uses `R` and whose head defines `S`
//! contributes the edge `R -> S`. Facts only register their head relation as a vertex and
//! queries contribute nothing.
//!
//! The graph is a snapshot: inserting clauses into the database afterwards does not update
//! it, call [`DependencyGraph::build_graph`] again.
//!
//! Entry relation
//! - A candidate is a relation defined by at least one fact clause whose incoming edges all
//!   come from itself (a self-loop does not disqualify it).
//! - [`EntryPolicy::Unique`] sets the entry only when there is exactly one candidate;
//!   [`EntryPolicy::FirstDefined`] takes the candidate whose first fact comes earliest.
//! - A system without facts has no entry.
use std::collections::{BTreeMap, BTreeSet};

use hyterm::prelude::Symbol;
use log::{debug, info, warn};
use petgraph::{
    algo::{tarjan_scc, toposort},
    prelude::DiGraphMap,
    visit::Bfs,
};
use smallvec::SmallVec;

use crate::{
    config::{EntryPolicy, GraphConfig},
    database::{ClauseDatabase, ClauseSet},
};

static EMPTY_RELATION_SET: BTreeSet<Symbol> = BTreeSet::new();
static EMPTY_CLAUSE_SET: ClauseSet = BTreeSet::new();

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    config: GraphConfig,
    built: bool,
    vertices: BTreeSet<Symbol>,
    outgoing: BTreeMap<Symbol, BTreeSet<Symbol>>,
    incoming: BTreeMap<Symbol, BTreeSet<Symbol>>,
    // (from, to) -> clauses contributing the edge
    edge_clauses: BTreeMap<(Symbol, Symbol), ClauseSet>,
    entry: Option<Symbol>,
    // Strongly connected components, computed once per build
    components: Vec<Vec<Symbol>>,
    component_of: BTreeMap<Symbol, usize>,
}

impl DependencyGraph {
    /// An unbuilt graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An unbuilt graph using `config`.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a graph from `db` with the default configuration.
    pub fn build(db: &ClauseDatabase) -> Self {
        let mut graph = Self::new();
        graph.build_graph(db);
        graph
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Whether [`Self::build_graph`] has been called.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Recompute edges and entry from the clauses currently in `db`, replacing any previous
    /// state.
    pub fn build_graph(&mut self, db: &ClauseDatabase) {
        self.vertices.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.edge_clauses.clear();
        self.entry = None;
        self.components.clear();
        self.component_of.clear();

        // Relations defined by facts, in order of their first fact
        let mut fact_defined: Vec<Symbol> = Vec::new();

        for (idx, clause) in db.iter().enumerate() {
            if clause.is_query_for(db) {
                continue;
            }
            let Some(head) = clause.head_relation(db) else {
                continue;
            };
            self.vertices.insert(head);

            if clause.is_fact_for(db) {
                if !fact_defined.contains(&head) {
                    fact_defined.push(head);
                }
                continue;
            }

            for relation in clause.used_relations(db) {
                self.vertices.insert(relation);
                self.outgoing.entry(relation).or_default().insert(head);
                self.incoming.entry(head).or_default().insert(relation);
                self.edge_clauses
                    .entry((relation, head))
                    .or_default()
                    .insert(idx);
            }
        }

        self.compute_components();
        self.built = true;
        debug!(
            "Built dependency graph: {} relations, {} edges, {} components",
            self.vertices.len(),
            self.edge_count(),
            self.components.len()
        );

        self.entry = self.select_entry(&fact_defined);
    }

    fn compute_components(&mut self) {
        let mut components = tarjan_scc(&self.to_graph_map());
        for (i, component) in components.iter_mut().enumerate() {
            component.sort();
            for &relation in component.iter() {
                self.component_of.insert(relation, i);
            }
        }
        self.components = components;
    }

    fn select_entry(&self, fact_defined: &[Symbol]) -> Option<Symbol> {
        let candidates: SmallVec<[Symbol; 2]> = fact_defined
            .iter()
            .copied()
            .filter(|&relation| self.incoming(relation).iter().all(|&src| src == relation))
            .collect();

        let entry = match (self.config.entry_policy, candidates.as_slice()) {
            (_, []) => None,
            (_, [only]) => Some(*only),
            (EntryPolicy::FirstDefined, [first, ..]) => Some(*first),
            (EntryPolicy::Unique, many) => {
                warn!(
                    "No entry relation: {} candidates ({})",
                    many.len(),
                    many.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                None
            }
        };

        if let Some(entry) = entry {
            info!("Entry relation is {}", entry);
        }
        entry
    }

    pub fn has_entry(&self) -> bool {
        self.entry.is_some()
    }

    /// The entry relation.
    ///
    /// # Panics
    /// If the graph has no entry; check [`Self::has_entry`] first.
    pub fn entry(&self) -> Symbol {
        match self.entry {
            Some(entry) => entry,
            None => panic!("Dependency graph has no entry relation"),
        }
    }

    pub fn try_entry(&self) -> Option<Symbol> {
        self.entry
    }

    /// Relations `relation` flows into.
    pub fn outgoing(&self, relation: Symbol) -> &BTreeSet<Symbol> {
        self.outgoing.get(&relation).unwrap_or(&EMPTY_RELATION_SET)
    }

    /// Relations flowing into `relation`.
    pub fn incoming(&self, relation: Symbol) -> &BTreeSet<Symbol> {
        self.incoming.get(&relation).unwrap_or(&EMPTY_RELATION_SET)
    }

    /// Every relation seen while building, in canonical order.
    pub fn relations(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.vertices.iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }

    /// Clauses that contributed the edge `from -> to`.
    pub fn edge_clauses(&self, from: Symbol, to: Symbol) -> &ClauseSet {
        self.edge_clauses
            .get(&(from, to))
            .unwrap_or(&EMPTY_CLAUSE_SET)
    }

    /// Copy of the graph as a petgraph map, for use with its algorithms.
    pub fn to_graph_map(&self) -> DiGraphMap<Symbol, ()> {
        let mut graph = DiGraphMap::with_capacity(self.vertices.len(), self.edge_count());
        for &relation in &self.vertices {
            graph.add_node(relation);
        }
        for (&from, targets) in &self.outgoing {
            for &to in targets {
                graph.add_edge(from, to, ());
            }
        }
        graph
    }

    /// Strongly connected components, each sorted, in reverse topological order.
    ///
    /// Computed by [`Self::build_graph`]; empty on an unbuilt graph.
    pub fn sccs(&self) -> &[Vec<Symbol>] {
        &self.components
    }

    /// Whether `relation` lies on a cycle.
    pub fn is_recursive(&self, relation: Symbol) -> bool {
        if self.outgoing(relation).contains(&relation) {
            return true;
        }
        self.component_of
            .get(&relation)
            .is_some_and(|&i| self.components[i].len() > 1)
    }

    /// Relations ordered so every edge goes forward, or `None` if the graph has a cycle
    /// (self-loops included).
    pub fn topological_order(&self) -> Option<Vec<Symbol>> {
        toposort(&self.to_graph_map(), None).ok()
    }

    /// Relations reachable from the entry, the entry included. Empty without an entry.
    pub fn reachable_from_entry(&self) -> BTreeSet<Symbol> {
        let Some(entry) = self.entry else {
            return BTreeSet::new();
        };

        let graph = self.to_graph_map();
        let mut reachable = BTreeSet::new();
        let mut bfs = Bfs::new(&graph, entry);
        while let Some(relation) = bfs.next(&graph) {
            reachable.insert(relation);
        }
        reachable
    }
}
