//! MaxUnCover: the largest number of observed vectors that can be given
//! pairwise-distinct concrete resolutions.
//!
//! Left vertices are the observed vectors, right vertices the distinct
//! concrete vectors, with an edge `(v, c)` iff `c ∈ PowerSet(v)`. The bound is
//! the size of a maximum matching. Three formulations are provided:
//!
//! - [`BlossomMaxUncover`]: general matching, the reference answer
//! - [`HopcroftKarpMaxUncover`]: bipartite matching, the fast path
//! - [`MaxSatMaxUncover`]: edge variables with at-most-one constraints per
//!   vertex; slow, kept as a cross-validation oracle for small inputs

use crate::matching::{maximum_bipartite_matching, maximum_matching, BipartiteGraph};
use crate::maxsat::{Lit, MaxSatInstance, MaxSatOutcome, MaxSatSolver};
use crate::power_set::Family;
use crate::result::{CoverageError, CoverageResult};
use crate::timing::SolverKind;
use crate::valuation::ConcreteVector;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Computes MaxUnCover for observed vectors and their power sets
pub trait MaxUncoverSolver: fmt::Debug + Send + Sync {
    /// Which algorithm this is, for timing and error reports
    fn kind(&self) -> SolverKind;

    /// Size of a maximum matching between observed and concrete vectors
    fn solve(&self, families: &[Family]) -> CoverageResult<u64>;
}

/// Build the observed/concrete bipartite graph
#[must_use]
pub fn build_graph(families: &[Family]) -> BipartiteGraph {
    let mut right: HashMap<&ConcreteVector, usize> = HashMap::new();
    for c in families.iter().flat_map(|f| f.power_set.iter()) {
        let next = right.len();
        right.entry(c).or_insert(next);
    }

    let mut graph = BipartiteGraph::new(families.len(), right.len());
    for (left, family) in families.iter().enumerate() {
        for c in &family.power_set {
            graph.add_edge(left, right[c]);
        }
    }
    graph
}

/// MaxUnCover via Edmonds' blossom algorithm on the general graph
#[derive(Debug, Clone, Copy, Default)]
pub struct BlossomMaxUncover;

impl MaxUncoverSolver for BlossomMaxUncover {
    fn kind(&self) -> SolverKind {
        SolverKind::GeneralMatching
    }

    fn solve(&self, families: &[Family]) -> CoverageResult<u64> {
        let graph = build_graph(families).to_general();
        debug!(vertices = graph.vertex_count(), "solving MaxUnCover (blossom)");
        Ok(maximum_matching(&graph) as u64)
    }
}

/// MaxUnCover via Hopcroft-Karp
#[derive(Debug, Clone, Copy, Default)]
pub struct HopcroftKarpMaxUncover;

impl MaxUncoverSolver for HopcroftKarpMaxUncover {
    fn kind(&self) -> SolverKind {
        SolverKind::BipartiteMatching
    }

    fn solve(&self, families: &[Family]) -> CoverageResult<u64> {
        let graph = build_graph(families);
        debug!(
            left = graph.left_count(),
            right = graph.right_count(),
            edges = graph.edge_count(),
            "solving MaxUnCover (Hopcroft-Karp)"
        );
        Ok(maximum_bipartite_matching(&graph) as u64)
    }
}

/// MaxUnCover via weighted MaxSAT
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSatMaxUncover {
    solver: MaxSatSolver,
}

impl MaxSatMaxUncover {
    /// Use the given MaxSAT solver (and its budget)
    #[must_use]
    pub const fn new(solver: MaxSatSolver) -> Self {
        Self { solver }
    }

    /// One variable per edge; pairwise exclusion at both endpoints; unit soft
    /// clause per edge
    #[must_use]
    pub fn encode(families: &[Family]) -> (MaxSatInstance, Vec<Lit>) {
        let mut instance = MaxSatInstance::new();
        let mut edges = Vec::new();
        let mut by_right: HashMap<&ConcreteVector, Vec<Lit>> = HashMap::new();

        for family in families {
            let mut by_left = Vec::with_capacity(family.power_set.len());
            for option in &family.power_set {
                let edge = instance.new_var().positive();
                by_left.push(edge);
                by_right.entry(option).or_default().push(edge);
                edges.push(edge);
            }
            at_most_one(&mut instance, &by_left);
        }
        for group in by_right.values() {
            at_most_one(&mut instance, group);
        }
        for &edge in &edges {
            instance.add_soft(vec![edge], 1);
        }
        (instance, edges)
    }
}

fn at_most_one(instance: &mut MaxSatInstance, lits: &[Lit]) {
    for (i, a) in lits.iter().enumerate() {
        for b in &lits[i + 1..] {
            instance.add_hard(vec![a.negate(), b.negate()]);
        }
    }
}

impl MaxUncoverSolver for MaxSatMaxUncover {
    fn kind(&self) -> SolverKind {
        SolverKind::MaxSatOracle
    }

    fn solve(&self, families: &[Family]) -> CoverageResult<u64> {
        let (instance, edges) = Self::encode(families);
        debug!(
            edges = edges.len(),
            hard = instance.num_hard(),
            "solving MaxUnCover (MaxSAT)"
        );
        match self.solver.solve(&instance) {
            MaxSatOutcome::Optimal { model, .. } => {
                Ok(edges.iter().filter(|e| model[e.var().index()]).count() as u64)
            }
            MaxSatOutcome::Unsatisfiable => Err(CoverageError::SolverUnsatisfiable {
                solver: SolverKind::MaxSatOracle,
            }),
            MaxSatOutcome::Unknown { reason } => {
                Err(CoverageError::solver_unknown(SolverKind::MaxSatOracle, reason))
            }
        }
    }
}

/// Fail with [`CoverageError::MatchingMismatch`] unless both answers agree
pub fn cross_validate(general: u64, bipartite: u64) -> CoverageResult<u64> {
    if general == bipartite {
        Ok(general)
    } else {
        Err(CoverageError::MatchingMismatch { general, bipartite })
    }
}
