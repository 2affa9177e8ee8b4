//! MinUnCover: minimum hitting set over the observed power sets.
//!
//! One variable per distinct concrete vector, one hard clause per power set
//! (at least one member chosen), one unit soft clause `¬x` of weight 1 per
//! variable. The optimum's number of true variables is the bound.
//!
//! The instance is first shrunk with the rules in [`crate::hitting_set`].
//! Only components whose packing bound and greedy cover disagree reach the
//! MaxSAT search, which starts from the greedy cover. One wall-clock budget
//! covers all components of a call.

use crate::hitting_set::HittingSet;
use crate::maxsat::{MaxSatInstance, MaxSatOutcome, MaxSatSolver, Var};
use crate::power_set::PowerSet;
use crate::result::{CoverageError, CoverageResult};
use crate::timing::SolverKind;
use crate::valuation::ConcreteVector;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace};

/// Computes the size of a minimum hitting set over a list of power sets
pub trait MinUncoverSolver: fmt::Debug + Send + Sync {
    /// Smallest number of concrete vectors hitting every family.
    ///
    /// Returns [`CoverageError::SolverUnknown`] when the solver gives up and
    /// [`CoverageError::SolverUnsatisfiable`] if the encoding is broken.
    fn solve(&self, families: &[&PowerSet]) -> CoverageResult<u64>;
}

/// MinUnCover through weighted partial MaxSAT
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSatMinUncover {
    solver: MaxSatSolver,
}

impl MaxSatMinUncover {
    /// Use the given MaxSAT solver (and its budget)
    #[must_use]
    pub const fn new(solver: MaxSatSolver) -> Self {
        Self { solver }
    }

    /// Build the hitting-set encoding; also returns one variable per distinct vector
    #[must_use]
    pub fn encode(families: &[&PowerSet]) -> (MaxSatInstance, Vec<Var>) {
        let mut instance = MaxSatInstance::new();
        let mut variables: HashMap<&ConcreteVector, Var> = HashMap::new();
        let mut order = Vec::new();

        for family in families {
            let clause = family
                .iter()
                .map(|option| {
                    variables
                        .entry(option)
                        .or_insert_with(|| {
                            let v = instance.new_var();
                            order.push(v);
                            v
                        })
                        .positive()
                })
                .collect();
            instance.add_hard(clause);
        }

        for v in &order {
            instance.add_soft(vec![v.negative()], 1);
        }
        (instance, order)
    }
}

impl MaxSatMinUncover {
    /// Number each distinct concrete vector and list every family by number
    #[must_use]
    pub fn hitting_set(families: &[&PowerSet]) -> HittingSet {
        let mut members: HashMap<&ConcreteVector, usize> = HashMap::new();
        let mut instance = HittingSet::new(0);
        for family in families {
            let ids: Vec<usize> = family
                .iter()
                .map(|option| {
                    let next = members.len();
                    *members.entry(option).or_insert(next)
                })
                .collect();
            instance.add_family(ids);
        }
        instance
    }

    /// Encode one component and search from its greedy cover
    fn solve_component(&self, component: &HittingSet, started: Instant) -> CoverageResult<u64> {
        let greedy = component.greedy_cover();
        let packed = component.disjoint_lower_bound();
        if packed == greedy.len() {
            return Ok(packed as u64);
        }

        let solver = match self.solver.timeout() {
            Some(timeout) => {
                let left = timeout
                    .checked_sub(started.elapsed())
                    .filter(|left| !left.is_zero())
                    .ok_or_else(|| {
                        CoverageError::solver_unknown(
                            SolverKind::MinUncover,
                            format!("deadline of {timeout:?} reached between components"),
                        )
                    })?;
                self.solver.with_timeout(Some(left))
            }
            None => self.solver,
        };

        let mut instance = MaxSatInstance::new();
        let vars: Vec<Var> = (0..component.member_count())
            .map(|_| instance.new_var())
            .collect();
        for family in component.families() {
            instance.add_hard(family.iter().map(|&m| vars[m].positive()).collect());
        }
        for v in &vars {
            instance.add_soft(vec![v.negative()], 1);
        }
        let mut start = vec![false; vars.len()];
        for m in greedy.iter().copied() {
            start[m] = true;
        }
        trace!(
            families = component.len(),
            members = vars.len(),
            packed,
            greedy = greedy.len(),
            "searching MinUnCover component"
        );

        match solver.solve_from(&instance, start) {
            MaxSatOutcome::Optimal { model, .. } => {
                Ok(model.iter().filter(|&&chosen| chosen).count() as u64)
            }
            MaxSatOutcome::Unsatisfiable => Err(CoverageError::SolverUnsatisfiable {
                solver: SolverKind::MinUncover,
            }),
            MaxSatOutcome::Unknown { reason } => {
                Err(CoverageError::solver_unknown(SolverKind::MinUncover, reason))
            }
        }
    }
}

impl MinUncoverSolver for MaxSatMinUncover {
    fn solve(&self, families: &[&PowerSet]) -> CoverageResult<u64> {
        if families.is_empty() {
            return Ok(0);
        }
        let started = Instant::now();
        let instance = Self::hitting_set(families);
        if !instance.is_satisfiable() {
            return Err(CoverageError::SolverUnsatisfiable {
                solver: SolverKind::MinUncover,
            });
        }
        let members = instance.member_count();
        let reduction = instance.reduce();
        debug!(
            families = families.len(),
            members,
            forced = reduction.forced.len(),
            components = reduction.components.len(),
            largest = reduction.largest_component(),
            "solving MinUnCover"
        );

        let mut total = reduction.forced.len() as u64;
        for component in &reduction.components {
            total += self.solve_component(component, started)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::power_set::PowerSetExpander;
    use crate::valuation::TagVector;

    fn sets(vectors: &[&str]) -> Vec<PowerSet> {
        vectors
            .iter()
            .map(|s| PowerSetExpander::expand(&s.parse::<TagVector>().unwrap()))
            .collect()
    }

    fn solve(vectors: &[&str]) -> CoverageResult<u64> {
        let owned = sets(vectors);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        MaxSatMinUncover::default().solve(&refs)
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(MaxSatMinUncover::default().solve(&[]).unwrap(), 0);
    }

    /// (?, F) and (T, F): choosing (T, F) hits both
    #[test]
    fn test_two_tag_scenario() {
        assert_eq!(solve(&["?F", "TF"]).unwrap(), 1);
    }

    #[test]
    fn test_disjoint_concrete_vectors() {
        assert_eq!(solve(&["TT", "TF", "FT"]).unwrap(), 3);
    }

    #[test]
    fn test_fully_unknown_vector_needs_one() {
        assert_eq!(solve(&["???"]).unwrap(), 1);
    }

    #[test]
    fn test_chain_of_overlaps() {
        // T?F ∩ ?TF = {TTF}; FF? disjoint from both
        assert_eq!(solve(&["T?F", "?TF", "FF?"]).unwrap(), 2);
    }

    #[test]
    fn test_variables_are_shared() {
        let owned = sets(&["?F", "TF", "T?"]);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let (instance, vars) = MaxSatMinUncover::encode(&refs);
        // TF, FF, TT
        assert_eq!(vars.len(), 3);
        assert_eq!(instance.num_hard(), 3);
        assert_eq!(instance.num_soft(), 3);
    }

    #[test]
    fn test_hitting_set_numbers_distinct_vectors() {
        let owned = sets(&["?F", "TF", "T?"]);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let hs = MaxSatMinUncover::hitting_set(&refs);
        assert_eq!(hs.member_count(), 3);
        assert_eq!(hs.len(), 3);
        assert!(hs.families().iter().any(|f| f.len() == 1));
    }

    /// No reduction rule applies and the packing bound (2) is below the optimum (3)
    const IRREDUCIBLE: [&str; 5] = ["FTT?", "FT?F", "F?F?", "??TT", "?F??"];

    #[test]
    fn test_irreducible_component_is_searched() {
        let owned = sets(&IRREDUCIBLE);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let reduction = MaxSatMinUncover::hitting_set(&refs).reduce();
        assert!(reduction.forced.is_empty());
        assert_eq!(reduction.components.len(), 1);
        let component = &reduction.components[0];
        assert!(component.disjoint_lower_bound() < component.greedy_cover().len());

        assert_eq!(solve(&IRREDUCIBLE).unwrap(), 3);
    }

    #[test]
    fn test_matches_plain_encoding() {
        let vectors = ["T?F?", "?TF?", "FF??", "??TT", "T??F", "F?T?", "?F?F", "TTTT"];
        let owned = sets(&vectors);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let (instance, vars) = MaxSatMinUncover::encode(&refs);
        let plain = match MaxSatSolver::new().solve(&instance) {
            MaxSatOutcome::Optimal { model, .. } => {
                vars.iter().filter(|v| model[v.index()]).count() as u64
            }
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(solve(&vectors).unwrap(), plain);
    }

    /// 120 vectors over eight tags, about half of the entries unknown
    #[test]
    fn test_eight_tags_finishes_within_budget() {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let vectors: Vec<String> = (0..120)
            .map(|_| {
                (0..8)
                    .map(|_| {
                        let r = next();
                        if r % 1000 < 500 {
                            '?'
                        } else if (r >> 20) & 1 == 1 {
                            'T'
                        } else {
                            'F'
                        }
                    })
                    .collect()
            })
            .collect();
        let owned: Vec<PowerSet> = vectors
            .iter()
            .map(|s| PowerSetExpander::expand(&s.parse::<TagVector>().unwrap()))
            .collect();
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let solver = MaxSatMinUncover::new(MaxSatSolver::new().with_node_limit(Some(5_000_000)));
        let bound = solver.solve(&refs).unwrap();
        assert!(bound >= 1);
        assert!(bound <= 256);
    }

    #[test]
    fn test_budget_surfaces_unknown() {
        let owned = sets(&IRREDUCIBLE);
        let refs: Vec<&PowerSet> = owned.iter().collect();
        let solver = MaxSatMinUncover::new(MaxSatSolver::new().with_node_limit(Some(1)));
        let err = solver.solve(&refs).unwrap_err();
        assert!(matches!(
            err,
            CoverageError::SolverUnknown {
                solver: SolverKind::MinUncover,
                ..
            }
        ));
        assert!(err.is_recoverable());
    }
}
