//! Weighted partial MaxSAT.
//!
//! Exact branch-and-bound over a trail of assignments with unit propagation
//! on the hard clauses. Pruning uses the cost of soft clauses already
//! falsified plus a disjoint-clause lower bound: hard clauses that are still
//! open and share no variable each need a distinct literal made true, and
//! each such literal costs at least the weight of the unit soft clauses it
//! falsifies.
//!
//! The search can be bounded by a node limit and a wall-clock deadline. When
//! either is hit before optimality is proven the outcome is
//! [`MaxSatOutcome::Unknown`], never a best-effort number.

use std::time::{Duration, Instant};

/// Boolean variable, numbered from zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Create a variable from its index
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Variable index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Positive literal
    #[inline]
    #[must_use]
    pub const fn positive(self) -> Lit {
        Lit(self.0 << 1)
    }

    /// Negative literal
    #[inline]
    #[must_use]
    pub const fn negative(self) -> Lit {
        Lit((self.0 << 1) | 1)
    }
}

/// A variable or its negation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(u32);

impl Lit {
    /// Underlying variable
    #[inline]
    #[must_use]
    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// True for `¬x`
    #[inline]
    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.0 & 1 == 1
    }

    /// Complementary literal
    #[inline]
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ 1)
    }

    #[inline]
    const fn code(self) -> usize {
        self.0 as usize
    }

    /// Truth value of the literal under a variable value
    #[inline]
    const fn holds(self, value: bool) -> bool {
        value != self.is_negated()
    }
}

/// A weighted soft clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftClause {
    /// Disjunction of literals
    pub lits: Vec<Lit>,
    /// Penalty paid when the clause is falsified
    pub weight: u64,
}

/// Hard clauses that must hold plus soft clauses whose falsified weight is minimised
#[derive(Debug, Clone, Default)]
pub struct MaxSatInstance {
    num_vars: u32,
    hard: Vec<Vec<Lit>>,
    soft: Vec<SoftClause>,
}

impl MaxSatInstance {
    /// Empty instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh variable
    pub fn new_var(&mut self) -> Var {
        let v = Var(self.num_vars);
        self.num_vars += 1;
        v
    }

    /// Add a clause that must be satisfied
    pub fn add_hard(&mut self, lits: Vec<Lit>) {
        self.hard.push(lits);
    }

    /// Add a clause with a penalty for falsifying it
    pub fn add_soft(&mut self, lits: Vec<Lit>, weight: u64) {
        self.soft.push(SoftClause { lits, weight });
    }

    /// Number of variables
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars as usize
    }

    /// Number of hard clauses
    #[must_use]
    pub fn num_hard(&self) -> usize {
        self.hard.len()
    }

    /// Number of soft clauses
    #[must_use]
    pub fn num_soft(&self) -> usize {
        self.soft.len()
    }

    /// Total falsified soft weight under `model`, or `None` if a hard clause fails
    #[must_use]
    pub fn cost_of(&self, model: &[bool]) -> Option<u64> {
        let sat = |lits: &[Lit]| lits.iter().any(|l| l.holds(model[l.var().index()]));
        if !self.hard.iter().all(|c| sat(c.as_slice())) {
            return None;
        }
        Some(
            self.soft
                .iter()
                .filter(|c| !sat(c.lits.as_slice()))
                .map(|c| c.weight)
                .sum(),
        )
    }
}

/// Outcome of a MaxSAT call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxSatOutcome {
    /// Proven optimum
    Optimal {
        /// Value of every variable
        model: Vec<bool>,
        /// Falsified soft weight
        cost: u64,
    },
    /// The hard clauses admit no model
    Unsatisfiable,
    /// Budget exhausted before optimality was proven
    Unknown {
        /// Which budget ran out
        reason: String,
    },
}

/// Branch-and-bound MaxSAT solver
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSatSolver {
    node_limit: Option<u64>,
    timeout: Option<Duration>,
}

impl MaxSatSolver {
    /// Unbounded solver
    #[must_use]
    pub const fn new() -> Self {
        Self {
            node_limit: None,
            timeout: None,
        }
    }

    /// Give up after visiting `limit` search nodes
    #[must_use]
    pub const fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    /// Give up after `timeout` of wall time
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wall-time budget, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Solve `instance` to optimality or until a budget runs out
    #[must_use]
    pub fn solve(&self, instance: &MaxSatInstance) -> MaxSatOutcome {
        self.run(instance, None)
    }

    /// Like [`solve`](Self::solve), starting from a known model.
    ///
    /// A model that breaks a hard clause or has the wrong length is ignored.
    /// A good one lets the search prune from the first node.
    #[must_use]
    pub fn solve_from(&self, instance: &MaxSatInstance, model: Vec<bool>) -> MaxSatOutcome {
        let incumbent = if model.len() == instance.num_vars() {
            instance.cost_of(&model).map(|cost| (cost, model))
        } else {
            None
        };
        self.run(instance, incumbent)
    }

    fn run(&self, instance: &MaxSatInstance, incumbent: Option<(u64, Vec<bool>)>) -> MaxSatOutcome {
        if instance.hard.iter().any(Vec::is_empty) {
            return MaxSatOutcome::Unsatisfiable;
        }
        let mut search = Search::new(instance, self);
        search.best = incumbent;
        if !search.assert_units() {
            return MaxSatOutcome::Unsatisfiable;
        }
        search.branch();

        if let Some(reason) = search.aborted {
            return MaxSatOutcome::Unknown { reason };
        }
        match search.best {
            Some((cost, model)) => MaxSatOutcome::Optimal { model, cost },
            None => MaxSatOutcome::Unsatisfiable,
        }
    }
}

const DEADLINE_CHECK_INTERVAL: u64 = 1024;

struct Search<'a> {
    inst: &'a MaxSatInstance,
    /// Hard clauses per variable
    hard_occurs: Vec<Vec<usize>>,
    /// Soft clauses per variable
    soft_occurs: Vec<Vec<usize>>,
    /// Weight of unit soft clauses falsified by making a literal true
    unit_penalty: Vec<u64>,
    /// Hard clauses, shortest first, for the disjoint-clause bound
    packing_order: Vec<usize>,
    assignment: Vec<Option<bool>>,
    trail: Vec<Var>,
    cost: u64,
    best: Option<(u64, Vec<bool>)>,
    nodes: u64,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    aborted: Option<String>,
    /// Scratch marks for the disjoint-clause bound
    used: Vec<bool>,
}

/// Clauses mentioning a variable twice are listed once
fn push_occurrence(list: &mut Vec<usize>, clause: usize) {
    if list.last() != Some(&clause) {
        list.push(clause);
    }
}

enum ClauseState {
    Satisfied,
    Conflict,
    Unit(Lit),
    Open(usize),
}

impl<'a> Search<'a> {
    fn new(inst: &'a MaxSatInstance, solver: &MaxSatSolver) -> Self {
        let n = inst.num_vars();
        let mut hard_occurs = vec![Vec::new(); n];
        for (ci, clause) in inst.hard.iter().enumerate() {
            for lit in clause {
                push_occurrence(&mut hard_occurs[lit.var().index()], ci);
            }
        }
        let mut soft_occurs = vec![Vec::new(); n];
        let mut unit_penalty = vec![0; 2 * n];
        for (ci, clause) in inst.soft.iter().enumerate() {
            for lit in &clause.lits {
                push_occurrence(&mut soft_occurs[lit.var().index()], ci);
            }
            if let [lit] = clause.lits.as_slice() {
                unit_penalty[lit.negate().code()] += clause.weight;
            }
        }
        let mut packing_order: Vec<usize> = (0..inst.hard.len()).collect();
        packing_order.sort_by_key(|&ci| inst.hard[ci].len());
        Self {
            inst,
            hard_occurs,
            soft_occurs,
            unit_penalty,
            packing_order,
            assignment: vec![None; n],
            trail: Vec::with_capacity(n),
            cost: 0,
            best: None,
            nodes: 0,
            node_limit: solver.node_limit,
            deadline: solver.timeout.map(|t| Instant::now() + t),
            aborted: None,
            used: vec![false; n],
        }
    }

    fn value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var().index()].map(|v| lit.holds(v))
    }

    fn clause_state(&self, lits: &[Lit]) -> ClauseState {
        let mut open = 0;
        let mut last = None;
        for &lit in lits {
            match self.value(lit) {
                Some(true) => return ClauseState::Satisfied,
                Some(false) => {}
                None => {
                    open += 1;
                    last = Some(lit);
                }
            }
        }
        match (open, last) {
            (0, _) => ClauseState::Conflict,
            (1, Some(lit)) => ClauseState::Unit(lit),
            _ => ClauseState::Open(open),
        }
    }

    fn soft_falsified(&self, ci: usize) -> bool {
        self.inst.soft[ci]
            .lits
            .iter()
            .all(|&l| self.value(l) == Some(false))
    }

    fn assign(&mut self, lit: Lit) {
        let var = lit.var();
        self.assignment[var.index()] = Some(!lit.is_negated());
        self.trail.push(var);
        for k in 0..self.soft_occurs[var.index()].len() {
            let ci = self.soft_occurs[var.index()][k];
            if self.soft_falsified(ci) {
                self.cost += self.inst.soft[ci].weight;
            }
        }
    }

    fn backtrack(&mut self, level: usize) {
        while self.trail.len() > level {
            let Some(var) = self.trail.pop() else { break };
            for k in 0..self.soft_occurs[var.index()].len() {
                let ci = self.soft_occurs[var.index()][k];
                if self.soft_falsified(ci) {
                    self.cost -= self.inst.soft[ci].weight;
                }
            }
            self.assignment[var.index()] = None;
        }
    }

    /// Propagate everything on the trail from `head`; false on conflict
    fn propagate(&mut self, mut head: usize) -> bool {
        while head < self.trail.len() {
            let var = self.trail[head];
            head += 1;
            for k in 0..self.hard_occurs[var.index()].len() {
                let ci = self.hard_occurs[var.index()][k];
                match self.clause_state(&self.inst.hard[ci]) {
                    ClauseState::Conflict => return false,
                    ClauseState::Unit(lit) => self.assign(lit),
                    ClauseState::Satisfied | ClauseState::Open(_) => {}
                }
            }
        }
        true
    }

    /// Root-level unit clauses
    fn assert_units(&mut self) -> bool {
        for ci in 0..self.inst.hard.len() {
            match self.clause_state(&self.inst.hard[ci]) {
                ClauseState::Conflict => return false,
                ClauseState::Unit(lit) => {
                    let head = self.trail.len();
                    self.assign(lit);
                    if !self.propagate(head) {
                        return false;
                    }
                }
                ClauseState::Satisfied | ClauseState::Open(_) => {}
            }
        }
        true
    }

    fn lower_bound(&mut self) -> u64 {
        let inst = self.inst;
        let order = std::mem::take(&mut self.packing_order);
        self.used.iter_mut().for_each(|u| *u = false);
        let mut bound = 0;
        for &ci in &order {
            let clause = &inst.hard[ci];
            if !matches!(self.clause_state(clause), ClauseState::Open(_)) {
                continue;
            }
            let mut cheapest = u64::MAX;
            let mut overlaps = false;
            for &lit in clause {
                if self.value(lit).is_some() {
                    continue;
                }
                if self.used[lit.var().index()] {
                    overlaps = true;
                    break;
                }
                cheapest = cheapest.min(self.unit_penalty[lit.code()]);
            }
            if overlaps || cheapest == 0 || cheapest == u64::MAX {
                continue;
            }
            bound += cheapest;
            for &lit in clause {
                if self.value(lit).is_none() {
                    self.used[lit.var().index()] = true;
                }
            }
        }
        self.packing_order = order;
        bound
    }

    fn budget_exhausted(&mut self) -> bool {
        if self.aborted.is_some() {
            return true;
        }
        self.nodes += 1;
        if let Some(limit) = self.node_limit {
            if self.nodes > limit {
                self.aborted = Some(format!("node limit of {limit} exceeded"));
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.aborted = Some(format!("deadline reached after {} nodes", self.nodes));
                return true;
            }
        }
        false
    }

    /// Pick the next literal to try: first an open literal of the shortest
    /// open hard clause, else one from an undecided soft clause.
    fn pick_branch(&self) -> Option<Lit> {
        let mut best: Option<(usize, Lit)> = None;
        for clause in &self.inst.hard {
            if let ClauseState::Open(open) = self.clause_state(clause) {
                if best.map_or(true, |(n, _)| open < n) {
                    let lit = clause.iter().copied().find(|&l| self.value(l).is_none());
                    if let Some(lit) = lit {
                        best = Some((open, lit));
                    }
                }
            }
        }
        if let Some((_, lit)) = best {
            return Some(lit);
        }
        self.inst
            .soft
            .iter()
            .filter(|c| !matches!(self.clause_state(&c.lits), ClauseState::Satisfied))
            .find_map(|c| c.lits.iter().copied().find(|&l| self.value(l).is_none()))
    }

    fn record_leaf(&mut self) {
        if self.best.as_ref().map_or(true, |(c, _)| self.cost < *c) {
            let model = self.assignment.iter().map(|v| v.unwrap_or(false)).collect();
            self.best = Some((self.cost, model));
        }
    }

    fn branch(&mut self) {
        if self.budget_exhausted() {
            return;
        }
        if let Some((best, _)) = &self.best {
            let best = *best;
            if self.cost >= best || self.cost + self.lower_bound() >= best {
                return;
            }
        }
        let Some(lit) = self.pick_branch() else {
            self.record_leaf();
            return;
        };

        for candidate in [lit, lit.negate()] {
            let level = self.trail.len();
            self.assign(candidate);
            if self.propagate(level) {
                self.branch();
            }
            self.backtrack(level);
            if self.aborted.is_some() {
                return;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn optimal_cost(outcome: &MaxSatOutcome) -> u64 {
        match outcome {
            MaxSatOutcome::Optimal { cost, .. } => *cost,
            other => panic!("expected optimum, got {other:?}"),
        }
    }

    #[test]
    fn test_lit_encoding() {
        let v = Var::new(7);
        assert_eq!(v.positive().var(), v);
        assert_eq!(v.negative().var(), v);
        assert!(v.negative().is_negated());
        assert!(!v.positive().is_negated());
        assert_eq!(v.positive().negate(), v.negative());
    }

    #[test]
    fn test_empty_instance_is_optimal_zero() {
        let outcome = MaxSatSolver::new().solve(&MaxSatInstance::new());
        assert_eq!(
            outcome,
            MaxSatOutcome::Optimal {
                model: vec![],
                cost: 0
            }
        );
    }

    #[test]
    fn test_empty_hard_clause_is_unsat() {
        let mut inst = MaxSatInstance::new();
        inst.add_hard(vec![]);
        assert_eq!(MaxSatSolver::new().solve(&inst), MaxSatOutcome::Unsatisfiable);
    }

    #[test]
    fn test_contradictory_units_unsat() {
        let mut inst = MaxSatInstance::new();
        let x = inst.new_var();
        inst.add_hard(vec![x.positive()]);
        inst.add_hard(vec![x.negative()]);
        assert_eq!(MaxSatSolver::new().solve(&inst), MaxSatOutcome::Unsatisfiable);
    }

    #[test]
    fn test_pigeonhole_unsat() {
        // Three pigeons, two holes
        let mut inst = MaxSatInstance::new();
        let p: Vec<Vec<Var>> = (0..3)
            .map(|_| (0..2).map(|_| inst.new_var()).collect())
            .collect();
        for row in &p {
            inst.add_hard(row.iter().map(|v| v.positive()).collect());
        }
        for h in 0..2 {
            for i in 0..3 {
                for j in i + 1..3 {
                    inst.add_hard(vec![p[i][h].negative(), p[j][h].negative()]);
                }
            }
        }
        assert_eq!(MaxSatSolver::new().solve(&inst), MaxSatOutcome::Unsatisfiable);
    }

    /// Hitting set {a,b}, {b,c}, {c,d}: optimum 2 ({b,c} or {b,d} or {a,c})
    #[test]
    fn test_small_hitting_set() {
        let mut inst = MaxSatInstance::new();
        let v: Vec<Var> = (0..4).map(|_| inst.new_var()).collect();
        inst.add_hard(vec![v[0].positive(), v[1].positive()]);
        inst.add_hard(vec![v[1].positive(), v[2].positive()]);
        inst.add_hard(vec![v[2].positive(), v[3].positive()]);
        for x in &v {
            inst.add_soft(vec![x.negative()], 1);
        }
        let outcome = MaxSatSolver::new().solve(&inst);
        assert_eq!(optimal_cost(&outcome), 2);
        if let MaxSatOutcome::Optimal { model, cost } = &outcome {
            assert_eq!(inst.cost_of(model), Some(*cost));
        }
    }

    #[test]
    fn test_weights_are_respected() {
        // x or y; x costs 5, y costs 2
        let mut inst = MaxSatInstance::new();
        let x = inst.new_var();
        let y = inst.new_var();
        inst.add_hard(vec![x.positive(), y.positive()]);
        inst.add_soft(vec![x.negative()], 5);
        inst.add_soft(vec![y.negative()], 2);
        match MaxSatSolver::new().solve(&inst) {
            MaxSatOutcome::Optimal { model, cost } => {
                assert_eq!(cost, 2);
                assert!(!model[0]);
                assert!(model[1]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_unit_soft_clauses() {
        // soft (x or y) w3, soft (!x) w1, soft (!y) w1 → best: exactly one true, cost 1
        let mut inst = MaxSatInstance::new();
        let x = inst.new_var();
        let y = inst.new_var();
        inst.add_soft(vec![x.positive(), y.positive()], 3);
        inst.add_soft(vec![x.negative()], 1);
        inst.add_soft(vec![y.negative()], 1);
        assert_eq!(optimal_cost(&MaxSatSolver::new().solve(&inst)), 1);
    }

    #[test]
    fn test_node_limit_yields_unknown() {
        let mut inst = MaxSatInstance::new();
        let v: Vec<Var> = (0..12).map(|_| inst.new_var()).collect();
        for i in 0..v.len() {
            for j in i + 1..v.len() {
                inst.add_hard(vec![v[i].positive(), v[j].positive()]);
            }
        }
        for x in &v {
            inst.add_soft(vec![x.negative()], 1);
        }
        let outcome = MaxSatSolver::new().with_node_limit(Some(2)).solve(&inst);
        assert!(matches!(outcome, MaxSatOutcome::Unknown { .. }));

        let outcome = MaxSatSolver::new().solve(&inst);
        assert_eq!(optimal_cost(&outcome), 11);
    }

    fn five_cycle() -> MaxSatInstance {
        let mut inst = MaxSatInstance::new();
        let v: Vec<Var> = (0..5).map(|_| inst.new_var()).collect();
        for i in 0..5 {
            inst.add_hard(vec![v[i].positive(), v[(i + 1) % 5].positive()]);
        }
        for x in &v {
            inst.add_soft(vec![x.negative()], 1);
        }
        inst
    }

    #[test]
    fn test_solve_from_improves_on_start() {
        let inst = five_cycle();
        match MaxSatSolver::new().solve_from(&inst, vec![true; 5]) {
            MaxSatOutcome::Optimal { model, cost } => {
                assert_eq!(cost, 3);
                assert_eq!(inst.cost_of(&model), Some(3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_solve_from_keeps_optimal_start() {
        let inst = five_cycle();
        let start = vec![true, false, true, false, true];
        assert_eq!(
            MaxSatSolver::new().solve_from(&inst, start.clone()),
            MaxSatOutcome::Optimal {
                model: start,
                cost: 3
            }
        );
    }

    #[test]
    fn test_solve_from_ignores_bad_start() {
        let inst = five_cycle();
        assert_eq!(optimal_cost(&MaxSatSolver::new().solve_from(&inst, vec![false; 5])), 3);
        assert_eq!(optimal_cost(&MaxSatSolver::new().solve_from(&inst, vec![true; 2])), 3);
    }

    #[test]
    fn test_start_does_not_lift_node_limit() {
        let outcome = MaxSatSolver::new()
            .with_node_limit(Some(1))
            .solve_from(&five_cycle(), vec![true; 5]);
        assert!(matches!(outcome, MaxSatOutcome::Unknown { .. }));
    }

    #[test]
    fn test_timeout_getter() {
        let solver = MaxSatSolver::new().with_timeout(Some(Duration::from_millis(5)));
        assert_eq!(solver.timeout(), Some(Duration::from_millis(5)));
        assert_eq!(MaxSatSolver::new().timeout(), None);
    }

    fn brute_force(inst: &MaxSatInstance) -> Option<u64> {
        let n = inst.num_vars();
        (0u32..1 << n)
            .filter_map(|mask| {
                let model: Vec<bool> = (0..n).map(|i| mask >> i & 1 == 1).collect();
                inst.cost_of(&model)
            })
            .min()
    }

    fn instance_strategy() -> impl Strategy<Value = MaxSatInstance> {
        let lit = (0u32..6, any::<bool>());
        let clause = proptest::collection::vec(lit, 1..4);
        (
            proptest::collection::vec(clause.clone(), 0..8),
            proptest::collection::vec((clause, 1u64..4), 0..8),
        )
            .prop_map(|(hard, soft)| {
                let mut inst = MaxSatInstance::new();
                for _ in 0..6 {
                    inst.new_var();
                }
                let to_lits = |c: Vec<(u32, bool)>| {
                    c.into_iter()
                        .map(|(v, neg)| {
                            if neg {
                                Var::new(v).negative()
                            } else {
                                Var::new(v).positive()
                            }
                        })
                        .collect()
                };
                for c in hard {
                    inst.add_hard(to_lits(c));
                }
                for (c, w) in soft {
                    inst.add_soft(to_lits(c), w);
                }
                inst
            })
    }

    proptest! {
        /// PROP-MAXSAT-01: branch and bound agrees with exhaustive enumeration
        #[test]
        fn prop_maxsat_01_matches_brute_force(inst in instance_strategy()) {
            let outcome = MaxSatSolver::new().solve(&inst);
            match (brute_force(&inst), outcome) {
                (None, MaxSatOutcome::Unsatisfiable) => {}
                (Some(expected), MaxSatOutcome::Optimal { model, cost }) => {
                    prop_assert_eq!(cost, expected);
                    prop_assert_eq!(inst.cost_of(&model), Some(cost));
                }
                (expected, got) => prop_assert!(false, "expected {:?}, got {:?}", expected, got),
            }
        }

        /// PROP-MAXSAT-02: a starting model never changes the optimum
        #[test]
        fn prop_maxsat_02_start_keeps_optimum(inst in instance_strategy(), start in proptest::collection::vec(any::<bool>(), 6)) {
            let plain = MaxSatSolver::new().solve(&inst);
            let seeded = MaxSatSolver::new().solve_from(&inst, start);
            match (plain, seeded) {
                (MaxSatOutcome::Unsatisfiable, MaxSatOutcome::Unsatisfiable) => {}
                (MaxSatOutcome::Optimal { cost: a, .. }, MaxSatOutcome::Optimal { cost: b, model }) => {
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(inst.cost_of(&model), Some(b));
                }
                (a, b) => prop_assert!(false, "plain {:?}, seeded {:?}", a, b),
            }
        }
    }
}
