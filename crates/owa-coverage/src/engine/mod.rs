//! Coverage Bound Engine
//!
//! Owns the observed set and the bound series of one run. Every
//! `sample_size` ticks the four bounds are recomputed from the whole observed
//! set:
//!
//! ```text
//! lower <= MinUnCover <= MaxUnCover <= upper <= 2^k
//! ```
//!
//! A sampling point is appended to every series or to none. Solver budgets
//! that run out skip the point and surface [`CoverageError::SolverUnknown`];
//! internal invariant violations poison the engine.

mod config;


pub use config::{EngineConfig, EngineConfigBuilder, MAX_TAG_COUNT};

use crate::max_uncover::{
    cross_validate, BlossomMaxUncover, HopcroftKarpMaxUncover, MaxSatMaxUncover, MaxUncoverSolver,
};
use crate::maxsat::MaxSatSolver;
use crate::min_uncover::{MaxSatMinUncover, MinUncoverSolver};
use crate::power_set::{union_size, Family, PowerSet, PowerSetExpander};
use crate::result::{CoverageError, CoverageResult};
use crate::series::{BoundSeries, SamplePoint};
use crate::timing::{timed, SolverKind, SolverTimings};
use crate::valuation::TagVector;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Incrementally estimates how many concrete scenarios a stream of partial
/// observations has covered
#[derive(Debug)]
pub struct CoverageBoundEngine {
    config: EngineConfig,
    observed: BTreeSet<TagVector>,
    ticks: u64,
    last_sampled: Option<u64>,
    series: BoundSeries,
    observed_counts: Vec<u64>,
    timings: SolverTimings,
    min_uncover: Box<dyn MinUncoverSolver>,
    general: Box<dyn MaxUncoverSolver>,
    bipartite: Box<dyn MaxUncoverSolver>,
    oracle: Option<Box<dyn MaxUncoverSolver>>,
    poisoned: Option<String>,
    started: Instant,
}

/// Solver durations of one sampling point, committed with the sample
#[derive(Debug, Default)]
struct PendingTimings(Vec<(SolverKind, Option<Duration>)>);

impl PendingTimings {
    fn ran(&mut self, kind: SolverKind, elapsed: Duration) {
        self.0.push((kind, Some(elapsed)));
    }

    fn skipped(&mut self, kind: SolverKind) {
        self.0.push((kind, None));
    }

    fn commit(self, timings: &mut SolverTimings) {
        for (kind, elapsed) in self.0 {
            match elapsed {
                Some(d) => timings.record(kind, d),
                None => timings.record_skipped(kind),
            }
        }
    }
}

impl CoverageBoundEngine {
    /// Create an engine with the default solvers for `config`
    pub fn new(config: EngineConfig) -> CoverageResult<Self> {
        config.validate()?;
        let maxsat = MaxSatSolver::new()
            .with_node_limit(config.solver_node_limit)
            .with_timeout(config.solver_timeout);
        let oracle: Option<Box<dyn MaxUncoverSolver>> = if config.maxsat_oracle {
            Some(Box::new(MaxSatMaxUncover::new(maxsat)))
        } else {
            None
        };

        Ok(Self {
            config,
            observed: BTreeSet::new(),
            ticks: 0,
            last_sampled: None,
            series: BoundSeries::new(),
            observed_counts: Vec::new(),
            timings: SolverTimings::new(),
            min_uncover: Box::new(MaxSatMinUncover::new(maxsat)),
            general: Box::new(BlossomMaxUncover),
            bipartite: Box::new(HopcroftKarpMaxUncover),
            oracle,
            poisoned: None,
            started: Instant::now(),
        })
    }

    /// Replace the MinUnCover solver
    #[must_use]
    pub fn with_min_uncover_solver(mut self, solver: Box<dyn MinUncoverSolver>) -> Self {
        self.min_uncover = solver;
        self
    }

    /// Replace the general and bipartite MaxUnCover solvers
    #[must_use]
    pub fn with_max_uncover_solvers(
        mut self,
        general: Box<dyn MaxUncoverSolver>,
        bipartite: Box<dyn MaxUncoverSolver>,
    ) -> Self {
        self.general = general;
        self.bipartite = bipartite;
        self
    }

    /// Install a MaxUnCover cross-validation oracle
    #[must_use]
    pub fn with_oracle(mut self, oracle: Box<dyn MaxUncoverSolver>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Record one tick's vector.
    ///
    /// Returns `true` if the vector was not observed before. Rejected
    /// vectors do not advance the tick counter.
    pub fn observe(&mut self, v: TagVector) -> CoverageResult<bool> {
        self.check_poisoned()?;
        v.validate()?;
        if v.len() != self.config.tag_count {
            return Err(CoverageError::DimensionMismatch {
                expected: self.config.tag_count,
                actual: v.len(),
            });
        }

        self.ticks += 1;
        let inserted = self.observed.insert(v);
        self.observed_counts.push(self.observed.len() as u64);
        Ok(inserted)
    }

    /// Recompute the bounds if the current tick is a sampling point.
    ///
    /// Returns the appended sample, or `None` when this tick is not due or
    /// was already sampled.
    pub fn maybe_recompute(&mut self) -> CoverageResult<Option<SamplePoint>> {
        self.check_poisoned()?;
        if self.ticks == 0 || self.ticks % self.config.sample_size != 0 {
            return Ok(None);
        }
        if self.last_sampled == Some(self.ticks) {
            return Ok(None);
        }

        match self.compute_sample() {
            Ok((point, pending)) => {
                self.series.push(point);
                pending.commit(&mut self.timings);
                self.last_sampled = Some(self.ticks);
                self.log_status(&point);
                Ok(Some(point))
            }
            Err(err) if err.is_fatal() => {
                error!(tick = self.ticks, error = %err, "coverage engine poisoned");
                self.poisoned = Some(err.to_string());
                Err(err)
            }
            Err(err) => {
                warn!(tick = self.ticks, error = %err, "skipping sampling point");
                Err(err)
            }
        }
    }

    /// `observe` followed by `maybe_recompute`
    pub fn ingest(&mut self, v: TagVector) -> CoverageResult<Option<SamplePoint>> {
        self.observe(v)?;
        self.maybe_recompute()
    }

    /// `(upper - lower) / upper * 100` at the last sampling point.
    ///
    /// Fails with [`CoverageError::EmptySeries`] before the first sample.
    pub fn current_gap_percent(&self) -> CoverageResult<f64> {
        self.series
            .last()
            .map(|p| p.gap_percent())
            .ok_or(CoverageError::EmptySeries)
    }

    /// True once MinUnCover has reached the saturation target.
    ///
    /// This is the only place a `max_possible` override is consulted.
    #[must_use]
    pub fn should_terminate(&self) -> bool {
        self.series
            .last()
            .is_some_and(|p| p.min_uncover >= self.config.max_possible())
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Saturation target
    #[must_use]
    pub fn max_possible(&self) -> u64 {
        self.config.max_possible()
    }

    /// Ticks accepted so far
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Distinct observed vectors
    pub fn observed(&self) -> impl Iterator<Item = &TagVector> + '_ {
        self.observed.iter()
    }

    /// Number of distinct observed vectors
    #[must_use]
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// Size of the observed set after every tick
    #[must_use]
    pub fn observed_counts(&self) -> &[u64] {
        &self.observed_counts
    }

    /// Recorded bounds
    #[must_use]
    pub fn series(&self) -> &BoundSeries {
        &self.series
    }

    /// Solver instrumentation
    #[must_use]
    pub fn timings(&self) -> &SolverTimings {
        &self.timings
    }

    /// True after a fatal error
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    /// Snapshot of the run so far
    #[must_use]
    pub fn report(&self) -> EngineReport {
        let elapsed = self.started.elapsed();
        EngineReport {
            ticks: self.ticks,
            observed: self.observed.len() as u64,
            samples: self.series.len() as u64,
            max_possible: self.max_possible(),
            last: self.series.last(),
            gap_percent: self.current_gap_percent().ok(),
            saturated: self.should_terminate(),
            elapsed,
            solvers: SolverKind::ALL
                .iter()
                .map(|&kind| SolverReport {
                    kind,
                    calls: self.timings.calls(kind),
                    total: self.timings.total(kind),
                    share_percent: self.timings.share_percent(kind, elapsed),
                })
                .collect(),
        }
    }

    fn check_poisoned(&self) -> CoverageResult<()> {
        match &self.poisoned {
            Some(cause) => Err(CoverageError::Poisoned {
                cause: cause.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Distinct hint lists among the observed vectors, missing hints included
    fn ground_truth_count(&self) -> u64 {
        self.observed
            .iter()
            .map(TagVector::ground_truth)
            .collect::<HashSet<_>>()
            .len() as u64
    }

    fn compute_sample(&self) -> CoverageResult<(SamplePoint, PendingTimings)> {
        // Bounds only stop growing at 2^k; a lower override may still be passed
        let limit = self.config.concrete_limit();
        let previous = self.series.last();
        let mut pending = PendingTimings::default();

        let families = PowerSetExpander::expand_all(&self.observed, &self.config.parallel);
        let lower = self.observed.iter().filter(|v| v.is_concrete()).count() as u64;
        let upper = union_size(&families) as u64;

        let min_uncover = match previous {
            Some(p) if p.min_uncover >= limit => {
                pending.skipped(SolverKind::MinUncover);
                p.min_uncover
            }
            _ => {
                let sets: Vec<&PowerSet> = families.iter().map(|f| &f.power_set).collect();
                let (result, elapsed) = timed(|| self.min_uncover.solve(&sets));
                debug!(?elapsed, "MinUnCover finished");
                pending.ran(SolverKind::MinUncover, elapsed);
                result?
            }
        };

        let max_uncover = match previous {
            Some(p) if p.max_uncover >= limit => {
                pending.skipped(SolverKind::BipartiteMatching);
                pending.skipped(SolverKind::GeneralMatching);
                pending.skipped(SolverKind::MaxSatOracle);
                p.max_uncover
            }
            _ => self.solve_max_uncover(&families, &mut pending)?,
        };

        let point = SamplePoint {
            tick: self.ticks,
            lower,
            min_uncover,
            max_uncover,
            upper,
            ground_truth: self.ground_truth_count(),
        };
        point
            .check_order(limit)
            .map_err(|detail| CoverageError::BoundOrderViolation {
                tick: self.ticks,
                detail,
            })?;
        Ok((point, pending))
    }

    fn solve_max_uncover(
        &self,
        families: &[Family],
        pending: &mut PendingTimings,
    ) -> CoverageResult<u64> {
        let bipartite = run_timed(self.bipartite.as_ref(), families, pending)?;
        let matching = if self.config.cross_validate {
            let general = run_timed(self.general.as_ref(), families, pending)?;
            cross_validate(general, bipartite)?
        } else {
            pending.skipped(SolverKind::GeneralMatching);
            bipartite
        };

        match &self.oracle {
            Some(oracle) => {
                let maxsat = run_timed(oracle.as_ref(), families, pending)?;
                if maxsat != matching {
                    return Err(CoverageError::OracleMismatch { matching, maxsat });
                }
            }
            None => pending.skipped(SolverKind::MaxSatOracle),
        }
        Ok(matching)
    }

    fn log_status(&self, point: &SamplePoint) {
        let elapsed = self.started.elapsed();
        info!(
            tick = point.tick,
            upper = point.upper,
            max_uncover = point.max_uncover,
            ground_truth = point.ground_truth,
            min_uncover = point.min_uncover,
            lower = point.lower,
            max_possible = self.max_possible(),
            gap = %format!("{:.2}%", point.gap_percent()),
            elapsed = ?elapsed,
            min_uncover_share = %format!(
                "{:.1}%",
                self.timings.share_percent(SolverKind::MinUncover, elapsed)
            ),
            matching_share = %format!(
                "{:.1}%",
                self.timings.share_percent(SolverKind::BipartiteMatching, elapsed)
                    + self.timings.share_percent(SolverKind::GeneralMatching, elapsed)
            ),
            "bounds recomputed"
        );
    }
}

fn run_timed(
    solver: &dyn MaxUncoverSolver,
    families: &[Family],
    pending: &mut PendingTimings,
) -> CoverageResult<u64> {
    let (result, elapsed) = timed(|| solver.solve(families));
    debug!(solver = %solver.kind(), ?elapsed, "MaxUnCover finished");
    pending.ran(solver.kind(), elapsed);
    result
}

/// Time spent in one solver over the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverReport {
    /// Which solver
    pub kind: SolverKind,
    /// Real invocations (saturation skips excluded)
    pub calls: u64,
    /// Accumulated wall time
    pub total: Duration,
    /// Share of the engine's lifetime
    pub share_percent: f64,
}

/// Snapshot of an engine's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Ticks accepted
    pub ticks: u64,
    /// Distinct observed vectors
    pub observed: u64,
    /// Sampling points recorded
    pub samples: u64,
    /// Saturation target
    pub max_possible: u64,
    /// Most recent sample
    pub last: Option<SamplePoint>,
    /// Gap at the most recent sample
    pub gap_percent: Option<f64>,
    /// MinUnCover has reached `max_possible`
    pub saturated: bool,
    /// Time since the engine was created
    pub elapsed: Duration,
    /// Per-solver totals
    pub solvers: Vec<SolverReport>,
}
