//! Solver timing and call instrumentation.
//!
//! Every engine owns one [`SolverTimings`]. Nothing here is process-wide, so
//! two engines in the same test binary never see each other's numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// The solvers the engine can invoke during a recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    /// Minimum hitting set via weighted MaxSAT
    MinUncover,
    /// Maximum-cardinality matching on a general graph (blossom)
    GeneralMatching,
    /// Maximum-cardinality bipartite matching (Hopcroft-Karp)
    BipartiteMatching,
    /// Maximum matching via weighted MaxSAT (cross-validation only)
    MaxSatOracle,
}

impl SolverKind {
    /// All kinds, in reporting order
    pub const ALL: [Self; 4] = [
        Self::MinUncover,
        Self::GeneralMatching,
        Self::BipartiteMatching,
        Self::MaxSatOracle,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::MinUncover => 0,
            Self::GeneralMatching => 1,
            Self::BipartiteMatching => 2,
            Self::MaxSatOracle => 3,
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MinUncover => "MinUnCover (MaxSAT)",
            Self::GeneralMatching => "MaxUnCover (blossom)",
            Self::BipartiteMatching => "MaxUnCover (Hopcroft-Karp)",
            Self::MaxSatOracle => "MaxUnCover (MaxSAT)",
        };
        f.write_str(name)
    }
}

/// Per-sample wall time and cumulative call counts for each solver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverTimings {
    /// One entry per sampling point and solver; zero when skipped
    samples: [Vec<Duration>; 4],
    /// Number of real solver invocations
    calls: [u64; 4],
}

impl SolverTimings {
    /// Create empty instrumentation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a real invocation and its duration
    pub fn record(&mut self, kind: SolverKind, elapsed: Duration) {
        self.samples[kind.slot()].push(elapsed);
        self.calls[kind.slot()] += 1;
    }

    /// Record a sampling point where the solver was not run
    pub fn record_skipped(&mut self, kind: SolverKind) {
        self.samples[kind.slot()].push(Duration::ZERO);
    }

    /// Number of times the solver actually ran
    #[must_use]
    pub fn calls(&self, kind: SolverKind) -> u64 {
        self.calls[kind.slot()]
    }

    /// Per-sample durations for a solver
    #[must_use]
    pub fn samples(&self, kind: SolverKind) -> &[Duration] {
        &self.samples[kind.slot()]
    }

    /// Total time spent in a solver
    #[must_use]
    pub fn total(&self, kind: SolverKind) -> Duration {
        self.samples[kind.slot()].iter().sum()
    }

    /// Share of `wall` spent in a solver, as a percentage
    #[must_use]
    pub fn share_percent(&self, kind: SolverKind, wall: Duration) -> f64 {
        if wall.is_zero() {
            return 0.0;
        }
        self.total(kind).as_secs_f64() * 100.0 / wall.as_secs_f64()
    }
}

/// Run `f` and return its output with the elapsed wall time
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
