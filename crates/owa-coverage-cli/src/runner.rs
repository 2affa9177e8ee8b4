//! The driving loop shared by every experiment
//!
//! Feeds vectors into a fresh engine one tick at a time and consults the
//! engine after every sampling point to decide whether to stop.

use crate::commands::SolverArgs;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use owa_coverage::{
    BoundSeries, CoverageBoundEngine, CoverageError, EngineConfig, EngineReport, TagVector,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// MinUnCover reached the saturation target
    Saturated,
    /// Lower and upper bound met
    GapClosed,
    /// The source ran out of vectors
    Exhausted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saturated => write!(f, "saturated"),
            Self::GapClosed => write!(f, "gap closed"),
            Self::Exhausted => write!(f, "input exhausted"),
        }
    }
}

/// When to stop feeding ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPolicy {
    /// Stop once the engine reports saturation
    pub on_saturation: bool,
    /// Stop once the gap reaches 0 %
    pub on_gap_closed: bool,
}

impl StopPolicy {
    /// Stop on saturation or a closed gap
    pub const EARLY: Self = Self {
        on_saturation: true,
        on_gap_closed: true,
    };

    /// Consume the whole source
    pub const EXHAUST: Self = Self {
        on_saturation: false,
        on_gap_closed: false,
    };
}

/// Everything a finished run exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run identifier, also the output file stem
    pub id: String,
    /// Engine configuration used
    pub engine: EngineConfig,
    /// Why the run ended
    pub stop_reason: StopReason,
    /// Gap at the last sampling point
    pub remaining_gap: Option<f64>,
    /// Bounds per sampling point
    pub series: BoundSeries,
    /// Observed-set size after every tick
    pub observed_counts: Vec<u64>,
    /// Final engine snapshot
    pub report: EngineReport,
}

/// Build an engine configuration from driver options
pub fn engine_config(
    tags: usize,
    sample_size: u64,
    solver: &SolverArgs,
    jobs: usize,
) -> CliResult<EngineConfig> {
    let mut builder = EngineConfig::builder()
        .tag_count(tags)
        .sample_size(sample_size)
        .cross_validate(!solver.no_cross_validate)
        .maxsat_oracle(solver.maxsat_oracle);
    if let Some(ms) = solver.solver_timeout_ms {
        builder = builder.solver_timeout(Duration::from_millis(ms));
    }
    if let Some(limit) = solver.solver_node_limit {
        builder = builder.solver_node_limit(limit);
    }
    if jobs > 0 {
        builder = builder.parallel(jobs);
    }
    Ok(builder.build()?)
}

/// Run one experiment to completion
pub fn run_experiment<I>(
    id: impl Into<String>,
    config: EngineConfig,
    source: I,
    policy: StopPolicy,
    progress: &ProgressReporter,
) -> CliResult<RunRecord>
where
    I: IntoIterator<Item = TagVector>,
{
    let id = id.into();
    let mut engine = CoverageBoundEngine::new(config.clone())?;
    let mut stop_reason = StopReason::Exhausted;
    info!(run = %id, tags = config.tag_count, sample_size = config.sample_size, "starting run");

    for v in source {
        engine.observe(v)?;
        progress.increment(1);
        match engine.maybe_recompute() {
            Ok(Some(point)) => {
                progress.set_message(&format!(
                    "LB {} | MinUC {} | MaxUC {} | UB {} | gap {:.2}%",
                    point.lower,
                    point.min_uncover,
                    point.max_uncover,
                    point.upper,
                    point.gap_percent()
                ));
                if policy.on_saturation && engine.should_terminate() {
                    stop_reason = StopReason::Saturated;
                    break;
                }
                if policy.on_gap_closed && point.lower == point.upper {
                    stop_reason = StopReason::GapClosed;
                    break;
                }
            }
            Ok(None) => {}
            Err(err @ CoverageError::SolverUnknown { .. }) => {
                warn!(run = %id, tick = engine.ticks(), error = %err, "continuing without this sample");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let remaining_gap = engine.current_gap_percent().ok();
    info!(run = %id, ticks = engine.ticks(), reason = %stop_reason, ?remaining_gap, "run finished");
    Ok(RunRecord {
        id,
        engine: config,
        stop_reason,
        remaining_gap,
        series: engine.series().clone(),
        observed_counts: engine.observed_counts().to_vec(),
        report: engine.report(),
    })
}
