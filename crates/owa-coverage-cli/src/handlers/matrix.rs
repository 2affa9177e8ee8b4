//! Matrix command: sweep tag counts against unknown probabilities

use super::{export, reporter, run_id};
use crate::commands::MatrixArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::runner::{engine_config, run_experiment, RunRecord, StopPolicy};
use crate::source::{RandomTagSource, Seed};
use tracing::info;

/// `(tags, sample_size)` configurations, smallest first
pub const MATRIX: &[(usize, u64)] = &[
    (1, 1),
    (2, 1),
    (3, 1),
    (4, 1),
    (5, 1),
    (6, 1),
    (7, 1),
    (8, 10),
    (9, 100),
    (10, 1000),
    (15, 100_000),
    (20, 10_000_000),
];

/// Unknown probabilities tried for every configuration
pub const PROBABILITIES: &[f64] = &[0.10, 0.15, 0.20];

/// One cell of the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixRun {
    /// Tags per vector
    pub tags: usize,
    /// Recompute cadence
    pub sample_size: u64,
    /// Unknown probability
    pub probability: f64,
}

/// Cells with at most `max_tags` tags, in sweep order
#[must_use]
pub fn matrix_runs(max_tags: usize) -> Vec<MatrixRun> {
    MATRIX
        .iter()
        .filter(|(tags, _)| *tags <= max_tags)
        .flat_map(|&(tags, sample_size)| {
            PROBABILITIES.iter().map(move |&probability| MatrixRun {
                tags,
                sample_size,
                probability,
            })
        })
        .collect()
}

/// Execute the matrix command
pub fn execute_matrix(config: &CliConfig, args: &MatrixArgs) -> CliResult<Vec<RunRecord>> {
    let runs = matrix_runs(args.max_tags);
    let mut progress = reporter(config);
    progress.header(&format!("{} runs, seed {}", runs.len(), args.seed));

    let mut records = Vec::with_capacity(runs.len());
    for run in runs {
        let id = run_id(run.tags, run.probability);
        info!(run = %id, sample_size = run.sample_size, "matrix cell");
        let engine = engine_config(run.tags, run.sample_size, &args.solver, config.parallel_jobs)?;
        let source = RandomTagSource::new(Seed::from_u64(args.seed), run.tags, run.probability)?
            .with_limit(args.max_ticks);

        progress.start(args.max_ticks, &id);
        let record = run_experiment(id, engine, source, StopPolicy::EARLY, &progress);
        progress.finish();
        let record = record?;
        export(config, &progress, &record)?;
        records.push(record);
    }
    Ok(records)
}
