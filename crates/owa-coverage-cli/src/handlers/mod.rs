//! Command handlers - extracted from main.rs for testability
//!
//! Each handler builds its vector source, drives the engine through
//! [`crate::runner::run_experiment`] and writes one JSON file per run.

pub mod matrix;
pub mod random;
pub mod replay;

pub use matrix::{execute_matrix, matrix_runs, MatrixRun, MATRIX, PROBABILITIES};
pub use random::{default_sample_size, execute_random, run_id};
pub use replay::{execute_replay, replay_id};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{write_run, ProgressReporter};
use crate::runner::RunRecord;
use std::path::PathBuf;

fn reporter(config: &CliConfig) -> ProgressReporter {
    let quiet = config.verbosity.is_quiet() || !config.progress;
    ProgressReporter::new(console::colors_enabled_stderr(), quiet)
}

fn export(
    config: &CliConfig,
    progress: &ProgressReporter,
    record: &RunRecord,
) -> CliResult<PathBuf> {
    let path = write_run(&config.output_dir, record)?;
    progress.run_summary(record, &path);
    if config.verbosity.is_verbose() {
        progress.solver_breakdown(record);
    }
    Ok(path)
}
