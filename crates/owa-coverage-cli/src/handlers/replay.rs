//! Replay command: feed recorded vectors in file order

use super::{export, reporter};
use crate::commands::ReplayArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::runner::{engine_config, run_experiment, RunRecord, StopPolicy};
use crate::source::read_replay;
use std::path::Path;

/// Run identifier: explicit name, else the input file stem
#[must_use]
pub fn replay_id(input: &Path, name: Option<&str>) -> String {
    name.map(str::to_string).unwrap_or_else(|| {
        input
            .file_stem()
            .map_or_else(|| "replay".to_string(), |s| s.to_string_lossy().into_owned())
    })
}

/// Execute the replay command
pub fn execute_replay(config: &CliConfig, args: &ReplayArgs) -> CliResult<RunRecord> {
    let vectors = read_replay(&args.input)?;
    let tags = vectors.first().map_or(0, owa_coverage::TagVector::len);
    let engine = engine_config(tags, args.sample_size, &args.solver, config.parallel_jobs)?;
    let id = replay_id(&args.input, args.name.as_deref());

    let mut progress = reporter(config);
    progress.start(Some(vectors.len() as u64), &id);
    let record = run_experiment(id, engine, vectors, StopPolicy::EXHAUST, &progress);
    progress.finish();
    let record = record?;
    export(config, &progress, &record)?;
    Ok(record)
}
