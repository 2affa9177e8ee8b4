//! Random command: one seeded run with a fixed unknown probability

use super::{export, reporter};
use crate::commands::RandomArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::runner::{engine_config, run_experiment, RunRecord, StopPolicy};
use crate::source::{RandomTagSource, Seed};

/// Recompute cadence when none is given: a thousandth of the run, at least 1
#[must_use]
pub fn default_sample_size(max_ticks: Option<u64>) -> u64 {
    max_ticks.map_or(1, |m| (m / 1000).max(1))
}

/// Run identifier, e.g. `n=4_p=0.15`
#[must_use]
pub fn run_id(tags: usize, probability: f64) -> String {
    format!("n={tags}_p={probability}")
}

/// Execute the random command
pub fn execute_random(config: &CliConfig, args: &RandomArgs) -> CliResult<RunRecord> {
    let probability = f64::from(args.unknown_percent) / 100.0;
    let sample_size = args
        .sample_size
        .unwrap_or_else(|| default_sample_size(args.max_ticks));
    let engine = engine_config(args.tags, sample_size, &args.solver, config.parallel_jobs)?;
    let source = RandomTagSource::new(Seed::from_u64(args.seed), args.tags, probability)?
        .with_limit(args.max_ticks);

    let id = run_id(args.tags, probability);
    let mut progress = reporter(config);
    progress.start(args.max_ticks, &id);
    let record = run_experiment(id, engine, source, StopPolicy::EARLY, &progress);
    progress.finish();
    let record = record?;
    export(config, &progress, &record)?;
    Ok(record)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::SolverArgs;
    use crate::config::Verbosity;
    use crate::runner::StopReason;

    fn args(tags: usize, max_ticks: Option<u64>, unknown_percent: u8) -> RandomArgs {
        RandomArgs {
            tags,
            max_ticks,
            unknown_percent,
            seed: 10101,
            sample_size: None,
            solver: SolverArgs::default(),
        }
    }

    fn quiet_config(dir: &std::path::Path) -> CliConfig {
        CliConfig::new()
            .with_verbosity(Verbosity::Quiet)
            .with_output_dir(dir)
    }

    #[test]
    fn test_default_sample_size() {
        assert_eq!(default_sample_size(None), 1);
        assert_eq!(default_sample_size(Some(500)), 1);
        assert_eq!(default_sample_size(Some(1_000_000)), 1000);
    }

    #[test]
    fn test_run_id_format() {
        assert_eq!(run_id(4, 0.15), "n=4_p=0.15");
        assert_eq!(run_id(10, 0.1), "n=10_p=0.1");
    }

    #[test]
    fn test_small_run_stops_early_and_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let record = execute_random(&quiet_config(dir.path()), &args(2, Some(5000), 10)).unwrap();
        assert_ne!(record.stop_reason, StopReason::Exhausted);
        assert!(record.report.ticks < 5000);
        assert!(dir.path().join("n=2_p=0.1.json").exists());
    }

    #[test]
    fn test_bounded_run_stops_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let record = execute_random(&quiet_config(dir.path()), &args(6, Some(3), 100)).unwrap();
        assert_eq!(record.report.ticks, 3);
        assert_eq!(record.stop_reason, StopReason::Exhausted);
    }

    #[test]
    fn test_same_seed_reproduces_series() {
        let a_dir = tempfile::tempdir().unwrap();
        let b_dir = tempfile::tempdir().unwrap();
        let a = execute_random(&quiet_config(a_dir.path()), &args(3, Some(200), 20)).unwrap();
        let b = execute_random(&quiet_config(b_dir.path()), &args(3, Some(200), 20)).unwrap();
        assert_eq!(a.series, b.series);
        assert_eq!(a.observed_counts, b.observed_counts);
    }
}
