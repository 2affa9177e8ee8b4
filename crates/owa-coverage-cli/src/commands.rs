//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// owacov: open-world coverage bound experiments
#[derive(Parser, Debug)]
#[command(name = "owacov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory for the exported bound series
    #[arg(short, long, default_value = "target/owacov", global = true)]
    pub output: PathBuf,

    /// Worker threads for power-set expansion (0 = sequential)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub jobs: usize,

    /// Hide the progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed randomly generated tag vectors into the engine
    Random(RandomArgs),

    /// Sweep tag counts and unknown probabilities
    Matrix(MatrixArgs),

    /// Replay recorded tag vectors from a file
    Replay(ReplayArgs),
}

/// Solver options shared by every driver
#[derive(Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// Per-call MaxSAT timeout in milliseconds
    #[arg(long)]
    pub solver_timeout_ms: Option<u64>,

    /// Per-call MaxSAT search-node budget
    #[arg(long)]
    pub solver_node_limit: Option<u64>,

    /// Skip the blossom vs. Hopcroft-Karp cross-check
    #[arg(long)]
    pub no_cross_validate: bool,

    /// Also run the MaxSAT MaxUnCover oracle (slow)
    #[arg(long)]
    pub maxsat_oracle: bool,
}

/// Arguments for the random command
#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    /// Number of tags per vector
    #[arg(short = 'n', long)]
    pub tags: usize,

    /// Stop after this many ticks (unbounded if omitted)
    #[arg(short = 'm', long)]
    pub max_ticks: Option<u64>,

    /// Chance in percent that a tag is Unknown
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub unknown_percent: u8,

    /// Random seed
    #[arg(short, long, default_value = "10101")]
    pub seed: u64,

    /// Recompute every N ticks (default: max_ticks / 1000, at least 1)
    #[arg(long)]
    pub sample_size: Option<u64>,

    /// Solver options
    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Arguments for the matrix command
#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Skip configurations with more tags than this
    #[arg(long, default_value = "10")]
    pub max_tags: usize,

    /// Bound every run to this many ticks (unbounded if omitted)
    #[arg(short = 'm', long)]
    pub max_ticks: Option<u64>,

    /// Random seed shared by every run
    #[arg(short, long, default_value = "10101")]
    pub seed: u64,

    /// Solver options
    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Arguments for the replay command
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// File with one tag vector per line (`T?F`; `#` starts a comment)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Recompute every N ticks
    #[arg(long, default_value = "1")]
    pub sample_size: u64,

    /// Run identifier (default: the input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Solver options
    #[command(flatten)]
    pub solver: SolverArgs,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_random_command() {
            let cli = Cli::try_parse_from([
                "owacov", "random", "--tags", "4", "--max-ticks", "1000", "-p", "10",
            ])
            .unwrap();
            match cli.command {
                Commands::Random(args) => {
                    assert_eq!(args.tags, 4);
                    assert_eq!(args.max_ticks, Some(1000));
                    assert_eq!(args.unknown_percent, 10);
                    assert_eq!(args.seed, 10101);
                    assert_eq!(args.sample_size, None);
                    assert!(!args.solver.maxsat_oracle);
                }
                other => panic!("expected random, got {other:?}"),
            }
        }

        #[test]
        fn test_random_requires_tags() {
            assert!(Cli::try_parse_from(["owacov", "random", "-p", "10"]).is_err());
        }

        #[test]
        fn test_unknown_percent_is_bounded() {
            assert!(Cli::try_parse_from(["owacov", "random", "-n", "2", "-p", "101"]).is_err());
        }

        #[test]
        fn test_parse_matrix_command() {
            let cli =
                Cli::try_parse_from(["owacov", "matrix", "--max-tags", "3", "-m", "50"]).unwrap();
            match cli.command {
                Commands::Matrix(args) => {
                    assert_eq!(args.max_tags, 3);
                    assert_eq!(args.max_ticks, Some(50));
                }
                other => panic!("expected matrix, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_replay_command() {
            let cli = Cli::try_parse_from([
                "owacov",
                "replay",
                "--input",
                "runs.txt",
                "--sample-size",
                "5",
                "--solver-node-limit",
                "100000",
            ])
            .unwrap();
            match cli.command {
                Commands::Replay(args) => {
                    assert_eq!(args.input, PathBuf::from("runs.txt"));
                    assert_eq!(args.sample_size, 5);
                    assert_eq!(args.solver.solver_node_limit, Some(100_000));
                }
                other => panic!("expected replay, got {other:?}"),
            }
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::try_parse_from([
                "owacov", "-vv", "--output", "out", "random", "-n", "1", "-p", "0", "-j", "2",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.output, PathBuf::from("out"));
            assert_eq!(cli.jobs, 2);
            assert!(!cli.quiet);
        }

        #[test]
        fn test_quiet_flag() {
            let cli = Cli::try_parse_from(["owacov", "-q", "matrix"]).unwrap();
            assert!(cli.quiet);
        }
    }
}
