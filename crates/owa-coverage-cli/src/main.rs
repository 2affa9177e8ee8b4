//! owacov: open-world coverage bound experiments
//!
//! ## Usage
//!
//! ```bash
//! owacov random -n 4 -p 10 -m 100000   # One seeded run
//! owacov matrix --max-tags 8            # Sweep tags x probabilities
//! owacov replay -i recorded.txt         # Replay recorded vectors
//! ```

use clap::Parser;
use owacov::{handlers, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Random(args) => handlers::execute_random(&config, &args).map(|_| ()),
        Commands::Matrix(args) => handlers::execute_matrix(&config, &args).map(|_| ()),
        Commands::Replay(args) => handlers::execute_replay(&config, &args).map(|_| ()),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_output_dir(&cli.output)
        .with_parallel_jobs(cli.jobs)
        .with_progress(!cli.no_progress)
}

fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
