//! owacov: experiment drivers for the open-world coverage bound engine
//!
//! Three ways to feed the engine:
//!
//! - `random`: seeded vectors, each tag Unknown with a fixed probability
//! - `matrix`: the random driver swept over tag counts and probabilities
//! - `replay`: recorded vectors from a text file, one per line
//!
//! Every run is written as `{output}/{id}.json` holding the bound series,
//! the observed-set growth and the per-solver time split.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
mod runner;
pub mod source;

pub use commands::{Cli, Commands, MatrixArgs, RandomArgs, ReplayArgs, SolverArgs};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{write_run, ProgressReporter};
pub use runner::{engine_config, run_experiment, RunRecord, StopPolicy, StopReason};
pub use source::{parse_replay, read_replay, RandomTagSource, Seed, DEFAULT_SEED};
