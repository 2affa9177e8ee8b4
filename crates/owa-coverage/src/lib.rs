//! owa-coverage: Open-World Scenario Coverage Bounds
//!
//! Estimates how many distinct concrete scenarios a stream of three-valued
//! observations has covered, without ever resolving the Unknown tags.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Coverage Bound Engine                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────────┐    │
//! │   │ TagVector  │    │ Power-set  │    │ lower / upper      │    │
//! │   │ stream     │───►│ expansion  │───►│ MinUnCover (MaxSAT)│    │
//! │   │ (observe)  │    │            │    │ MaxUnCover (match) │    │
//! │   └────────────┘    └────────────┘    └────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use owa_coverage::{CoverageBoundEngine, EngineConfig, TagVector};
//!
//! let config = EngineConfig::builder().tag_count(2).build()?;
//! let mut engine = CoverageBoundEngine::new(config)?;
//!
//! engine.ingest("?F".parse::<TagVector>()?)?;
//! let point = engine.ingest("TF".parse::<TagVector>()?)?.expect("sampled");
//!
//! assert_eq!(point.lower, 1);
//! assert_eq!(point.min_uncover, 1);
//! assert_eq!(point.max_uncover, 2);
//! assert_eq!(point.upper, 2);
//! # Ok::<(), owa_coverage::CoverageError>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Coverage bound engine and its configuration
pub mod engine;

/// Minimum hitting set reductions and bounds
pub mod hitting_set;

/// Maximum-cardinality matching (blossom, Hopcroft-Karp)
#[allow(clippy::many_single_char_names)]
pub mod matching;

/// MaxUnCover solvers
pub mod max_uncover;

/// Weighted partial MaxSAT
#[allow(clippy::missing_const_for_fn)]
pub mod maxsat;

/// MinUnCover solvers
pub mod min_uncover;

/// Scoped-thread parallel map
pub mod parallel;

/// Power-set expansion
pub mod power_set;

mod result;

/// Append-only bound series
pub mod series;

/// Solver timing instrumentation
pub mod timing;

/// Three-valued tags and tag vectors
pub mod valuation;

pub use engine::{
    CoverageBoundEngine, EngineConfig, EngineConfigBuilder, EngineReport, SolverReport,
    MAX_TAG_COUNT,
};
pub use hitting_set::{HittingSet, Reduction};
pub use max_uncover::{
    BlossomMaxUncover, HopcroftKarpMaxUncover, MaxSatMaxUncover, MaxUncoverSolver,
};
pub use maxsat::{MaxSatInstance, MaxSatOutcome, MaxSatSolver};
pub use min_uncover::{MaxSatMinUncover, MinUncoverSolver};
pub use parallel::ParallelContext;
pub use power_set::{Family, PowerSet, PowerSetExpander};
pub use result::{CoverageError, CoverageResult};
pub use series::{BoundSeries, SamplePoint};
pub use timing::{SolverKind, SolverTimings};
pub use valuation::{ConcreteVector, TagVector, Valuation};
