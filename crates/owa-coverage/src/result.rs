//! Result and error types for the coverage bound engine.
//!
//! Errors fall into three groups:
//!
//! - **Input validation** (`InvalidValuation`, `DimensionMismatch`, `Parse`,
//!   `InvalidConfig`): reported to the caller, who may drop the offending
//!   tick and keep going.
//! - **Solver outcome** (`SolverUnknown`): the solver gave up before proving
//!   an optimum. The sampling point is skipped, nothing is appended.
//! - **Internal invariant** (`SolverUnsatisfiable`, `MatchingMismatch`,
//!   `OracleMismatch`, `BoundOrderViolation`): the encoding itself is broken.
//!   The engine refuses further work once one of these has been raised.

use crate::timing::SolverKind;
use thiserror::Error;

/// Result type for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Errors that can occur while estimating coverage bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    /// A valuation had both the condition and the inverse condition set
    #[error("Invalid valuation{}: condition and inverse condition are both true", fmt_position(.index))]
    InvalidValuation {
        /// Tag position inside the vector, if known
        index: Option<usize>,
    },

    /// A tag vector did not have the configured width
    #[error("Dimension mismatch: expected {expected} tags, got {actual}")]
    DimensionMismatch {
        /// Configured tag count
        expected: usize,
        /// Width of the rejected vector
        actual: usize,
    },

    /// Engine configuration rejected at build time
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// A tag vector could not be parsed from text
    #[error("Parse error: {message}")]
    Parse {
        /// Error message
        message: String,
    },

    /// No sampling point has been recorded yet
    #[error("Bound series is empty: no recomputation has happened yet")]
    EmptySeries,

    /// The solver stopped before reaching a definite answer
    #[error("{solver} returned UNKNOWN: {reason}")]
    SolverUnknown {
        /// Solver that gave up
        solver: SolverKind,
        /// Why it gave up (node limit, deadline)
        reason: String,
    },

    /// The solver proved a satisfiable-by-construction encoding unsatisfiable
    #[error("{solver} returned UNSATISFIABLE for an encoding that is satisfiable by construction")]
    SolverUnsatisfiable {
        /// Solver that reported UNSATISFIABLE
        solver: SolverKind,
    },

    /// General and bipartite matching disagree
    #[error("MaxUnCover mismatch: general matching found {general}, bipartite matching found {bipartite}")]
    MatchingMismatch {
        /// Result of the general (blossom) algorithm
        general: u64,
        /// Result of the bipartite (Hopcroft-Karp) algorithm
        bipartite: u64,
    },

    /// The MaxSAT cross-check disagrees with the matching result
    #[error("MaxUnCover mismatch: matching found {matching}, MaxSAT oracle found {maxsat}")]
    OracleMismatch {
        /// Result of the matching algorithms
        matching: u64,
        /// Result of the MaxSAT formulation
        maxsat: u64,
    },

    /// A recorded sample broke `lower <= minUncover <= maxUncover <= upper <= 2^k`
    #[error("Bound ordering violated at tick {tick}: {detail}")]
    BoundOrderViolation {
        /// Tick of the offending sample
        tick: u64,
        /// Which comparison failed
        detail: String,
    },

    /// The engine was used after a fatal error
    #[error("Engine is poisoned by an earlier fatal error: {cause}")]
    Poisoned {
        /// Message of the fatal error
        cause: String,
    },
}

fn fmt_position(index: &Option<usize>) -> String {
    index.map(|i| format!(" at tag {i}")).unwrap_or_default()
}

impl CoverageError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a solver-unknown error
    #[must_use]
    pub fn solver_unknown(solver: SolverKind, reason: impl Into<String>) -> Self {
        Self::SolverUnknown {
            solver,
            reason: reason.into(),
        }
    }

    /// Internal invariant violations. The run must not continue after one.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SolverUnsatisfiable { .. }
                | Self::MatchingMismatch { .. }
                | Self::OracleMismatch { .. }
                | Self::BoundOrderViolation { .. }
                | Self::Poisoned { .. }
        )
    }

    /// Errors the caller may recover from by discarding a tick or retrying
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
