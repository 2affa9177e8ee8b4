//! Engine configuration
//!
//! Built through [`EngineConfig::builder`] and checked once in
//! [`EngineConfigBuilder::build`]; the engine never sees an invalid config.

use crate::parallel::ParallelContext;
use crate::result::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Widest tag vector the engine accepts
pub const MAX_TAG_COUNT: usize = 30;

/// Configuration for a [`super::CoverageBoundEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Width of every observed vector
    pub tag_count: usize,
    /// Recompute the bounds every `sample_size` ticks
    pub sample_size: u64,
    /// Saturation target; `2^tag_count` when `None`
    pub max_possible: Option<u64>,
    /// Run both matching algorithms and fail if they disagree
    pub cross_validate: bool,
    /// Also run the MaxSAT formulation of MaxUnCover and compare
    pub maxsat_oracle: bool,
    /// Wall-clock budget per MaxSAT call
    pub solver_timeout: Option<Duration>,
    /// Search-node budget per MaxSAT call
    pub solver_node_limit: Option<u64>,
    /// Power-set expansion parallelism
    pub parallel: ParallelContext,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tag_count: 0,
            sample_size: 1,
            max_possible: None,
            cross_validate: true,
            maxsat_oracle: false,
            solver_timeout: None,
            solver_node_limit: None,
            parallel: ParallelContext::sequential(),
        }
    }
}

impl EngineConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Number of distinct concrete vectors of this width
    #[must_use]
    pub fn concrete_limit(&self) -> u64 {
        1u64 << self.tag_count
    }

    /// MinUnCover value at which a run may stop
    #[must_use]
    pub fn max_possible(&self) -> u64 {
        self.max_possible.unwrap_or_else(|| self.concrete_limit())
    }

    /// Check every field, reporting the first problem
    pub fn validate(&self) -> CoverageResult<()> {
        if self.tag_count == 0 {
            return Err(CoverageError::invalid_config("tag_count must be at least 1"));
        }
        if self.tag_count > MAX_TAG_COUNT {
            return Err(CoverageError::invalid_config(format!(
                "tag_count {} exceeds the maximum of {MAX_TAG_COUNT}",
                self.tag_count
            )));
        }
        if self.sample_size == 0 {
            return Err(CoverageError::invalid_config("sample_size must be at least 1"));
        }
        if let Some(max) = self.max_possible {
            if max == 0 || max > self.concrete_limit() {
                return Err(CoverageError::invalid_config(format!(
                    "max_possible must be in 1..={}, got {max}",
                    self.concrete_limit()
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the vector width
    #[must_use]
    pub const fn tag_count(mut self, tag_count: usize) -> Self {
        self.config.tag_count = tag_count;
        self
    }

    /// Set the recomputation cadence
    #[must_use]
    pub const fn sample_size(mut self, sample_size: u64) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    /// Override the saturation target
    #[must_use]
    pub const fn max_possible(mut self, max_possible: u64) -> Self {
        self.config.max_possible = Some(max_possible);
        self
    }

    /// Enable/disable the blossom vs. Hopcroft-Karp cross-check
    #[must_use]
    pub const fn cross_validate(mut self, enabled: bool) -> Self {
        self.config.cross_validate = enabled;
        self
    }

    /// Enable/disable the MaxSAT MaxUnCover oracle
    #[must_use]
    pub const fn maxsat_oracle(mut self, enabled: bool) -> Self {
        self.config.maxsat_oracle = enabled;
        self
    }

    /// Set the per-call MaxSAT timeout
    #[must_use]
    pub const fn solver_timeout(mut self, timeout: Duration) -> Self {
        self.config.solver_timeout = Some(timeout);
        self
    }

    /// Set the per-call MaxSAT node limit
    #[must_use]
    pub const fn solver_node_limit(mut self, limit: u64) -> Self {
        self.config.solver_node_limit = Some(limit);
        self
    }

    /// Expand power sets on `threads` workers (0 = one per CPU)
    #[must_use]
    pub const fn parallel(mut self, threads: usize) -> Self {
        self.config.parallel = ParallelContext::with_threads(threads);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> CoverageResult<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::builder().tag_count(3).build().unwrap();
        assert_eq!(config.sample_size, 1);
        assert_eq!(config.max_possible(), 8);
        assert!(config.cross_validate);
        assert!(!config.maxsat_oracle);
        assert_eq!(config.solver_timeout, None);
        assert_eq!(config.parallel.thread_count(), 1);
    }

    #[test]
    fn test_missing_tag_count_rejected() {
        let err = EngineConfig::builder().build().unwrap_err();
        assert!(matches!(err, CoverageError::InvalidConfig { .. }));
    }

    #[test]
    fn test_tag_count_cap() {
        assert!(EngineConfig::builder().tag_count(MAX_TAG_COUNT).build().is_ok());
        assert!(EngineConfig::builder()
            .tag_count(MAX_TAG_COUNT + 1)
            .build()
            .is_err());
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let err = EngineConfig::builder()
            .tag_count(2)
            .sample_size(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("sample_size"));
    }

    #[test]
    fn test_max_possible_override_range() {
        let config = EngineConfig::builder()
            .tag_count(2)
            .max_possible(3)
            .build()
            .unwrap();
        assert_eq!(config.max_possible(), 3);
        assert_eq!(config.concrete_limit(), 4);

        assert!(EngineConfig::builder().tag_count(2).max_possible(0).build().is_err());
        assert!(EngineConfig::builder().tag_count(2).max_possible(5).build().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::builder()
            .tag_count(4)
            .sample_size(10)
            .solver_timeout(Duration::from_secs(2))
            .parallel(4)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
