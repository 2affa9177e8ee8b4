//! Tag vector sources for the experiment drivers
//!
//! - [`RandomTagSource`]: seeded generator, each tag Unknown with a fixed
//!   probability and a hidden ground truth attached to every entry
//! - [`parse_replay`]: recorded vectors, one per line

use crate::error::{CliError, CliResult};
use owa_coverage::{TagVector, Valuation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Default experiment seed
pub const DEFAULT_SEED: u64 = 10101;

/// Seed for reproducible generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Get the seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(DEFAULT_SEED)
    }
}

/// Endless stream of random tag vectors, optionally capped
#[derive(Debug, Clone)]
pub struct RandomTagSource {
    rng: StdRng,
    tags: usize,
    unknown_probability: f64,
    remaining: Option<u64>,
}

impl RandomTagSource {
    /// Generator for `tags`-wide vectors where each entry is Unknown with
    /// `unknown_probability`
    pub fn new(seed: Seed, tags: usize, unknown_probability: f64) -> CliResult<Self> {
        if !(0.0..=1.0).contains(&unknown_probability) {
            return Err(CliError::invalid_argument(format!(
                "unknown probability must be in [0, 1], got {unknown_probability}"
            )));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed.value()),
            tags,
            unknown_probability,
            remaining: None,
        })
    }

    /// Stop after `max_ticks` vectors
    #[must_use]
    pub const fn with_limit(mut self, max_ticks: Option<u64>) -> Self {
        self.remaining = max_ticks;
        self
    }

    fn next_valuation(&mut self) -> Valuation {
        if self.rng.gen_bool(self.unknown_probability) {
            let hidden = self.rng.gen_bool(0.5);
            Valuation::UNKNOWN.with_ground_truth(hidden)
        } else {
            let value = self.rng.gen_bool(0.5);
            Valuation::known(value).with_ground_truth(value)
        }
    }
}

impl Iterator for RandomTagSource {
    type Item = TagVector;

    fn next(&mut self) -> Option<TagVector> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let valuations = (0..self.tags).map(|_| self.next_valuation()).collect();
        Some(TagVector::new(valuations))
    }
}

/// Parse recorded vectors: one per line, blank lines and `#` comments skipped
pub fn parse_replay(text: &str) -> CliResult<Vec<TagVector>> {
    let mut vectors = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let v: TagVector = line
            .parse()
            .map_err(|source| CliError::Replay { line: i + 1, source })?;
        if let Some(first) = vectors.first().map(TagVector::len) {
            if v.len() != first {
                return Err(CliError::Replay {
                    line: i + 1,
                    source: owa_coverage::CoverageError::DimensionMismatch {
                        expected: first,
                        actual: v.len(),
                    },
                });
            }
        }
        vectors.push(v);
    }
    if vectors.is_empty() {
        return Err(CliError::invalid_argument("replay input contains no tag vectors"));
    }
    Ok(vectors)
}

/// Read and parse a replay file
pub fn read_replay(path: &Path) -> CliResult<Vec<TagVector>> {
    parse_replay(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod seed_tests {
        use super::*;

        #[test]
        fn test_seed_from_u64() {
            assert_eq!(Seed::from_u64(12345).value(), 12345);
        }

        #[test]
        fn test_seed_default() {
            assert_eq!(Seed::default().value(), DEFAULT_SEED);
        }
    }

    mod random_source_tests {
        use super::*;

        #[test]
        fn test_same_seed_same_stream() {
            let a: Vec<TagVector> = RandomTagSource::new(Seed::from_u64(7), 5, 0.2)
                .unwrap()
                .take(50)
                .collect();
            let b: Vec<TagVector> = RandomTagSource::new(Seed::from_u64(7), 5, 0.2)
                .unwrap()
                .take(50)
                .collect();
            assert_eq!(a, b);
        }

        #[test]
        fn test_limit_is_respected() {
            let source = RandomTagSource::new(Seed::default(), 3, 0.1)
                .unwrap()
                .with_limit(Some(12));
            assert_eq!(source.count(), 12);
        }

        #[test]
        fn test_zero_probability_is_fully_known() {
            let source = RandomTagSource::new(Seed::default(), 4, 0.0).unwrap();
            for v in source.take(100) {
                assert!(v.is_concrete());
                assert_eq!(v.len(), 4);
            }
        }

        #[test]
        fn test_certain_unknown() {
            let source = RandomTagSource::new(Seed::default(), 4, 1.0).unwrap();
            for v in source.take(20) {
                assert_eq!(v.unknown_count(), 4);
            }
        }

        #[test]
        fn test_every_entry_carries_ground_truth() {
            let source = RandomTagSource::new(Seed::default(), 6, 0.5).unwrap();
            for v in source.take(50) {
                for (valuation, hidden) in v.iter().zip(v.ground_truth()) {
                    let hidden = hidden.expect("hinted");
                    if let Some(value) = valuation.value() {
                        assert_eq!(value, hidden);
                    }
                }
            }
        }

        #[test]
        fn test_invalid_probability_rejected() {
            assert!(RandomTagSource::new(Seed::default(), 2, 1.5).is_err());
        }
    }

    mod replay_tests {
        use super::*;

        #[test]
        fn test_comments_and_blank_lines() {
            let text = "# recorded run\nT?F\n\n  ?FF  # trailing comment\nTTT\n";
            let vectors = parse_replay(text).unwrap();
            assert_eq!(vectors.len(), 3);
            assert_eq!(vectors[1], "?FF".parse().unwrap());
        }

        #[test]
        fn test_bad_symbol_reports_line() {
            let err = parse_replay("TT\nTZ\n").unwrap_err();
            assert!(matches!(err, CliError::Replay { line: 2, .. }));
        }

        #[test]
        fn test_width_mismatch_reports_line() {
            let err = parse_replay("TT\nT?\nTTT\n").unwrap_err();
            assert!(matches!(err, CliError::Replay { line: 3, .. }));
        }

        #[test]
        fn test_empty_input_rejected() {
            assert!(parse_replay("# nothing here\n\n").is_err());
        }

        #[test]
        fn test_read_replay_from_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("run.txt");
            std::fs::write(&path, "T?\n?F\n").unwrap();
            assert_eq!(read_replay(&path).unwrap().len(), 2);
        }
    }
}
