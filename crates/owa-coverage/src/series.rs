//! Bound series
//!
//! Append-only records of the four coverage bounds, one entry per sampling
//! point, plus the auxiliary series kept alongside them.

use serde::{Deserialize, Serialize};

/// The four bounds and diagnostics computed at one sampling point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Tick at which the sample was taken (1-based)
    pub tick: u64,
    /// Distinct fully-known observed vectors
    pub lower: u64,
    /// Minimum hitting set size
    pub min_uncover: u64,
    /// Maximum matching size
    pub max_uncover: u64,
    /// Distinct concrete vectors reachable from any observation
    pub upper: u64,
    /// Distinct ground-truth vectors among fully hinted observations so far
    pub ground_truth: u64,
}

impl SamplePoint {
    /// `(upper - lower) / upper` as a percentage; `0.0` when `upper` is zero
    #[must_use]
    pub fn gap_percent(&self) -> f64 {
        if self.upper == 0 {
            return 0.0;
        }
        (self.upper - self.lower) as f64 / self.upper as f64 * 100.0
    }

    /// Check `lower <= min <= max <= upper <= limit`, naming the first
    /// comparison that fails
    pub fn check_order(&self, limit: u64) -> Result<(), String> {
        let chain = [
            ("lower", self.lower),
            ("minUncover", self.min_uncover),
            ("maxUncover", self.max_uncover),
            ("upper", self.upper),
            ("2^k", limit),
        ];
        for pair in chain.windows(2) {
            let ((a, x), (b, y)) = (pair[0], pair[1]);
            if x > y {
                return Err(format!("{a}={x} > {b}={y}"));
            }
        }
        Ok(())
    }
}

/// Parallel append-only sequences, one value per sampling point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundSeries {
    /// Tick index of every sample
    pub ticks: Vec<u64>,
    /// Lower bound
    pub lower: Vec<u64>,
    /// MinUnCover
    pub min_uncover: Vec<u64>,
    /// MaxUnCover
    pub max_uncover: Vec<u64>,
    /// Upper bound
    pub upper: Vec<u64>,
    /// Ground-truth diagnostic; never used for the bounds
    pub ground_truth: Vec<u64>,
}

impl BoundSeries {
    /// Empty series
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to every sequence
    pub fn push(&mut self, point: SamplePoint) {
        self.ticks.push(point.tick);
        self.lower.push(point.lower);
        self.min_uncover.push(point.min_uncover);
        self.max_uncover.push(point.max_uncover);
        self.upper.push(point.upper);
        self.ground_truth.push(point.ground_truth);
    }

    /// Number of sampling points
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True before the first sample
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Sample at position `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SamplePoint> {
        Some(SamplePoint {
            tick: *self.ticks.get(index)?,
            lower: *self.lower.get(index)?,
            min_uncover: *self.min_uncover.get(index)?,
            max_uncover: *self.max_uncover.get(index)?,
            upper: *self.upper.get(index)?,
            ground_truth: *self.ground_truth.get(index)?,
        })
    }

    /// Most recent sample
    #[must_use]
    pub fn last(&self) -> Option<SamplePoint> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over all samples in order
    pub fn points(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}
