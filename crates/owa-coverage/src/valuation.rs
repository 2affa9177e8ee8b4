//! Three-valued tags and the vectors built from them.
//!
//! A [`Valuation`] is True, False or Unknown. It is stored as the pair
//! `(condition, inverse_condition)`; the pair `(true, true)` cannot be
//! constructed. An optional ground-truth hint rides along for diagnostics
//! only and never takes part in equality, hashing or ordering.

use crate::result::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Three-valued boolean with an optional ground-truth hint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawValuation", into = "RawValuation")]
pub struct Valuation {
    condition: bool,
    inverse_condition: bool,
    ground_truth: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct RawValuation {
    condition: bool,
    inverse_condition: bool,
    #[serde(default)]
    ground_truth: Option<bool>,
}

impl TryFrom<RawValuation> for Valuation {
    type Error = CoverageError;

    fn try_from(raw: RawValuation) -> CoverageResult<Self> {
        Self::new(raw.condition, raw.inverse_condition, raw.ground_truth)
    }
}

impl From<Valuation> for RawValuation {
    fn from(v: Valuation) -> Self {
        Self {
            condition: v.condition,
            inverse_condition: v.inverse_condition,
            ground_truth: v.ground_truth,
        }
    }
}

impl Valuation {
    /// Known true, no hint
    pub const TRUE: Self = Self {
        condition: true,
        inverse_condition: false,
        ground_truth: None,
    };

    /// Known false, no hint
    pub const FALSE: Self = Self {
        condition: false,
        inverse_condition: true,
        ground_truth: None,
    };

    /// Unknown, no hint
    pub const UNKNOWN: Self = Self {
        condition: false,
        inverse_condition: false,
        ground_truth: None,
    };

    /// Create a valuation from its raw pair.
    ///
    /// Fails with [`CoverageError::InvalidValuation`] when both the condition
    /// and its inverse hold.
    pub fn new(
        condition: bool,
        inverse_condition: bool,
        ground_truth: Option<bool>,
    ) -> CoverageResult<Self> {
        if condition && inverse_condition {
            return Err(CoverageError::InvalidValuation { index: None });
        }
        Ok(Self {
            condition,
            inverse_condition,
            ground_truth,
        })
    }

    /// Known valuation for `value`
    #[must_use]
    pub const fn known(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Attach a ground-truth hint
    #[must_use]
    pub const fn with_ground_truth(mut self, hint: bool) -> Self {
        self.ground_truth = Some(hint);
        self
    }

    /// Raw condition flag
    #[must_use]
    pub const fn condition(self) -> bool {
        self.condition
    }

    /// Raw inverse-condition flag
    #[must_use]
    pub const fn inverse_condition(self) -> bool {
        self.inverse_condition
    }

    /// Ground-truth hint, if the producer knew it
    #[must_use]
    pub const fn ground_truth(self) -> Option<bool> {
        self.ground_truth
    }

    /// Neither the condition nor its inverse was observed
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        !self.condition && !self.inverse_condition
    }

    /// Observed true
    #[must_use]
    pub const fn is_true(self) -> bool {
        self.condition && !self.inverse_condition
    }

    /// Observed false
    #[must_use]
    pub const fn is_false(self) -> bool {
        !self.condition && self.inverse_condition
    }

    /// `Some(value)` for known valuations, `None` for Unknown
    #[must_use]
    pub const fn value(self) -> Option<bool> {
        if self.is_unknown() {
            None
        } else {
            Some(self.condition)
        }
    }

    /// Replace with a known value, keeping the hint
    #[must_use]
    pub const fn resolve(self, value: bool) -> Self {
        Self {
            condition: value,
            inverse_condition: !value,
            ground_truth: self.ground_truth,
        }
    }

    /// Re-check the pair invariant
    pub fn validate(self) -> CoverageResult<()> {
        if self.condition && self.inverse_condition {
            return Err(CoverageError::InvalidValuation { index: None });
        }
        Ok(())
    }

    /// Parse one symbol: `T`/`t`/`1`, `F`/`f`/`0`, `?`/`U`/`u`/`x`
    pub fn from_symbol(symbol: char) -> CoverageResult<Self> {
        match symbol {
            'T' | 't' | '1' => Ok(Self::TRUE),
            'F' | 'f' | '0' => Ok(Self::FALSE),
            '?' | 'U' | 'u' | 'x' | 'X' => Ok(Self::UNKNOWN),
            other => Err(CoverageError::parse(format!(
                "unexpected tag symbol '{other}' (expected T, F or ?)"
            ))),
        }
    }

    const fn key(self) -> (bool, bool) {
        (self.condition, self.inverse_condition)
    }
}

impl PartialEq for Valuation {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Valuation {}

impl Hash for Valuation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Valuation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Valuation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.value() {
            None => "?",
            Some(true) => "T",
            Some(false) => "F",
        };
        f.write_str(symbol)
    }
}

/// Ordered, fixed-width sequence of valuations for one observation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagVector(Vec<Valuation>);

impl TagVector {
    /// Wrap a list of valuations
    #[must_use]
    pub fn new(valuations: Vec<Valuation>) -> Self {
        Self(valuations)
    }

    /// Build from raw `(condition, inverse_condition)` pairs.
    ///
    /// The reported error carries the position of the first illegal pair.
    pub fn from_pairs(pairs: &[(bool, bool)]) -> CoverageResult<Self> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(c, ic))| {
                Valuation::new(c, ic, None)
                    .map_err(|_| CoverageError::InvalidValuation { index: Some(i) })
            })
            .collect::<CoverageResult<Vec<_>>>()
            .map(Self)
    }

    /// Fully known vector from booleans
    #[must_use]
    pub fn from_bools(values: &[bool]) -> Self {
        Self(values.iter().map(|&b| Valuation::known(b)).collect())
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-width vector
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Valuation at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Valuation> {
        self.0.get(index).copied()
    }

    /// Iterate over the valuations
    pub fn iter(&self) -> impl Iterator<Item = Valuation> + '_ {
        self.0.iter().copied()
    }

    /// Borrow the valuations
    #[must_use]
    pub fn as_slice(&self) -> &[Valuation] {
        &self.0
    }

    /// Number of Unknown entries
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_unknown()).count()
    }

    /// Position of the first Unknown entry
    #[must_use]
    pub fn first_unknown(&self) -> Option<usize> {
        self.0.iter().position(|v| v.is_unknown())
    }

    /// No Unknown entries
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.first_unknown().is_none()
    }

    /// Copy with position `index` resolved to `value`
    #[must_use]
    pub fn with_resolved(&self, index: usize, value: bool) -> Self {
        let mut out = self.clone();
        if let Some(slot) = out.0.get_mut(index) {
            *slot = slot.resolve(value);
        }
        out
    }

    /// Ground-truth hint of every entry, `None` where the producer had none
    #[must_use]
    pub fn ground_truth(&self) -> Vec<Option<bool>> {
        self.0.iter().map(|v| v.ground_truth()).collect()
    }

    /// Check every entry, reporting the first illegal position
    pub fn validate(&self) -> CoverageResult<()> {
        for (i, v) in self.0.iter().enumerate() {
            v.validate()
                .map_err(|_| CoverageError::InvalidValuation { index: Some(i) })?;
        }
        Ok(())
    }
}

impl From<Vec<Valuation>> for TagVector {
    fn from(valuations: Vec<Valuation>) -> Self {
        Self(valuations)
    }
}

impl fmt::Display for TagVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// Parses the compact form `T?F`. Whitespace, commas and brackets are skipped,
/// so the `Display` output `[T, ?, F]` parses back as well.
impl FromStr for TagVector {
    type Err = CoverageError;

    fn from_str(s: &str) -> CoverageResult<Self> {
        let valuations = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '[' | ']'))
            .map(Valuation::from_symbol)
            .collect::<CoverageResult<Vec<_>>>()?;
        if valuations.is_empty() {
            return Err(CoverageError::parse("empty tag vector"));
        }
        Ok(Self(valuations))
    }
}

/// A tag vector with no Unknown entries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TagVector", into = "TagVector")]
pub struct ConcreteVector(TagVector);

impl ConcreteVector {
    /// Borrow as a plain tag vector
    #[must_use]
    pub fn as_tag_vector(&self) -> &TagVector {
        &self.0
    }

    /// Unwrap into a plain tag vector
    #[must_use]
    pub fn into_tag_vector(self) -> TagVector {
        self.0
    }

    /// Tag values as booleans
    #[must_use]
    pub fn values(&self) -> Vec<bool> {
        self.0.iter().map(Valuation::is_true).collect()
    }

    /// Does this resolution agree with `partial` on every known position?
    #[must_use]
    pub fn refines(&self, partial: &TagVector) -> bool {
        self.0.len() == partial.len()
            && self
                .0
                .iter()
                .zip(partial.iter())
                .all(|(c, p)| p.is_unknown() || c == p)
    }

    pub(crate) fn new_unchecked(v: TagVector) -> Self {
        debug_assert!(v.is_concrete());
        Self(v)
    }
}

impl TryFrom<TagVector> for ConcreteVector {
    type Error = CoverageError;

    fn try_from(v: TagVector) -> CoverageResult<Self> {
        match v.first_unknown() {
            None => Ok(Self(v)),
            Some(i) => Err(CoverageError::parse(format!(
                "tag {i} is Unknown in a vector expected to be concrete"
            ))),
        }
    }
}

impl From<ConcreteVector> for TagVector {
    fn from(c: ConcreteVector) -> Self {
        c.0
    }
}

impl fmt::Display for ConcreteVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
