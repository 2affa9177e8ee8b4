//! Power-set expansion of partial tag vectors.
//!
//! Every Unknown entry is resolved independently to True and False. The
//! expansion always splits on the lowest remaining Unknown position, so
//! every branch follows the same scanning order and each of the `2^u`
//! combinations is produced exactly once.

use crate::parallel::{parallel_map, ParallelContext};
use crate::valuation::{ConcreteVector, TagVector};
use std::collections::HashSet;

/// The concrete resolutions of one tag vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSet {
    members: Vec<ConcreteVector>,
}

impl PowerSet {
    /// Number of concrete vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a set produced by [`PowerSetExpander`]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the members
    pub fn iter(&self) -> std::slice::Iter<'_, ConcreteVector> {
        self.members.iter()
    }

    /// Membership test
    #[must_use]
    pub fn contains(&self, c: &ConcreteVector) -> bool {
        self.members.contains(c)
    }

    /// Unwrap into the member list
    #[must_use]
    pub fn into_vec(self) -> Vec<ConcreteVector> {
        self.members
    }

    fn union_with(mut self, other: Self) -> Self {
        self.members.extend(other.members);
        self
    }
}

impl<'a> IntoIterator for &'a PowerSet {
    type Item = &'a ConcreteVector;
    type IntoIter = std::slice::Iter<'a, ConcreteVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// An observed vector paired with its power set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    /// The observed (possibly partial) vector
    pub observed: TagVector,
    /// All of its concrete resolutions
    pub power_set: PowerSet,
}

/// Expands partial tag vectors into their concrete resolutions
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerSetExpander;

impl PowerSetExpander {
    /// All concrete vectors consistent with `v`; exactly `2^u` of them for
    /// `u` Unknown entries.
    #[must_use]
    pub fn expand(v: &TagVector) -> PowerSet {
        let mut current = vec![v.clone()];

        // All vectors in `current` share their Unknown positions, so the
        // first one decides where to split next.
        while let Some(index) = current.first().and_then(TagVector::first_unknown) {
            current = current
                .iter()
                .flat_map(|item| [item.with_resolved(index, true), item.with_resolved(index, false)])
                .collect();
        }

        PowerSet {
            members: current
                .into_iter()
                .map(ConcreteVector::new_unchecked)
                .collect(),
        }
    }

    /// Split `v` on its first Unknown into the True and False halves.
    ///
    /// The halves expand independently and their power sets are disjoint;
    /// `None` when `v` is already concrete.
    #[must_use]
    pub fn split(v: &TagVector) -> Option<(TagVector, TagVector)> {
        v.first_unknown()
            .map(|i| (v.with_resolved(i, true), v.with_resolved(i, false)))
    }

    /// Expand the two halves of `v` on separate threads
    #[must_use]
    pub fn expand_split(v: &TagVector) -> PowerSet {
        let Some((high, low)) = Self::split(v) else {
            return Self::expand(v);
        };
        std::thread::scope(|scope| {
            let worker = scope.spawn(|| Self::expand(&high));
            let low_half = Self::expand(&low);
            match worker.join() {
                Ok(high_half) => high_half.union_with(low_half),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        })
    }

    /// Expand every observed vector
    #[must_use]
    pub fn expand_all<'a, I>(observed: I, ctx: &ParallelContext) -> Vec<Family>
    where
        I: IntoIterator<Item = &'a TagVector>,
    {
        let items: Vec<&TagVector> = observed.into_iter().collect();
        parallel_map(ctx, &items, |v| Family {
            observed: (*v).clone(),
            power_set: Self::expand(v),
        })
    }
}

/// Distinct concrete vectors reachable from any family
#[must_use]
pub fn union_size(families: &[Family]) -> usize {
    families
        .iter()
        .flat_map(|f| f.power_set.iter())
        .collect::<HashSet<_>>()
        .len()
}
