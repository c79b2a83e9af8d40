//! Rank tables: step functions from a talent's rank to the value it grants.
//!
//! A table holds `(threshold, value)` steps. Resolving at a rank returns the
//! value of the greatest threshold not exceeding that rank, or the value
//! type's default when no threshold has been reached yet. Gaps between
//! thresholds are normal: a talent may go several ranks without a new step.
//!
//! Values are not required to be monotonic. Some talents reset or shrink a
//! step at a tier boundary, and resolution only looks at thresholds.

use std::collections::BTreeMap;

use crate::config::ProgressionConfig;

/// Investment level of a talent, `0..=ProgressionConfig::MAX_RANK`.
pub type Rank = u8;

/// Values a rank table can hold.
///
/// `Default` is the value granted below the first threshold
/// (0 for numeric values, `false` for unlocks).
pub trait RankValue: Copy + Default + PartialEq + core::fmt::Debug {}

impl RankValue for f64 {}
impl RankValue for u8 {}
impl RankValue for bool {}

/// Errors raised while constructing a rank table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RankTableError {
    #[error("threshold {threshold} is outside 1..={max}")]
    ThresholdOutOfRange { threshold: Rank, max: Rank },

    #[error("threshold {threshold} appears more than once")]
    DuplicateThreshold { threshold: Rank },
}

/// Step function from rank to value for a single key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "BTreeMap<Rank, V>",
        into = "BTreeMap<Rank, V>",
        bound(
            serialize = "V: serde::Serialize + Clone",
            deserialize = "V: serde::Deserialize<'de> + RankValue"
        )
    )
)]
pub struct RankTable<V> {
    /// Sorted by threshold, thresholds unique and within `1..=MAX_RANK`.
    steps: Vec<(Rank, V)>,
}

impl<V> Default for RankTable<V> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<V: RankValue> RankTable<V> {
    /// Empty table: resolves to the default at every rank.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from `(threshold, value)` steps in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is 0, exceeds the rank cap, or is
    /// repeated.
    pub fn new(steps: impl IntoIterator<Item = (Rank, V)>) -> Result<Self, RankTableError> {
        let mut steps: Vec<(Rank, V)> = steps.into_iter().collect();
        steps.sort_by_key(|(threshold, _)| *threshold);

        for (i, (threshold, _)) in steps.iter().enumerate() {
            if *threshold == 0 || *threshold > ProgressionConfig::MAX_RANK {
                return Err(RankTableError::ThresholdOutOfRange {
                    threshold: *threshold,
                    max: ProgressionConfig::MAX_RANK,
                });
            }
            if i > 0 && steps[i - 1].0 == *threshold {
                return Err(RankTableError::DuplicateThreshold {
                    threshold: *threshold,
                });
            }
        }

        Ok(Self { steps })
    }

    /// Value granted at `rank`.
    ///
    /// Ranks above the last threshold keep its value; ranks below the first
    /// threshold give `V::default()`.
    pub fn resolve(&self, rank: Rank) -> V {
        let reached = self
            .steps
            .partition_point(|(threshold, _)| *threshold <= rank);
        match reached {
            0 => V::default(),
            n => self.steps[n - 1].1,
        }
    }

    /// Lowest rank at which the table grants anything other than the default.
    pub fn first_unlock(&self) -> Option<Rank> {
        self.steps
            .iter()
            .find(|(_, value)| *value != V::default())
            .map(|(threshold, _)| *threshold)
    }

    /// Returns a new table where `other`'s steps replace or extend this one's.
    ///
    /// Used when a specialization builds on its base talent: thresholds only
    /// in `self` are kept, thresholds in `other` win.
    pub fn overlay(&self, other: &Self) -> Self {
        let mut merged: BTreeMap<Rank, V> = self.steps.iter().copied().collect();
        merged.extend(other.steps.iter().copied());
        Self {
            steps: merged.into_iter().collect(),
        }
    }
}

impl<V> RankTable<V> {
    pub fn thresholds(&self) -> impl Iterator<Item = Rank> + '_ {
        self.steps.iter().map(|(threshold, _)| *threshold)
    }

    pub fn steps(&self) -> &[(Rank, V)] {
        &self.steps
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.steps.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<V: RankValue> TryFrom<BTreeMap<Rank, V>> for RankTable<V> {
    type Error = RankTableError;

    fn try_from(map: BTreeMap<Rank, V>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl<V> From<RankTable<V>> for BTreeMap<Rank, V> {
    fn from(table: RankTable<V>) -> Self {
        table.steps.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> RankTable<f64> {
        RankTable::new([(1, 0.10), (5, 0.20), (9, 0.30)]).unwrap()
    }

    #[test]
    fn resolve_picks_greatest_threshold_not_exceeding_rank() {
        let table = abc();
        assert_eq!(table.resolve(0), 0.0);
        assert_eq!(table.resolve(1), 0.10);
        assert_eq!(table.resolve(4), 0.10);
        assert_eq!(table.resolve(5), 0.20);
        assert_eq!(table.resolve(8), 0.20);
        assert_eq!(table.resolve(9), 0.30);
        assert_eq!(table.resolve(12), 0.30);
    }

    #[test]
    fn below_first_threshold_yields_default() {
        let tiers = RankTable::new([(3, 1u8), (8, 2), (12, 3)]).unwrap();
        assert_eq!(tiers.resolve(0), 0);
        assert_eq!(tiers.resolve(2), 0);
        assert_eq!(tiers.resolve(3), 1);

        let unlock = RankTable::new([(12, true)]).unwrap();
        assert!(!unlock.resolve(11));
        assert!(unlock.resolve(12));
    }

    #[test]
    fn empty_table_grants_nothing() {
        let table = RankTable::<f64>::empty();
        assert!(table.is_empty());
        assert_eq!(table.resolve(12), 0.0);
        assert_eq!(table.first_unlock(), None);
    }

    #[test]
    fn non_monotonic_tables_still_resolve_by_threshold() {
        let table = RankTable::new([(1, 5.0), (6, 2.0), (10, 7.0)]).unwrap();
        assert_eq!(table.resolve(5), 5.0);
        assert_eq!(table.resolve(6), 2.0);
        assert_eq!(table.resolve(11), 7.0);
    }

    #[test]
    fn steps_are_sorted_on_construction() {
        let table = RankTable::new([(9, 3u8), (1, 1), (5, 2)]).unwrap();
        assert_eq!(table.thresholds().collect::<Vec<_>>(), vec![1, 5, 9]);
        assert_eq!(table.resolve(6), 2);
    }

    #[test]
    fn rejects_zero_and_out_of_range_thresholds() {
        assert_eq!(
            RankTable::new([(0, 1.0)]),
            Err(RankTableError::ThresholdOutOfRange {
                threshold: 0,
                max: 12
            })
        );
        assert_eq!(
            RankTable::new([(13, 1.0)]),
            Err(RankTableError::ThresholdOutOfRange {
                threshold: 13,
                max: 12
            })
        );
    }

    #[test]
    fn rejects_duplicate_thresholds() {
        assert_eq!(
            RankTable::new([(4, 1.0), (4, 2.0)]),
            Err(RankTableError::DuplicateThreshold { threshold: 4 })
        );
    }

    #[test]
    fn overlay_prefers_the_upper_table() {
        let base = RankTable::new([(1, 0.04), (2, 0.06), (6, 0.14)]).unwrap();
        let spec = RankTable::new([(6, 0.16), (7, 0.18)]).unwrap();
        let merged = base.overlay(&spec);

        assert_eq!(merged.thresholds().collect::<Vec<_>>(), vec![1, 2, 6, 7]);
        assert_eq!(merged.resolve(2), 0.06);
        assert_eq!(merged.resolve(6), 0.16);
        assert_eq!(merged.resolve(12), 0.18);
    }

    #[test]
    fn first_unlock_skips_default_steps() {
        let table = RankTable::new([(2, false), (9, true)]).unwrap();
        assert_eq!(table.first_unlock(), Some(9));
    }
}
