//! Level → talent point schedule.
//!
//! Points accumulate per level: with the default tiers a character has 3
//! points at level 1, 15 at level 5, 17 at level 6, 75 at level 35 and 100
//! at level 60. The inverse lookup (smallest level affording a point total)
//! is a binary search over the non-decreasing cumulative table.

use crate::config::{PointTier, ProgressionConfig};

/// Character level, `1..=PointSchedule::max_level()`.
pub type Level = u8;

/// Talent points.
pub type Points = u32;

/// Errors raised while expanding point tiers into a schedule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("point schedule has no tiers")]
    Empty,

    #[error("point tier {index} covers zero levels")]
    EmptyTier { index: usize },

    #[error("point tier {index} grants no points")]
    NoPoints { index: usize },

    #[error("point tiers cover {levels} levels, more than the supported {max}")]
    TooManyLevels { levels: usize, max: usize },
}

/// Cumulative talent points available at each level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointSchedule {
    /// `totals[i]` is the point total at level `i + 1`.
    totals: Vec<Points>,
}

impl PointSchedule {
    /// Expands `tiers` (starting at level 1) into cumulative totals.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no tiers, a tier covers no levels or
    /// grants no points, or the tiers run past the largest representable
    /// level.
    pub fn new(tiers: &[PointTier]) -> Result<Self, ScheduleError> {
        if tiers.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if let Some(index) = tiers.iter().position(|tier| tier.levels == 0) {
            return Err(ScheduleError::EmptyTier { index });
        }
        if let Some(index) = tiers.iter().position(|tier| tier.points_per_level == 0) {
            return Err(ScheduleError::NoPoints { index });
        }

        let levels: usize = tiers.iter().map(|tier| tier.levels as usize).sum();
        if levels > Level::MAX as usize {
            return Err(ScheduleError::TooManyLevels {
                levels,
                max: Level::MAX as usize,
            });
        }

        Ok(Self::from_tiers(tiers))
    }

    /// 3 points per level for 1-5, 2 for 6-35, 1 for 36-60.
    pub fn standard() -> Self {
        Self::from_tiers(&ProgressionConfig::DEFAULT_POINT_TIERS)
    }

    fn from_tiers(tiers: &[PointTier]) -> Self {
        let totals = tiers
            .iter()
            .flat_map(|tier| core::iter::repeat_n(tier.points_per_level, tier.levels as usize))
            .scan(0, |total: &mut Points, points| {
                *total = total.saturating_add(points);
                Some(*total)
            })
            .collect();
        Self { totals }
    }

    pub fn min_level(&self) -> Level {
        ProgressionConfig::MIN_LEVEL
    }

    /// Level cap: the last level covered by the tiers.
    pub fn max_level(&self) -> Level {
        self.totals.len() as Level
    }

    pub fn contains(&self, level: Level) -> bool {
        (self.min_level()..=self.max_level()).contains(&level)
    }

    /// Points available at `level`.
    ///
    /// Levels outside the schedule are clamped to its first or last level.
    pub fn total_points(&self, level: Level) -> Points {
        let index = level.clamp(self.min_level(), self.max_level()) as usize - 1;
        self.totals[index]
    }

    /// Smallest level whose cumulative total covers `points`.
    ///
    /// Returns `None` when even the level cap cannot afford them.
    pub fn min_level_for_points(&self, points: Points) -> Option<Level> {
        let index = self.totals.partition_point(|total| *total < points);
        (index < self.totals.len()).then(|| index as Level + 1)
    }

    /// Point total at the level cap.
    pub fn max_points(&self) -> Points {
        self.totals.last().copied().unwrap_or_default()
    }

    /// Cumulative totals, index 0 is level 1.
    pub fn totals(&self) -> &[Points] {
        &self.totals
    }

    /// `(level, total_points)` for every level of the schedule.
    pub fn levels(&self) -> impl Iterator<Item = (Level, Points)> + '_ {
        self.totals
            .iter()
            .enumerate()
            .map(|(i, total)| (i as Level + 1, *total))
    }
}

impl Default for PointSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
