use crate::progression::{PointSchedule, ScheduleError};

/// One run of consecutive levels that each grant the same number of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointTier {
    /// Number of consecutive levels covered by this tier.
    pub levels: u8,
    /// Talent points granted by each level of the tier.
    pub points_per_level: u32,
}

impl PointTier {
    pub const fn new(levels: u8, points_per_level: u32) -> Self {
        Self {
            levels,
            points_per_level,
        }
    }
}

/// Progression constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionConfig {
    /// Point grants per level, starting at level 1. The last level covered by
    /// the final tier is the level cap.
    pub point_tiers: Vec<PointTier>,
}

impl ProgressionConfig {
    // ===== compile-time constants =====
    /// Hard cap on any talent's rank.
    pub const MAX_RANK: u8 = 12;
    /// Lowest representable character level.
    pub const MIN_LEVEL: u8 = 1;

    // ===== runtime-tunable defaults =====
    /// 3 points per level for 1-5, 2 for 6-35, 1 for 36-60.
    pub const DEFAULT_POINT_TIERS: [PointTier; 3] = [
        PointTier::new(5, 3),
        PointTier::new(30, 2),
        PointTier::new(25, 1),
    ];

    pub fn new() -> Self {
        Self {
            point_tiers: Self::DEFAULT_POINT_TIERS.to_vec(),
        }
    }

    pub fn with_point_tiers(point_tiers: Vec<PointTier>) -> Self {
        Self { point_tiers }
    }

    /// Validates the tiers and expands them into a cumulative point schedule.
    pub fn schedule(&self) -> Result<PointSchedule, ScheduleError> {
        PointSchedule::new(&self.point_tiers)
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}
