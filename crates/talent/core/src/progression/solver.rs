//! Build constraint solver.
//!
//! Keeps four quantities mutually consistent:
//!
//! ```text
//! level ──► total_points(level)
//!   ▲              │
//!   │              ▼
//! min_level ◄── allocated_points ──► per-talent max rank
//! ```
//!
//! - `allocated ≤ total_points(level)`
//! - `rank ≤ min(MAX_RANK, level + 1, rank + unallocated)` for every talent
//! - `level ≥ max(min_level_for_points(allocated), highest_rank - 1, 1)`
//!
//! The solver is pure: it answers bound queries for a given state and never
//! owns a build. [`crate::progression::Build`] drives the transitions.

use super::schedule::{Level, PointSchedule, Points};
use crate::config::ProgressionConfig;
use crate::error::{ErrorSeverity, TalentError};
use crate::talent::Rank;

/// A requested level was rejected; the build keeps its current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLevelError {
    #[error("level {level} is outside {min}..={max}")]
    OutOfRange { level: Level, min: Level, max: Level },

    #[error("level {level} is below the minimum {minimum} required by the current allocation")]
    BelowMinimum { level: Level, minimum: Level },
}

impl TalentError for InvalidLevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "LEVEL_OUT_OF_RANGE",
            Self::BelowMinimum { .. } => "LEVEL_BELOW_MINIMUM",
        }
    }
}

/// Level, point and rank bounds derived from a point schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildConstraintSolver {
    schedule: PointSchedule,
}

impl BuildConstraintSolver {
    pub fn new(schedule: PointSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &PointSchedule {
        &self.schedule
    }

    pub fn total_points(&self, level: Level) -> Points {
        self.schedule.total_points(level)
    }

    /// Smallest level whose total covers `allocated`, `None` if beyond the cap.
    pub fn min_level_for_points(&self, allocated: Points) -> Option<Level> {
        self.schedule.min_level_for_points(allocated)
    }

    /// Inverse of `rank ≤ level + 1`, floored at the lowest level.
    pub fn min_level_for_rank(&self, rank: Rank) -> Level {
        rank.saturating_sub(1).max(self.schedule.min_level())
    }

    /// Lowest level that supports both the point total and the highest rank.
    ///
    /// Returns `None` when no level up to the cap can afford `allocated`.
    pub fn min_level(&self, allocated: Points, highest_rank: Rank) -> Option<Level> {
        let by_points = self.min_level_for_points(allocated)?;
        let by_rank = self.min_level_for_rank(highest_rank);
        Some(by_points.max(by_rank))
    }

    /// Highest rank a talent currently at `rank` may be raised to.
    ///
    /// `min(MAX_RANK, level + 1, rank + unallocated)`.
    pub fn max_rank(&self, level: Level, rank: Rank, unallocated: Points) -> Rank {
        let by_points = (rank as Points).saturating_add(unallocated);
        let by_level = level as Points + 1;
        by_points
            .min(by_level)
            .min(ProgressionConfig::MAX_RANK as Points) as Rank
    }

    /// Checks that `level` is representable and supports the allocation.
    ///
    /// # Errors
    ///
    /// [`InvalidLevelError::OutOfRange`] outside the schedule,
    /// [`InvalidLevelError::BelowMinimum`] when the allocation or the highest
    /// rank would no longer fit.
    pub fn check_level(
        &self,
        level: Level,
        allocated: Points,
        highest_rank: Rank,
    ) -> Result<(), InvalidLevelError> {
        if !self.schedule.contains(level) {
            return Err(InvalidLevelError::OutOfRange {
                level,
                min: self.schedule.min_level(),
                max: self.schedule.max_level(),
            });
        }

        // An allocation beyond the cap cannot be held at any level.
        let minimum = self
            .min_level(allocated, highest_rank)
            .unwrap_or(Level::MAX);
        if level < minimum {
            return Err(InvalidLevelError::BelowMinimum { level, minimum });
        }

        Ok(())
    }
}
