//! Mutable character build: a level plus the talents invested in.
//!
//! Every mutation goes through the [`BuildConstraintSolver`]; a rejected
//! mutation leaves the build exactly as it was. Allocated points are never
//! reduced behind the editor's back: raising a rank past what the current
//! level supports pulls the level up instead.

use std::sync::Arc;

use super::schedule::{Level, PointSchedule, Points, ScheduleError};
use super::solver::{BuildConstraintSolver, InvalidLevelError};
use crate::aggregate::BonusAggregator;
use crate::config::ProgressionConfig;
use crate::error::{ErrorSeverity, TalentError};
use crate::talent::{KeyIndex, OutOfRangeError, Rank, TalentDefinition, TalentId, TalentInstance};

/// Rejected build mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Rank(#[from] OutOfRangeError),

    #[error(transparent)]
    Level(#[from] InvalidLevelError),

    #[error("talent '{0}' is not part of this build")]
    UnknownTalent(TalentId),

    #[error("talent '{0}' is already part of this build")]
    DuplicateTalent(TalentId),

    #[error("{allocated} points exceed the {max_points} available at the level cap")]
    Unaffordable { allocated: Points, max_points: Points },
}

impl TalentError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rank(err) => err.severity(),
            Self::Level(err) => err.severity(),
            Self::UnknownTalent(_) | Self::DuplicateTalent(_) | Self::Unaffordable { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rank(err) => err.error_code(),
            Self::Level(err) => err.error_code(),
            Self::UnknownTalent(_) => "UNKNOWN_TALENT",
            Self::DuplicateTalent(_) => "DUPLICATE_TALENT",
            Self::Unaffordable { .. } => "UNAFFORDABLE",
        }
    }
}

/// A character level and the talents selected for it.
///
/// Invariants held after every successful mutation:
/// - `allocated_points() <= total_points()`
/// - every rank is `<= min(MAX_RANK, level + 1)`
/// - `level() >= min_level()`
#[derive(Clone, Debug)]
pub struct Build {
    level: Level,
    /// Insertion order is preserved for display.
    talents: Vec<TalentInstance>,
    solver: BuildConstraintSolver,
}

impl Build {
    /// Empty build at the lowest level of `schedule`.
    pub fn new(schedule: PointSchedule) -> Self {
        Self {
            level: schedule.min_level(),
            talents: Vec::new(),
            solver: BuildConstraintSolver::new(schedule),
        }
    }

    /// Empty build using the point tiers of `config`.
    pub fn from_config(config: &ProgressionConfig) -> Result<Self, ScheduleError> {
        Ok(Self::new(config.schedule()?))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn talents(&self) -> &[TalentInstance] {
        &self.talents
    }

    pub fn talent(&self, id: &TalentId) -> Option<&TalentInstance> {
        self.talents.iter().find(|talent| talent.id() == id)
    }

    pub fn solver(&self) -> &BuildConstraintSolver {
        &self.solver
    }

    /// Points granted at the current level.
    pub fn total_points(&self) -> Points {
        self.solver.total_points(self.level)
    }

    /// Sum of the ranks of every talent in the build.
    pub fn allocated_points(&self) -> Points {
        self.talents
            .iter()
            .map(|talent| talent.rank() as Points)
            .sum()
    }

    pub fn unallocated_points(&self) -> Points {
        self.total_points().saturating_sub(self.allocated_points())
    }

    /// Highest rank `id` may currently be set to without changing the level.
    pub fn max_rank_for(&self, id: &TalentId) -> Option<Rank> {
        let talent = self.talent(id)?;
        Some(
            self.solver
                .max_rank(self.level, talent.rank(), self.unallocated_points()),
        )
    }

    /// Lowest level the current allocation can be held at.
    pub fn min_level(&self) -> Level {
        // Successful mutations keep the allocation affordable.
        self.solver
            .min_level(self.allocated_points(), self.highest_rank())
            .unwrap_or(self.level)
    }

    /// Read-only aggregation over the build's talents, accepting every key.
    pub fn aggregator(&self) -> BonusAggregator<'_> {
        BonusAggregator::new(&self.talents)
    }

    /// Aggregation that rejects keys missing from `index`.
    pub fn aggregator_with_index<'a>(&'a self, index: &'a KeyIndex) -> BonusAggregator<'a> {
        BonusAggregator::with_index(&self.talents, index)
    }

    fn highest_rank(&self) -> Rank {
        self.talents
            .iter()
            .map(TalentInstance::rank)
            .max()
            .unwrap_or_default()
    }

    fn position(&self, id: &TalentId) -> Result<usize, BuildError> {
        self.talents
            .iter()
            .position(|talent| talent.id() == id)
            .ok_or_else(|| BuildError::UnknownTalent(id.clone()))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Changes the character level.
    ///
    /// # Errors
    ///
    /// [`InvalidLevelError`] if `level` is outside the schedule or below
    /// [`Self::min_level`]. The build is unchanged on error.
    pub fn set_level(&mut self, level: Level) -> Result<(), BuildError> {
        let allocated = self.allocated_points();
        if let Err(err) = self.solver.check_level(level, allocated, self.highest_rank()) {
            tracing::warn!("Rejected level change {} -> {}: {}", self.level, level, err);
            return Err(err.into());
        }

        tracing::debug!(
            "Level {} -> {} (total points {})",
            self.level,
            level,
            self.solver.total_points(level)
        );
        self.level = level;
        Ok(())
    }

    /// Sets the rank of a talent already in the build.
    ///
    /// If the current level cannot support the new allocation, the level is
    /// raised to the lowest level that can.
    ///
    /// # Errors
    ///
    /// - [`BuildError::UnknownTalent`] if `id` is not in the build
    /// - [`BuildError::Rank`] if `rank` exceeds the rank cap
    /// - [`BuildError::Unaffordable`] if no level up to the cap can hold the
    ///   resulting allocation
    pub fn set_talent_rank(&mut self, id: &TalentId, rank: Rank) -> Result<(), BuildError> {
        let index = self.position(id)?;
        if rank > ProgressionConfig::MAX_RANK {
            let err = OutOfRangeError {
                rank,
                max: ProgressionConfig::MAX_RANK,
            };
            tracing::warn!("Rejected rank change for {}: {}", id, err);
            return Err(err.into());
        }

        let current = self.talents[index].rank();
        let allocated = self.allocated_points() - current as Points + rank as Points;
        let highest = self
            .talents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, talent)| talent.rank())
            .max()
            .unwrap_or_default()
            .max(rank);

        let Some(minimum) = self.solver.min_level(allocated, highest) else {
            let err = BuildError::Unaffordable {
                allocated,
                max_points: self.solver.schedule().max_points(),
            };
            tracing::warn!("Rejected rank change for {} -> {}: {}", id, rank, err);
            return Err(err);
        };

        self.talents[index].set_rank(rank)?;
        tracing::debug!("Rank {} {} -> {} (allocated {})", id, current, rank, allocated);

        if self.level < minimum {
            tracing::info!(
                "Level pulled up {} -> {} to support {} at rank {}",
                self.level,
                minimum,
                id,
                rank
            );
            self.level = minimum;
        }

        Ok(())
    }

    /// Adds a talent at rank 0.
    ///
    /// # Errors
    ///
    /// [`BuildError::DuplicateTalent`] if a talent with the same id is
    /// already in the build.
    pub fn add_talent(
        &mut self,
        definition: Arc<TalentDefinition>,
    ) -> Result<&TalentInstance, BuildError> {
        if self.talent(definition.id()).is_some() {
            let err = BuildError::DuplicateTalent(definition.id().clone());
            tracing::warn!("{}", err);
            return Err(err);
        }

        tracing::debug!("Added talent {}", definition.id());
        let index = self.talents.len();
        self.talents.push(TalentInstance::new(definition));
        Ok(&self.talents[index])
    }

    /// Removes a talent, refunding its points. Returns the removed instance.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownTalent`] if `id` is not in the build.
    pub fn remove_talent(&mut self, id: &TalentId) -> Result<TalentInstance, BuildError> {
        let index = self.position(id)?;
        let removed = self.talents.remove(index);
        tracing::debug!("Removed talent {} (refunded {})", id, removed.rank());
        Ok(removed)
    }
}

impl Default for Build {
    fn default() -> Self {
        Self::new(PointSchedule::standard())
    }
}
