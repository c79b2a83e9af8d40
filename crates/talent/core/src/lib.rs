//! Talent progression rules for character builds.
//!
//! `talent-core` owns the pure rules: rank tables, talent definitions and
//! instances, the level → point schedule, the constraint solver that keeps a
//! build legal, and the aggregator that combines every talent's values. All
//! build mutation flows through [`progression::Build`]; content loading lives
//! in `talent-content`.
pub mod aggregate;
pub mod config;
pub mod error;
pub mod progression;
pub mod talent;
pub use aggregate::{BonusAggregator, ResolvedBuild, UnknownKeyError};
pub use config::{PointTier, ProgressionConfig};
pub use error::{ErrorSeverity, TalentError};
pub use progression::{
    Build, BuildConstraintSolver, BuildError, InvalidLevelError, Level, PointSchedule, Points,
    ScheduleError,
};
pub use talent::{
    AbilityKey, BonusKey, CombineRule, KeyIndex, NumericKey, OutOfRangeError, Rank, RankTable,
    RankTableError, RankValue, SpecializationKey, StatKey, StatRule, TalentDefinition,
    TalentDefinitionBuilder, TalentId, TalentInstance, TalentVariant, ValueKind,
};
