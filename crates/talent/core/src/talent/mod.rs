//! Talents: key namespaces, rank tables, definitions and instances.
//!
//! ```text
//! [ RankTable ]          step function, one per key
//!      ↓
//! [ TalentDefinition ]   immutable, shared via Arc
//!      ↓
//! [ TalentInstance ]     definition + current rank
//! ```

pub mod definition;
pub mod instance;
pub mod keys;
pub mod rank;

pub use definition::{TalentDefinition, TalentDefinitionBuilder, TalentId, TalentVariant};
pub use instance::{OutOfRangeError, TalentInstance};
pub use keys::{
    AbilityKey, BonusKey, CombineRule, KeyIndex, NumericKey, SpecializationKey, StatKey, StatRule,
    ValueKind,
};
pub use rank::{Rank, RankTable, RankTableError, RankValue};
