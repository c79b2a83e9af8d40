//! A talent selected by a build, bound to its current rank.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::definition::{TalentDefinition, TalentId};
use super::keys::{AbilityKey, BonusKey, SpecializationKey};
use super::rank::Rank;
use crate::config::ProgressionConfig;
use crate::error::{ErrorSeverity, TalentError};

/// Rank argument outside `0..=MAX_RANK`. Never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rank {rank} is outside 0..={max}")]
pub struct OutOfRangeError {
    pub rank: Rank,
    pub max: Rank,
}

impl TalentError for OutOfRangeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "RANK_OUT_OF_RANGE"
    }
}

/// A shared [`TalentDefinition`] plus the rank this build has invested.
///
/// Resolution is a pure function of the current rank and is recomputed on
/// every call.
#[derive(Clone, Debug, PartialEq)]
pub struct TalentInstance {
    definition: Arc<TalentDefinition>,
    rank: Rank,
}

impl TalentInstance {
    /// New instance at rank 0.
    pub fn new(definition: Arc<TalentDefinition>) -> Self {
        Self {
            definition,
            rank: 0,
        }
    }

    pub fn with_rank(
        definition: Arc<TalentDefinition>,
        rank: Rank,
    ) -> Result<Self, OutOfRangeError> {
        let mut instance = Self::new(definition);
        instance.set_rank(rank)?;
        Ok(instance)
    }

    pub fn id(&self) -> &TalentId {
        self.definition.id()
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &Arc<TalentDefinition> {
        &self.definition
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Sets the rank without any build-level point or level checks.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `rank` exceeds the rank cap.
    pub fn set_rank(&mut self, rank: Rank) -> Result<(), OutOfRangeError> {
        if rank > ProgressionConfig::MAX_RANK {
            return Err(OutOfRangeError {
                rank,
                max: ProgressionConfig::MAX_RANK,
            });
        }
        self.rank = rank;
        Ok(())
    }

    /// Value of one bonus at the current rank, 0 if the talent has no table.
    pub fn bonus(&self, key: BonusKey) -> f64 {
        self.definition
            .bonus_table(key)
            .map(|table| table.resolve(self.rank))
            .unwrap_or_default()
    }

    /// Ability tier at the current rank, 0 if the talent has no table.
    pub fn ability(&self, key: AbilityKey) -> u8 {
        self.definition
            .ability_table(key)
            .map(|table| table.resolve(self.rank))
            .unwrap_or_default()
    }

    /// Whether the specialization is unlocked at the current rank.
    pub fn specialization(&self, key: SpecializationKey) -> bool {
        self.definition
            .specialization_table(key)
            .is_some_and(|table| table.resolve(self.rank))
    }

    pub fn resolved_bonuses(&self) -> BTreeMap<BonusKey, f64> {
        self.definition
            .bonus_tables()
            .map(|(key, table)| (key, table.resolve(self.rank)))
            .collect()
    }

    pub fn resolved_abilities(&self) -> BTreeMap<AbilityKey, u8> {
        self.definition
            .ability_tables()
            .map(|(key, table)| (key, table.resolve(self.rank)))
            .collect()
    }

    pub fn resolved_specializations(&self) -> BTreeMap<SpecializationKey, bool> {
        self.definition
            .specialization_tables()
            .map(|(key, table)| (key, table.resolve(self.rank)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talent::rank::RankTable;

    fn commando() -> Arc<TalentDefinition> {
        TalentDefinition::builder("soldier_commando", "Commando")
            .bonus(
                BonusKey::WeaponDamage,
                RankTable::new([(7, 0.06), (8, 0.09), (12, 0.21)]).unwrap(),
            )
            .ability(AbilityKey::Immunity, RankTable::new([(4, 1), (8, 2)]).unwrap())
            .specialization(
                SpecializationKey::Assassination,
                RankTable::new([(12, true)]).unwrap(),
            )
            .build()
            .into_shared()
    }

    #[test]
    fn new_instance_starts_at_rank_zero() {
        let instance = TalentInstance::new(commando());
        assert_eq!(instance.rank(), 0);
        assert_eq!(instance.id().as_str(), "soldier_commando");
        assert_eq!(instance.resolved_bonuses().get(&BonusKey::WeaponDamage), Some(&0.0));
        assert_eq!(instance.resolved_abilities().get(&AbilityKey::Immunity), Some(&0));
        assert_eq!(
            instance
                .resolved_specializations()
                .get(&SpecializationKey::Assassination),
            Some(&false)
        );
    }

    #[test]
    fn resolution_follows_rank_changes() {
        let mut instance = TalentInstance::new(commando());
        instance.set_rank(8).unwrap();
        assert_eq!(instance.bonus(BonusKey::WeaponDamage), 0.09);
        assert_eq!(instance.ability(AbilityKey::Immunity), 2);
        assert!(!instance.specialization(SpecializationKey::Assassination));

        instance.set_rank(12).unwrap();
        assert_eq!(instance.bonus(BonusKey::WeaponDamage), 0.21);
        assert!(instance.specialization(SpecializationKey::Assassination));

        instance.set_rank(3).unwrap();
        assert_eq!(instance.bonus(BonusKey::WeaponDamage), 0.0);
        assert_eq!(instance.ability(AbilityKey::Immunity), 0);
    }

    #[test]
    fn keys_without_tables_resolve_to_defaults() {
        let instance = TalentInstance::with_rank(commando(), 12).unwrap();
        assert_eq!(instance.bonus(BonusKey::PistolDamage), 0.0);
        assert_eq!(instance.ability(AbilityKey::Marksman), 0);
        assert!(!instance.specialization(SpecializationKey::Warp));
        assert!(!instance.resolved_bonuses().contains_key(&BonusKey::PistolDamage));
    }

    #[test]
    fn set_rank_rejects_values_above_the_cap() {
        let mut instance = TalentInstance::with_rank(commando(), 5).unwrap();
        let err = instance.set_rank(13).unwrap_err();
        assert_eq!(err, OutOfRangeError { rank: 13, max: 12 });
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        // Rejected change is not applied.
        assert_eq!(instance.rank(), 5);
    }

    #[test]
    fn instances_share_one_definition() {
        let definition = commando();
        let a = TalentInstance::new(Arc::clone(&definition));
        let b = TalentInstance::new(Arc::clone(&definition));
        assert!(Arc::ptr_eq(a.definition(), b.definition()));
        assert_eq!(Arc::strong_count(&definition), 3);
    }
}
