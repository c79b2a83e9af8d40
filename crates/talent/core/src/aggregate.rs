//! Read-only combination of every talent in a build.
//!
//! Bonus keys combine in one of two ways, declared per key by
//! [`BonusKey::rule`]:
//!
//! - **Sum**: additive bonuses (`+5% pistol damage` from two talents is `+10%`)
//! - **Max**: base values that talents *set* (barrier duration, throw force),
//!   where only the strongest source counts
//!
//! Ability tiers always take the maximum and specializations are OR-ed.
//!
//! An aggregator bound to a [`KeyIndex`] treats keys outside the index as a
//! caller bug and returns [`UnknownKeyError`]. Unbound aggregators accept
//! every key.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorSeverity, TalentError};
use crate::talent::{
    AbilityKey, BonusKey, CombineRule, KeyIndex, NumericKey, SpecializationKey, StatKey,
    TalentInstance,
};

/// Queried key is not granted by any loaded talent definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no loaded talent grants {key}")]
pub struct UnknownKeyError {
    pub key: StatKey,
}

impl TalentError for UnknownKeyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "UNKNOWN_KEY"
    }
}

/// Every aggregated value of a build, keyed per namespace.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedBuild {
    pub bonuses: BTreeMap<BonusKey, f64>,
    pub abilities: BTreeMap<AbilityKey, u8>,
    pub specializations: BTreeMap<SpecializationKey, bool>,
}

/// Combines resolved values across a set of talent instances.
#[derive(Clone, Copy, Debug)]
pub struct BonusAggregator<'a> {
    talents: &'a [TalentInstance],
    index: Option<&'a KeyIndex>,
}

impl<'a> BonusAggregator<'a> {
    pub fn new(talents: &'a [TalentInstance]) -> Self {
        Self {
            talents,
            index: None,
        }
    }

    pub fn with_index(talents: &'a [TalentInstance], index: &'a KeyIndex) -> Self {
        Self {
            talents,
            index: Some(index),
        }
    }

    fn check(&self, key: impl Into<StatKey>) -> Result<(), UnknownKeyError> {
        let key = key.into();
        match self.index {
            Some(index) if !index.contains(key) => Err(UnknownKeyError { key }),
            _ => Ok(()),
        }
    }

    /// Sum of every instance's value for every key in `keys`.
    ///
    /// Used for umbrella bonuses, e.g. `[PistolDamage, WeaponDamage, AllDamage]`.
    pub fn sum_bonus(&self, keys: &[BonusKey]) -> Result<f64, UnknownKeyError> {
        for key in keys {
            self.check(*key)?;
        }
        Ok(self
            .talents
            .iter()
            .flat_map(|talent| keys.iter().map(move |key| talent.bonus(*key)))
            .sum())
    }

    /// Highest ability tier granted by any instance, 0 if none.
    pub fn max_ability_level(&self, key: AbilityKey) -> Result<u8, UnknownKeyError> {
        self.check(key)?;
        Ok(self
            .talents
            .iter()
            .map(|talent| talent.ability(key))
            .max()
            .unwrap_or_default())
    }

    /// Whether any instance unlocks the specialization.
    pub fn any_specialization(&self, key: SpecializationKey) -> Result<bool, UnknownKeyError> {
        self.check(key)?;
        Ok(self.talents.iter().any(|talent| talent.specialization(key)))
    }

    /// Strongest single-instance value for `key`, never below `floor`.
    pub fn highest_value(
        &self,
        key: impl Into<NumericKey>,
        floor: f64,
    ) -> Result<f64, UnknownKeyError> {
        let key = key.into();
        self.check(key)?;
        Ok(self
            .talents
            .iter()
            .map(|talent| match key {
                NumericKey::Bonus(key) => talent.bonus(key),
                NumericKey::Ability(key) => f64::from(talent.ability(key)),
            })
            .fold(floor, f64::max))
    }

    /// Value of `key` under its declared combination rule.
    pub fn combined_bonus(&self, key: BonusKey) -> Result<f64, UnknownKeyError> {
        match key.combine() {
            CombineRule::Sum => self.sum_bonus(&[key]),
            CombineRule::Max => self.highest_value(key, 0.0),
        }
    }

    /// Aggregates every key in scope.
    ///
    /// With an index, the scope is every indexed key; otherwise it is every
    /// key some talent in the build has a table for.
    pub fn resolve_all(&self) -> ResolvedBuild {
        let (bonuses, abilities, specializations) = match self.index {
            Some(index) => (
                index.bonuses().collect(),
                index.abilities().collect(),
                index.specializations().collect(),
            ),
            None => self.keys_in_build(),
        };

        // Keys come from the index or the build itself, so lookups cannot fail.
        let unbound = Self::new(self.talents);
        ResolvedBuild {
            bonuses: bonuses
                .into_iter()
                .map(|key| (key, unbound.combined_bonus(key).unwrap_or_default()))
                .collect(),
            abilities: abilities
                .into_iter()
                .map(|key| (key, unbound.max_ability_level(key).unwrap_or_default()))
                .collect(),
            specializations: specializations
                .into_iter()
                .map(|key| (key, unbound.any_specialization(key).unwrap_or_default()))
                .collect(),
        }
    }

    fn keys_in_build(
        &self,
    ) -> (
        BTreeSet<BonusKey>,
        BTreeSet<AbilityKey>,
        BTreeSet<SpecializationKey>,
    ) {
        let mut bonuses = BTreeSet::new();
        let mut abilities = BTreeSet::new();
        let mut specializations = BTreeSet::new();
        for key in self.talents.iter().flat_map(|talent| talent.definition().keys()) {
            match key {
                StatKey::Bonus(key) => {
                    bonuses.insert(key);
                }
                StatKey::Ability(key) => {
                    abilities.insert(key);
                }
                StatKey::Specialization(key) => {
                    specializations.insert(key);
                }
            }
        }
        (bonuses, abilities, specializations)
    }
}
