//! Immutable talent definitions.
//!
//! A definition is static content: a display name plus one [`RankTable`] per
//! key the talent can grant, split into the three key namespaces. Definitions
//! are built once when content is loaded and then shared read-only between
//! every instance that selects them.
//!
//! Specializations (advanced class variants) are fully resolved definitions
//! of their own. [`TalentDefinitionBuilder::extending`] seeds a builder with
//! the base talent's tables so the specialization's steps are merged at
//! construction time, never at lookup time.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::keys::{AbilityKey, BonusKey, SpecializationKey, StatKey};
use super::rank::RankTable;

/// Stable identifier of a talent definition (e.g. `pistols`, `soldier_commando`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TalentId(String);

impl TalentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TalentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TalentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TalentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TalentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a definition is a base talent or a specialization of one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TalentVariant {
    #[default]
    Base,
    /// Advanced variant whose tables already include its base's tables.
    Specialization { base: TalentId },
}

/// Static description of a talent and everything it can grant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TalentDefinition {
    id: TalentId,
    name: String,
    variant: TalentVariant,
    bonuses: BTreeMap<BonusKey, RankTable<f64>>,
    abilities: BTreeMap<AbilityKey, RankTable<u8>>,
    specializations: BTreeMap<SpecializationKey, RankTable<bool>>,
}

impl TalentDefinition {
    pub fn builder(id: impl Into<TalentId>, name: impl Into<String>) -> TalentDefinitionBuilder {
        TalentDefinitionBuilder::new(id, name)
    }

    pub fn id(&self) -> &TalentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> &TalentVariant {
        &self.variant
    }

    /// Base talent this definition specializes, if any.
    pub fn base(&self) -> Option<&TalentId> {
        match &self.variant {
            TalentVariant::Base => None,
            TalentVariant::Specialization { base } => Some(base),
        }
    }

    pub fn bonus_table(&self, key: BonusKey) -> Option<&RankTable<f64>> {
        self.bonuses.get(&key)
    }

    pub fn ability_table(&self, key: AbilityKey) -> Option<&RankTable<u8>> {
        self.abilities.get(&key)
    }

    pub fn specialization_table(&self, key: SpecializationKey) -> Option<&RankTable<bool>> {
        self.specializations.get(&key)
    }

    pub fn bonus_tables(&self) -> impl Iterator<Item = (BonusKey, &RankTable<f64>)> + '_ {
        self.bonuses.iter().map(|(key, table)| (*key, table))
    }

    pub fn ability_tables(&self) -> impl Iterator<Item = (AbilityKey, &RankTable<u8>)> + '_ {
        self.abilities.iter().map(|(key, table)| (*key, table))
    }

    pub fn specialization_tables(
        &self,
    ) -> impl Iterator<Item = (SpecializationKey, &RankTable<bool>)> + '_ {
        self.specializations.iter().map(|(key, table)| (*key, table))
    }

    /// Every key this definition has a table for, in namespace order.
    pub fn keys(&self) -> impl Iterator<Item = StatKey> + '_ {
        self.bonuses
            .keys()
            .copied()
            .map(StatKey::from)
            .chain(self.abilities.keys().copied().map(StatKey::from))
            .chain(self.specializations.keys().copied().map(StatKey::from))
    }

    /// True if at least one table has a step.
    pub fn grants_anything(&self) -> bool {
        self.bonuses.values().any(|table| !table.is_empty())
            || self.abilities.values().any(|table| !table.is_empty())
            || self.specializations.values().any(|table| !table.is_empty())
    }

    /// Wraps the definition for sharing between instances.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Builder for [`TalentDefinition`].
///
/// Adding a table for a key that already has one overlays the new steps on
/// the existing table.
#[derive(Clone, Debug)]
pub struct TalentDefinitionBuilder {
    definition: TalentDefinition,
}

impl TalentDefinitionBuilder {
    pub fn new(id: impl Into<TalentId>, name: impl Into<String>) -> Self {
        Self {
            definition: TalentDefinition {
                id: id.into(),
                name: name.into(),
                variant: TalentVariant::Base,
                bonuses: BTreeMap::new(),
                abilities: BTreeMap::new(),
                specializations: BTreeMap::new(),
            },
        }
    }

    /// Starts a specialization of `base`, inheriting all of its tables.
    pub fn extending(
        base: &TalentDefinition,
        id: impl Into<TalentId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            definition: TalentDefinition {
                id: id.into(),
                name: name.into(),
                variant: TalentVariant::Specialization {
                    base: base.id.clone(),
                },
                bonuses: base.bonuses.clone(),
                abilities: base.abilities.clone(),
                specializations: base.specializations.clone(),
            },
        }
    }

    pub fn bonus(mut self, key: BonusKey, table: RankTable<f64>) -> Self {
        overlay_into(&mut self.definition.bonuses, key, table);
        self
    }

    pub fn ability(mut self, key: AbilityKey, table: RankTable<u8>) -> Self {
        overlay_into(&mut self.definition.abilities, key, table);
        self
    }

    pub fn specialization(mut self, key: SpecializationKey, table: RankTable<bool>) -> Self {
        overlay_into(&mut self.definition.specializations, key, table);
        self
    }

    pub fn build(self) -> TalentDefinition {
        self.definition
    }
}

fn overlay_into<K: Ord, V: super::rank::RankValue>(
    tables: &mut BTreeMap<K, RankTable<V>>,
    key: K,
    table: RankTable<V>,
) {
    match tables.get_mut(&key) {
        Some(existing) => *existing = existing.overlay(&table),
        None => {
            tables.insert(key, table);
        }
    }
}
