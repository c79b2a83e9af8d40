//! Key namespaces talents may grant values for.
//!
//! Three disjoint namespaces keep the combination rules explicit:
//!
//! - [`BonusKey`]: numeric stat modifiers. Each key declares its
//!   [`ValueKind`] and its [`CombineRule`].
//! - [`AbilityKey`]: ability tier tracks, combined by maximum.
//! - [`SpecializationKey`]: boolean unlocks, combined by logical OR.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;

/// How a bonus value is interpreted by consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    /// Fraction of a base value (0.10 = +10%).
    Percent,
    /// Absolute amount in the stat's own unit (seconds, meters, points).
    Absolute,
}

/// How contributions from several talents are combined into one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CombineRule {
    /// Additive bonus: every contributing talent stacks.
    Sum,
    /// Base value setting: the strongest single source wins.
    Max,
}

/// Declared semantics of a bonus key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatRule {
    pub kind: ValueKind,
    pub combine: CombineRule,
}

impl StatRule {
    pub const PERCENT_SUM: Self = Self {
        kind: ValueKind::Percent,
        combine: CombineRule::Sum,
    };
    pub const ABSOLUTE_SUM: Self = Self {
        kind: ValueKind::Absolute,
        combine: CombineRule::Sum,
    };
    pub const ABSOLUTE_MAX: Self = Self {
        kind: ValueKind::Absolute,
        combine: CombineRule::Max,
    };
}

/// Stat modifiers and base values a talent may grant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BonusKey {
    // ========================================================================
    // Umbrella bonuses
    // ========================================================================
    AllDamage,
    AllDurations,
    WeaponDamage,
    DamageProtection,

    // ========================================================================
    // Weapons
    // ========================================================================
    AssaultRifleAccuracy,
    AssaultRifleDamage,
    MeleeDamage,
    PistolAccuracy,
    PistolDamage,
    ShotgunAccuracy,
    ShotgunDamage,
    SniperRifleAccuracy,
    SniperRifleDamage,

    // ========================================================================
    // Armor and survival
    // ========================================================================
    Health,
    HealthRegen,
    LightArmorDr,
    LightArmorHardening,
    MedArmorDr,
    MedArmorHardening,
    HeavyArmorDr,
    HeavyArmorHardening,
    FirstAidHaste,
    FirstAidHealing,

    // ========================================================================
    // Class bonuses
    // ========================================================================
    BioticHaste,
    BioticProtection,
    TechHaste,
    TechProtection,

    // ========================================================================
    // Tech abilities
    // ========================================================================
    TechMineDamage,
    TechMineHaste,
    TechMineRadius,
    HullRepair,
    ShieldCapacity,

    // ========================================================================
    // Biotic ability base values
    // ========================================================================
    BarrierDuration,
    BarrierShielding,
    LiftDuration,
    SingularityDuration,
    SingularityRadius,
    StasisDuration,
    ThrowForce,
    WarpDuration,
}

impl BonusKey {
    /// Declared value kind and combination rule for this key.
    ///
    /// Base-value keys are set by the strongest talent rather than stacked.
    pub const fn rule(self) -> StatRule {
        match self {
            Self::BarrierDuration
            | Self::BarrierShielding
            | Self::LiftDuration
            | Self::SingularityDuration
            | Self::SingularityRadius
            | Self::StasisDuration
            | Self::ThrowForce
            | Self::WarpDuration
            | Self::FirstAidHealing
            | Self::HullRepair
            | Self::ShieldCapacity => StatRule::ABSOLUTE_MAX,
            Self::HealthRegen => StatRule::ABSOLUTE_SUM,
            _ => StatRule::PERCENT_SUM,
        }
    }

    pub const fn kind(self) -> ValueKind {
        self.rule().kind
    }

    pub const fn combine(self) -> CombineRule {
        self.rule().combine
    }
}

/// Combat abilities with Basic / Advanced / Master tiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKey {
    AdrenalineBurst,
    AiHacking,
    Assassination,
    Barrier,
    Carnage,
    Damping,
    Immunity,
    Lift,
    Marksman,
    NeuralShock,
    Overkill,
    Overload,
    Sabotage,
    ShieldBoost,
    Singularity,
    Stasis,
    Throw,
    Unity,
    Warp,
}

/// Abilities that advanced class variants can specialize.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpecializationKey {
    AdrenalineBurst,
    Assassination,
    Barrier,
    FirstAid,
    Immunity,
    Lift,
    NeuralShock,
    Overload,
    Sabotage,
    Stasis,
    Warp,
}

/// A key from any of the three namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKey {
    Bonus(BonusKey),
    Ability(AbilityKey),
    Specialization(SpecializationKey),
}

impl StatKey {
    /// Every key of every namespace: bonuses first, then abilities, then
    /// specializations, each in declaration order.
    pub fn all() -> impl Iterator<Item = StatKey> {
        BonusKey::iter()
            .map(Self::Bonus)
            .chain(AbilityKey::iter().map(Self::Ability))
            .chain(SpecializationKey::iter().map(Self::Specialization))
    }
}

impl core::fmt::Display for StatKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bonus(key) => write!(f, "bonus:{key}"),
            Self::Ability(key) => write!(f, "ability:{key}"),
            Self::Specialization(key) => write!(f, "specialization:{key}"),
        }
    }
}

impl From<BonusKey> for StatKey {
    fn from(key: BonusKey) -> Self {
        Self::Bonus(key)
    }
}

impl From<AbilityKey> for StatKey {
    fn from(key: AbilityKey) -> Self {
        Self::Ability(key)
    }
}

impl From<SpecializationKey> for StatKey {
    fn from(key: SpecializationKey) -> Self {
        Self::Specialization(key)
    }
}

/// A key whose values are numeric and can be compared for "strongest source".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericKey {
    Bonus(BonusKey),
    Ability(AbilityKey),
}

impl From<BonusKey> for NumericKey {
    fn from(key: BonusKey) -> Self {
        Self::Bonus(key)
    }
}

impl From<AbilityKey> for NumericKey {
    fn from(key: AbilityKey) -> Self {
        Self::Ability(key)
    }
}

impl From<NumericKey> for StatKey {
    fn from(key: NumericKey) -> Self {
        match key {
            NumericKey::Bonus(key) => Self::Bonus(key),
            NumericKey::Ability(key) => Self::Ability(key),
        }
    }
}

/// Every key mentioned by at least one loaded talent definition.
///
/// The aggregator consults the index to tell "known but not granted by this
/// build" (identity value) apart from "not granted by any talent at all"
/// (caller error).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyIndex {
    bonuses: BTreeSet<BonusKey>,
    abilities: BTreeSet<AbilityKey>,
    specializations: BTreeSet<SpecializationKey>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<StatKey>) {
        match key.into() {
            StatKey::Bonus(key) => {
                self.bonuses.insert(key);
            }
            StatKey::Ability(key) => {
                self.abilities.insert(key);
            }
            StatKey::Specialization(key) => {
                self.specializations.insert(key);
            }
        }
    }

    pub fn contains(&self, key: impl Into<StatKey>) -> bool {
        match key.into() {
            StatKey::Bonus(key) => self.bonuses.contains(&key),
            StatKey::Ability(key) => self.abilities.contains(&key),
            StatKey::Specialization(key) => self.specializations.contains(&key),
        }
    }

    pub fn bonuses(&self) -> impl Iterator<Item = BonusKey> + '_ {
        self.bonuses.iter().copied()
    }

    pub fn abilities(&self) -> impl Iterator<Item = AbilityKey> + '_ {
        self.abilities.iter().copied()
    }

    pub fn specializations(&self) -> impl Iterator<Item = SpecializationKey> + '_ {
        self.specializations.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len() + self.abilities.len() + self.specializations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<StatKey>> Extend<K> for KeyIndex {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Into<StatKey>> FromIterator<K> for KeyIndex {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn base_value_keys_take_the_strongest_source() {
        assert_eq!(BonusKey::BarrierDuration.combine(), CombineRule::Max);
        assert_eq!(BonusKey::ThrowForce.combine(), CombineRule::Max);
        assert_eq!(BonusKey::SingularityRadius.kind(), ValueKind::Absolute);
    }

    #[test]
    fn percentage_bonuses_stack() {
        assert_eq!(BonusKey::PistolDamage.rule(), StatRule::PERCENT_SUM);
        assert_eq!(BonusKey::WeaponDamage.combine(), CombineRule::Sum);
        assert_eq!(BonusKey::HealthRegen.rule(), StatRule::ABSOLUTE_SUM);
    }

    #[test]
    fn keys_parse_from_snake_case() {
        assert_eq!(
            BonusKey::from_str("pistol_damage").ok(),
            Some(BonusKey::PistolDamage)
        );
        assert_eq!(
            AbilityKey::from_str("AI_HACKING").ok(),
            Some(AbilityKey::AiHacking)
        );
        assert_eq!(SpecializationKey::Assassination.to_string(), "assassination");
    }

    #[test]
    fn all_keys_cover_every_namespace_once() {
        let keys: Vec<StatKey> = StatKey::all().collect();
        let unique: BTreeSet<StatKey> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());

        assert_eq!(keys.first(), Some(&StatKey::Bonus(BonusKey::AllDamage)));
        assert_eq!(
            keys.last(),
            Some(&StatKey::Specialization(SpecializationKey::Warp))
        );
        assert!(keys.contains(&StatKey::Ability(AbilityKey::AiHacking)));

        for key in BonusKey::iter() {
            if key.as_ref().ends_with("_duration") {
                assert_eq!(key.combine(), CombineRule::Max, "{key}");
            }
        }
    }

    #[test]
    fn key_index_keeps_namespaces_apart() {
        let index: KeyIndex = [
            StatKey::from(AbilityKey::Barrier),
            StatKey::from(BonusKey::BarrierDuration),
        ]
        .into_iter()
        .collect();

        assert!(index.contains(AbilityKey::Barrier));
        assert!(!index.contains(SpecializationKey::Barrier));
        assert!(index.contains(BonusKey::BarrierDuration));
        assert_eq!(index.len(), 2);
    }
}
