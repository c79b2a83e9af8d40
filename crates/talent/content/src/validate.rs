//! Ingestion-side validation of catalogue entries.
//!
//! The engine trusts its definitions; everything that could make a
//! definition nonsensical is rejected here, before a
//! [`TalentDefinition`](talent_core::TalentDefinition) exists.

use talent_core::{
    ErrorSeverity, Rank, RankTable, RankTableError, RankValue, StatKey, TalentDefinitionBuilder,
    TalentError, TalentId,
};

use crate::format::{RawTable, TalentSpec};

pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 16;

/// Display name rule that was broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NameRule {
    #[error("must be 1 to 16 characters long")]
    Length,

    #[error("must contain at least one letter")]
    NoLetter,

    #[error("may only contain ASCII letters and spaces")]
    InvalidCharacter,
}

/// A catalogue entry that cannot become a talent definition.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("talent '{talent}': name {name:?} {rule}")]
    InvalidName {
        talent: TalentId,
        name: String,
        rule: NameRule,
    },

    #[error("talent id {id:?} must be a lowercase slug (a-z, 0-9, '_', starting with a letter)")]
    InvalidId { id: String },

    #[error("talent '{id}' is declared more than once")]
    DuplicateId { id: TalentId },

    #[error("talent '{talent}' declares no tables")]
    NoTables { talent: TalentId },

    #[error("talent '{talent}': table {key} is empty")]
    EmptyTable { talent: TalentId, key: StatKey },

    #[error("talent '{talent}': table {key} has invalid value {value} at rank {threshold}")]
    InvalidValue {
        talent: TalentId,
        key: StatKey,
        threshold: Rank,
        value: f64,
    },

    #[error("talent '{talent}': table {key} has no positive value")]
    NoPositiveValue { talent: TalentId, key: StatKey },

    #[error("talent '{talent}': table {key}: {source}")]
    Table {
        talent: TalentId,
        key: StatKey,
        source: RankTableError,
    },

    #[error("talent '{talent}' extends unknown talent '{base}' (bases must be declared first)")]
    UnknownBase { talent: TalentId, base: TalentId },

    #[error("talent '{talent}' extends '{base}', which is itself a specialization")]
    ChainedSpecialization { talent: TalentId, base: TalentId },
}

impl TalentError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "INVALID_NAME",
            Self::InvalidId { .. } => "INVALID_ID",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::NoTables { .. } => "NO_TABLES",
            Self::EmptyTable { .. } => "EMPTY_TABLE",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::NoPositiveValue { .. } => "NO_POSITIVE_VALUE",
            Self::Table { .. } => "INVALID_TABLE",
            Self::UnknownBase { .. } => "UNKNOWN_BASE",
            Self::ChainedSpecialization { .. } => "CHAINED_SPECIALIZATION",
        }
    }
}

/// Checks a display name: 1 to 16 ASCII letters or spaces, at least one letter.
pub fn validate_name(name: &str) -> Result<(), NameRule> {
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name.chars().count()) {
        return Err(NameRule::Length);
    }
    if !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(NameRule::NoLetter);
    }
    if name.chars().any(|c| !c.is_ascii_alphabetic() && c != ' ') {
        return Err(NameRule::InvalidCharacter);
    }
    Ok(())
}

/// Whether `id` is a lowercase slug such as `soldier_commando`.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Checks the parts of an entry that do not depend on other entries.
pub fn validate_spec(spec: &TalentSpec) -> Result<(), ValidationError> {
    if !is_valid_id(spec.id.as_str()) {
        return Err(ValidationError::InvalidId {
            id: spec.id.as_str().to_owned(),
        });
    }
    validate_name(&spec.name).map_err(|rule| ValidationError::InvalidName {
        talent: spec.id.clone(),
        name: spec.name.clone(),
        rule,
    })?;
    if spec.table_count() == 0 {
        return Err(ValidationError::NoTables {
            talent: spec.id.clone(),
        });
    }
    Ok(())
}

/// Validates every table of `spec` and adds it to `builder`.
pub(crate) fn apply_tables(
    mut builder: TalentDefinitionBuilder,
    spec: &TalentSpec,
) -> Result<TalentDefinitionBuilder, ValidationError> {
    for (key, raw) in &spec.bonuses {
        let stat = StatKey::from(*key);
        for (threshold, value) in raw {
            if !value.is_finite() || *value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    talent: spec.id.clone(),
                    key: stat,
                    threshold: *threshold,
                    value: *value,
                });
            }
        }
        let table = checked_table(&spec.id, stat, raw, |value| *value > 0.0)?;
        builder = builder.bonus(*key, table);
    }

    for (key, raw) in &spec.abilities {
        let table = checked_table(&spec.id, StatKey::from(*key), raw, |tier| *tier > 0)?;
        builder = builder.ability(*key, table);
    }

    for (key, raw) in &spec.specializations {
        let table = checked_table(&spec.id, StatKey::from(*key), raw, |_| true)?;
        builder = builder.specialization(*key, table);
    }

    Ok(builder)
}

fn checked_table<V: RankValue>(
    talent: &TalentId,
    key: StatKey,
    raw: &RawTable<V>,
    positive: impl Fn(&V) -> bool,
) -> Result<RankTable<V>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyTable {
            talent: talent.clone(),
            key,
        });
    }
    if !raw.values().any(positive) {
        return Err(ValidationError::NoPositiveValue {
            talent: talent.clone(),
            key,
        });
    }
    RankTable::new(raw.iter().copied()).map_err(|source| ValidationError::Table {
        talent: talent.clone(),
        key,
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use talent_core::{AbilityKey, BonusKey, SpecializationKey};

    use super::*;

    fn spec(id: &str, name: &str) -> TalentSpec {
        TalentSpec {
            id: id.into(),
            name: name.to_owned(),
            extends: None,
            bonuses: BTreeMap::from([(BonusKey::Health, RawTable::from([(1, 0.1)]))]),
            abilities: BTreeMap::new(),
            specializations: BTreeMap::new(),
        }
    }

    #[test]
    fn names_follow_the_display_rules() {
        assert_eq!(validate_name("Shock Trooper"), Ok(()));
        assert_eq!(validate_name("A"), Ok(()));
        assert_eq!(validate_name(""), Err(NameRule::Length));
        assert_eq!(validate_name("Seventeen Letters"), Err(NameRule::Length));
        assert_eq!(validate_name("   "), Err(NameRule::NoLetter));
        assert_eq!(validate_name("Sniper-Rifles"), Err(NameRule::InvalidCharacter));
        assert_eq!(validate_name("Rank 2"), Err(NameRule::InvalidCharacter));
    }

    #[test]
    fn ids_are_lowercase_slugs() {
        assert!(is_valid_id("soldier_commando"));
        assert!(is_valid_id("tier2"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("Soldier"));
        assert!(!is_valid_id("2nd"));
        assert!(!is_valid_id("assault rifles"));
    }

    #[test]
    fn spec_without_tables_is_rejected() {
        let mut charm = spec("charm", "Charm");
        charm.bonuses.clear();
        assert_eq!(
            validate_spec(&charm),
            Err(ValidationError::NoTables {
                talent: "charm".into()
            })
        );
        assert!(validate_spec(&spec("fitness", "Fitness")).is_ok());
    }

    #[test]
    fn bonus_tables_need_finite_non_negative_values() {
        let mut negative = spec("fitness", "Fitness");
        negative
            .bonuses
            .insert(BonusKey::Health, RawTable::from([(1, 0.1), (2, -0.5)]));
        let err = apply_tables(TalentDefinitionBuilder::new("fitness", "Fitness"), &negative)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { threshold: 2, .. }
        ));

        let mut nan = spec("fitness", "Fitness");
        nan.bonuses
            .insert(BonusKey::Health, RawTable::from([(1, f64::NAN)]));
        assert!(apply_tables(TalentDefinitionBuilder::new("fitness", "Fitness"), &nan).is_err());

        let mut zeros = spec("fitness", "Fitness");
        zeros
            .bonuses
            .insert(BonusKey::Health, RawTable::from([(1, 0.0), (2, 0.0)]));
        let err =
            apply_tables(TalentDefinitionBuilder::new("fitness", "Fitness"), &zeros).unwrap_err();
        assert_eq!(err.error_code(), "NO_POSITIVE_VALUE");
    }

    #[test]
    fn thresholds_outside_the_rank_range_are_rejected() {
        let mut pistols = spec("pistols", "Pistols");
        pistols
            .abilities
            .insert(AbilityKey::Marksman, RawTable::from([(3, 1), (13, 3)]));
        let err = apply_tables(TalentDefinitionBuilder::new("pistols", "Pistols"), &pistols)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Table {
                talent: "pistols".into(),
                key: StatKey::Ability(AbilityKey::Marksman),
                source: RankTableError::ThresholdOutOfRange {
                    threshold: 13,
                    max: 12
                },
            }
        );
    }

    #[test]
    fn empty_specialization_tables_are_rejected() {
        let mut commando = spec("soldier_commando", "Commando");
        commando
            .specializations
            .insert(SpecializationKey::Assassination, RawTable::default());
        let err = apply_tables(
            TalentDefinitionBuilder::new("soldier_commando", "Commando"),
            &commando,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyTable { .. }));
    }
}
