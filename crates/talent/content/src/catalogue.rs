//! Registry of composed talent definitions.

use std::collections::HashMap;
use std::sync::Arc;

use talent_core::{KeyIndex, TalentDefinition, TalentDefinitionBuilder, TalentId};

use crate::format::{CatalogueFile, TalentSpec};
use crate::validate::{ValidationError, apply_tables, validate_spec};

/// Every loaded talent definition, in declaration order.
///
/// Specializations are stored fully composed: their tables already contain
/// the base talent's steps.
#[derive(Clone, Debug, Default)]
pub struct TalentCatalogue {
    definitions: Vec<Arc<TalentDefinition>>,
    by_id: HashMap<TalentId, usize>,
    key_index: KeyIndex,
}

impl TalentCatalogue {
    /// Validates and composes catalogue entries.
    ///
    /// Entries are processed in order; a specialization must come after its
    /// base and cannot itself be extended.
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a TalentSpec>,
    ) -> Result<Self, ValidationError> {
        let mut catalogue = Self::default();
        for spec in specs {
            catalogue.insert(spec)?;
        }
        Ok(catalogue)
    }

    pub fn from_file(file: &CatalogueFile) -> Result<Self, ValidationError> {
        Self::from_specs(&file.talents)
    }

    fn insert(&mut self, spec: &TalentSpec) -> Result<(), ValidationError> {
        validate_spec(spec)?;
        if self.by_id.contains_key(&spec.id) {
            return Err(ValidationError::DuplicateId {
                id: spec.id.clone(),
            });
        }

        let builder = match &spec.extends {
            None => TalentDefinitionBuilder::new(spec.id.clone(), spec.name.clone()),
            Some(base_id) => {
                let base = self
                    .get(base_id)
                    .ok_or_else(|| ValidationError::UnknownBase {
                        talent: spec.id.clone(),
                        base: base_id.clone(),
                    })?;
                if base.base().is_some() {
                    return Err(ValidationError::ChainedSpecialization {
                        talent: spec.id.clone(),
                        base: base_id.clone(),
                    });
                }
                TalentDefinitionBuilder::extending(base, spec.id.clone(), spec.name.clone())
            }
        };

        let definition = apply_tables(builder, spec)?.build().into_shared();
        self.key_index.extend(definition.keys());
        self.by_id.insert(spec.id.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    pub fn get(&self, id: &TalentId) -> Option<&Arc<TalentDefinition>> {
        self.by_id.get(id).map(|index| &self.definitions[*index])
    }

    pub fn contains(&self, id: &TalentId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TalentDefinition>> + '_ {
        self.definitions.iter()
    }

    /// Specializations declared for `base`, in declaration order.
    pub fn specializations_of<'a>(
        &'a self,
        base: &'a TalentId,
    ) -> impl Iterator<Item = &'a Arc<TalentDefinition>> + 'a {
        self.definitions
            .iter()
            .filter(move |definition| definition.base() == Some(base))
    }

    /// Every key mentioned by at least one definition.
    pub fn key_index(&self) -> &KeyIndex {
        &self.key_index
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a TalentCatalogue {
    type Item = &'a Arc<TalentDefinition>;
    type IntoIter = std::slice::Iter<'a, Arc<TalentDefinition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use talent_core::{AbilityKey, BonusKey, SpecializationKey};

    use super::*;
    use crate::format::RawTable;

    fn soldier() -> TalentSpec {
        TalentSpec {
            id: "soldier".into(),
            name: "Soldier".to_owned(),
            extends: None,
            bonuses: BTreeMap::from([(
                BonusKey::Health,
                RawTable::from([(1, 0.04), (6, 0.14)]),
            )]),
            abilities: BTreeMap::new(),
            specializations: BTreeMap::new(),
        }
    }

    fn shock_trooper() -> TalentSpec {
        TalentSpec {
            id: "soldier_shock_trooper".into(),
            name: "Shock Trooper".to_owned(),
            extends: Some("soldier".into()),
            bonuses: BTreeMap::from([(
                BonusKey::Health,
                RawTable::from([(7, 0.18), (12, 0.28)]),
            )]),
            abilities: BTreeMap::new(),
            specializations: BTreeMap::from([(
                SpecializationKey::Immunity,
                RawTable::from([(9, true)]),
            )]),
        }
    }

    #[test]
    fn specializations_are_composed_over_their_base() {
        let catalogue = TalentCatalogue::from_specs(&[soldier(), shock_trooper()]).unwrap();
        assert_eq!(catalogue.len(), 2);

        let shock = catalogue.get(&"soldier_shock_trooper".into()).unwrap();
        let health = shock.bonus_table(BonusKey::Health).unwrap();
        assert_eq!(health.resolve(6), 0.14);
        assert_eq!(health.resolve(12), 0.28);
        assert_eq!(shock.base(), Some(&TalentId::from("soldier")));

        let soldier_id = TalentId::from("soldier");
        let specs: Vec<_> = catalogue.specializations_of(&soldier_id).collect();
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn key_index_covers_every_definition() {
        let catalogue = TalentCatalogue::from_specs(&[soldier(), shock_trooper()]).unwrap();
        let index = catalogue.key_index();
        assert!(index.contains(BonusKey::Health));
        assert!(index.contains(SpecializationKey::Immunity));
        assert!(!index.contains(AbilityKey::Immunity));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn bases_must_be_declared_first() {
        let err = TalentCatalogue::from_specs(&[shock_trooper(), soldier()]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownBase {
                talent: "soldier_shock_trooper".into(),
                base: "soldier".into(),
            }
        );
    }

    #[test]
    fn specializations_cannot_be_extended() {
        let mut chained = shock_trooper();
        chained.id = "soldier_veteran".into();
        chained.name = "Veteran".to_owned();
        chained.extends = Some("soldier_shock_trooper".into());

        let err =
            TalentCatalogue::from_specs(&[soldier(), shock_trooper(), chained]).unwrap_err();
        assert!(matches!(err, ValidationError::ChainedSpecialization { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = TalentCatalogue::from_specs(&[soldier(), soldier()]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateId {
                id: "soldier".into()
            }
        );
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let catalogue = TalentCatalogue::from_specs(&[soldier(), shock_trooper()]).unwrap();
        let ids: Vec<_> = catalogue.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(ids, ["soldier", "soldier_shock_trooper"]);
    }
}
