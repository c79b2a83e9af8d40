//! Talent catalogue loader.

use std::path::Path;

use anyhow::Context;

use crate::catalogue::TalentCatalogue;
use crate::format::CatalogueFile;
use crate::loaders::{LoadResult, read_file};

/// Default catalogue compiled into the crate.
pub const EMBEDDED_CATALOGUE: &str = include_str!("../../data/talents.ron");

/// Loader for talent catalogues from RON files.
pub struct CatalogueLoader;

impl CatalogueLoader {
    /// Load, validate and compose a catalogue from a RON file.
    pub fn load(path: &Path) -> LoadResult<TalentCatalogue> {
        let content = read_file(path)?;
        let catalogue = Self::parse(&content)
            .with_context(|| format!("Invalid talent catalogue {}", path.display()))?;
        tracing::info!(
            "Loaded {} talents ({} keys) from {}",
            catalogue.len(),
            catalogue.key_index().len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Load the catalogue embedded in the crate.
    pub fn embedded() -> LoadResult<TalentCatalogue> {
        let catalogue =
            Self::parse(EMBEDDED_CATALOGUE).context("Invalid embedded talent catalogue")?;
        tracing::debug!("Loaded {} embedded talents", catalogue.len());
        Ok(catalogue)
    }

    /// Parse a catalogue file without validating it.
    pub fn parse_file(content: &str) -> LoadResult<CatalogueFile> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse talent catalogue RON: {}", e))
    }

    /// Parse, validate and compose a catalogue from RON text.
    pub fn parse(content: &str) -> LoadResult<TalentCatalogue> {
        let file = Self::parse_file(content)?;
        Ok(TalentCatalogue::from_file(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use talent_core::{
        AbilityKey, BonusKey, CombineRule, RankTableError, SpecializationKey, StatKey, TalentId,
    };

    use super::*;
    use crate::validate::ValidationError;

    #[test]
    fn embedded_catalogue_is_valid() {
        let catalogue = CatalogueLoader::embedded().unwrap();
        assert!(catalogue.len() >= 20);

        let pistols = catalogue.get(&TalentId::from("pistols")).unwrap();
        assert_eq!(pistols.name(), "Pistols");
        let damage = pistols.bonus_table(BonusKey::PistolDamage).unwrap();
        assert_eq!(damage.resolve(3), 0.08);
        assert_eq!(damage.resolve(12), 0.20);
        assert_eq!(
            pistols
                .ability_table(AbilityKey::Marksman)
                .unwrap()
                .resolve(8),
            2
        );
    }

    #[test]
    fn embedded_specializations_include_their_base() {
        let catalogue = CatalogueLoader::embedded().unwrap();
        let commando = catalogue.get(&TalentId::from("soldier_commando")).unwrap();

        assert_eq!(commando.name(), "Commando");
        assert_eq!(commando.base(), Some(&TalentId::from("soldier")));
        assert_eq!(commando.bonus_table(BonusKey::Health).unwrap().resolve(6), 0.14);
        assert_eq!(
            commando
                .bonus_table(BonusKey::WeaponDamage)
                .unwrap()
                .resolve(12),
            0.21
        );
        assert!(
            commando
                .specialization_table(SpecializationKey::Assassination)
                .unwrap()
                .resolve(12)
        );
    }

    #[test]
    fn embedded_base_values_are_max_combined() {
        let catalogue = CatalogueLoader::embedded().unwrap();
        for key in catalogue.key_index().bonuses() {
            if key.to_string().ends_with("_duration") {
                assert_eq!(key.combine(), CombineRule::Max, "{key}");
            }
        }
    }

    #[test]
    fn parse_reports_validation_errors() {
        let err = CatalogueLoader::parse(r#"(talents: [(id: "charm", name: "Charm")])"#)
            .unwrap_err();
        assert!(err.to_string().contains("declares no tables"), "{err}");
    }

    #[test]
    fn repeated_thresholds_are_rejected() {
        let file = CatalogueLoader::parse_file(
            r#"(talents: [(id: "fitness", name: "Fitness", bonuses: { health: { 1: 0.04, 1: 0.06 } })])"#,
        )
        .unwrap();
        assert_eq!(file.talents[0].bonuses[&BonusKey::Health].len(), 2);

        let err = TalentCatalogue::from_file(&file).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Table {
                talent: "fitness".into(),
                key: StatKey::Bonus(BonusKey::Health),
                source: RankTableError::DuplicateThreshold { threshold: 1 },
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let result = CatalogueLoader::parse_file(
            r#"(talents: [(id: "fitness", name: "Fitness", modifiers: {})])"#,
        );
        assert!(result.is_err());
    }
}
