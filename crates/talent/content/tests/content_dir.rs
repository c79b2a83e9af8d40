use std::fs;

use talent_content::{CatalogueLoader, ContentFactory, TalentCatalogue};
use talent_core::{AbilityKey, BonusKey, Build, SpecializationKey, TalentId};
use tempfile::TempDir;

const CATALOGUE: &str = r#"
(
    talents: [
        (
            id: "adept",
            name: "Adept",
            bonuses: {
                biotic_haste: { 1: 0.04, 6: 0.14 },
            },
        ),
        (
            id: "adept_bastion",
            name: "Bastion",
            extends: Some("adept"),
            bonuses: {
                biotic_haste: { 8: 0.20 },
                barrier_duration: { 7: 2.0 },
            },
            specializations: {
                barrier: { 9: true },
            },
        ),
        (
            id: "barrier",
            name: "Barrier",
            bonuses: {
                barrier_duration: { 1: 10.0, 7: 16.5, 12: 23.0 },
            },
            abilities: {
                barrier: { 1: 1, 7: 2, 12: 3 },
            },
        ),
    ],
)
"#;

const CONFIG: &str = r#"
[[point_tiers]]
levels = 10
points_per_level = 4
"#;

fn setup() -> (TempDir, ContentFactory) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("talents.ron"), CATALOGUE).unwrap();
    fs::write(temp_dir.path().join("progression.toml"), CONFIG).unwrap();
    let factory = ContentFactory::new(temp_dir.path());
    (temp_dir, factory)
}

fn build(catalogue: &TalentCatalogue, factory: &ContentFactory) -> Build {
    let config = factory.load_config().unwrap();
    let mut build = Build::from_config(&config).unwrap();
    for definition in catalogue {
        build.add_talent(definition.clone()).unwrap();
    }
    build
}

#[test]
fn loads_a_data_directory_into_a_working_build() {
    let (_temp, factory) = setup();
    let catalogue = factory.load_catalogue().unwrap();
    assert_eq!(catalogue.len(), 3);

    let mut build = build(&catalogue, &factory);
    assert_eq!(build.total_points(), 4);
    build.set_talent_rank(&TalentId::from("adept_bastion"), 9).unwrap();
    build.set_talent_rank(&TalentId::from("barrier"), 7).unwrap();
    assert_eq!(build.level(), 8);

    let aggregator = build.aggregator_with_index(catalogue.key_index());
    // Base value: strongest source, not the sum of 2.0 and 16.5.
    assert_eq!(
        aggregator.combined_bonus(BonusKey::BarrierDuration).unwrap(),
        16.5
    );
    assert_eq!(aggregator.sum_bonus(&[BonusKey::BioticHaste]).unwrap(), 0.20);
    assert_eq!(aggregator.max_ability_level(AbilityKey::Barrier).unwrap(), 2);
    assert!(aggregator.any_specialization(SpecializationKey::Barrier).unwrap());
    // Not mentioned anywhere in this catalogue.
    assert!(aggregator.sum_bonus(&[BonusKey::PistolDamage]).is_err());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let (temp, _) = setup();
    fs::remove_file(temp.path().join("progression.toml")).unwrap();
    let factory = ContentFactory::new(temp.path());
    assert_eq!(factory.load_config().unwrap().schedule().unwrap().max_level(), 60);
}

#[test]
fn missing_catalogue_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = ContentFactory::new(temp.path()).load_catalogue().unwrap_err();
    assert!(err.to_string().contains("Failed to read file"), "{err}");
}

#[test]
fn invalid_catalogue_names_the_file_and_the_talent() {
    let (temp, factory) = setup();
    let broken = CATALOGUE.replace(r#"name: "Bastion""#, r#"name: "Bastion 2""#);
    fs::write(temp.path().join("talents.ron"), broken).unwrap();

    let err = factory.load_catalogue().unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("talents.ron"), "{message}");
    assert!(message.contains("adept_bastion"), "{message}");
}

#[test]
fn file_and_embedded_catalogues_share_the_format() {
    let file = CatalogueLoader::parse_file(talent_content::loaders::catalogue::EMBEDDED_CATALOGUE)
        .unwrap();
    let catalogue = TalentCatalogue::from_file(&file).unwrap();
    assert_eq!(catalogue.len(), file.talents.len());
    assert!(file.talents.iter().any(|spec| spec.extends.is_some()));
}
