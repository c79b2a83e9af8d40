//! Utility functions for talent commands

use std::path::{Path, PathBuf};

use anyhow::Result;
use talent_content::{CatalogueLoader, ConfigLoader, ContentFactory, TalentCatalogue};
use talent_core::{BonusKey, ProgressionConfig, ValueKind};

/// Environment variable naming a data directory with `talents.ron` and
/// `progression.toml`.
pub const DATA_DIR_ENV: &str = "TALENT_DATA_DIR";

/// Data directory from the environment, if set.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var_os(DATA_DIR_ENV).map(PathBuf::from)
}

/// Load a catalogue from `path`, the data directory, or the embedded default.
pub fn load_catalogue(path: Option<&Path>) -> Result<TalentCatalogue> {
    match (path, data_dir()) {
        (Some(path), _) => CatalogueLoader::load(path),
        (None, Some(dir)) => ContentFactory::new(dir).load_catalogue(),
        (None, None) => CatalogueLoader::embedded(),
    }
}

/// Load progression config from `path`, the data directory, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ProgressionConfig> {
    match (path, data_dir()) {
        (Some(path), _) => ConfigLoader::load(path),
        (None, Some(dir)) => ContentFactory::new(dir).load_config(),
        (None, None) => Ok(ProgressionConfig::default()),
    }
}

/// Where [`load_catalogue`] reads from, for headers.
pub fn catalogue_origin(path: Option<&Path>) -> String {
    match (path, data_dir()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(dir)) => dir.join(ContentFactory::CATALOGUE_FILE).display().to_string(),
        (None, None) => "<embedded>".to_string(),
    }
}

/// Formats a bonus value in its own unit: `+12%` or `23`.
pub fn format_bonus(key: BonusKey, value: f64) -> String {
    match key.kind() {
        ValueKind::Percent => format!("+{}%", trim_float(value * 100.0)),
        ValueKind::Absolute => trim_float(value),
    }
}

fn trim_float(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}
