//! Progression configuration loader.

use std::path::Path;

use talent_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for progression configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a TOML file.
    ///
    /// The point tiers are checked by expanding them into a schedule, so a
    /// config returned from here always yields a valid [`talent_core::PointSchedule`].
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.schedule()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_point_tiers() {
        let config = ConfigLoader::parse(
            r#"
            [[point_tiers]]
            levels = 10
            points_per_level = 4

            [[point_tiers]]
            levels = 10
            points_per_level = 2
            "#,
        )
        .unwrap();
        let schedule = config.schedule().unwrap();
        assert_eq!(schedule.max_level(), 20);
        assert_eq!(schedule.max_points(), 60);
    }

    #[test]
    fn rejects_tiers_that_do_not_form_a_schedule() {
        let err = ConfigLoader::parse("point_tiers = []").unwrap_err();
        assert!(err.to_string().contains("no tiers"), "{err}");

        let err = ConfigLoader::parse(
            r#"
            [[point_tiers]]
            levels = 0
            points_per_level = 4
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero levels"), "{err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ConfigLoader::parse("point_tiers = 3").is_err());
    }
}
