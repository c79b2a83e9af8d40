//! Content factory for loading talent data from a data directory.

use std::path::{Path, PathBuf};

use talent_core::ProgressionConfig;

use crate::catalogue::TalentCatalogue;
use crate::loaders::{CatalogueLoader, ConfigLoader, LoadResult};

/// Content factory that loads all talent content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── progression.toml
/// └── talents.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CATALOGUE_FILE: &'static str = "talents.ron";
    pub const CONFIG_FILE: &'static str = "progression.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load the talent catalogue from `talents.ron`.
    pub fn load_catalogue(&self) -> LoadResult<TalentCatalogue> {
        CatalogueLoader::load(&self.data_dir.join(Self::CATALOGUE_FILE))
    }

    /// Load progression config from `progression.toml`.
    ///
    /// A missing file yields the default config.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(
                "No {} in {}, using defaults",
                Self::CONFIG_FILE,
                self.data_dir.display()
            );
            return Ok(ProgressionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
