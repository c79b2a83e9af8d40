//! Data-driven talent content and loaders.
//!
//! This crate turns talent data files into engine definitions:
//! - Catalogue format (RON): talents, their rank tables and specializations
//! - Validation of names, ids and tables before anything reaches the engine
//! - Composition of specializations over their base talent
//! - Progression config (TOML): the level → point schedule
//!
//! A default catalogue is embedded in the crate and available through
//! [`CatalogueLoader::embedded`].

pub mod catalogue;
pub mod format;
pub mod validate;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalogue::TalentCatalogue;
pub use format::{CatalogueFile, RawTable, TalentSpec};
pub use validate::{NameRule, ValidationError, is_valid_id, validate_name, validate_spec};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogueLoader, ConfigLoader, ContentFactory, LoadResult};
