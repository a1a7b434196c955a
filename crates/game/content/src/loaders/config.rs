//! Encounter configuration loader.

use std::path::Path;

use condition_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EncounterConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
