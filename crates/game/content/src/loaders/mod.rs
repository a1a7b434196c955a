//! Content loaders for reading condition data from files.
//!
//! Catalogs can be written as JSON (the editor's export format), RON or TOML;
//! encounter configuration is TOML.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogDocument, CatalogFormat, CatalogLoader, ConditionRecord};
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
