//! Condition catalog loader.
//!
//! Document shape (shown as JSON, the editor's export format):
//!
//! ```json
//! {
//!   "conditions": {
//!     "Poisoned": {
//!       "name": "Poisoned",
//!       "severity": "moderate",
//!       "description": "Poison courses through the body",
//!       "effects": { "damage_over_time": 5, "grants_disadvantage": ["attack"] },
//!       "duration_type": "rounds",
//!       "default_duration": 3,
//!       "can_stack": true,
//!       "max_stacks": 5,
//!       "removable_by": ["antidote", "rest"],
//!       "incompatible_with": [],
//!       "icon": ""
//!     }
//!   }
//! }
//! ```
//!
//! RON and TOML documents use the same field names. Every field except
//! `severity` is optional.

use std::collections::BTreeMap;
use std::path::Path;

use condition_core::{Condition, ConditionCatalog, DurationType, Severity, StackPolicy, StatusEffect};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk representation of one condition.
///
/// Stacking is stored flat (`can_stack` / `max_stacks`) and converted to a
/// [`StackPolicy`] when the record becomes a [`Condition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: StatusEffect,
    #[serde(default)]
    pub duration_type: DurationType,
    #[serde(default = "default_one")]
    pub default_duration: u32,
    #[serde(default)]
    pub can_stack: bool,
    #[serde(default = "default_one")]
    pub max_stacks: u32,
    #[serde(default)]
    pub removable_by: Vec<String>,
    #[serde(default)]
    pub incompatible_with: Vec<String>,
    #[serde(default)]
    pub icon: String,
}

fn default_one() -> u32 {
    1
}

impl ConditionRecord {
    /// Converts the record stored under `key` into a definition.
    pub fn into_condition(self, key: &str) -> LoadResult<Condition> {
        if let Some(name) = self.name.as_deref().filter(|name| *name != key) {
            anyhow::bail!("Condition record '{}' is stored under key '{}'", name, key);
        }

        let stacking = StackPolicy::from_parts(key, self.can_stack, self.max_stacks)?;

        Ok(Condition {
            name: key.to_string(),
            severity: self.severity,
            description: self.description,
            effects: self.effects,
            duration_type: self.duration_type,
            default_duration: self.default_duration,
            stacking,
            removable_by: self.removable_by,
            incompatible_with: self.incompatible_with,
            icon: self.icon,
        })
    }
}

impl From<&Condition> for ConditionRecord {
    fn from(condition: &Condition) -> Self {
        Self {
            name: Some(condition.name.clone()),
            severity: condition.severity,
            description: condition.description.clone(),
            effects: condition.effects.clone(),
            duration_type: condition.duration_type,
            default_duration: condition.default_duration,
            can_stack: condition.can_stack(),
            max_stacks: condition.max_stacks(),
            removable_by: condition.removable_by.clone(),
            incompatible_with: condition.incompatible_with.clone(),
            icon: condition.icon.clone(),
        }
    }
}

/// Catalog structure for JSON/RON/TOML files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub conditions: BTreeMap<String, ConditionRecord>,
}

impl CatalogDocument {
    /// Converts every record, without validating cross references.
    pub fn into_conditions(self) -> LoadResult<Vec<Condition>> {
        self.conditions
            .into_iter()
            .map(|(key, record)| record.into_condition(&key))
            .collect()
    }
}

impl From<&ConditionCatalog> for CatalogDocument {
    fn from(catalog: &ConditionCatalog) -> Self {
        Self {
            conditions: catalog
                .iter()
                .map(|condition| (condition.name.clone(), ConditionRecord::from(condition)))
                .collect(),
        }
    }
}

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Ron,
    Toml,
}

impl CatalogFormat {
    /// Picks the format from a file extension (`json`, `ron`, `toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Loader for condition catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `.json`, `.ron` or `.toml` catalog document
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, unknown extensions, parse errors, and any
    /// malformed entry (unknown incompatibility, `max_stacks < 1`, ...).
    pub fn load(path: &Path) -> LoadResult<ConditionCatalog> {
        Self::merge(ConditionCatalog::new(), path)
    }

    /// Load a catalog file on top of `base`.
    ///
    /// Entries in the file overwrite entries of `base` with the same name.
    /// Incompatibility references may point at entries of `base`.
    pub fn merge(mut base: ConditionCatalog, path: &Path) -> LoadResult<ConditionCatalog> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported catalog file {} (expected .json, .ron or .toml)",
                path.display()
            )
        })?;
        let content = read_file(path)?;
        let document = Self::parse_document(&content, format)?;

        for condition in document.into_conditions()? {
            base.register(condition);
        }
        base.validate()
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))?;

        Ok(base)
    }

    /// Parse and validate a catalog from a string.
    pub fn parse(content: &str, format: CatalogFormat) -> LoadResult<ConditionCatalog> {
        let conditions = Self::parse_document(content, format)?.into_conditions()?;
        Ok(ConditionCatalog::from_conditions(conditions)?)
    }

    /// Parse a document without converting or validating it.
    pub fn parse_document(content: &str, format: CatalogFormat) -> LoadResult<CatalogDocument> {
        match format {
            CatalogFormat::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse catalog JSON: {}", e)),
            CatalogFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e)),
            CatalogFormat::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse catalog TOML: {}", e)),
        }
    }

    /// Serialize a catalog to the pretty-printed JSON export format.
    pub fn to_json(catalog: &ConditionCatalog) -> LoadResult<String> {
        serde_json::to_string_pretty(&CatalogDocument::from(catalog))
            .map_err(|e| anyhow::anyhow!("Failed to serialize catalog JSON: {}", e))
    }

    /// Write a catalog to `path` as JSON.
    pub fn save_json(catalog: &ConditionCatalog, path: &Path) -> LoadResult<()> {
        let json = Self::to_json(catalog)?;
        std::fs::write(path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
