//! Condition catalog and the read-only oracle seam.
//!
//! The catalog is populated once from configuration and shared read-only by
//! every entity (typically behind an `Arc`). Lifecycle operations only see it
//! through [`ConditionOracle`], so hosts can supply their own lookup.
mod definition;

use std::collections::BTreeMap;

pub use definition::{Condition, DurationType, Severity, StackPolicy};

use crate::error::CatalogError;

/// Read-only lookup of condition definitions.
pub trait ConditionOracle: Send + Sync {
    fn condition(&self, name: &str) -> Option<&Condition>;
}

/// Name-keyed registry of condition definitions.
///
/// Iteration is in name order. Entries are never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionCatalog {
    conditions: BTreeMap<String, Condition>,
}

impl ConditionCatalog {
    pub fn new() -> Self {
        Self {
            conditions: BTreeMap::new(),
        }
    }

    /// Builds and validates a catalog in one step.
    ///
    /// Later entries overwrite earlier ones with the same name, so
    /// incompatibility references are checked against the final set.
    pub fn from_conditions(
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for condition in conditions {
            catalog.register(condition);
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Inserts a condition, overwriting any entry with the same name.
    ///
    /// Cross-entry references are not checked here; call [`Self::validate`]
    /// once every entry is registered.
    pub fn register(&mut self, condition: Condition) {
        self.conditions.insert(condition.name.clone(), condition);
    }

    pub fn lookup(&self, name: &str) -> Option<&Condition> {
        self.conditions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Checks every entry, returning the first problem in name order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for condition in self.conditions.values() {
            condition.validate_shape()?;
            if let Some(unknown) = condition
                .incompatible_with
                .iter()
                .find(|name| !self.conditions.contains_key(name.as_str()))
            {
                return Err(CatalogError::UnknownIncompatibility {
                    condition: condition.name.clone(),
                    references: unknown.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.values()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl ConditionOracle for ConditionCatalog {
    fn condition(&self, name: &str) -> Option<&Condition> {
        self.lookup(name)
    }
}
