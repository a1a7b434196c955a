//! Data-driven condition content and loaders.
//!
//! This crate houses static condition content and provides loaders for data files:
//! - The standard condition set (Blinded, Poisoned, Unconscious, ...)
//! - Condition catalogs (data-driven via JSON, RON or TOML)
//! - Encounter configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime and never appears in per-entity state.
//!
//! All loaders use condition-core types directly with serde for deserialization.

pub mod standard;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use standard::{standard_catalog, standard_conditions};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogDocument, CatalogFormat, CatalogLoader, ConditionRecord, ConfigLoader, LoadResult,
};
