//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the condition engine, catalog validation and scenario
//! files so clients can bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;

use crate::entity::EntityId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("entity {0} is not part of the encounter")]
    UnknownEntity(EntityId),

    #[error("entity {0} is already part of the encounter")]
    DuplicateEntity(EntityId),

    #[error(transparent)]
    Condition(#[from] condition_core::ConditionError),

    #[error(transparent)]
    Catalog(#[from] condition_core::CatalogError),

    #[error("failed to read scenario {path}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario RON")]
    ScenarioParse(#[source] ron::error::SpannedError),
}
