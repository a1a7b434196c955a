//! Deterministic status-condition engine.
//!
//! `condition-core` defines the canonical rules for status conditions: which
//! conditions are active on an entity, how they stack, expire and displace
//! each other, and how they combine into one net [`StatusEffect`]. All APIs
//! are pure or single-mutation and perform no I/O.
//!
//! A host holds one [`ActiveConditionSet`] per entity and a shared, read-only
//! [`ConditionCatalog`]. Each round it calls
//! [`apply_condition`](ActiveConditionSet::apply_condition) /
//! [`remove_condition`](ActiveConditionSet::remove_condition), then
//! [`tick`](ActiveConditionSet::tick) once, then
//! [`aggregate`](ActiveConditionSet::aggregate).
pub mod active;
pub mod catalog;
pub mod config;
pub mod delta;
pub mod effect;
pub mod error;

pub use active::{
    ActiveConditionSet, ApplyOutcome, ApplyReport, EffectEvent, EffectKind, StatusCondition,
    TickReport,
};
pub use catalog::{Condition, ConditionCatalog, ConditionOracle, DurationType, Severity, StackPolicy};
pub use config::EncounterConfig;
pub use delta::{ConditionSetDelta, InstanceChanges, InstanceFields};
pub use effect::{RollMode, StatusEffect};
pub use error::{CatalogError, ConditionError, EngineError, ErrorSeverity};
