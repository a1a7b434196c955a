//! Host-side driver for the condition engine.
//!
//! This crate keeps one [`ActiveConditionSet`](condition_core::ActiveConditionSet)
//! per entity behind a shared catalog and runs rounds over them: queued
//! commands first, then one tick and one aggregation per entity.
//!
//! Modules are organized by responsibility:
//! - [`encounter`] hosts the turn driver
//! - [`command`] and [`report`] are the inputs and outputs of a round
//! - [`scenario`] replays scripted encounters from RON files
pub mod command;
pub mod encounter;
pub mod entity;
pub mod error;
pub mod report;
pub mod scenario;

pub use command::ConditionCommand;
pub use encounter::Encounter;
pub use entity::EntityId;
pub use error::{Result, RuntimeError};
pub use report::{EntityRound, RejectedCommand, RoundReport};
pub use scenario::{EntitySpec, Scenario};
