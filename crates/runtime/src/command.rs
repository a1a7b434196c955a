//! Commands a turn driver issues against entities' condition sets.
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// One game event translated into a condition operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionCommand {
    /// Apply (or stack / renew) a condition.
    Apply {
        target: EntityId,
        condition: String,
        #[serde(default)]
        duration: Option<u32>,
        #[serde(default)]
        source: String,
    },

    /// Remove one stack, or every stack when `all_stacks` is set.
    Remove {
        target: EntityId,
        condition: String,
        #[serde(default)]
        all_stacks: bool,
    },

    /// Remove every condition from an entity.
    Clear { target: EntityId },
}

impl ConditionCommand {
    pub fn apply(target: EntityId, condition: impl Into<String>, source: impl Into<String>) -> Self {
        Self::Apply {
            target,
            condition: condition.into(),
            duration: None,
            source: source.into(),
        }
    }

    pub fn apply_for(
        target: EntityId,
        condition: impl Into<String>,
        duration: u32,
        source: impl Into<String>,
    ) -> Self {
        Self::Apply {
            target,
            condition: condition.into(),
            duration: Some(duration),
            source: source.into(),
        }
    }

    pub fn remove(target: EntityId, condition: impl Into<String>, all_stacks: bool) -> Self {
        Self::Remove {
            target,
            condition: condition.into(),
            all_stacks,
        }
    }

    pub fn target(&self) -> EntityId {
        match self {
            Self::Apply { target, .. } | Self::Remove { target, .. } | Self::Clear { target } => {
                *target
            }
        }
    }
}
