//! Snapshot comparison for active sets.
//!
//! Hosts that broadcast or display condition changes take a clone of the set
//! before an operation and compare it with the set afterwards. The delta stores
//! names and bitmasks only; values are read from the snapshots when needed.
mod bitmask;

pub use bitmask::InstanceFields;

use crate::active::{ActiveConditionSet, StatusCondition};

/// Which fields of one surviving instance changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceChanges {
    pub condition_name: String,
    pub fields: InstanceFields,
}

impl InstanceChanges {
    /// Returns `None` if no tracked field changed.
    fn from_instances(before: &StatusCondition, after: &StatusCondition) -> Option<Self> {
        debug_assert_eq!(
            before.condition_name, after.condition_name,
            "Cannot compare instances of different conditions"
        );

        let mut fields = InstanceFields::empty();

        if before.stacks != after.stacks {
            fields |= InstanceFields::STACKS;
        }
        if before.remaining_duration != after.remaining_duration {
            fields |= InstanceFields::DURATION;
        }
        if before.source != after.source {
            fields |= InstanceFields::SOURCE;
        }

        if fields.is_empty() {
            None
        } else {
            Some(Self {
                condition_name: after.condition_name.clone(),
                fields,
            })
        }
    }
}

/// Difference between two snapshots of one entity's set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionSetDelta {
    /// Names present only in `after`, in `after` order.
    pub added: Vec<String>,
    /// Names present only in `before`, in `before` order.
    pub removed: Vec<String>,
    /// Names present in both whose fields differ, in `after` order.
    pub changed: Vec<InstanceChanges>,
}

impl ConditionSetDelta {
    /// Compares two snapshots.
    ///
    /// # Complexity
    ///
    /// O(n × m) name comparisons; sets hold at most one instance per distinct
    /// condition, so both sides stay small.
    pub fn from_sets(before: &ActiveConditionSet, after: &ActiveConditionSet) -> Self {
        let mut delta = Self::default();

        for entry in after.iter() {
            match before.get(&entry.condition_name) {
                Some(prev) => {
                    if let Some(changes) = InstanceChanges::from_instances(prev, entry) {
                        delta.changed.push(changes);
                    }
                }
                None => delta.added.push(entry.condition_name.clone()),
            }
        }

        delta.removed = before
            .names()
            .filter(|name| !after.contains(name))
            .map(str::to_string)
            .collect();

        delta
    }

    /// Returns true if the two snapshots are identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Fields changed for one surviving instance (empty if unchanged or absent).
    pub fn fields_of(&self, condition_name: &str) -> InstanceFields {
        self.changed
            .iter()
            .find(|changes| changes.condition_name == condition_name)
            .map_or(InstanceFields::empty(), |changes| changes.fields)
    }
}
