//! Per-entity active condition state.
//!
//! An [`ActiveConditionSet`] is owned by exactly one entity. It holds at most
//! one [`StatusCondition`] per condition name, in insertion order; repetition
//! is represented by `stacks`.
//!
//! # Lifecycle
//!
//! ```text
//! apply_condition ──► Applied ──► (apply) Stacked / Renewed ──► tick ... ──► expired
//!                                           │
//!                     remove_condition ◄────┘
//! ```
//!
//! Every mutating operation preserves:
//! 1. uniqueness by name
//! 2. `1 <= stacks <= max_stacks`
//! 3. no active instance listed as incompatible by a later application
//! 4. time-based instances have `remaining_duration > 0`
pub mod aggregate;
pub mod tick;

pub use tick::{EffectEvent, EffectKind, TickReport};

use crate::catalog::ConditionOracle;
use crate::effect::StatusEffect;
use crate::error::ConditionError;

/// One live instance of a condition on an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCondition {
    pub condition_name: String,
    /// Ticks left; not meaningful for permanent / until-condition instances.
    pub remaining_duration: u32,
    pub stacks: u32,
    /// Who or what applied the condition (display only).
    pub source: String,
}

impl StatusCondition {
    pub fn new(condition_name: impl Into<String>, remaining_duration: u32, source: impl Into<String>) -> Self {
        Self {
            condition_name: condition_name.into(),
            remaining_duration,
            stacks: 1,
            source: source.into(),
        }
    }
}

/// Result of a successful `apply_condition`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// A new instance was appended with one stack.
    Applied,
    /// An existing instance gained a stack.
    Stacked { stacks: u32 },
    /// An existing instance was at its cap (or unique); duration was reset.
    Renewed,
}

/// Outcome plus the incompatible instances removed on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyReport {
    pub outcome: ApplyOutcome,
    /// Names removed because the applied condition lists them as incompatible,
    /// in set order.
    pub displaced: Vec<String>,
}

/// Ordered, name-unique collection of active conditions for one entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveConditionSet {
    instances: Vec<StatusCondition>,
}

impl ActiveConditionSet {
    /// Creates an empty set (the steady state of an unaffected entity).
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Applies a condition by name.
    ///
    /// # Algorithm
    ///
    /// 1. Resolve the definition; unknown names fail and leave the set unchanged
    /// 2. Collect instances named in the definition's `incompatible_with`, then
    ///    remove them (only the applied condition's list is consulted)
    /// 3. Existing instance: add a stack if allowed, otherwise renew duration
    /// 4. Otherwise append a fresh instance with one stack
    ///
    /// Stacking does not touch the remaining duration.
    pub fn apply_condition<O>(
        &mut self,
        catalog: &O,
        condition_name: &str,
        duration: Option<u32>,
        source: impl Into<String>,
    ) -> Result<ApplyReport, ConditionError>
    where
        O: ConditionOracle + ?Sized,
    {
        let condition =
            catalog
                .condition(condition_name)
                .ok_or_else(|| ConditionError::UnknownCondition {
                    name: condition_name.to_string(),
                })?;

        let displaced: Vec<String> = self
            .instances
            .iter()
            .filter(|active| condition.displaces(&active.condition_name))
            .map(|active| active.condition_name.clone())
            .collect();
        if !displaced.is_empty() {
            self.instances
                .retain(|active| !displaced.contains(&active.condition_name));
        }

        let outcome = match self.get_mut(condition_name) {
            Some(existing) if condition.can_stack() && existing.stacks < condition.max_stacks() => {
                existing.stacks += 1;
                ApplyOutcome::Stacked {
                    stacks: existing.stacks,
                }
            }
            Some(existing) => {
                existing.remaining_duration = condition.resolve_duration(duration);
                ApplyOutcome::Renewed
            }
            None => {
                self.instances.push(StatusCondition::new(
                    condition_name,
                    condition.resolve_duration(duration),
                    source,
                ));
                ApplyOutcome::Applied
            }
        };

        Ok(ApplyReport { outcome, displaced })
    }

    /// Removes one stack, or the whole instance.
    ///
    /// The instance is deleted when `remove_all_stacks` is set or it has a
    /// single stack left. Returns whether an instance with that name existed.
    pub fn remove_condition(&mut self, condition_name: &str, remove_all_stacks: bool) -> bool {
        let Some(index) = self.position(condition_name) else {
            return false;
        };

        let active = &mut self.instances[index];
        if remove_all_stacks || active.stacks <= 1 {
            self.instances.remove(index);
        } else {
            active.stacks -= 1;
        }
        true
    }

    /// Advances every instance by one tick. See [`tick`] for the rules.
    pub fn tick<O>(&mut self, catalog: &O) -> TickReport
    where
        O: ConditionOracle + ?Sized,
    {
        tick::advance(self, catalog)
    }

    /// Folds all instances into one net effect. See [`aggregate`] for the rules.
    pub fn aggregate<O>(&self, catalog: &O) -> StatusEffect
    where
        O: ConditionOracle + ?Sized,
    {
        aggregate::aggregate(self.iter(), catalog)
    }

    pub fn get(&self, condition_name: &str) -> Option<&StatusCondition> {
        self.instances
            .iter()
            .find(|active| active.condition_name == condition_name)
    }

    pub fn contains(&self, condition_name: &str) -> bool {
        self.get(condition_name).is_some()
    }

    /// Stack count of a condition (0 when not active).
    pub fn stacks(&self, condition_name: &str) -> u32 {
        self.get(condition_name).map_or(0, |active| active.stacks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusCondition> {
        self.instances.iter()
    }

    /// Active condition names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances
            .iter()
            .map(|active| active.condition_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drops every instance.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    fn position(&self, condition_name: &str) -> Option<usize> {
        self.instances
            .iter()
            .position(|active| active.condition_name == condition_name)
    }

    fn get_mut(&mut self, condition_name: &str) -> Option<&mut StatusCondition> {
        self.instances
            .iter_mut()
            .find(|active| active.condition_name == condition_name)
    }
}

impl<'a> IntoIterator for &'a ActiveConditionSet {
    type Item = &'a StatusCondition;
    type IntoIter = std::slice::Iter<'a, StatusCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
