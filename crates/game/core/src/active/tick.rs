//! Per-round decay of an active set.
//!
//! A tick walks the set once in insertion order:
//! 1. emit damage/heal-over-time events scaled by stacks
//! 2. decrement time-based durations, marking instances that reach zero
//!
//! Marked instances are removed after the walk. Permanent and until-condition
//! instances are never removed here.

use super::ActiveConditionSet;
use crate::catalog::ConditionOracle;

/// Kind of over-time effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Heal,
}

/// An over-time effect produced by one condition during a tick.
///
/// The host feeds these into whatever tracks the entity's hit points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEvent {
    pub kind: EffectKind,
    pub amount: u32,
    /// Name of the condition that produced the event.
    pub source: String,
}

impl EffectEvent {
    pub fn damage(amount: u32, source: impl Into<String>) -> Self {
        Self {
            kind: EffectKind::Damage,
            amount,
            source: source.into(),
        }
    }

    pub fn heal(amount: u32, source: impl Into<String>) -> Self {
        Self {
            kind: EffectKind::Heal,
            amount,
            source: source.into(),
        }
    }
}

/// Everything a single tick produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Over-time events in set order (damage before heal for one instance).
    pub events: Vec<EffectEvent>,
    /// Conditions that expired this tick, in set order.
    pub expired: Vec<String>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.expired.is_empty()
    }

    pub fn total_damage(&self) -> u32 {
        self.total(EffectKind::Damage)
    }

    pub fn total_healing(&self) -> u32 {
        self.total(EffectKind::Heal)
    }

    fn total(&self, kind: EffectKind) -> u32 {
        self.events
            .iter()
            .filter(|event| event.kind == kind)
            .fold(0u32, |acc, event| acc.saturating_add(event.amount))
    }
}

/// Advances every instance in `set` by one tick.
///
/// Instances whose condition is missing from `catalog` produce nothing and are
/// left untouched.
pub(super) fn advance<O>(set: &mut ActiveConditionSet, catalog: &O) -> TickReport
where
    O: ConditionOracle + ?Sized,
{
    let mut report = TickReport::default();

    for active in set.instances.iter_mut() {
        let Some(condition) = catalog.condition(&active.condition_name) else {
            continue;
        };

        let template = &condition.effects;
        if template.damage_over_time > 0 {
            report.events.push(EffectEvent::damage(
                template.damage_over_time.saturating_mul(active.stacks),
                active.condition_name.clone(),
            ));
        }
        if template.heal_over_time > 0 {
            report.events.push(EffectEvent::heal(
                template.heal_over_time.saturating_mul(active.stacks),
                active.condition_name.clone(),
            ));
        }

        if condition.duration_type.is_timed() {
            active.remaining_duration = active.remaining_duration.saturating_sub(1);
            if active.remaining_duration == 0 {
                report.expired.push(active.condition_name.clone());
            }
        }
    }

    if !report.expired.is_empty() {
        set.instances
            .retain(|active| !report.expired.contains(&active.condition_name));
    }

    report
}
