//! Per-round summaries produced by [`Encounter::run_round`](crate::Encounter::run_round).
use condition_core::{ConditionSetDelta, EffectEvent, EffectKind, StatusEffect};
use serde::Serialize;

use crate::command::ConditionCommand;
use crate::entity::EntityId;

/// What happened to one entity during a round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityRound {
    pub id: EntityId,
    pub name: String,
    /// Damage / heal events emitted by the tick.
    pub events: Vec<EffectEvent>,
    /// Conditions whose duration ran out this round.
    pub expired: Vec<String>,
    /// Net effect after the tick.
    pub effect: StatusEffect,
    /// Changes from the start of the round (commands and tick combined).
    pub delta: ConditionSetDelta,
}

impl EntityRound {
    pub fn total_damage(&self) -> u32 {
        self.events
            .iter()
            .filter(|event| event.kind == EffectKind::Damage)
            .fold(0u32, |total, event| total.saturating_add(event.amount))
    }

    pub fn total_healing(&self) -> u32 {
        self.events
            .iter()
            .filter(|event| event.kind == EffectKind::Heal)
            .fold(0u32, |total, event| total.saturating_add(event.amount))
    }
}

/// A command the encounter refused, with the reason it gave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RejectedCommand {
    pub command: ConditionCommand,
    pub reason: String,
}

/// Summary of one round, entities in id order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,
    pub entities: Vec<EntityRound>,
    pub rejected: Vec<RejectedCommand>,
}

impl RoundReport {
    pub fn entity(&self, id: EntityId) -> Option<&EntityRound> {
        self.entities.iter().find(|entry| entry.id == id)
    }

    pub fn total_damage(&self) -> u32 {
        self.entities
            .iter()
            .fold(0u32, |total, entry| total.saturating_add(entry.total_damage()))
    }
}
