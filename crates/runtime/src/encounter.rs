//! Turn driver holding one condition set per entity.
//!
//! Each round applies the queued commands in order, then ticks every entity
//! once and aggregates its net effect. The catalog is shared read-only.
use std::collections::BTreeMap;
use std::sync::Arc;

use condition_core::{
    ActiveConditionSet, ApplyOutcome, ApplyReport, ConditionCatalog, ConditionSetDelta,
    EffectKind, StatusEffect,
};
use tracing::{debug, info, warn};

use crate::command::ConditionCommand;
use crate::entity::EntityId;
use crate::error::{Result, RuntimeError};
use crate::report::{EntityRound, RejectedCommand, RoundReport};

#[derive(Clone, Debug, Default)]
struct TrackedEntity {
    name: String,
    conditions: ActiveConditionSet,
}

/// Entities and their active conditions for one encounter.
#[derive(Clone, Debug)]
pub struct Encounter {
    catalog: Arc<ConditionCatalog>,
    entities: BTreeMap<EntityId, TrackedEntity>,
    round: u32,
}

impl Encounter {
    pub fn new(catalog: Arc<ConditionCatalog>) -> Self {
        Self {
            catalog,
            entities: BTreeMap::new(),
            round: 0,
        }
    }

    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    /// Number of rounds completed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn add_entity(&mut self, id: EntityId, name: impl Into<String>) -> Result<()> {
        if self.entities.contains_key(&id) {
            return Err(RuntimeError::DuplicateEntity(id));
        }
        let name = name.into();
        debug!(target: "runtime::encounter", entity = %id, name = %name, "entity joined");
        self.entities.insert(
            id,
            TrackedEntity {
                name,
                conditions: ActiveConditionSet::new(),
            },
        );
        Ok(())
    }

    /// Drops an entity and returns its final condition set.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<ActiveConditionSet> {
        self.entities
            .remove(&id)
            .map(|entity| entity.conditions)
            .ok_or(RuntimeError::UnknownEntity(id))
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.entities.get(&id).map(|entity| entity.name.as_str())
    }

    pub fn conditions(&self, id: EntityId) -> Result<&ActiveConditionSet> {
        self.entities
            .get(&id)
            .map(|entity| &entity.conditions)
            .ok_or(RuntimeError::UnknownEntity(id))
    }

    /// Current net effect of an entity's conditions.
    pub fn net_effect(&self, id: EntityId) -> Result<StatusEffect> {
        Ok(self.conditions(id)?.aggregate(self.catalog.as_ref()))
    }

    /// Returns true if no entity carries any condition.
    pub fn is_clear(&self) -> bool {
        self.entities
            .values()
            .all(|entity| entity.conditions.is_empty())
    }

    pub fn apply(
        &mut self,
        id: EntityId,
        condition: &str,
        duration: Option<u32>,
        source: impl Into<String>,
    ) -> Result<ApplyReport> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownEntity(id))?;
        let report =
            entity
                .conditions
                .apply_condition(self.catalog.as_ref(), condition, duration, source)?;

        for displaced in &report.displaced {
            info!(
                target: "runtime::encounter",
                entity = %id,
                condition = %displaced,
                by = condition,
                "condition displaced",
            );
        }
        match report.outcome {
            ApplyOutcome::Applied => {
                info!(target: "runtime::encounter", entity = %id, condition, "condition applied");
            }
            ApplyOutcome::Stacked { stacks } => {
                info!(target: "runtime::encounter", entity = %id, condition, stacks, "condition stacked");
            }
            ApplyOutcome::Renewed => {
                debug!(target: "runtime::encounter", entity = %id, condition, "condition renewed");
            }
        }

        Ok(report)
    }

    /// Removes one stack (or all of them). Returns whether an instance was found.
    pub fn remove(&mut self, id: EntityId, condition: &str, all_stacks: bool) -> Result<bool> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownEntity(id))?;
        let removed = entity.conditions.remove_condition(condition, all_stacks);
        if removed {
            info!(
                target: "runtime::encounter",
                entity = %id,
                condition,
                stacks = entity.conditions.stacks(condition),
                "condition removed",
            );
        }
        Ok(removed)
    }

    pub fn clear(&mut self, id: EntityId) -> Result<()> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownEntity(id))?;
        entity.conditions.clear();
        info!(target: "runtime::encounter", entity = %id, "conditions cleared");
        Ok(())
    }

    /// Runs a single command.
    pub fn execute(&mut self, command: &ConditionCommand) -> Result<()> {
        match command {
            ConditionCommand::Apply {
                target,
                condition,
                duration,
                source,
            } => self
                .apply(*target, condition, *duration, source.as_str())
                .map(|_| ()),
            ConditionCommand::Remove {
                target,
                condition,
                all_stacks,
            } => self.remove(*target, condition, *all_stacks).map(|_| ()),
            ConditionCommand::Clear { target } => self.clear(*target),
        }
    }

    /// Executes `commands` in order, then ticks and aggregates every entity.
    ///
    /// Failing commands are recorded in the report and do not stop the round.
    pub fn run_round(&mut self, commands: &[ConditionCommand]) -> RoundReport {
        self.round = self.round.saturating_add(1);
        let round = self.round;
        info!(target: "runtime::encounter", round, commands = commands.len(), "round started");

        let snapshots: BTreeMap<EntityId, ActiveConditionSet> = self
            .entities
            .iter()
            .map(|(id, entity)| (*id, entity.conditions.clone()))
            .collect();

        let mut rejected = Vec::new();
        for command in commands {
            if let Err(err) = self.execute(command) {
                warn!(
                    target: "runtime::encounter",
                    round,
                    entity = %command.target(),
                    error = %err,
                    "command rejected",
                );
                rejected.push(RejectedCommand {
                    command: command.clone(),
                    reason: err.to_string(),
                });
            }
        }

        let catalog = self.catalog.as_ref();
        let mut entities = Vec::with_capacity(self.entities.len());
        for (id, entity) in self.entities.iter_mut() {
            let tick = entity.conditions.tick(catalog);

            for event in &tick.events {
                match event.kind {
                    EffectKind::Damage => debug!(
                        target: "runtime::encounter",
                        entity = %id,
                        condition = %event.source,
                        amount = event.amount,
                        "damage over time",
                    ),
                    EffectKind::Heal => debug!(
                        target: "runtime::encounter",
                        entity = %id,
                        condition = %event.source,
                        amount = event.amount,
                        "heal over time",
                    ),
                }
            }
            for name in &tick.expired {
                info!(target: "runtime::encounter", entity = %id, condition = %name, "condition expired");
            }

            let delta = match snapshots.get(id) {
                Some(before) => ConditionSetDelta::from_sets(before, &entity.conditions),
                None => ConditionSetDelta::from_sets(&ActiveConditionSet::new(), &entity.conditions),
            };

            entities.push(EntityRound {
                id: *id,
                name: entity.name.clone(),
                effect: entity.conditions.aggregate(catalog),
                events: tick.events,
                expired: tick.expired,
                delta,
            });
        }

        info!(target: "runtime::encounter", round, rejected = rejected.len(), "round finished");

        RoundReport {
            round,
            entities,
            rejected,
        }
    }
}
