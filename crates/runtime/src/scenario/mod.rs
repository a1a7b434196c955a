//! Scripted encounters loaded from RON.
//!
//! A scenario names the entities taking part and the commands issued in each
//! round. Replaying it drives an [`Encounter`] and collects the round reports.
//!
//! ```ron
//! (
//!     entities: [(id: 1, name: "Hero"), (id: 2, name: "Goblin")],
//!     rounds: [
//!         [Apply(target: 2, condition: "Poisoned", source: "dagger")],
//!         [],
//!         [Remove(target: 2, condition: "Poisoned", all_stacks: true)],
//!     ],
//! )
//! ```

use std::path::Path;
use std::sync::Arc;

use condition_core::{ConditionCatalog, EncounterConfig};
use serde::{Deserialize, Serialize};

use crate::command::ConditionCommand;
use crate::encounter::Encounter;
use crate::entity::EntityId;
use crate::error::{Result, RuntimeError};
use crate::report::RoundReport;

/// One participant of a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: EntityId,
    pub name: String,
}

/// Entities plus the commands issued in each round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub rounds: Vec<Vec<ConditionCommand>>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(RuntimeError::ScenarioParse)
    }

    /// Builds an encounter holding the scenario's entities.
    pub fn encounter(&self, catalog: Arc<ConditionCatalog>) -> Result<Encounter> {
        let mut encounter = Encounter::new(catalog);
        for spec in &self.entities {
            encounter.add_entity(spec.id, spec.name.clone())?;
        }
        Ok(encounter)
    }

    /// Replays every scripted round, then keeps running empty rounds until
    /// all sets are empty when `config.drain_until_clear` is set.
    ///
    /// No round past `config.max_rounds` is run.
    pub fn run(&self, catalog: Arc<ConditionCatalog>, config: &EncounterConfig) -> Result<Vec<RoundReport>> {
        let mut encounter = self.encounter(catalog)?;
        Ok(self.replay(&mut encounter, config))
    }

    /// Same as [`Scenario::run`] on an encounter built by [`Scenario::encounter`],
    /// leaving the final sets in `encounter`.
    pub fn replay(&self, encounter: &mut Encounter, config: &EncounterConfig) -> Vec<RoundReport> {
        tracing::info!(
            target: "runtime::scenario",
            entities = self.entities.len(),
            rounds = self.rounds.len(),
            max_rounds = config.max_rounds,
            "replaying scenario",
        );

        let mut reports = Vec::new();
        for commands in &self.rounds {
            if !config.allows_round(encounter.round().saturating_add(1)) {
                tracing::warn!(
                    target: "runtime::scenario",
                    max_rounds = config.max_rounds,
                    "round budget exhausted before the script ended",
                );
                return reports;
            }
            reports.push(encounter.run_round(commands));
        }

        if config.drain_until_clear {
            while !encounter.is_clear() && config.allows_round(encounter.round().saturating_add(1)) {
                reports.push(encounter.run_round(&[]));
            }
            if !encounter.is_clear() {
                tracing::warn!(
                    target: "runtime::scenario",
                    max_rounds = config.max_rounds,
                    "conditions still active when the round budget ran out",
                );
            }
        }

        tracing::info!(target: "runtime::scenario", rounds = reports.len(), "scenario finished");
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condition_core::{Condition, DurationType, Severity, StatusEffect};

    fn catalog() -> Arc<ConditionCatalog> {
        Arc::new(
            ConditionCatalog::from_conditions([
                Condition::new("Bleeding", Severity::Moderate)
                    .with_effects(StatusEffect::new().damage_over_time(3))
                    .with_duration(DurationType::Rounds, 3),
                Condition::new("Cursed", Severity::Severe)
                    .with_duration(DurationType::Permanent, 1),
            ])
            .unwrap(),
        )
    }

    const SCRIPT: &str = r#"(
        entities: [(id: 1, name: "Hero")],
        rounds: [
            [Apply(target: 1, condition: "Bleeding", source: "blade")],
        ],
    )"#;

    #[test]
    fn parses_commands_with_defaults() {
        let scenario = Scenario::parse(SCRIPT).unwrap();
        assert_eq!(
            scenario.rounds[0][0],
            ConditionCommand::Apply {
                target: EntityId(1),
                condition: "Bleeding".into(),
                duration: None,
                source: "blade".into(),
            }
        );
    }

    #[test]
    fn drains_until_clear() {
        let scenario = Scenario::parse(SCRIPT).unwrap();
        let reports = scenario.run(catalog(), &EncounterConfig::new()).unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports.last().unwrap().entities[0].expired, ["Bleeding"]);
        let damage: u32 = reports.iter().map(RoundReport::total_damage).sum();
        assert_eq!(damage, 9);
    }

    #[test]
    fn without_drain_only_scripted_rounds_run() {
        let scenario = Scenario::parse(SCRIPT).unwrap();
        let config = EncounterConfig {
            drain_until_clear: false,
            ..EncounterConfig::new()
        };
        assert_eq!(scenario.run(catalog(), &config).unwrap().len(), 1);
    }

    #[test]
    fn permanent_conditions_stop_at_the_round_cap() {
        let scenario = Scenario {
            entities: vec![EntitySpec {
                id: EntityId(1),
                name: "Hero".into(),
            }],
            rounds: vec![vec![ConditionCommand::apply(EntityId(1), "Cursed", "witch")]],
        };
        let reports = scenario
            .run(catalog(), &EncounterConfig::with_max_rounds(4))
            .unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[3].round, 4);
    }

    #[test]
    fn duplicate_ids_fail_before_any_round() {
        let scenario = Scenario::parse(
            r#"(entities: [(id: 1, name: "A"), (id: 1, name: "B")], rounds: [])"#,
        )
        .unwrap();
        let err = scenario.run(catalog(), &EncounterConfig::new()).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateEntity(EntityId(1))));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        assert!(matches!(
            Scenario::parse("(entities: [").unwrap_err(),
            RuntimeError::ScenarioParse(_)
        ));
    }
}
