//! Plain-text round summaries.
use std::fmt::Write;

use condition_core::{ActiveConditionSet, StatusEffect};
use condition_runtime::{EntityRound, RoundReport};

pub fn round_summary(report: &RoundReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Round {} ==", report.round);

    for rejected in &report.rejected {
        let _ = writeln!(out, "  ! rejected: {}", rejected.reason);
    }
    for entity in &report.entities {
        entity_line(&mut out, entity);
    }
    out
}

fn entity_line(out: &mut String, entity: &EntityRound) {
    let _ = write!(out, "  {} {}", entity.id, entity.name);

    let damage = entity.total_damage();
    let healing = entity.total_healing();
    if damage > 0 {
        let _ = write!(out, "  -{damage} hp");
    }
    if healing > 0 {
        let _ = write!(out, "  +{healing} hp");
    }
    if !entity.delta.added.is_empty() {
        let _ = write!(out, "  gained [{}]", entity.delta.added.join(", "));
    }
    if !entity.expired.is_empty() {
        let _ = write!(out, "  expired [{}]", entity.expired.join(", "));
    }
    let effect = effect_summary(&entity.effect);
    if !effect.is_empty() {
        let _ = write!(out, "  ({effect})");
    }
    out.push('\n');
}

fn effect_summary(effect: &StatusEffect) -> String {
    let mut parts = Vec::new();
    if effect.ac_modifier != 0 {
        parts.push(format!("ac {:+}", effect.ac_modifier));
    }
    if effect.attack_modifier != 0 {
        parts.push(format!("attack {:+}", effect.attack_modifier));
    }
    if effect.movement_modifier < 1.0 {
        parts.push(format!("speed x{:.2}", effect.movement_modifier));
    }
    if !effect.prevents_actions.is_empty() {
        let actions: Vec<&str> = effect.prevents_actions.iter().map(String::as_str).collect();
        parts.push(format!("cannot {}", actions.join("/")));
    }
    parts.join(", ")
}

pub fn final_state<'a>(entities: impl IntoIterator<Item = (&'a str, &'a ActiveConditionSet)>) -> String {
    let mut out = String::from("== Final ==\n");
    for (name, set) in entities {
        if set.is_empty() {
            let _ = writeln!(out, "  {name}: clear");
            continue;
        }
        let conditions: Vec<String> = set
            .iter()
            .map(|instance| format!("{} x{}", instance.condition_name, instance.stacks))
            .collect();
        let _ = writeln!(out, "  {name}: {}", conditions.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use condition_core::ConditionSetDelta;
    use condition_runtime::EntityId;

    #[test]
    fn summary_lists_damage_and_changes() {
        let report = RoundReport {
            round: 2,
            entities: vec![EntityRound {
                id: EntityId(1),
                name: "Hero".into(),
                events: vec![condition_core::EffectEvent::damage(6, "Bleeding")],
                expired: vec!["Bleeding".into()],
                effect: StatusEffect::new().ac(-2),
                delta: ConditionSetDelta::default(),
            }],
            rejected: Vec::new(),
        };

        let text = round_summary(&report);
        assert!(text.starts_with("== Round 2 =="));
        assert!(text.contains("#1 Hero  -6 hp  expired [Bleeding]  (ac -2)"));
    }
}
