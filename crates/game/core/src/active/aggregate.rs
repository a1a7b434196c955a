//! Folding active instances into one net [`StatusEffect`].
//!
//! Each field has its own combination rule:
//!
//! | Field | Rule |
//! |---|---|
//! | attribute / save modifiers | per-key sum of value × stacks |
//! | movement multiplier | minimum of raw template values, starting at 1.0 |
//! | AC, attack, DoT, HoT | sum of value × stacks |
//! | prevented / advantage / disadvantage | set union |
//!
//! Every rule is commutative, so the result does not depend on the order of
//! the instances. Movement is a minimum, not a product, and stacks do not
//! scale it.

use std::collections::BTreeMap;

use super::StatusCondition;
use crate::catalog::ConditionOracle;
use crate::effect::StatusEffect;

/// Aggregates `instances` against `catalog`.
///
/// Instances whose condition is missing from the catalog contribute nothing.
pub fn aggregate<'a, O, I>(instances: I, catalog: &O) -> StatusEffect
where
    O: ConditionOracle + ?Sized,
    I: IntoIterator<Item = &'a StatusCondition>,
{
    let mut total = StatusEffect::default();

    for active in instances {
        let Some(condition) = catalog.condition(&active.condition_name) else {
            continue;
        };
        accumulate(&mut total, &condition.effects, active.stacks);
    }

    total
}

/// Merges one per-stack template scaled by `stacks` into `total`.
fn accumulate(total: &mut StatusEffect, template: &StatusEffect, stacks: u32) {
    let scale = i32::try_from(stacks).unwrap_or(i32::MAX);

    add_scaled(&mut total.attribute_modifiers, &template.attribute_modifiers, scale);
    add_scaled(&mut total.save_modifiers, &template.save_modifiers, scale);

    total.movement_modifier = total.movement_modifier.min(template.movement_modifier);

    total.ac_modifier = total
        .ac_modifier
        .saturating_add(template.ac_modifier.saturating_mul(scale));
    total.attack_modifier = total
        .attack_modifier
        .saturating_add(template.attack_modifier.saturating_mul(scale));
    total.damage_over_time = total
        .damage_over_time
        .saturating_add(template.damage_over_time.saturating_mul(stacks));
    total.heal_over_time = total
        .heal_over_time
        .saturating_add(template.heal_over_time.saturating_mul(stacks));

    total
        .prevents_actions
        .extend(template.prevents_actions.iter().cloned());
    total
        .grants_advantage
        .extend(template.grants_advantage.iter().cloned());
    total
        .grants_disadvantage
        .extend(template.grants_disadvantage.iter().cloned());
}

fn add_scaled(total: &mut BTreeMap<String, i32>, template: &BTreeMap<String, i32>, scale: i32) {
    for (key, value) in template {
        let entry = total.entry(key.clone()).or_insert(0);
        *entry = entry.saturating_add(value.saturating_mul(scale));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::active::tests::{catalog, stacks};
    use crate::active::ActiveConditionSet;
    use crate::catalog::{Condition, ConditionCatalog, DurationType, Severity};

    fn set_of(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn empty_set_aggregates_to_neutral() {
        let catalog = catalog();
        let set = ActiveConditionSet::new();
        let total = set.aggregate(&catalog);

        assert!(total.is_neutral());
        assert_eq!(total.movement_modifier, 1.0);
    }

    #[test]
    fn poisoned_and_paralyzed_scenario() {
        let catalog = catalog();
        let mut set = ActiveConditionSet::new();
        for _ in 0..3 {
            set.apply_condition(&catalog, "Poisoned", None, "spider").unwrap();
        }
        assert_eq!(set.stacks("Poisoned"), 3);

        let report = set.tick(&catalog);
        assert_eq!(report.total_damage(), 15);
        assert_eq!(set.get("Poisoned").unwrap().remaining_duration, 2);
        assert_eq!(set.aggregate(&catalog).damage_over_time, 15);

        set.apply_condition(&catalog, "Paralyzed", None, "ghoul").unwrap();
        let total = set.aggregate(&catalog);

        assert_eq!(set.len(), 2);
        assert_eq!(total.ac_modifier, -5);
        assert_eq!(total.prevents_actions, set_of(&["move", "attack", "cast"]));
        assert_eq!(total.damage_over_time, 15);
        assert_eq!(
            total.grants_disadvantage,
            set_of(&["attack", "ability_check"])
        );
    }

    #[test]
    fn movement_takes_minimum_not_product() {
        let catalog = catalog();
        let mut set = ActiveConditionSet::new();
        set.apply_condition(&catalog, "Frightened", None, "dragon").unwrap();
        set.apply_condition(&catalog, "Slowed", None, "spell").unwrap();

        assert_eq!(set.aggregate(&catalog).movement_modifier, 0.25);
    }

    #[test]
    fn movement_is_not_scaled_by_stacks() {
        let catalog = ConditionCatalog::from_conditions([Condition::new("Encumbered", Severity::Minor)
            .with_effects(StatusEffect::new().movement(0.5).attribute("dexterity", -1))
            .with_duration(DurationType::Hours, 1)
            .stackable(stacks(3))])
        .unwrap();
        let mut set = ActiveConditionSet::new();
        for _ in 0..3 {
            set.apply_condition(&catalog, "Encumbered", None, "pack").unwrap();
        }

        let total = set.aggregate(&catalog);
        assert_eq!(total.movement_modifier, 0.5);
        assert_eq!(total.attribute_modifier("dexterity"), -3);
    }

    #[test]
    fn speed_bonuses_do_not_raise_movement_above_one() {
        let catalog = catalog();
        let mut set = ActiveConditionSet::new();
        set.apply_condition(&catalog, "Hasted", None, "potion").unwrap();

        let total = set.aggregate(&catalog);
        assert_eq!(total.movement_modifier, 1.0);
        assert_eq!(total.ac_modifier, 2);
    }

    #[test]
    fn keyed_modifiers_sum_per_key() {
        let catalog = ConditionCatalog::from_conditions([
            Condition::new("Weakened", Severity::Moderate)
                .with_effects(StatusEffect::new().attribute("strength", -2).save("constitution", -1))
                .stackable(stacks(2)),
            Condition::new("Blessed", Severity::Minor).with_effects(
                StatusEffect::new()
                    .attribute("strength", 1)
                    .attribute("wisdom", 1)
                    .save("constitution", 2)
                    .attack(1),
            ),
        ])
        .unwrap();
        let mut set = ActiveConditionSet::new();
        set.apply_condition(&catalog, "Weakened", None, "curse").unwrap();
        set.apply_condition(&catalog, "Weakened", None, "curse").unwrap();
        set.apply_condition(&catalog, "Blessed", None, "cleric").unwrap();

        let total = set.aggregate(&catalog);

        assert_eq!(total.attribute_modifier("strength"), -3);
        assert_eq!(total.attribute_modifier("wisdom"), 1);
        assert_eq!(total.save_modifier("constitution"), 0);
        assert_eq!(total.attack_modifier, 1);
    }

    #[test]
    fn aggregate_is_independent_of_insertion_order() {
        let catalog = catalog();
        let orders: [&[&str]; 3] = [
            &["Poisoned", "Frightened", "Paralyzed", "Slowed"],
            &["Slowed", "Paralyzed", "Poisoned", "Frightened"],
            &["Paralyzed", "Slowed", "Frightened", "Poisoned"],
        ];

        let totals: Vec<StatusEffect> = orders
            .iter()
            .map(|order| {
                let mut set = ActiveConditionSet::new();
                for name in order.iter() {
                    set.apply_condition(&catalog, name, None, "test").unwrap();
                }
                set.apply_condition(&catalog, "Poisoned", None, "test").unwrap();
                set.aggregate(&catalog)
            })
            .collect();

        assert_eq!(totals[0], totals[1]);
        assert_eq!(totals[1], totals[2]);
        assert_eq!(totals[0].damage_over_time, 10);
    }

    #[test]
    fn aggregation_does_not_mutate_the_set() {
        let catalog = catalog();
        let mut set = ActiveConditionSet::new();
        set.apply_condition(&catalog, "Poisoned", None, "spider").unwrap();
        let before = set.clone();

        let _ = set.aggregate(&catalog);
        let _ = set.aggregate(&catalog);

        assert_eq!(set, before);
    }
}
