//! Built-in condition set modelled on the 5e conditions.
//!
//! Hosts that ship no catalog file start from this set; catalog files loaded
//! later can overwrite any entry by name.

use std::num::NonZeroU32;

use condition_core::{
    CatalogError, Condition, ConditionCatalog, DurationType, Severity, StatusEffect,
};

const POISON_STACKS: NonZeroU32 = NonZeroU32::new(5).unwrap();
const BLEED_STACKS: NonZeroU32 = NonZeroU32::new(10).unwrap();
const BURN_STACKS: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Returns the standard conditions in declaration order.
pub fn standard_conditions() -> Vec<Condition> {
    vec![
        Condition::new("Blinded", Severity::Moderate)
            .with_description("Cannot see")
            .with_effects(
                StatusEffect::new()
                    .grants_disadvantage(["attack", "perception"])
                    .ac(-2),
            ),
        Condition::new("Charmed", Severity::Minor)
            .with_description("Cannot attack the charmer")
            .with_effects(StatusEffect::new().prevents_actions(["attack_charmer"])),
        Condition::new("Frightened", Severity::Minor)
            .with_description("Shaken by fear")
            .with_effects(
                StatusEffect::new()
                    .grants_disadvantage(["attack", "ability_check"])
                    .movement(0.5),
            ),
        Condition::new("Paralyzed", Severity::Severe)
            .with_description("Cannot move or act")
            .with_effects(
                StatusEffect::new()
                    .prevents_actions(["move", "attack", "cast"])
                    .ac(-5),
            ),
        Condition::new("Poisoned", Severity::Moderate)
            .with_description("Poison courses through the body")
            .with_effects(
                StatusEffect::new()
                    .grants_disadvantage(["attack", "ability_check"])
                    .damage_over_time(5),
            )
            .stackable(POISON_STACKS)
            .removable_by(["antidote", "rest"]),
        Condition::new("Stunned", Severity::Severe)
            .with_description("Dazed and reeling")
            .with_effects(StatusEffect::new().prevents_actions(["move", "attack"]).ac(-2)),
        Condition::new("Unconscious", Severity::Critical)
            .with_description("Knocked out")
            .with_effects(
                StatusEffect::new()
                    .prevents_actions(["move", "attack", "cast", "speak"])
                    .ac(-5),
            )
            .with_duration(DurationType::UntilCondition, 1),
        Condition::new("Bleeding", Severity::Moderate)
            .with_description("Losing blood")
            .with_effects(StatusEffect::new().damage_over_time(3))
            .stackable(BLEED_STACKS)
            .removable_by(["healing", "bandage"]),
        Condition::new("Burning", Severity::Moderate)
            .with_description("On fire")
            .with_effects(StatusEffect::new().damage_over_time(5))
            .stackable(BURN_STACKS)
            .removable_by(["water", "magic"]),
    ]
}

/// Builds a validated catalog holding [`standard_conditions`].
pub fn standard_catalog() -> Result<ConditionCatalog, CatalogError> {
    ConditionCatalog::from_conditions(standard_conditions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use condition_core::ActiveConditionSet;

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = standard_catalog().unwrap();
        assert_eq!(catalog.len(), 9);
        assert!(catalog.iter().all(|c| c.duration_type != DurationType::Permanent));
    }

    #[test]
    fn stacking_conditions_have_their_caps() {
        let catalog = standard_catalog().unwrap();
        let caps: Vec<(&str, u32)> = catalog
            .iter()
            .filter(|c| c.can_stack())
            .map(|c| (c.name.as_str(), c.max_stacks()))
            .collect();

        assert_eq!(caps, [("Bleeding", 10), ("Burning", 5), ("Poisoned", 5)]);
    }

    #[test]
    fn poisoned_and_burning_together() {
        let catalog = standard_catalog().unwrap();
        let mut set = ActiveConditionSet::new();
        set.apply_condition(&catalog, "Poisoned", Some(4), "spider").unwrap();
        set.apply_condition(&catalog, "Burning", Some(4), "torch").unwrap();
        set.apply_condition(&catalog, "Burning", Some(4), "torch").unwrap();

        let report = set.tick(&catalog);
        assert_eq!(report.total_damage(), 5 + 10);

        let total = set.aggregate(&catalog);
        assert!(total.has_disadvantage_on("attack"));
        assert_eq!(total.damage_over_time, 15);
    }
}
