//! Condition definitions.
//!
//! A [`Condition`] is static content: an effect template plus the metadata that
//! governs how live instances stack, expire and displace each other. Definitions
//! never change once registered in a [`ConditionCatalog`](super::ConditionCatalog).

use std::num::NonZeroU32;

use crate::effect::StatusEffect;
use crate::error::CatalogError;

/// Informational severity of a condition.
///
/// Severity never participates in effect math; it exists for display and for
/// callers that sort or filter conditions.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Severity {
    #[default]
    Minor,
    Moderate,
    Severe,
    Critical,
}

/// How a condition's duration is measured.
///
/// Every time-based unit decays by one per tick. The unit is a label for the
/// host; converting minutes or hours into rounds is the host's responsibility.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DurationType {
    #[default]
    Rounds,
    Minutes,
    Hours,
    /// Never expires on its own.
    Permanent,
    /// Lasts until an external trigger removes it.
    #[cfg_attr(feature = "serde", serde(alias = "until-condition"))]
    #[strum(to_string = "until_condition", serialize = "until-condition")]
    UntilCondition,
}

impl DurationType {
    /// Returns true if instances of this type decay on every tick.
    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::Rounds | Self::Minutes | Self::Hours)
    }
}

/// Stacking policy of a condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StackPolicy {
    /// Re-applying renews the duration; stacks stay at one.
    #[default]
    Unique,

    /// Re-applying adds a stack until `max_stacks`, then renews the duration.
    Stackable { max_stacks: NonZeroU32 },
}

impl StackPolicy {
    /// Builds a policy from the flat `can_stack` / `max_stacks` pair used by
    /// catalog files.
    ///
    /// `max_stacks` is ignored when `can_stack` is false, matching the catalog
    /// format where non-stacking entries usually carry `max_stacks: 1`.
    pub fn from_parts(condition: &str, can_stack: bool, max_stacks: u32) -> Result<Self, CatalogError> {
        if !can_stack {
            return Ok(Self::Unique);
        }
        NonZeroU32::new(max_stacks)
            .map(|max_stacks| Self::Stackable { max_stacks })
            .ok_or_else(|| CatalogError::InvalidMaxStacks {
                condition: condition.to_string(),
                max_stacks,
            })
    }

    pub const fn can_stack(&self) -> bool {
        matches!(self, Self::Stackable { .. })
    }

    /// Effective stack cap (1 for unique conditions).
    pub const fn max_stacks(&self) -> u32 {
        match self {
            Self::Unique => 1,
            Self::Stackable { max_stacks } => max_stacks.get(),
        }
    }
}

/// Definition of a status condition.
///
/// # Design: Template + Policy
///
/// - `effects` is the contribution of a single stack
/// - `duration_type` / `default_duration` drive tick decay
/// - `stacking` and `incompatible_with` drive `apply_condition`
/// - `removable_by`, `description` and `icon` are carried for the host and
///   never interpreted here
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub effects: StatusEffect,
    pub duration_type: DurationType,
    pub default_duration: u32,
    pub stacking: StackPolicy,
    pub removable_by: Vec<String>,
    pub incompatible_with: Vec<String>,
    pub icon: String,
}

impl Condition {
    /// Creates a unique, one-round condition with a neutral effect.
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
            description: String::new(),
            effects: StatusEffect::default(),
            duration_type: DurationType::Rounds,
            default_duration: 1,
            stacking: StackPolicy::Unique,
            removable_by: Vec::new(),
            incompatible_with: Vec::new(),
            icon: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: StatusEffect) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_type: DurationType, default_duration: u32) -> Self {
        self.duration_type = duration_type;
        self.default_duration = default_duration;
        self
    }

    /// Makes the condition stackable up to `max_stacks`.
    #[must_use]
    pub fn stackable(mut self, max_stacks: NonZeroU32) -> Self {
        self.stacking = StackPolicy::Stackable { max_stacks };
        self
    }

    #[must_use]
    pub fn removable_by<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.removable_by = triggers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn incompatible_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incompatible_with = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub const fn can_stack(&self) -> bool {
        self.stacking.can_stack()
    }

    pub const fn max_stacks(&self) -> u32 {
        self.stacking.max_stacks()
    }

    /// Returns true if applying this condition removes `other`.
    pub fn displaces(&self, other: &str) -> bool {
        self.incompatible_with.iter().any(|name| name == other)
    }

    /// Duration used for a fresh instance or a renewal.
    ///
    /// An explicit duration of zero counts as "not supplied" so a time-based
    /// instance never starts at zero.
    pub fn resolve_duration(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|duration| *duration > 0)
            .unwrap_or(self.default_duration)
    }

    /// Checks the parts of the definition that do not depend on other entries.
    pub(crate) fn validate_shape(&self) -> Result<(), CatalogError> {
        if self.displaces(&self.name) {
            return Err(CatalogError::SelfIncompatible {
                condition: self.name.clone(),
            });
        }
        if self.duration_type.is_timed() && self.default_duration == 0 {
            return Err(CatalogError::ZeroDefaultDuration {
                condition: self.name.clone(),
                duration_type: self.duration_type,
            });
        }
        let movement = self.effects.movement_modifier;
        if !movement.is_finite() || movement < 0.0 {
            return Err(CatalogError::InvalidMovementModifier {
                condition: self.name.clone(),
                value: movement,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_type_parses_both_spellings() {
        assert_eq!("until_condition".parse::<DurationType>(), Ok(DurationType::UntilCondition));
        assert_eq!("until-condition".parse::<DurationType>(), Ok(DurationType::UntilCondition));
        assert_eq!("Rounds".parse::<DurationType>(), Ok(DurationType::Rounds));
        assert_eq!(DurationType::UntilCondition.to_string(), "until_condition");
    }

    #[test]
    fn only_rounds_minutes_hours_are_timed() {
        assert!(DurationType::Rounds.is_timed());
        assert!(DurationType::Minutes.is_timed());
        assert!(DurationType::Hours.is_timed());
        assert!(!DurationType::Permanent.is_timed());
        assert!(!DurationType::UntilCondition.is_timed());
    }

    #[test]
    fn stack_policy_ignores_max_stacks_when_not_stackable() {
        let policy = StackPolicy::from_parts("Charmed", false, 0).unwrap();
        assert_eq!(policy, StackPolicy::Unique);
        assert_eq!(policy.max_stacks(), 1);
    }

    #[test]
    fn stack_policy_rejects_zero_cap() {
        let err = StackPolicy::from_parts("Poisoned", true, 0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMaxStacks { max_stacks: 0, .. }));
    }

    #[test]
    fn zero_requested_duration_falls_back_to_default() {
        let condition = Condition::new("Stunned", Severity::Severe).with_duration(DurationType::Rounds, 2);
        assert_eq!(condition.resolve_duration(None), 2);
        assert_eq!(condition.resolve_duration(Some(0)), 2);
        assert_eq!(condition.resolve_duration(Some(7)), 7);
    }

    #[test]
    fn shape_validation_flags_self_reference() {
        let condition = Condition::new("Raging", Severity::Minor).incompatible_with(["Raging"]);
        assert!(matches!(
            condition.validate_shape(),
            Err(CatalogError::SelfIncompatible { .. })
        ));
    }

    #[test]
    fn shape_validation_allows_zero_duration_for_permanent() {
        let condition =
            Condition::new("Cursed", Severity::Critical).with_duration(DurationType::Permanent, 0);
        assert!(condition.validate_shape().is_ok());
    }
}
