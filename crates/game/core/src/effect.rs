//! Status effect values.
//!
//! [`StatusEffect`] is used twice: as the per-stack template stored on a
//! [`Condition`](crate::Condition), and as the aggregated net effect of every
//! active instance on an entity. The shape is fixed so that each field carries
//! its own combination rule (see [`crate::active::aggregate`]).

use std::collections::{BTreeMap, BTreeSet};

/// Net or per-stack effect of a condition.
///
/// Maps and sets are ordered so two effects with the same content compare
/// equal and iterate identically.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusEffect {
    /// Attribute name → modifier.
    pub attribute_modifiers: BTreeMap<String, i32>,
    /// Movement multiplier (1.0 = unaffected).
    pub movement_modifier: f32,
    pub ac_modifier: i32,
    pub attack_modifier: i32,
    /// Saving throw name → modifier.
    pub save_modifiers: BTreeMap<String, i32>,
    /// Damage dealt on every tick.
    pub damage_over_time: u32,
    /// Healing received on every tick.
    pub heal_over_time: u32,
    /// Action tags the entity cannot perform ("move", "attack", "cast", ...).
    pub prevents_actions: BTreeSet<String>,
    pub grants_advantage: BTreeSet<String>,
    pub grants_disadvantage: BTreeSet<String>,
}

impl Default for StatusEffect {
    fn default() -> Self {
        Self {
            attribute_modifiers: BTreeMap::new(),
            movement_modifier: Self::NEUTRAL_MOVEMENT,
            ac_modifier: 0,
            attack_modifier: 0,
            save_modifiers: BTreeMap::new(),
            damage_over_time: 0,
            heal_over_time: 0,
            prevents_actions: BTreeSet::new(),
            grants_advantage: BTreeSet::new(),
            grants_disadvantage: BTreeSet::new(),
        }
    }
}

/// How a d20 roll for a given tag is made after conditions are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RollMode {
    Normal,
    Advantage,
    Disadvantage,
}

impl StatusEffect {
    pub const NEUTRAL_MOVEMENT: f32 = 1.0;

    /// Creates a neutral effect (no modifiers, full movement).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this effect changes nothing.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    pub fn prevents(&self, action: &str) -> bool {
        self.prevents_actions.contains(action)
    }

    pub fn has_advantage_on(&self, tag: &str) -> bool {
        self.grants_advantage.contains(tag)
    }

    pub fn has_disadvantage_on(&self, tag: &str) -> bool {
        self.grants_disadvantage.contains(tag)
    }

    /// Resolves advantage and disadvantage for one tag.
    ///
    /// Having both cancels out to a normal roll.
    pub fn roll_mode(&self, tag: &str) -> RollMode {
        match (self.has_advantage_on(tag), self.has_disadvantage_on(tag)) {
            (true, false) => RollMode::Advantage,
            (false, true) => RollMode::Disadvantage,
            _ => RollMode::Normal,
        }
    }

    /// Modifier for one attribute (0 when absent).
    pub fn attribute_modifier(&self, attribute: &str) -> i32 {
        self.attribute_modifiers.get(attribute).copied().unwrap_or(0)
    }

    /// Modifier for one saving throw (0 when absent).
    pub fn save_modifier(&self, save: &str) -> i32 {
        self.save_modifiers.get(save).copied().unwrap_or(0)
    }
}

/// Builder methods for templates (builder pattern)
impl StatusEffect {
    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<String>, modifier: i32) -> Self {
        self.attribute_modifiers.insert(attribute.into(), modifier);
        self
    }

    #[must_use]
    pub fn save(mut self, save: impl Into<String>, modifier: i32) -> Self {
        self.save_modifiers.insert(save.into(), modifier);
        self
    }

    #[must_use]
    pub fn movement(mut self, multiplier: f32) -> Self {
        self.movement_modifier = multiplier;
        self
    }

    #[must_use]
    pub fn ac(mut self, modifier: i32) -> Self {
        self.ac_modifier = modifier;
        self
    }

    #[must_use]
    pub fn attack(mut self, modifier: i32) -> Self {
        self.attack_modifier = modifier;
        self
    }

    #[must_use]
    pub fn damage_over_time(mut self, amount: u32) -> Self {
        self.damage_over_time = amount;
        self
    }

    #[must_use]
    pub fn heal_over_time(mut self, amount: u32) -> Self {
        self.heal_over_time = amount;
        self
    }

    #[must_use]
    pub fn prevents_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prevents_actions.extend(actions.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn grants_advantage<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants_advantage.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn grants_disadvantage<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants_disadvantage.extend(tags.into_iter().map(Into::into));
        self
    }
}
