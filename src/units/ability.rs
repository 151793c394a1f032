//! Abilities: paid actions with a damage, heal, or buff effect.
//!
//! Each role has a fixed template table of two abilities. The shape (names
//! and effect types) is deterministic; cost and value are rolled per unit
//! at catalog generation time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleConfig, GameRng};

use super::role::Role;

/// What an ability does when it resolves.
///
/// The effect type alone decides the legal target set:
/// - `Damage`: living units on the opposing side
/// - `Heal`: living, wounded units on the acting side
/// - `Buff`: no target, no HP change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    Damage,
    Heal,
    Buff,
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectType::Damage => write!(f, "damage"),
            EffectType::Heal => write!(f, "heal"),
            EffectType::Buff => write!(f, "buff"),
        }
    }
}

/// An immutable ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub role: Role,
    /// Production points spent on use.
    pub cost: i32,
    pub effect: EffectType,
    /// Raw effect value. Heals are scaled by `BattleConfig::heal_multiplier`.
    pub value: i32,
}

/// A unit's ability list. Always two entries for generated units.
pub type AbilitySet = SmallVec<[Ability; 2]>;

/// Name and effect of each ability a role knows.
const TEMPLATES: [[(&str, EffectType); 2]; 3] = [
    [("Power Strike", EffectType::Damage), ("Battle Cry", EffectType::Buff)],
    [("Siege Barrage", EffectType::Damage), ("Field Repairs", EffectType::Heal)],
    [("Healing Light", EffectType::Heal), ("Inspire", EffectType::Buff)],
];

impl Ability {
    /// Create an ability with explicit numbers.
    pub fn new(
        name: impl Into<String>,
        role: Role,
        cost: i32,
        effect: EffectType,
        value: i32,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            cost,
            effect,
            value,
        }
    }

    /// Roll the two abilities for a unit of `role`.
    pub fn generate_set(role: Role, config: &BattleConfig, rng: &mut GameRng) -> AbilitySet {
        TEMPLATES[role.index()]
            .iter()
            .map(|&(name, effect)| {
                let cost = rng.gen_range(config.ability_cost.to_range());
                let range = match effect {
                    EffectType::Damage => config.damage,
                    EffectType::Heal => config.heal,
                    EffectType::Buff => config.buff,
                };
                let value = rng.gen_range(range.to_range());
                Ability::new(name, role, cost, effect, value)
            })
            .collect()
    }

    /// HP change this ability applies before clamping.
    ///
    /// Damage and buff use the raw value; heals are scaled up, saturating
    /// at `i32::MAX`.
    #[must_use]
    pub fn magnitude(&self, config: &BattleConfig) -> i32 {
        match self.effect {
            EffectType::Heal => self.value.saturating_mul(config.heal_multiplier),
            EffectType::Damage | EffectType::Buff => self.value,
        }
    }

    /// Whether `points` covers the cost.
    #[must_use]
    pub fn is_affordable(&self, points: i32) -> bool {
        points >= self.cost
    }
}
