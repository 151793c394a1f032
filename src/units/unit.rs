//! Units: identity plus mutable combat state.
//!
//! A unit's name, role, speed, stats, and abilities are fixed once it is
//! generated. Only HP changes during combat. A defeated unit (HP 0) stays
//! on its roster so turn order and display keep their shape.

use serde::{Deserialize, Serialize};

use crate::core::{BattleConfig, GameRng};

use super::ability::{Ability, AbilitySet};
use super::role::{Role, StatTable};

/// Catalog-unique unit identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// One character in the catalog or on a roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub role: Role,
    pub speed: i32,
    hp: i32,
    max_hp: i32,
    /// Display/draft-comparison stats. Combat never reads them.
    pub stats: StatTable,
    pub abilities: AbilitySet,
}

impl Unit {
    /// Create a unit at full HP with no abilities and flat stats.
    pub fn new(id: UnitId, name: impl Into<String>, role: Role, speed: i32, max_hp: i32) -> Self {
        assert!(max_hp >= 0, "max_hp must be non-negative");
        Self {
            id,
            name: name.into(),
            role,
            speed,
            hp: max_hp,
            max_hp,
            stats: StatTable::default(),
            abilities: AbilitySet::new(),
        }
    }

    /// Roll a unit of `role` from the config ranges.
    pub fn generate(
        id: UnitId,
        name: impl Into<String>,
        role: Role,
        config: &BattleConfig,
        rng: &mut GameRng,
    ) -> Self {
        let speed = rng.gen_range(config.speed.to_range());
        let mut stats = StatTable::new(|_| rng.gen_range(config.stat.to_range()));
        stats[role] += config.specialty_bonus;
        let abilities = Ability::generate_set(role, config, rng);

        Self {
            stats,
            abilities,
            ..Self::new(id, name, role, speed, config.max_hp)
        }
    }

    /// Replace the ability list.
    #[must_use]
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = Ability>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    /// Start at a specific HP, clamped to `0..=max_hp`.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.clamp(0, self.max_hp);
        self
    }

    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// HP above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[must_use]
    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Living and strictly below `fraction` of max HP.
    #[must_use]
    pub fn is_below(&self, fraction: f64) -> bool {
        self.is_alive() && f64::from(self.hp) < f64::from(self.max_hp) * fraction
    }

    /// The stat for `role`.
    #[must_use]
    pub fn stat(&self, role: Role) -> i32 {
        self.stats[role]
    }

    /// The stat matching the unit's own role.
    #[must_use]
    pub fn specialty_stat(&self) -> i32 {
        self.stats[self.role]
    }

    /// Ability at `index`, if any.
    #[must_use]
    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    /// Remove HP, flooring at 0. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Restore HP, capping at max. Returns the HP actually restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp - before
    }
}
