//! Battle configuration.
//!
//! Every numeric constant that shapes a battle (roster size, HP pool, roll
//! ranges) is carried in `BattleConfig` rather than hardcoded. Sessions take
//! a config at creation and validate it once.
//!
//! ```
//! use waifu_tactics::core::{BattleConfig, ValueRange};
//!
//! let config = BattleConfig::default()
//!     .with_starting_production(10)
//!     .with_speed_range(ValueRange::new(5, 15));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.roster_size, 5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::error::ConfigError;

/// Inclusive integer range used for randomized rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    /// Create a new inclusive range.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A range containing a single value.
    #[must_use]
    pub const fn fixed(value: i32) -> Self {
        Self::new(value, value)
    }

    /// Check whether `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Convert to a std inclusive range for sampling.
    #[must_use]
    pub fn to_range(self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    fn check(self, name: &'static str, floor: i32) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::EmptyRange { name });
        }
        if self.min < floor {
            return Err(ConfigError::OutOfBounds { name, floor });
        }
        Ok(())
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Units per side once drafting completes.
    pub roster_size: usize,

    /// Maximum units of a single role on one side.
    pub max_per_role: usize,

    /// Production points each side starts combat with.
    pub starting_production: i32,

    /// Production points generated per living Production-role unit per tick.
    pub production_per_unit: i32,

    /// HP pool every unit starts with.
    pub max_hp: i32,

    /// Speed roll for generated units.
    pub speed: ValueRange,

    /// Base roll for each of a unit's three role stats.
    pub stat: ValueRange,

    /// Bonus added to the stat matching the unit's own role.
    pub specialty_bonus: i32,

    /// Ability cost roll.
    pub ability_cost: ValueRange,

    /// Damage-type ability value roll.
    pub damage: ValueRange,

    /// Heal-type ability value roll (before `heal_multiplier`).
    pub heal: ValueRange,

    /// Buff-type ability value roll.
    pub buff: ValueRange,

    /// Factor applied to a heal ability's raw value when it resolves.
    pub heal_multiplier: i32,

    /// Damage roll for the free basic attack.
    pub basic_attack: ValueRange,

    /// Catalog units generated for each role.
    pub units_per_role: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            roster_size: 5,
            max_per_role: 3,
            starting_production: 5,
            production_per_unit: 2,
            max_hp: 100,
            speed: ValueRange::new(85, 115),
            stat: ValueRange::new(1, 10),
            specialty_bonus: 5,
            ability_cost: ValueRange::new(1, 4),
            damage: ValueRange::new(15, 30),
            heal: ValueRange::new(1, 3),
            buff: ValueRange::new(1, 3),
            heal_multiplier: 10,
            basic_attack: ValueRange::new(5, 15),
            units_per_role: 6,
        }
    }
}

impl BattleConfig {
    /// Set the roster size.
    #[must_use]
    pub fn with_roster_size(mut self, size: usize) -> Self {
        self.roster_size = size;
        self
    }

    /// Set the per-role cap.
    #[must_use]
    pub fn with_max_per_role(mut self, cap: usize) -> Self {
        self.max_per_role = cap;
        self
    }

    /// Set the starting production points.
    #[must_use]
    pub fn with_starting_production(mut self, points: i32) -> Self {
        self.starting_production = points;
        self
    }

    /// Set the HP pool.
    #[must_use]
    pub fn with_max_hp(mut self, hp: i32) -> Self {
        self.max_hp = hp;
        self
    }

    /// Set the speed roll.
    #[must_use]
    pub fn with_speed_range(mut self, speed: ValueRange) -> Self {
        self.speed = speed;
        self
    }

    /// Set the damage-type ability roll.
    #[must_use]
    pub fn with_damage_range(mut self, damage: ValueRange) -> Self {
        self.damage = damage;
        self
    }

    /// Set the heal-type ability roll.
    #[must_use]
    pub fn with_heal_range(mut self, heal: ValueRange) -> Self {
        self.heal = heal;
        self
    }

    /// Set the basic attack roll.
    #[must_use]
    pub fn with_basic_attack_range(mut self, range: ValueRange) -> Self {
        self.basic_attack = range;
        self
    }

    /// Set how many catalog units are generated per role.
    #[must_use]
    pub fn with_units_per_role(mut self, count: usize) -> Self {
        self.units_per_role = count;
        self
    }

    /// Check the configuration for values no battle can be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_size == 0 {
            return Err(ConfigError::EmptyRoster);
        }
        if self.max_per_role == 0 || self.max_per_role * 3 < self.roster_size {
            return Err(ConfigError::RoleCapTooSmall {
                max_per_role: self.max_per_role,
                roster_size: self.roster_size,
            });
        }
        if self.max_hp <= 0 {
            return Err(ConfigError::NonPositive { name: "max_hp" });
        }
        if self.starting_production < 0 {
            return Err(ConfigError::OutOfBounds { name: "starting_production", floor: 0 });
        }
        if self.production_per_unit < 0 {
            return Err(ConfigError::OutOfBounds { name: "production_per_unit", floor: 0 });
        }
        if self.heal_multiplier <= 0 {
            return Err(ConfigError::NonPositive { name: "heal_multiplier" });
        }
        if self.specialty_bonus < 0 {
            return Err(ConfigError::OutOfBounds { name: "specialty_bonus", floor: 0 });
        }
        if self.units_per_role == 0 {
            return Err(ConfigError::NonPositive { name: "units_per_role" });
        }

        self.speed.check("speed", 0)?;
        self.stat.check("stat", 0)?;
        self.ability_cost.check("ability_cost", 0)?;
        self.damage.check("damage", 0)?;
        self.heal.check("heal", 0)?;
        self.buff.check("buff", 0)?;
        self.basic_attack.check("basic_attack", 0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BattleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roster_size, 5);
        assert_eq!(config.max_per_role, 3);
        assert_eq!(config.max_hp, 100);
        assert_eq!(config.heal_multiplier, 10);
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::default()
            .with_roster_size(3)
            .with_max_per_role(1)
            .with_starting_production(10)
            .with_speed_range(ValueRange::new(5, 15));

        assert_eq!(config.roster_size, 3);
        assert_eq!(config.max_per_role, 1);
        assert_eq!(config.starting_production, 10);
        assert_eq!(config.speed, ValueRange::new(5, 15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_role_cap_must_cover_roster() {
        let config = BattleConfig::default().with_max_per_role(1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::RoleCapTooSmall { max_per_role: 1, roster_size: 5 })
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        let config = BattleConfig::default().with_damage_range(ValueRange::new(10, 5));
        assert_eq!(config.validate(), Err(ConfigError::EmptyRange { name: "damage" }));
    }

    #[test]
    fn test_zero_roster_rejected() {
        let config = BattleConfig::default().with_roster_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyRoster));
    }

    #[test]
    fn test_value_range() {
        let range = ValueRange::new(2, 4);
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert_eq!(format!("{}", range), "2..=4");
        assert_eq!(ValueRange::fixed(7).to_range(), 7..=7);
    }

    #[test]
    fn test_config_serde() {
        let config = BattleConfig::default().with_max_hp(80);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BattleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
