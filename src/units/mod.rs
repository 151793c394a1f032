//! Unit model: roles, abilities, and units.
//!
//! ## Key Types
//!
//! - `Role`: War, Production, or Support
//! - `Ability`: paid action with a damage, heal, or buff effect
//! - `Unit`: a character with fixed identity and mutable HP
//!
//! Each unit knows exactly the two abilities of its own role.

pub mod ability;
pub mod role;
pub mod unit;

pub use ability::{Ability, AbilitySet, EffectType};
pub use role::{Role, RoleCounts, RoleTable, StatTable};
pub use unit::{Unit, UnitId};
