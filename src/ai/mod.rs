//! Automated opponent: drafting and per-turn action selection.

pub mod combat;
pub mod draft;
pub mod policy;

pub use combat::{auto_act, HEAL_THRESHOLD, PRODUCTION_RESERVE, RANDOM_ABILITY_CHANCE};
pub use draft::auto_draft;
pub use policy::{BasicAttackPolicy, MyopicPolicy, OpponentPolicy};
