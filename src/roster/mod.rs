//! Roster system: the unit catalog, draft rules, and the per-side aggregate.
//!
//! ## Key Types
//!
//! - `Catalog`: generated pool of units plus claim bookkeeping
//! - `Player`: one side's roster, role counts, and production ledger
//! - `draft`: the single entry point that adds a unit to a roster

pub mod catalog;
pub mod draft;
pub mod player;

pub use catalog::Catalog;
pub use draft::{check_batch, check_eligible, draft};
pub use player::{Controller, Player};
