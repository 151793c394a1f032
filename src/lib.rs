//! # waifu-tactics
//!
//! A turn-based tactical battle engine: two sides draft five units each
//! from a shared catalog, then fight in speed order, spending production
//! points on abilities until one side has no unit left standing.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine emits `BattleEvent`s and never renders.
//!    A presentation layer reads state between turns and submits intents.
//!
//! 2. **Deterministic**: Every random decision draws from an injected
//!    `GameRng`, so a seed replays a whole battle.
//!
//! 3. **Single enforcement points**: Drafting goes through
//!    `roster::draft` and turn resolution through
//!    `BattleSession::submit_action`, manual and automated alike.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, sides, errors, actions, events
//! - `units`: Roles, abilities and units
//! - `roster`: Unit catalog, draft rules and the `Player` aggregate
//! - `battle`: Turn order, resolver, victory check, `BattleSession`
//! - `ai`: Automated drafting and combat policy
//!
//! ## Example
//!
//! ```
//! use waifu_tactics::{Action, BattleConfig, BattleSession, SideId};
//!
//! let mut session = BattleSession::new(BattleConfig::default(), 42).unwrap();
//! session.begin_draft().unwrap();
//! session.auto_complete_draft(SideId::A).unwrap();
//! session.auto_complete_draft(SideId::B).unwrap();
//! session.begin_combat().unwrap();
//!
//! let events = session.submit_action(Action::BasicAttack).unwrap();
//! assert!(!events.is_empty());
//! ```

pub mod ai;
pub mod battle;
pub mod core;
pub mod roster;
pub mod units;

pub use crate::core::{
    Action, BattleConfig, BattleEvent, ConfigError, DraftError, GameRng, Outcome, OutcomeKind,
    ResolutionError, SessionError, SideId, SideMap, ValueRange,
};

pub use crate::units::{Ability, EffectType, Role, RoleCounts, Unit, UnitId};

pub use crate::roster::{Catalog, Controller, Player};

pub use crate::battle::{BattleSession, OrderEntry, Phase, TurnContext, TurnOrder, TurnSlot};

pub use crate::ai::{auto_act, auto_draft, BasicAttackPolicy, MyopicPolicy, OpponentPolicy};
