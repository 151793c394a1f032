//! Core engine types: sides, RNG, configuration, intents, events, errors.
//!
//! These are the building blocks shared by the roster, battle, and policy
//! modules. Numeric tuning lives in `BattleConfig`.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod rng;
pub mod side;

pub use action::Action;
pub use config::{BattleConfig, ValueRange};
pub use error::{ConfigError, DraftError, ResolutionError, SessionError};
pub use event::{BattleEvent, Outcome, OutcomeKind};
pub use rng::GameRng;
pub use side::{InvalidSide, SideId, SideMap};
