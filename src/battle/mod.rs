//! Combat: turn order, ability resolution, victory and the session state
//! machine that ties the phases together.

pub mod resolver;
pub mod session;
pub mod targeting;
pub mod turn_order;
pub mod victory;

pub use resolver::{basic_attack, resolve, validate, ResolverContext};
pub use session::{BattleSession, OrderEntry, Phase, TurnContext};
pub use targeting::{has_legal_target, legal_targets, living_opponents, Target};
pub use turn_order::{TurnOrder, TurnSlot};
pub use victory::{is_over, winner};
