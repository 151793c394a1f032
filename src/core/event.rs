//! Narrated battle events.
//!
//! The engine emits a stream of `BattleEvent`s for the presentation layer.
//! Events carry names as well as ids so they can be narrated without a
//! lookup back into session state.

use serde::{Deserialize, Serialize};

use crate::battle::Phase;
use crate::units::{EffectType, UnitId};

use super::side::SideId;

/// What kind of action produced an `Outcome`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// A paid ability.
    Ability { name: String, effect: EffectType },
    /// The free basic attack.
    BasicAttack,
    /// The actor passed.
    Skip,
}

/// Record of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Acting unit.
    pub actor: UnitId,
    /// Acting unit's name.
    pub actor_name: String,
    /// Acting unit's side.
    pub side: SideId,
    /// What was done.
    pub kind: OutcomeKind,
    /// Affected unit, if any.
    pub target: Option<UnitId>,
    /// Affected unit's name, if any.
    pub target_name: Option<String>,
    /// HP actually removed (damage) or restored (heal); buff value for buffs.
    pub magnitude: i32,
    /// Production points spent.
    pub cost: i32,
}

impl Outcome {
    pub(crate) fn skip(actor: UnitId, actor_name: &str, side: SideId) -> Self {
        Self {
            actor,
            actor_name: actor_name.to_string(),
            side,
            kind: OutcomeKind::Skip,
            target: None,
            target_name: None,
            magnitude: 0,
            cost: 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let target = self.target_name.as_deref().unwrap_or("nobody");
        match &self.kind {
            OutcomeKind::Ability { name, effect: EffectType::Damage } => write!(
                f,
                "{} used {} on {} for {} damage",
                self.actor_name, name, target, self.magnitude
            ),
            OutcomeKind::Ability { name, effect: EffectType::Heal } => write!(
                f,
                "{} used {} on {}, restoring {} HP",
                self.actor_name, name, target, self.magnitude
            ),
            OutcomeKind::Ability { name, effect: EffectType::Buff } => {
                write!(f, "{} used {} (+{})", self.actor_name, name, self.magnitude)
            }
            OutcomeKind::BasicAttack if self.target.is_some() => write!(
                f,
                "{} attacked {} for {} damage",
                self.actor_name, target, self.magnitude
            ),
            OutcomeKind::BasicAttack => write!(f, "{} found nobody to attack", self.actor_name),
            OutcomeKind::Skip => write!(f, "{} skipped the turn", self.actor_name),
        }
    }
}

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The session moved to a new phase.
    PhaseChanged { from: Phase, to: Phase },
    /// A unit joined a side's roster.
    UnitDrafted { side: SideId, unit: UnitId, name: String },
    /// A side received production points.
    ProductionGenerated { side: SideId, amount: i32, total: i32 },
    /// A unit is now the acting unit.
    TurnStarted { side: SideId, unit: UnitId, name: String },
    /// A turn's action was resolved.
    Action(Outcome),
    /// A unit dropped to 0 HP.
    UnitDefeated { side: SideId, unit: UnitId, name: String },
    /// Every unit on `loser` is down.
    BattleWon { winner: SideId, loser: SideId },
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleEvent::PhaseChanged { from, to } => write!(f, "phase {from:?} -> {to:?}"),
            BattleEvent::UnitDrafted { side, name, .. } => write!(f, "{side} drafted {name}"),
            BattleEvent::ProductionGenerated { side, amount, total } => {
                write!(f, "{side} generated {amount} production points ({total} total)")
            }
            BattleEvent::TurnStarted { side, name, .. } => write!(f, "{side}: {name} to act"),
            BattleEvent::Action(outcome) => write!(f, "{outcome}"),
            BattleEvent::UnitDefeated { side, name, .. } => {
                write!(f, "{name} ({side}) was defeated")
            }
            BattleEvent::BattleWon { winner, .. } => write!(f, "{winner} wins the battle"),
        }
    }
}
