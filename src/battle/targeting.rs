//! Legal target sets for abilities and basic attacks.
//!
//! The effect type alone decides who may be targeted:
//! - `Damage`: living units on the opposing side
//! - `Heal`: living units on the acting side below max HP
//! - `Buff`: nobody (buffs never need a target)

use crate::core::{GameRng, SideId, SideMap};
use crate::roster::Player;
use crate::units::{EffectType, UnitId};

/// A unit reference qualified by its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub side: SideId,
    pub unit: UnitId,
}

/// Every legal target for `effect` used by a unit on `acting_side`, in
/// roster order.
#[must_use]
pub fn legal_targets(
    effect: EffectType,
    acting_side: SideId,
    players: &SideMap<Player>,
) -> Vec<Target> {
    match effect {
        EffectType::Damage => living_opponents(acting_side, players),
        EffectType::Heal => players[acting_side]
            .living_units()
            .filter(|u| !u.is_full_hp())
            .map(|u| Target {
                side: acting_side,
                unit: u.id,
            })
            .collect(),
        EffectType::Buff => Vec::new(),
    }
}

/// Living units on the side opposing `acting_side`.
#[must_use]
pub fn living_opponents(acting_side: SideId, players: &SideMap<Player>) -> Vec<Target> {
    let side = acting_side.opponent();
    players[side]
        .living_units()
        .map(|u| Target { side, unit: u.id })
        .collect()
}

/// Whether `effect` can resolve at all in the current state.
#[must_use]
pub fn has_legal_target(
    effect: EffectType,
    acting_side: SideId,
    players: &SideMap<Player>,
) -> bool {
    effect == EffectType::Buff || !legal_targets(effect, acting_side, players).is_empty()
}

/// Pick uniformly at random from `targets`.
pub fn pick(targets: &[Target], rng: &mut GameRng) -> Option<Target> {
    rng.choose(targets).copied()
}
