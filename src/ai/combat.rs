//! Per-turn action choice for automated units.
//!
//! The rules are checked in order and the first match wins:
//! 1. A Support unit heals when an ally is below half HP and a heal is affordable.
//! 2. A damage ability is used when one is affordable and the side holds at
//!    least `PRODUCTION_RESERVE` points.
//! 3. With probability `RANDOM_ABILITY_CHANCE`, any affordable ability is used.
//! 4. Otherwise the unit makes a basic attack.
//!
//! There is no lookahead and no opponent modeling.

use crate::core::{Action, GameRng, SideId, SideMap};
use crate::roster::Player;
use crate::units::{EffectType, Role, Unit};

/// HP fraction under which a Support unit prioritises healing.
pub const HEAL_THRESHOLD: f64 = 0.5;

/// Production points a side must hold before spending on damage.
pub const PRODUCTION_RESERVE: i32 = 2;

/// Chance of using a random affordable ability when no rule above applies.
pub const RANDOM_ABILITY_CHANCE: f64 = 0.3;

/// Indices of `unit`'s abilities affordable with `points`, optionally
/// restricted to one effect type.
fn affordable(unit: &Unit, points: i32, effect: Option<EffectType>) -> Vec<usize> {
    unit.abilities
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_affordable(points))
        .filter(|(_, a)| effect.map_or(true, |e| a.effect == e))
        .map(|(i, _)| i)
        .collect()
}

fn random_ability(candidates: &[usize], rng: &mut GameRng) -> Option<Action> {
    rng.choose(candidates).map(|&i| Action::use_ability(i))
}

/// Choose an action for `unit` acting for `side`.
///
/// Targets are left to the resolver's random pick.
pub fn auto_act(unit: &Unit, side: SideId, players: &SideMap<Player>, rng: &mut GameRng) -> Action {
    let own = &players[side];
    let points = own.production_points();

    if unit.role == Role::Support && own.living_units().any(|u| u.is_below(HEAL_THRESHOLD)) {
        let heals = affordable(unit, points, Some(EffectType::Heal));
        if let Some(action) = random_ability(&heals, rng) {
            return action;
        }
    }

    if points >= PRODUCTION_RESERVE {
        let hits = affordable(unit, points, Some(EffectType::Damage));
        if let Some(action) = random_ability(&hits, rng) {
            return action;
        }
    }

    let any = affordable(unit, points, None);
    if !any.is_empty() && rng.gen_bool(RANDOM_ABILITY_CHANCE) {
        if let Some(action) = random_ability(&any, rng) {
            return action;
        }
    }

    Action::BasicAttack
}
