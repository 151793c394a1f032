//! Pluggable decision-making for automated sides.

use crate::core::{Action, GameRng, SideId, SideMap};
use crate::roster::Player;
use crate::units::{Unit, UnitId};

use super::combat::auto_act;
use super::draft::auto_draft;

/// How an automated side drafts and fights.
///
/// Implementations must be pure functions of their inputs plus `rng`, so a
/// seeded session replays identically.
pub trait OpponentPolicy: Send + Sync {
    /// Units to claim for `player` from `available`.
    fn draft(&self, player: &Player, available: &[&Unit], rng: &mut GameRng) -> Vec<UnitId>;

    /// Action for `unit`, whose turn it is on `side`.
    fn act(
        &self,
        unit: &Unit,
        side: SideId,
        players: &SideMap<Player>,
        rng: &mut GameRng,
    ) -> Action;
}

/// Single-step rule policy: balanced seed-then-fill drafting and the
/// heal / damage / random / basic-attack priority list in combat.
#[derive(Clone, Copy, Debug, Default)]
pub struct MyopicPolicy;

impl OpponentPolicy for MyopicPolicy {
    fn draft(&self, player: &Player, available: &[&Unit], rng: &mut GameRng) -> Vec<UnitId> {
        auto_draft(player, available, rng)
    }

    fn act(
        &self,
        unit: &Unit,
        side: SideId,
        players: &SideMap<Player>,
        rng: &mut GameRng,
    ) -> Action {
        auto_act(unit, side, players, rng)
    }
}

/// Always makes a basic attack. Drafts in catalog order.
///
/// Useful as a baseline opponent and for deterministic tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicAttackPolicy;

impl OpponentPolicy for BasicAttackPolicy {
    fn draft(&self, player: &Player, available: &[&Unit], _rng: &mut GameRng) -> Vec<UnitId> {
        let mut counts = player.role_counts();
        let mut open = player.roster_size().saturating_sub(player.units().len());
        let mut picks = Vec::new();
        for unit in available {
            if open == 0 {
                break;
            }
            if counts[unit.role] < player.max_per_role() {
                counts[unit.role] += 1;
                open -= 1;
                picks.push(unit.id);
            }
        }
        picks
    }

    fn act(
        &self,
        _unit: &Unit,
        _side: SideId,
        _players: &SideMap<Player>,
        _rng: &mut GameRng,
    ) -> Action {
        Action::BasicAttack
    }
}
