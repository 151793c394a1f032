//! Automated drafting.
//!
//! Two phases: seed one unit of each role, then fill the remaining slots
//! from randomly chosen roles that still have both capacity and supply.
//! Under ample supply this always yields at least one unit per role.

use crate::core::GameRng;
use crate::roster::Player;
use crate::units::{Role, RoleCounts, Unit, UnitId};

/// Choose units for `player` from `available`.
///
/// Returns at most the player's open roster slots, never exceeding a role
/// cap given the player's current counts. Fewer are returned when supply
/// runs out. The picks are not applied; feed them through `roster::draft`.
pub fn auto_draft(player: &Player, available: &[&Unit], rng: &mut GameRng) -> Vec<UnitId> {
    let open_slots = player.roster_size().saturating_sub(player.units().len());
    let cap = player.max_per_role();

    let mut pool: Vec<&Unit> = available.to_vec();
    rng.shuffle(&mut pool);

    let mut counts: RoleCounts = player.role_counts();
    let mut selected: Vec<UnitId> = Vec::with_capacity(open_slots);

    // First unclaimed pool entry of `role` not yet selected.
    let next_of = |role: Role, selected: &[UnitId]| {
        pool.iter()
            .find(|u| u.role == role && !selected.contains(&u.id))
            .map(|u| u.id)
    };

    // Phase 1: one of each role.
    for role in Role::ALL {
        if selected.len() >= open_slots {
            break;
        }
        if counts[role] < cap {
            if let Some(id) = next_of(role, &selected) {
                selected.push(id);
                counts[role] += 1;
            }
        }
    }

    // Phase 2: random eligible role until full or nothing fits.
    while selected.len() < open_slots {
        let eligible: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|&r| counts[r] < cap && next_of(r, &selected).is_some())
            .collect();

        let Some(&role) = rng.choose(&eligible) else {
            break;
        };
        if let Some(id) = next_of(role, &selected) {
            selected.push(id);
            counts[role] += 1;
        }
    }

    selected
}
