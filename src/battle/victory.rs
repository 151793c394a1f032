//! Game-over detection.

use crate::core::{SideId, SideMap};
use crate::roster::Player;

/// The losing side, if any side has every unit at 0 HP.
///
/// Side A is checked first. A single action can only defeat one unit, so
/// both sides can never fall on the same turn.
#[must_use]
pub fn is_over(players: &SideMap<Player>) -> Option<SideId> {
    SideId::both().find(|&side| players[side].is_defeated())
}

/// The winning side, if the battle is over.
#[must_use]
pub fn winner(players: &SideMap<Player>) -> Option<SideId> {
    is_over(players).map(SideId::opponent)
}
