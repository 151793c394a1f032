//! Draft rules.
//!
//! `draft` is the only way a unit joins a roster. Manual picks and the
//! automated policy both go through it, so the roster-size and role-cap
//! invariants cannot be bypassed.

use rustc_hash::FxHashSet;

use crate::core::DraftError;
use crate::units::{Unit, UnitId};

use super::catalog::Catalog;
use super::player::Player;

/// Check whether `player` may draft `unit`, ignoring catalog claims.
pub fn check_eligible(player: &Player, unit: &Unit) -> Result<(), DraftError> {
    if player.is_full() {
        return Err(DraftError::RosterFull);
    }
    if !player.has_role_capacity(unit.role) {
        return Err(DraftError::RoleCapReached);
    }
    Ok(())
}

/// Check that every unit in `ids` could be drafted by `player`, in order.
///
/// Applies the same rules as `draft` to the whole batch, counting earlier
/// picks in the batch against the roster size and role caps. Nothing is
/// claimed, so a batch is either accepted whole or rejected untouched.
pub fn check_batch(player: &Player, catalog: &Catalog, ids: &[UnitId]) -> Result<(), DraftError> {
    let mut counts = player.role_counts();
    let mut seen = FxHashSet::default();

    for (n, &id) in ids.iter().enumerate() {
        let unit = catalog.check_available(id)?;
        if !seen.insert(id) {
            return Err(DraftError::DuplicateUnit);
        }
        if player.units().len() + n >= player.roster_size() {
            return Err(DraftError::RosterFull);
        }
        if counts[unit.role] >= player.max_per_role() {
            return Err(DraftError::RoleCapReached);
        }
        counts[unit.role] += 1;
    }
    Ok(())
}

/// Move catalog unit `id` onto `player`'s roster.
///
/// Fails without changing anything if the unit is unknown, already on
/// either roster, the roster is full, or the unit's role is at its cap.
pub fn draft<'p>(
    player: &'p mut Player,
    catalog: &mut Catalog,
    id: UnitId,
) -> Result<&'p Unit, DraftError> {
    let unit = catalog.check_available(id)?;
    check_eligible(player, unit)?;

    let unit = catalog.claim(id);
    log::debug!("{} drafted {} ({})", player.name, unit.name, unit.role);
    let slot = player.units().len();
    player.push_unit(unit);

    Ok(&player.units()[slot])
}
