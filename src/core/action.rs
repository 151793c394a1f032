//! Player intents submitted for the acting unit.
//!
//! An `Action` is what a side wants its current unit to do this turn. The
//! human side submits them directly; the automated policy produces them.

use serde::{Deserialize, Serialize};

use crate::units::UnitId;

/// One turn's intent for the acting unit.
///
/// ```
/// use waifu_tactics::core::Action;
/// use waifu_tactics::units::UnitId;
///
/// let heal = Action::use_ability(1).with_target(UnitId::new(4));
/// assert_eq!(heal, Action::UseAbility { ability: 1, target: Some(UnitId::new(4)) });
/// assert!(Action::Skip.is_free());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Use the acting unit's ability at index `ability`.
    ///
    /// `target` picks a specific legal target; `None` picks one at random.
    UseAbility { ability: usize, target: Option<UnitId> },
    /// Free attack on a random living opponent.
    BasicAttack,
    /// Pass the turn.
    Skip,
}

impl Action {
    /// Use an ability with a random legal target.
    #[must_use]
    pub const fn use_ability(ability: usize) -> Self {
        Action::UseAbility { ability, target: None }
    }

    /// Attach an explicit target. No effect on non-ability actions.
    #[must_use]
    pub fn with_target(self, unit: UnitId) -> Self {
        match self {
            Action::UseAbility { ability, .. } => Action::UseAbility {
                ability,
                target: Some(unit),
            },
            other => other,
        }
    }

    /// Whether the action spends no production points.
    #[must_use]
    pub fn is_free(&self) -> bool {
        !matches!(self, Action::UseAbility { .. })
    }
}
