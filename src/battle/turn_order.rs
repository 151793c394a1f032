//! Speed-ordered action sequence with a rotating cursor.
//!
//! The order is built once when combat starts and never rebuilt. Defeated
//! units keep their slot; the cursor skips them.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::core::SideId;
use crate::units::{Unit, UnitId};

/// One entry in the action order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnSlot {
    pub unit: UnitId,
    pub side: SideId,
    pub speed: i32,
}

/// The fixed action order for a battle.
///
/// ```
/// use waifu_tactics::battle::TurnOrder;
/// use waifu_tactics::core::SideId;
/// use waifu_tactics::units::{Role, Unit, UnitId};
///
/// let a = vec![Unit::new(UnitId::new(0), "Slow", Role::War, 90, 100)];
/// let b = vec![Unit::new(UnitId::new(1), "Fast", Role::War, 110, 100)];
///
/// let order = TurnOrder::build(&a, &b);
/// assert_eq!(order.current().unit, UnitId::new(1));
/// assert_eq!(order.current().side, SideId::B);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    slots: Vec<TurnSlot>,
    cursor: usize,
}

impl TurnOrder {
    /// Order both rosters by speed, fastest first.
    ///
    /// Ties keep insertion order: all of side A's units (in roster order)
    /// come before side B's. Panics if both rosters are empty.
    #[must_use]
    pub fn build(side_a: &[Unit], side_b: &[Unit]) -> Self {
        let mut slots: Vec<TurnSlot> = side_a
            .iter()
            .map(|u| (u, SideId::A))
            .chain(side_b.iter().map(|u| (u, SideId::B)))
            .map(|(u, side)| TurnSlot {
                unit: u.id,
                side,
                speed: u.speed,
            })
            .collect();
        assert!(!slots.is_empty(), "turn order needs at least one unit");

        // sort_by_key is stable, which gives the tie-break for free.
        slots.sort_by_key(|s| Reverse(s.speed));

        Self { slots, cursor: 0 }
    }

    /// All slots in action order.
    #[must_use]
    pub fn slots(&self) -> &[TurnSlot] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the acting slot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The acting slot.
    #[must_use]
    pub fn current(&self) -> TurnSlot {
        self.slots[self.cursor]
    }

    /// Leave the cursor where it is if that unit is alive, otherwise move
    /// forward to the next living one.
    ///
    /// Panics if no unit in the order is alive.
    pub fn settle(&mut self, is_alive: impl Fn(&TurnSlot) -> bool) -> TurnSlot {
        for _ in 0..self.slots.len() {
            if is_alive(&self.slots[self.cursor]) {
                return self.slots[self.cursor];
            }
            self.cursor = (self.cursor + 1) % self.slots.len();
        }
        panic!("turn order has no living unit to act");
    }

    /// Move to the next living unit after the current one, wrapping.
    ///
    /// The current unit itself is considered last, so a lone survivor acts
    /// again. Panics if no unit in the order is alive.
    pub fn advance(&mut self, is_alive: impl Fn(&TurnSlot) -> bool) -> TurnSlot {
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.settle(is_alive)
    }
}
