//! Side identification and per-side data storage.
//!
//! ## SideId
//!
//! A battle always has exactly two sides. `SideId::A` drafts first and wins
//! speed ties in turn order; `SideId::B` is the other side.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `SideId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier for one of the two sides in a battle.
///
/// Only `A` and `B` exist; deserialization rejects any other index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct SideId(u8);

impl SideId {
    /// The first side (human-controlled by default).
    pub const A: SideId = SideId(0);

    /// The second side (automated by default).
    pub const B: SideId = SideId(1);

    /// Get the raw side index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> SideId {
        match self.0 {
            0 => SideId::B,
            _ => SideId::A,
        }
    }

    /// Both sides, in tie-breaking order.
    pub fn both() -> impl Iterator<Item = SideId> {
        [SideId::A, SideId::B].into_iter()
    }
}

/// A side index other than 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSide(pub u8);

impl std::fmt::Display for InvalidSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no side with index {}", self.0)
    }
}

impl std::error::Error for InvalidSide {}

impl TryFrom<u8> for SideId {
    type Error = InvalidSide;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(SideId::A),
            1 => Ok(SideId::B),
            other => Err(InvalidSide(other)),
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            SideId::A => write!(f, "Side A"),
            _ => write!(f, "Side B"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use waifu_tactics::core::{SideId, SideMap};
///
/// let mut points: SideMap<i32> = SideMap::new(|_| 5);
/// points[SideId::B] += 2;
/// assert_eq!(points[SideId::A], 5);
/// assert_eq!(points[SideId::B], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(SideId) -> T) -> Self {
        Self {
            data: [factory(SideId::A), factory(SideId::B)],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: SideId) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: SideId) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (SideId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SideId, &T)> {
        SideId::both().zip(self.data.iter())
    }

    /// Iterate over (SideId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SideId, &mut T)> {
        SideId::both().zip(self.data.iter_mut())
    }
}

impl<T> Index<SideId> for SideMap<T> {
    type Output = T;

    fn index(&self, side: SideId) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<SideId> for SideMap<T> {
    fn index_mut(&mut self, side: SideId) -> &mut Self::Output {
        self.get_mut(side)
    }
}
