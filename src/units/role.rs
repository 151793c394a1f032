//! Unit roles and per-role tallies.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A unit's specialty. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    War,
    Production,
    Support,
}

impl Role {
    /// All roles, in draft-seeding order.
    pub const ALL: [Role; 3] = [Role::War, Role::Production, Role::Support];

    /// Dense index for per-role tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Role::War => 0,
            Role::Production => 1,
            Role::Support => 2,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::War => write!(f, "War"),
            Role::Production => write!(f, "Production"),
            Role::Support => write!(f, "Support"),
        }
    }
}

/// Value stored per role, indexed by `Role`.
///
/// Used both for role counts during drafting and for a unit's stat table.
///
/// ```
/// use waifu_tactics::units::{Role, RoleTable};
///
/// let mut counts: RoleTable<usize> = RoleTable::default();
/// counts[Role::Support] += 1;
/// assert_eq!(counts[Role::Support], 1);
/// assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleTable<T> {
    values: [T; 3],
}

impl<T> RoleTable<T> {
    /// Build a table from a per-role factory.
    pub fn new(mut factory: impl FnMut(Role) -> T) -> Self {
        Self {
            values: Role::ALL.map(&mut factory),
        }
    }

    /// Iterate over (Role, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<Role> for RoleTable<T> {
    type Output = T;

    fn index(&self, role: Role) -> &Self::Output {
        &self.values[role.index()]
    }
}

impl<T> IndexMut<Role> for RoleTable<T> {
    fn index_mut(&mut self, role: Role) -> &mut Self::Output {
        &mut self.values[role.index()]
    }
}

/// Number of units per role on one side.
pub type RoleCounts = RoleTable<usize>;

/// A unit's three named stats, one per role.
pub type StatTable = RoleTable<i32>;

impl RoleCounts {
    /// Total units across all roles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_index_matches_all() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Role::War), "War");
        assert_eq!(format!("{}", Role::Production), "Production");
        assert_eq!(format!("{}", Role::Support), "Support");
    }

    #[test]
    fn test_counts_total() {
        let mut counts = RoleCounts::default();
        counts[Role::War] = 2;
        counts[Role::Support] = 1;
        assert_eq!(counts.total(), 3);
        assert_eq!(counts[Role::Production], 0);
    }

    #[test]
    fn test_table_factory() {
        let table = RoleTable::new(|r| r.index() as i32 * 10);
        assert_eq!(table[Role::War], 0);
        assert_eq!(table[Role::Production], 10);
        assert_eq!(table[Role::Support], 20);
    }
}
