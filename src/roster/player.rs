//! The per-side aggregate: roster, production ledger, controller.
//!
//! A `Player` only gains units through `roster::draft`, which is the single
//! place the roster-size and role-cap invariants are enforced.

use serde::{Deserialize, Serialize};

use crate::core::{BattleConfig, ResolutionError};
use crate::units::{Role, RoleCounts, Unit, UnitId};

/// Who decides a side's draft picks and actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Intents come from outside the engine.
    Human,
    /// Intents come from the automated policy.
    Automated,
}

/// One side of the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub controller: Controller,
    roster: Vec<Unit>,
    role_counts: RoleCounts,
    roster_size: usize,
    max_per_role: usize,
    production_points: i32,
}

impl Player {
    /// Create an empty side with the config's caps and starting points.
    pub fn new(name: impl Into<String>, controller: Controller, config: &BattleConfig) -> Self {
        Self {
            name: name.into(),
            controller,
            roster: Vec::new(),
            role_counts: RoleCounts::default(),
            roster_size: config.roster_size,
            max_per_role: config.max_per_role,
            production_points: config.starting_production,
        }
    }

    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.controller == Controller::Automated
    }

    // === Roster ===

    /// Units in roster (formation) order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.roster
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.iter().find(|u| u.id == id)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.roster.iter_mut().find(|u| u.id == id)
    }

    #[must_use]
    pub fn role_counts(&self) -> RoleCounts {
        self.role_counts
    }

    #[must_use]
    pub fn roster_size(&self) -> usize {
        self.roster_size
    }

    #[must_use]
    pub fn max_per_role(&self) -> usize {
        self.max_per_role
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.roster_size
    }

    /// Whether another unit of `role` fits under the cap.
    #[must_use]
    pub fn has_role_capacity(&self, role: Role) -> bool {
        self.role_counts[role] < self.max_per_role
    }

    /// Append a drafted unit. Only `roster::draft` calls this.
    pub(super) fn push_unit(&mut self, unit: Unit) {
        assert!(
            !self.is_full() && self.has_role_capacity(unit.role),
            "roster invariant violated adding {} to {}",
            unit.name,
            self.name
        );
        self.role_counts[unit.role] += 1;
        self.roster.push(unit);
    }

    /// Reorder the roster to match `order`.
    ///
    /// Returns false (leaving the roster untouched) unless `order` names
    /// every roster unit exactly once.
    pub(crate) fn arrange(&mut self, order: &[UnitId]) -> bool {
        if order.len() != self.roster.len() {
            return false;
        }
        let mut arranged = Vec::with_capacity(order.len());
        for id in order {
            match self.roster.iter().position(|u| u.id == *id) {
                Some(pos) if !arranged.iter().any(|u: &Unit| u.id == *id) => {
                    arranged.push(self.roster[pos].clone());
                }
                _ => return false,
            }
        }
        self.roster = arranged;
        true
    }

    // === Combat status ===

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.roster.iter().filter(|u| u.is_alive())
    }

    #[must_use]
    pub fn has_living_units(&self) -> bool {
        self.roster.iter().any(Unit::is_alive)
    }

    /// Every unit is at 0 HP. False for an empty roster.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        !self.roster.is_empty() && !self.has_living_units()
    }

    // === Production ledger ===

    #[must_use]
    pub fn production_points(&self) -> i32 {
        self.production_points
    }

    /// Points generated per tick: `per_unit` for each living Production unit.
    #[must_use]
    pub fn production_rate(&self, per_unit: i32) -> i32 {
        let producers = self
            .living_units()
            .filter(|u| u.role == Role::Production)
            .count() as i32;
        per_unit.saturating_mul(producers)
    }

    /// Add one tick of production. Returns the amount generated.
    pub(crate) fn generate_production(&mut self, per_unit: i32) -> i32 {
        let generated = self.production_rate(per_unit);
        self.production_points = self.production_points.saturating_add(generated);
        generated
    }

    /// Deduct `cost`, or fail without touching the ledger.
    pub(crate) fn spend(&mut self, cost: i32) -> Result<(), ResolutionError> {
        if self.production_points < cost {
            return Err(ResolutionError::InsufficientResources {
                have: self.production_points,
                need: cost,
            });
        }
        self.production_points -= cost;
        Ok(())
    }

    /// Overwrite the ledger (scenario setup).
    pub fn set_production_points(&mut self, points: i32) {
        assert!(points >= 0, "production points cannot be negative");
        self.production_points = points;
    }
}
