//! The catalog of draftable units.
//!
//! A `Catalog` owns every unit generated for a session and remembers which
//! ones have been claimed by either side. Units keep catalog order (by id),
//! so `available` is stable for display.

use rustc_hash::FxHashSet;

use crate::core::{BattleConfig, DraftError, GameRng};
use crate::units::{Role, Unit, UnitId};

/// Built-in name pool. Names repeat with a numeric suffix once exhausted.
const NAMES: [&str; 18] = [
    "Sakura", "Hinata", "Yuki", "Aiko", "Rei", "Asuka", "Mikasa", "Nezuko", "Rem",
    "Emilia", "Megumin", "Kurisu", "Mai", "Holo", "Saber", "Rin", "Miku", "Tohru",
];

/// Pool of units available to draft.
///
/// ## Example
///
/// ```
/// use waifu_tactics::core::{BattleConfig, GameRng};
/// use waifu_tactics::roster::Catalog;
///
/// let config = BattleConfig::default();
/// let catalog = Catalog::generate(&config, &mut GameRng::new(42));
///
/// assert_eq!(catalog.len(), 3 * config.units_per_role);
/// assert_eq!(catalog.available().count(), catalog.len());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    units: Vec<Unit>,
    claimed: FxHashSet<UnitId>,
}

impl Catalog {
    /// Create a catalog from pre-built units.
    ///
    /// Panics if two units share an id or a name.
    #[must_use]
    pub fn from_units(units: Vec<Unit>) -> Self {
        let mut ids = FxHashSet::default();
        let mut names = FxHashSet::default();
        for unit in &units {
            if !ids.insert(unit.id) {
                panic!("Unit with ID {:?} already in catalog", unit.id);
            }
            if !names.insert(unit.name.as_str()) {
                panic!("Unit named {:?} already in catalog", unit.name);
            }
        }

        Self {
            units,
            claimed: FxHashSet::default(),
        }
    }

    /// Generate `units_per_role` units for every role.
    ///
    /// Roles are interleaved (War, Production, Support, War, ...) so the
    /// catalog reads as a mixed pool. Names are shuffled from the pool.
    pub fn generate(config: &BattleConfig, rng: &mut GameRng) -> Self {
        let total = config.units_per_role * Role::ALL.len();

        let mut names: Vec<&str> = NAMES.to_vec();
        rng.shuffle(&mut names);

        let units = (0..total)
            .map(|i| {
                let role = Role::ALL[i % Role::ALL.len()];
                let base = names[i % names.len()];
                let name = match i / names.len() {
                    0 => base.to_string(),
                    round => format!("{} {}", base, round + 1),
                };
                Unit::generate(UnitId::new(i as u32), name, role, config, rng)
            })
            .collect();

        Self::from_units(units)
    }

    /// Get a unit by id, claimed or not.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Whether either side has drafted this unit.
    #[must_use]
    pub fn is_claimed(&self, id: UnitId) -> bool {
        self.claimed.contains(&id)
    }

    /// Units neither side has drafted, in catalog order.
    pub fn available(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !self.claimed.contains(&u.id))
    }

    /// Unclaimed units of one role, in catalog order.
    pub fn available_by_role(&self, role: Role) -> impl Iterator<Item = &Unit> {
        self.available().filter(move |u| u.role == role)
    }

    /// Total units, claimed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Look up an unclaimed unit, distinguishing unknown from taken.
    pub(crate) fn check_available(&self, id: UnitId) -> Result<&Unit, DraftError> {
        let unit = self.get(id).ok_or(DraftError::UnknownUnit)?;
        if self.is_claimed(id) {
            return Err(DraftError::DuplicateUnit);
        }
        Ok(unit)
    }

    /// Mark a unit drafted and hand out its copy. Callers validate first.
    pub(crate) fn claim(&mut self, id: UnitId) -> Unit {
        let unit = self
            .get(id)
            .cloned()
            .unwrap_or_else(|| panic!("claimed unknown unit {id}"));
        assert!(self.claimed.insert(id), "unit {id} claimed twice");
        unit
    }
}
