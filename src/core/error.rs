//! Error types for battle operations.
//!
//! All failures are deterministic given the current state and inputs, and
//! none of them mutate state. Programmer errors (advancing the cursor with
//! nobody alive, an over-capacity roster) are panics, not variants here.

use crate::battle::Phase;

use super::side::SideId;

/// Reasons a draft pick is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DraftError {
    /// The unit is already on one of the two rosters.
    DuplicateUnit,
    /// The side already has a full roster.
    RosterFull,
    /// The side already has the maximum number of units of this role.
    RoleCapReached,
    /// No catalog unit has the requested id.
    UnknownUnit,
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::DuplicateUnit => write!(f, "unit has already been drafted"),
            DraftError::RosterFull => write!(f, "roster is full"),
            DraftError::RoleCapReached => write!(f, "role cap reached for this side"),
            DraftError::UnknownUnit => write!(f, "no such unit in the catalog"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Reasons an ability cannot be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionError {
    /// The acting side cannot pay the ability's cost.
    InsufficientResources { have: i32, need: i32 },
    /// No unit is a legal target for the ability's effect type.
    NoValidTarget,
    /// An explicit target was given that is not in the legal target set.
    InvalidTarget,
    /// The acting unit has no ability at the requested index.
    UnknownAbility,
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::InsufficientResources { have, need } => {
                write!(f, "not enough production points (have {have}, need {need})")
            }
            ResolutionError::NoValidTarget => write!(f, "no valid target for this ability"),
            ResolutionError::InvalidTarget => write!(f, "chosen target is not a legal target"),
            ResolutionError::UnknownAbility => write!(f, "unit has no such ability"),
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Rejected battle configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Roster size of zero.
    EmptyRoster,
    /// Three roles at `max_per_role` each cannot fill the roster.
    RoleCapTooSmall { max_per_role: usize, roster_size: usize },
    /// A roll range with `min > max`.
    EmptyRange { name: &'static str },
    /// A value below its allowed floor.
    OutOfBounds { name: &'static str, floor: i32 },
    /// A value that must be strictly positive.
    NonPositive { name: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyRoster => write!(f, "roster size must be at least 1"),
            ConfigError::RoleCapTooSmall { max_per_role, roster_size } => write!(
                f,
                "max_per_role {max_per_role} cannot fill a roster of {roster_size}"
            ),
            ConfigError::EmptyRange { name } => write!(f, "range `{name}` is empty"),
            ConfigError::OutOfBounds { name, floor } => {
                write!(f, "`{name}` must be at least {floor}")
            }
            ConfigError::NonPositive { name } => write!(f, "`{name}` must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by the battle session boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionError {
    /// Draft rule violation.
    Draft(DraftError),
    /// Ability resolution failure.
    Resolution(ResolutionError),
    /// Operation not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// A side cannot leave the draft yet.
    DraftIncomplete { side: SideId },
    /// Formation order is not a permutation of the side's roster.
    InvalidFormation,
    /// `play_automated_turn` called while a human-controlled unit is acting.
    NotAutomated { side: SideId },
    /// The battle is already resolved.
    GameOver,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Draft(e) => write!(f, "draft rejected: {e}"),
            SessionError::Resolution(e) => write!(f, "action rejected: {e}"),
            SessionError::WrongPhase { expected, actual } => {
                write!(f, "expected phase {expected:?}, session is in {actual:?}")
            }
            SessionError::DraftIncomplete { side } => {
                write!(f, "{side} has not finished drafting")
            }
            SessionError::InvalidFormation => {
                write!(f, "formation must be a permutation of the roster")
            }
            SessionError::NotAutomated { side } => {
                write!(f, "{side} is not controlled by the automated policy")
            }
            SessionError::GameOver => write!(f, "battle is already over"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Draft(e) => Some(e),
            SessionError::Resolution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DraftError> for SessionError {
    fn from(e: DraftError) -> Self {
        SessionError::Draft(e)
    }
}

impl From<ResolutionError> for SessionError {
    fn from(e: ResolutionError) -> Self {
        SessionError::Resolution(e)
    }
}
