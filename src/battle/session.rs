//! The battle session state machine.
//!
//! `BattleSession` owns the authoritative state of one battle and moves it
//! through `Start → Draft → Formation → Combat → Resolved`. Every mutating
//! operation checks the phase first and returns the events it produced;
//! the full history is kept in `events()`.
//!
//! ## Turn flow
//!
//! Each `submit_action` resolves the acting unit's intent, reports any
//! defeat, checks for game over and only then advances the cursor. A side
//! receives production when the cursor comes to rest on slot 0 or on a unit
//! of the other side than the one that just acted.
//!
//! ## Example
//!
//! ```
//! use waifu_tactics::battle::{BattleSession, Phase};
//! use waifu_tactics::core::BattleConfig;
//!
//! let mut session = BattleSession::new(BattleConfig::default(), 7).unwrap();
//! let winner = session.run_to_completion(10_000).unwrap();
//!
//! assert_eq!(session.phase(), Phase::Resolved);
//! assert!(winner.is_some());
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::ai::{MyopicPolicy, OpponentPolicy};
use crate::core::{
    Action, BattleConfig, BattleEvent, ConfigError, GameRng, Outcome, SessionError, SideId,
    SideMap,
};
use crate::roster::{check_batch, check_eligible, draft, Catalog, Controller, Player};
use crate::units::{Role, Unit, UnitId};

use super::resolver::{basic_attack, resolve, ResolverContext};
use super::turn_order::{TurnOrder, TurnSlot};
use super::victory::is_over;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Draft,
    Formation,
    Combat,
    Resolved,
}

/// One entry of the action order bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderEntry {
    pub slot: TurnSlot,
    pub name: String,
    pub alive: bool,
    pub is_current: bool,
}

/// The acting unit and its side's resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnContext {
    pub unit: UnitId,
    pub name: String,
    pub side: SideId,
    pub controller: Controller,
    pub production_points: i32,
    pub production_rate: i32,
}

/// One battle between the human side (A) and the automated side (B).
#[derive(Clone, Debug)]
pub struct BattleSession<P = MyopicPolicy> {
    config: BattleConfig,
    policy: P,
    rng: GameRng,
    catalog: Catalog,
    players: SideMap<Player>,
    order: Option<TurnOrder>,
    phase: Phase,
    turns_taken: usize,
    events: Vector<BattleEvent>,
}

fn new_players(config: &BattleConfig) -> SideMap<Player> {
    SideMap::new(|side| {
        if side == SideId::A {
            Player::new("Player 1", Controller::Human, config)
        } else {
            Player::new("AI Opponent", Controller::Automated, config)
        }
    })
}

fn is_alive(players: &SideMap<Player>, slot: &TurnSlot) -> bool {
    players[slot.side].unit(slot.unit).map_or(false, Unit::is_alive)
}

impl BattleSession<MyopicPolicy> {
    /// Start a session driven by the default automated policy.
    pub fn new(config: BattleConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_policy(config, seed, MyopicPolicy)
    }
}

impl<P: OpponentPolicy> BattleSession<P> {
    /// Start a session with a custom automated policy.
    ///
    /// The catalog is generated from its own stream of `seed`, so combat
    /// rolls do not depend on catalog size.
    pub fn with_policy(config: BattleConfig, seed: u64, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = GameRng::new(seed);
        let catalog = Catalog::generate(&config, &mut rng.for_context("catalog"));
        let players = new_players(&config);

        log::info!("new session (seed {seed}, {} units in catalog)", catalog.len());

        Ok(Self {
            config,
            policy,
            rng,
            catalog,
            players,
            order: None,
            phase: Phase::Start,
            turns_taken: 0,
            events: Vector::new(),
        })
    }

    /// Replace the generated catalog. Only meaningful before drafting.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        assert_eq!(self.phase, Phase::Start, "catalog can only be replaced before the draft");
        self.catalog = catalog;
        self
    }

    /// Discard everything and start over from `seed` with the same config
    /// and policy. The catalog is regenerated.
    pub fn reset(&mut self, seed: u64) {
        self.rng = GameRng::new(seed);
        self.catalog = Catalog::generate(&self.config, &mut self.rng.for_context("catalog"));
        self.players = new_players(&self.config);
        self.order = None;
        self.phase = Phase::Start;
        self.turns_taken = 0;
        self.events = Vector::new();
        log::info!("session reset (seed {seed})");
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn player(&self, side: SideId) -> &Player {
        &self.players[side]
    }

    #[must_use]
    pub fn players(&self) -> &SideMap<Player> {
        &self.players
    }

    /// The turn order, once combat has begun.
    #[must_use]
    pub fn turn_order(&self) -> Option<&TurnOrder> {
        self.order.as_ref()
    }

    /// Actions resolved so far in combat.
    #[must_use]
    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    /// Every event since the session started.
    #[must_use]
    pub fn events(&self) -> &Vector<BattleEvent> {
        &self.events
    }

    /// Units neither side has drafted, in catalog order.
    #[must_use]
    pub fn available_units(&self) -> Vec<&Unit> {
        self.catalog.available().collect()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Resolved
    }

    /// The winning side once the battle is resolved.
    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        match self.phase {
            Phase::Resolved => is_over(&self.players).map(SideId::opponent),
            _ => None,
        }
    }

    // === Phase bookkeeping ===

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        match self.phase {
            actual if actual == expected => Ok(()),
            Phase::Resolved => Err(SessionError::GameOver),
            actual => Err(SessionError::WrongPhase { expected, actual }),
        }
    }

    fn emit(&mut self, out: &mut Vec<BattleEvent>, event: BattleEvent) {
        self.events.push_back(event.clone());
        out.push(event);
    }

    fn transition(&mut self, to: Phase, out: &mut Vec<BattleEvent>) {
        let from = self.phase;
        log::info!("phase {from:?} -> {to:?}");
        self.phase = to;
        self.emit(out, BattleEvent::PhaseChanged { from, to });
    }

    // === Draft ===

    /// Open the draft.
    pub fn begin_draft(&mut self) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Start)?;
        let mut out = Vec::new();
        self.transition(Phase::Draft, &mut out);
        Ok(out)
    }

    /// Draft catalog unit `id` for `side`.
    pub fn draft_unit(
        &mut self,
        side: SideId,
        id: UnitId,
    ) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Draft)?;
        let name = draft(&mut self.players[side], &mut self.catalog, id)?.name.clone();

        let mut out = Vec::new();
        self.emit(&mut out, BattleEvent::UnitDrafted { side, unit: id, name });
        Ok(out)
    }

    /// Fill `side`'s remaining slots with the policy's picks.
    ///
    /// Every pick goes through the same draft rules as a manual pick. The
    /// whole batch is checked first, so a rejected batch drafts nothing.
    pub fn auto_complete_draft(&mut self, side: SideId) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Draft)?;

        let available: Vec<&Unit> = self.catalog.available().collect();
        let picks = self.policy.draft(&self.players[side], &available, &mut self.rng);
        check_batch(&self.players[side], &self.catalog, &picks)?;

        let mut out = Vec::new();
        for id in picks {
            out.extend(self.draft_unit(side, id)?);
        }

        let counts = self.players[side].role_counts();
        log::info!(
            "{} auto-drafted {} units ({} war, {} production, {} support)",
            self.players[side].name,
            out.len(),
            counts[Role::War],
            counts[Role::Production],
            counts[Role::Support],
        );
        Ok(out)
    }

    /// Close the draft and move to formation.
    ///
    /// A side is incomplete while its roster is empty, or while it is short
    /// of the roster size and some available unit could still legally join.
    pub fn finish_draft(&mut self) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Draft)?;

        for side in SideId::both() {
            let player = &self.players[side];
            let can_grow = !player.is_full()
                && self
                    .catalog
                    .available()
                    .any(|u| check_eligible(player, u).is_ok());
            if player.units().is_empty() || can_grow {
                return Err(SessionError::DraftIncomplete { side });
            }
        }

        let mut out = Vec::new();
        self.transition(Phase::Formation, &mut out);
        Ok(out)
    }

    /// Reorder `side`'s roster. `order` must be a permutation of its ids.
    pub fn arrange_formation(
        &mut self,
        side: SideId,
        order: &[UnitId],
    ) -> Result<(), SessionError> {
        self.expect_phase(Phase::Formation)?;
        if self.players[side].arrange(order) {
            Ok(())
        } else {
            Err(SessionError::InvalidFormation)
        }
    }

    // === Combat ===

    /// Build the turn order and hand the first turn out.
    ///
    /// Called during the draft, this closes the draft first.
    pub fn begin_combat(&mut self) -> Result<Vec<BattleEvent>, SessionError> {
        let mut out = Vec::new();
        if self.phase == Phase::Draft {
            out.extend(self.finish_draft()?);
        }
        self.expect_phase(Phase::Formation)?;

        let mut order =
            TurnOrder::build(self.players[SideId::A].units(), self.players[SideId::B].units());
        log::debug!("turn order built with {} slots", order.len());

        let defeated = is_over(&self.players);
        let first = match defeated {
            Some(_) => order.current(),
            None => order.settle(|s| is_alive(&self.players, s)),
        };
        self.order = Some(order);
        self.transition(Phase::Combat, &mut out);

        if let Some(loser) = defeated {
            self.conclude(loser, &mut out);
            return Ok(out);
        }

        self.tick_production(first.side, &mut out);
        self.announce_turn(first, &mut out);
        Ok(out)
    }

    fn order_ref(&self) -> &TurnOrder {
        self.order
            .as_ref()
            .unwrap_or_else(|| panic!("combat phase without a turn order"))
    }

    fn slot_unit(&self, slot: TurnSlot) -> &Unit {
        self.players[slot.side]
            .unit(slot.unit)
            .unwrap_or_else(|| {
                panic!("{} in turn order is not on {}'s roster", slot.unit, slot.side)
            })
    }

    fn tick_production(&mut self, side: SideId, out: &mut Vec<BattleEvent>) {
        let amount = self.players[side].generate_production(self.config.production_per_unit);
        let total = self.players[side].production_points();
        log::debug!("{side} generated {amount} production ({total} total)");
        self.emit(out, BattleEvent::ProductionGenerated { side, amount, total });
    }

    fn announce_turn(&mut self, slot: TurnSlot, out: &mut Vec<BattleEvent>) {
        let name = self.slot_unit(slot).name.clone();
        self.emit(
            out,
            BattleEvent::TurnStarted {
                side: slot.side,
                unit: slot.unit,
                name,
            },
        );
    }

    fn conclude(&mut self, loser: SideId, out: &mut Vec<BattleEvent>) {
        let winner = loser.opponent();
        log::info!("{} wins after {} turns", self.players[winner].name, self.turns_taken);
        self.transition(Phase::Resolved, out);
        self.emit(out, BattleEvent::BattleWon { winner, loser });
    }

    /// The acting unit and its side's resources, during combat.
    #[must_use]
    pub fn current_turn(&self) -> Option<TurnContext> {
        if self.phase != Phase::Combat {
            return None;
        }
        let slot = self.order_ref().current();
        let player = &self.players[slot.side];
        Some(TurnContext {
            unit: slot.unit,
            name: self.slot_unit(slot).name.clone(),
            side: slot.side,
            controller: player.controller,
            production_points: player.production_points(),
            production_rate: player.production_rate(self.config.production_per_unit),
        })
    }

    /// The full turn order for display. Empty before combat.
    #[must_use]
    pub fn action_order(&self) -> Vec<OrderEntry> {
        let Some(order) = &self.order else {
            return Vec::new();
        };
        let live = self.phase == Phase::Combat;
        order
            .slots()
            .iter()
            .enumerate()
            .map(|(i, &slot)| OrderEntry {
                slot,
                name: self.slot_unit(slot).name.clone(),
                alive: is_alive(&self.players, &slot),
                is_current: live && i == order.cursor(),
            })
            .collect()
    }

    /// Resolve the acting unit's intent and pass the turn on.
    ///
    /// A rejected ability changes nothing and the same unit is still to act.
    pub fn submit_action(&mut self, action: Action) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Combat)?;
        let slot = self.order_ref().current();

        let outcome = match action {
            Action::UseAbility { ability, target } => {
                let mut ctx = ResolverContext::new(&self.config, &mut self.rng);
                resolve(ability, slot.unit, slot.side, &mut self.players, target, &mut ctx)?
            }
            Action::BasicAttack => {
                let mut ctx = ResolverContext::new(&self.config, &mut self.rng);
                basic_attack(slot.unit, slot.side, &mut self.players, &mut ctx)
            }
            Action::Skip => {
                log::debug!("{} ({}) skipped", self.slot_unit(slot).name, slot.side);
                Outcome::skip(slot.unit, &self.slot_unit(slot).name, slot.side)
            }
        };

        Ok(self.finish_turn(slot, outcome))
    }

    /// Let the policy act for the current unit of the automated side.
    pub fn play_automated_turn(&mut self) -> Result<Vec<BattleEvent>, SessionError> {
        self.expect_phase(Phase::Combat)?;
        let slot = self.order_ref().current();
        if !self.players[slot.side].is_automated() {
            return Err(SessionError::NotAutomated { side: slot.side });
        }
        Ok(self.play_policy_turn())
    }

    /// Policy turn for whoever is acting. Falls back to a basic attack if
    /// the chosen ability is rejected.
    fn play_policy_turn(&mut self) -> Vec<BattleEvent> {
        let slot = self.order_ref().current();
        let players = &self.players;
        let unit = players[slot.side]
            .unit(slot.unit)
            .unwrap_or_else(|| {
                panic!("{} in turn order is not on {}'s roster", slot.unit, slot.side)
            });
        let action = self.policy.act(unit, slot.side, players, &mut self.rng);

        match self.submit_action(action) {
            Ok(events) => events,
            Err(err) => {
                log::warn!(
                    "{} could not {:?}: {err}; basic attack instead",
                    self.slot_unit(slot).name,
                    action
                );
                let mut ctx = ResolverContext::new(&self.config, &mut self.rng);
                let outcome = basic_attack(slot.unit, slot.side, &mut self.players, &mut ctx);
                self.finish_turn(slot, outcome)
            }
        }
    }

    fn finish_turn(&mut self, slot: TurnSlot, outcome: Outcome) -> Vec<BattleEvent> {
        let mut out = Vec::new();
        let target = outcome.target;
        self.emit(&mut out, BattleEvent::Action(outcome));

        if let Some(id) = target {
            let side = slot.side.opponent();
            if let Some(unit) = self.players[side].unit(id).filter(|u| !u.is_alive()) {
                let name = unit.name.clone();
                log::debug!("{name} ({side}) defeated");
                self.emit(&mut out, BattleEvent::UnitDefeated { side, unit: id, name });
            }
        }

        self.turns_taken += 1;

        if let Some(loser) = is_over(&self.players) {
            self.conclude(loser, &mut out);
            return out;
        }

        let players = &self.players;
        let order = self
            .order
            .as_mut()
            .unwrap_or_else(|| panic!("combat phase without a turn order"));
        let next = order.advance(|s| is_alive(players, s));
        if order.cursor() == 0 || next.side != slot.side {
            self.tick_production(next.side, &mut out);
        }
        self.announce_turn(next, &mut out);
        out
    }

    /// Drive both sides with the policy until the battle resolves or
    /// `max_turns` more actions have been taken.
    ///
    /// Starts and completes the draft if needed. Returns the winner, or
    /// `None` if the turn limit ran out first.
    pub fn run_to_completion(&mut self, max_turns: usize) -> Result<Option<SideId>, SessionError> {
        if self.phase == Phase::Start {
            self.begin_draft()?;
        }
        if self.phase == Phase::Draft {
            for side in SideId::both() {
                self.auto_complete_draft(side)?;
            }
            self.finish_draft()?;
        }
        if self.phase == Phase::Formation {
            self.begin_combat()?;
        }

        let mut remaining = max_turns;
        while self.phase == Phase::Combat && remaining > 0 {
            self.play_policy_turn();
            remaining -= 1;
        }
        Ok(self.winner())
    }
}
