//! Combat resolution tests.
//!
//! Covers the resolver's all-or-nothing contract, the game-over check and
//! the production tick as seen through a session.

use waifu_tactics::ai::BasicAttackPolicy;
use waifu_tactics::battle::{is_over, resolve, winner, ResolverContext};
use waifu_tactics::core::{
    Action, BattleConfig, BattleEvent, GameRng, ResolutionError, SessionError, SideId, SideMap,
};
use waifu_tactics::roster::{draft, Catalog, Controller, Player};
use waifu_tactics::units::{Ability, EffectType, Role, Unit, UnitId};
use waifu_tactics::{BattleSession, Phase};

fn strike() -> Ability {
    Ability::new("Power Strike", Role::War, 3, EffectType::Damage, 50)
}

/// Side A gets ids 0..5, side B gets ids 5..10.
fn five_on_five(b_hp: [i32; 5]) -> SideMap<Player> {
    let config = BattleConfig::default();
    let mut catalog = Catalog::from_units(
        (0..10)
            .map(|i| {
                let hp = if i < 5 { 100 } else { b_hp[i as usize - 5] };
                Unit::new(UnitId::new(i), format!("Unit {i}"), Role::ALL[i as usize % 3], 100, 100)
                    .with_hp(hp)
                    .with_abilities([strike()])
            })
            .collect(),
    );
    let mut players = SideMap::new(|s| Player::new(format!("{s}"), Controller::Human, &config));
    for i in 0..10 {
        let side = if i < 5 { SideId::A } else { SideId::B };
        draft(&mut players[side], &mut catalog, UnitId::new(i)).unwrap();
    }
    players
}

#[test]
fn test_side_with_one_survivor_has_not_lost() {
    let config = BattleConfig::default();
    let mut rng = GameRng::new(5);
    let mut players = five_on_five([100, 100, 100, 100, 0]);
    players[SideId::A].set_production_points(1_000);

    assert_eq!(is_over(&players), None);

    for target in 5..9 {
        while players[SideId::B].unit(UnitId::new(target)).unwrap().is_alive() {
            assert_eq!(is_over(&players), None);
            let mut ctx = ResolverContext::new(&config, &mut rng);
            let target = Some(UnitId::new(target));
            resolve(0, UnitId::new(0), SideId::A, &mut players, target, &mut ctx).unwrap();
        }
    }

    assert_eq!(is_over(&players), Some(SideId::B));
    assert_eq!(winner(&players), Some(SideId::A));
}

#[test]
fn test_insufficient_points_leave_ledger_alone() {
    let config = BattleConfig::default();
    let mut rng = GameRng::new(5);
    let mut players = five_on_five([100; 5]);
    players[SideId::A].set_production_points(1);
    let before = players.clone();

    let mut ctx = ResolverContext::new(&config, &mut rng);
    let err = resolve(0, UnitId::new(0), SideId::A, &mut players, None, &mut ctx).unwrap_err();

    assert_eq!(err, ResolutionError::InsufficientResources { have: 1, need: 3 });
    assert_eq!(players[SideId::A].production_points(), 1);
    assert_eq!(players, before);
}

/// A session whose rosters are fixed by catalog order: A gets ids 0 and 1,
/// B gets ids 2 and 3.
fn two_on_two(units: [(Role, i32, i32); 4]) -> BattleSession<BasicAttackPolicy> {
    let catalog = Catalog::from_units(
        units
            .iter()
            .enumerate()
            .map(|(i, &(role, speed, hp))| {
                Unit::new(UnitId::new(i as u32), format!("Unit {i}"), role, speed, 100)
                    .with_hp(hp)
                    .with_abilities([strike()])
            })
            .collect(),
    );
    let config = BattleConfig::default().with_roster_size(2);
    let mut session = BattleSession::with_policy(config, 1, BasicAttackPolicy)
        .unwrap()
        .with_catalog(catalog);
    session.begin_draft().unwrap();
    session.auto_complete_draft(SideId::A).unwrap();
    session.auto_complete_draft(SideId::B).unwrap();
    session
}

fn production(events: &[BattleEvent]) -> Vec<(SideId, i32)> {
    events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::ProductionGenerated { side, total, .. } => Some((*side, *total)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_production_ticks_on_side_change() {
    let mut session = two_on_two([
        (Role::Production, 110, 100),
        (Role::War, 90, 100),
        (Role::Production, 100, 100),
        (Role::War, 80, 100),
    ]);

    // Order: A0, B2, A1, B3.
    assert_eq!(production(&session.begin_combat().unwrap()), vec![(SideId::A, 7)]);
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::B, 7)]);
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::A, 9)]);
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::B, 9)]);
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::A, 11)]);
}

#[test]
fn test_no_tick_within_a_block() {
    let mut session = two_on_two([
        (Role::Production, 110, 100),
        (Role::Production, 105, 100),
        (Role::War, 100, 100),
        (Role::War, 90, 100),
    ]);

    // Order: A0, A1, B2, B3. A makes 4 per tick, B makes nothing.
    assert_eq!(production(&session.begin_combat().unwrap()), vec![(SideId::A, 9)]);
    assert!(production(&session.submit_action(Action::Skip).unwrap()).is_empty());
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::B, 5)]);
    assert!(production(&session.submit_action(Action::Skip).unwrap()).is_empty());
    assert_eq!(production(&session.submit_action(Action::Skip).unwrap()), vec![(SideId::A, 13)]);
}

#[test]
fn test_dead_units_skipped_and_rate_recomputed() {
    let mut session = two_on_two([
        (Role::War, 110, 100),
        (Role::Production, 100, 100),
        (Role::Production, 105, 100),
        (Role::War, 90, 100),
    ]);
    session.begin_combat().unwrap();

    let order: Vec<u32> = session.action_order().iter().map(|e| e.slot.unit.raw()).collect();
    assert_eq!(order, vec![0, 2, 1, 3]);

    // Strike B's producer twice with explicit targets.
    session.submit_action(Action::use_ability(0).with_target(UnitId::new(2))).unwrap();
    session.submit_action(Action::BasicAttack).unwrap(); // B2 acts
    let events = session.submit_action(Action::Skip).unwrap(); // A1 acts
    assert!(!events.iter().any(|e| matches!(e, BattleEvent::UnitDefeated { .. })));
    session.submit_action(Action::Skip).unwrap(); // B3 acts

    let events = session.submit_action(Action::use_ability(0).with_target(UnitId::new(2))).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, BattleEvent::UnitDefeated { unit, .. } if *unit == UnitId::new(2))));

    // B2 is down: the cursor moves straight to A1 and B's rate drops to 0.
    let turn = session.current_turn().unwrap();
    assert_eq!(turn.unit, UnitId::new(1));
    assert_eq!(session.player(SideId::B).production_rate(2), 0);

    let order = session.action_order();
    assert_eq!(order.len(), 4);
    assert!(!order[1].alive);
    assert!(order[2].is_current);
}

#[test]
fn test_game_over_stops_turns() {
    let mut session = two_on_two([
        (Role::War, 110, 100),
        (Role::War, 100, 100),
        (Role::Support, 105, 40),
        (Role::Support, 90, 0),
    ]);
    session.begin_combat().unwrap();

    let events = session.submit_action(Action::use_ability(0).with_target(UnitId::new(2))).unwrap();
    assert!(matches!(
        events.last(),
        Some(BattleEvent::BattleWon { winner: SideId::A, loser: SideId::B })
    ));
    assert_eq!(session.phase(), Phase::Resolved);
    assert_eq!(session.winner(), Some(SideId::A));
    assert!(session.current_turn().is_none());
    assert_eq!(session.submit_action(Action::Skip).unwrap_err(), SessionError::GameOver);
}

#[test]
fn test_already_defeated_side_resolves_at_combat_start() {
    let mut session = two_on_two([
        (Role::War, 110, 100),
        (Role::War, 100, 100),
        (Role::Support, 105, 0),
        (Role::Support, 90, 0),
    ]);
    session.begin_combat().unwrap();
    assert_eq!(session.phase(), Phase::Resolved);
    assert_eq!(session.winner(), Some(SideId::A));
}
