//! Ability and basic-attack resolution.
//!
//! Resolution is all-or-nothing: every precondition is checked before the
//! first mutation, so a failed `resolve` leaves HP and production points
//! exactly as they were. Advancing the turn cursor is the caller's last
//! step (see `BattleSession::submit_action`).

use crate::core::{
    BattleConfig, GameRng, Outcome, OutcomeKind, ResolutionError, SideId, SideMap,
};
use crate::roster::Player;
use crate::units::{Ability, EffectType, Unit, UnitId};

use super::targeting::{legal_targets, living_opponents, pick, Target};

/// Everything the resolver needs besides the players.
pub struct ResolverContext<'a> {
    pub config: &'a BattleConfig,
    pub rng: &'a mut GameRng,
}

impl<'a> ResolverContext<'a> {
    pub fn new(config: &'a BattleConfig, rng: &'a mut GameRng) -> Self {
        Self { config, rng }
    }
}

/// Acting unit on `side`. Panics if the cursor points at a missing unit.
fn actor(players: &SideMap<Player>, side: SideId, id: UnitId) -> &Unit {
    players[side]
        .unit(id)
        .unwrap_or_else(|| panic!("acting unit {id} is not on {side}'s roster"))
}

fn target_mut(players: &mut SideMap<Player>, target: Target) -> &mut Unit {
    players[target.side]
        .unit_mut(target.unit)
        .unwrap_or_else(|| panic!("target {} vanished from {}", target.unit, target.side))
}

/// Check that `ability` can resolve for `side` and choose its target.
///
/// Does not mutate anything. `Ok(None)` means a buff, which has no target.
pub fn validate(
    ability: &Ability,
    side: SideId,
    players: &SideMap<Player>,
    requested: Option<UnitId>,
    rng: &mut GameRng,
) -> Result<Option<Target>, ResolutionError> {
    let points = players[side].production_points();
    if !ability.is_affordable(points) {
        return Err(ResolutionError::InsufficientResources {
            have: points,
            need: ability.cost,
        });
    }

    if ability.effect == EffectType::Buff {
        return Ok(None);
    }

    let targets = legal_targets(ability.effect, side, players);
    if targets.is_empty() {
        return Err(ResolutionError::NoValidTarget);
    }

    match requested {
        Some(unit) => targets
            .iter()
            .copied()
            .find(|t| t.unit == unit)
            .map(Some)
            .ok_or(ResolutionError::InvalidTarget),
        None => Ok(pick(&targets, rng)),
    }
}

/// Resolve ability `index` of unit `actor_id` on `side`.
///
/// Fails with `UnknownAbility`, `InsufficientResources`, `NoValidTarget`, or
/// `InvalidTarget` without touching state. On success the cost is deducted
/// exactly once, then the effect is applied:
/// - damage: target HP drops by the ability value, floored at 0
/// - heal: target HP rises by value × heal multiplier, capped at max
/// - buff: no mechanical effect
pub fn resolve(
    index: usize,
    actor_id: UnitId,
    side: SideId,
    players: &mut SideMap<Player>,
    requested: Option<UnitId>,
    ctx: &mut ResolverContext,
) -> Result<Outcome, ResolutionError> {
    let unit = actor(players, side, actor_id);
    let ability = unit
        .ability(index)
        .cloned()
        .ok_or(ResolutionError::UnknownAbility)?;
    let actor_name = unit.name.clone();

    let target = validate(&ability, side, players, requested, ctx.rng)?;

    players[side].spend(ability.cost)?;

    let magnitude = ability.magnitude(ctx.config);
    let (applied, target_name) = match target {
        Some(t) => {
            let unit = target_mut(players, t);
            let applied = match ability.effect {
                EffectType::Damage => unit.take_damage(magnitude),
                EffectType::Heal => unit.restore(magnitude),
                EffectType::Buff => 0,
            };
            (applied, Some(unit.name.clone()))
        }
        None => (magnitude, None),
    };

    log::debug!(
        "{} ({}) used {} [{}] on {:?} for {}",
        actor_name,
        side,
        ability.name,
        ability.effect,
        target_name,
        applied
    );

    Ok(Outcome {
        actor: actor_id,
        actor_name,
        side,
        kind: OutcomeKind::Ability {
            name: ability.name,
            effect: ability.effect,
        },
        target: target.map(|t| t.unit),
        target_name,
        magnitude: applied,
        cost: ability.cost,
    })
}

/// Free attack on a random living opponent.
///
/// With no living opponent this is a no-op outcome with no target.
pub fn basic_attack(
    actor_id: UnitId,
    side: SideId,
    players: &mut SideMap<Player>,
    ctx: &mut ResolverContext,
) -> Outcome {
    let actor_name = actor(players, side, actor_id).name.clone();
    let target = pick(&living_opponents(side, players), ctx.rng);

    let (applied, target_name) = match target {
        Some(t) => {
            let damage = ctx.rng.gen_range(ctx.config.basic_attack.to_range());
            let unit = target_mut(players, t);
            (unit.take_damage(damage), Some(unit.name.clone()))
        }
        None => (0, None),
    };

    log::debug!("{} ({}) basic attack on {:?} for {}", actor_name, side, target_name, applied);

    Outcome {
        actor: actor_id,
        actor_name,
        side,
        kind: OutcomeKind::BasicAttack,
        target: target.map(|t| t.unit),
        target_name,
        magnitude: applied,
        cost: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{draft, Catalog, Controller};
    use crate::units::Role;

    const HIT: usize = 0;
    const MEND: usize = 1;
    const RALLY: usize = 2;

    /// Side A: ids 0..3, side B: ids 3..6. Everyone knows Hit/Mend/Rally.
    fn setup(hp: [i32; 6], points: i32) -> SideMap<Player> {
        let config = BattleConfig::default();
        let abilities = [
            Ability::new("Hit", Role::War, 3, EffectType::Damage, 20),
            Ability::new("Mend", Role::Support, 2, EffectType::Heal, 3),
            Ability::new("Rally", Role::Support, 1, EffectType::Buff, 2),
        ];
        let mut catalog = Catalog::from_units(
            (0..6)
                .map(|i| {
                    Unit::new(UnitId::new(i), format!("U{i}"), Role::War, 100, 100)
                        .with_hp(hp[i as usize])
                        .with_abilities(abilities.clone())
                })
                .collect(),
        );
        let mut players = SideMap::new(|s| Player::new(format!("{s}"), Controller::Human, &config));
        for i in 0..6 {
            let side = if i < 3 { SideId::A } else { SideId::B };
            draft(&mut players[side], &mut catalog, UnitId::new(i)).unwrap();
        }
        for (_, p) in players.iter_mut() {
            p.set_production_points(points);
        }
        players
    }

    fn hp(players: &SideMap<Player>, side: SideId, id: u32) -> i32 {
        players[side].unit(UnitId::new(id)).unwrap().hp()
    }

    #[test]
    fn test_insufficient_resources_mutates_nothing() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 1);
        let before = players.clone();

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let err = resolve(HIT, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap_err();

        assert_eq!(err, ResolutionError::InsufficientResources { have: 1, need: 3 });
        assert_eq!(players, before);
        assert_eq!(players[SideId::A].production_points(), 1);
    }

    #[test]
    fn test_no_valid_target_mutates_nothing() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 10);
        let before = players.clone();

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let err = resolve(MEND, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap_err();

        assert_eq!(err, ResolutionError::NoValidTarget);
        assert_eq!(players, before);
    }

    #[test]
    fn test_affordability_checked_before_targets() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 0);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let err = resolve(MEND, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap_err();
        assert_eq!(err, ResolutionError::InsufficientResources { have: 0, need: 2 });
    }

    #[test]
    fn test_damage_deducts_cost_once() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100, 100, 100, 100, 0, 0], 5);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let outcome = resolve(HIT, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap();

        assert_eq!(outcome.target, Some(UnitId::new(3)));
        assert_eq!(outcome.magnitude, 20);
        assert_eq!(outcome.cost, 3);
        assert_eq!(hp(&players, SideId::B, 3), 80);
        assert_eq!(players[SideId::A].production_points(), 2);
        assert_eq!(players[SideId::B].production_points(), 5);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100, 100, 100, 5, 0, 0], 5);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let outcome = resolve(HIT, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap();

        assert_eq!(outcome.magnitude, 5);
        assert_eq!(hp(&players, SideId::B, 3), 0);
    }

    #[test]
    fn test_heal_scaled_and_capped() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100, 90, 100, 100, 100, 100], 5);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let outcome = resolve(MEND, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap();

        // 3 × 10 = 30 raw, only 10 missing.
        assert_eq!(outcome.target, Some(UnitId::new(1)));
        assert_eq!(outcome.magnitude, 10);
        assert_eq!(hp(&players, SideId::A, 1), 100);
        assert_eq!(players[SideId::A].production_points(), 3);
    }

    #[test]
    fn test_buff_changes_no_hp() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([50; 6], 5);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let outcome = resolve(RALLY, UnitId::new(0), SideId::A, &mut players, None, &mut ctx)
            .unwrap();

        assert_eq!(outcome.target, None);
        assert_eq!(outcome.magnitude, 2);
        assert!(players[SideId::A].units().iter().all(|u| u.hp() == 50));
        assert!(players[SideId::B].units().iter().all(|u| u.hp() == 50));
        assert_eq!(players[SideId::A].production_points(), 4);
    }

    #[test]
    fn test_explicit_target() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 10);

        let outcome = resolve(
            HIT,
            UnitId::new(0),
            SideId::A,
            &mut players,
            Some(UnitId::new(5)),
            &mut ResolverContext::new(&config, &mut rng),
        )
        .unwrap();
        assert_eq!(outcome.target, Some(UnitId::new(5)));
        assert_eq!(hp(&players, SideId::B, 5), 80);

        // Own unit is not a legal damage target.
        let before = players.clone();
        let err = resolve(
            HIT,
            UnitId::new(0),
            SideId::A,
            &mut players,
            Some(UnitId::new(1)),
            &mut ResolverContext::new(&config, &mut rng),
        )
        .unwrap_err();
        assert_eq!(err, ResolutionError::InvalidTarget);
        assert_eq!(players, before);
    }

    #[test]
    fn test_unknown_ability() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 10);

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let err = resolve(7, UnitId::new(0), SideId::A, &mut players, None, &mut ctx).unwrap_err();
        assert_eq!(err, ResolutionError::UnknownAbility);
    }

    #[test]
    fn test_basic_attack_in_range() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100; 6], 0);

        for _ in 0..5 {
            let mut ctx = ResolverContext::new(&config, &mut rng);
            let outcome = basic_attack(UnitId::new(0), SideId::A, &mut players, &mut ctx);
            assert!(config.basic_attack.contains(outcome.magnitude));
            assert_eq!(outcome.cost, 0);
        }
        assert_eq!(players[SideId::A].production_points(), 0);
    }

    #[test]
    fn test_basic_attack_without_opponents_is_noop() {
        let config = BattleConfig::default();
        let mut rng = GameRng::new(1);
        let mut players = setup([100, 100, 100, 0, 0, 0], 0);
        let before = players.clone();

        let mut ctx = ResolverContext::new(&config, &mut rng);
        let outcome = basic_attack(UnitId::new(0), SideId::A, &mut players, &mut ctx);
        assert_eq!(outcome.target, None);
        assert_eq!(outcome.magnitude, 0);
        assert_eq!(players, before);
    }
}
