//! Proximity tests and attack resolution
//!
//! Two mutually-exclusive collision models exist, selected by
//! `Settings::combat_model`:
//!
//! - `Melee`: the balls themselves are the weapons. One combat resolution
//!   per tick while the centers are within `MELEE_RANGE`, attacker chosen
//!   probabilistically by attack-readiness.
//! - `Reach`: each ball carries a weapon tip offset along its travel
//!   direction. Tip-to-body checks land hits, tip-to-tip produces a parry,
//!   and an anti-overlap check keeps the bodies apart.
//!
//! All cross-fighter mutation (damage, bleed application, knockback) happens
//! here; weapons only describe outcomes.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::effects::{DAMAGE_COLOR, Effects};
use super::state::{Fighter, FighterId, WeaponState};
use crate::consts::*;
use crate::settings::CombatModel;

/// What one resolver pass did this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatReport {
    /// Any hit, parry, or separation happened (UI should refresh)
    pub engaged: bool,
    /// A fighter was defeated; the match is over
    pub winner: Option<FighterId>,
}

/// Run one combat resolution pass for the configured model.
pub fn resolve(
    model: CombatModel,
    fighters: &mut [Fighter; 2],
    effects: &mut Effects,
    rng: &mut Pcg32,
) -> CombatReport {
    match model {
        CombatModel::Melee => resolve_melee(fighters, effects, rng),
        CombatModel::Reach => resolve_reach(fighters, effects, rng),
    }
}

/// Model A: ball-to-ball proximity, exactly one resolution per tick.
pub fn resolve_melee(
    fighters: &mut [Fighter; 2],
    effects: &mut Effects,
    rng: &mut Pcg32,
) -> CombatReport {
    let distance = fighters[0].body.pos.distance(fighters[1].body.pos);
    if distance >= MELEE_RANGE {
        return CombatReport::default();
    }

    // Faster and more combat-ready fighters land the hit more often
    let weight_left = fighters[0].body.speed() + fighters[0].current_speed();
    let weight_right = fighters[1].body.speed() + fighters[1].current_speed();
    let total = weight_left + weight_right;
    let attacker = if total <= f32::EPSILON || rng.random_range(0.0..1.0) < weight_left / total {
        FighterId::Left
    } else {
        FighterId::Right
    };

    let winner = land_hit(attacker, fighters, effects, rng);
    CombatReport {
        engaged: true,
        winner,
    }
}

/// Model B: weapon-reach checks, evaluated in a fixed order with early
/// return on the first defeat.
pub fn resolve_reach(
    fighters: &mut [Fighter; 2],
    effects: &mut Effects,
    rng: &mut Pcg32,
) -> CombatReport {
    let mut report = CombatReport::default();

    let tip_left = fighters[0].body.weapon_tip();
    let tip_right = fighters[1].body.weapon_tip();

    // (a) left tip reaches right body
    if tip_left.distance(fighters[1].body.pos) < TIP_RANGE {
        report.engaged = true;
        report.winner = land_hit(FighterId::Left, fighters, effects, rng);
        if report.winner.is_some() {
            return report;
        }
    }

    // (b) right tip reaches left body
    if tip_right.distance(fighters[0].body.pos) < TIP_RANGE {
        report.engaged = true;
        report.winner = land_hit(FighterId::Right, fighters, effects, rng);
        if report.winner.is_some() {
            return report;
        }
    }

    // (c) tips meet: parry, no damage, deflect apart
    if tip_left.distance(tip_right) < TIP_RANGE / 2.0 {
        report.engaged = true;
        let mid = (tip_left + tip_right) / 2.0;
        effects.clash_sparks(mid, rng);

        // Deflect apart along the tip-to-tip axis; coincident tips fall
        // back to the center axis
        let axis = (tip_right - tip_left).try_normalize().unwrap_or_else(|| {
            (fighters[1].body.pos - fighters[0].body.pos)
                .try_normalize()
                .unwrap_or(Vec2::X)
        });
        fighters[0].body.vel -= axis * KNOCKBACK;
        fighters[1].body.vel += axis * KNOCKBACK;
        log::debug!("parry at ({:.0}, {:.0})", mid.x, mid.y);
    }

    // (d) anti-overlap safety net: push the bodies apart, no damage
    let combined = fighters[0].body.radius + fighters[1].body.radius + OVERLAP_MARGIN;
    if fighters[0].body.pos.distance(fighters[1].body.pos) < combined {
        report.engaged = true;
        let axis = (fighters[1].body.pos - fighters[0].body.pos)
            .try_normalize()
            .unwrap_or(Vec2::X);
        fighters[0].body.vel -= axis * KNOCKBACK;
        fighters[1].body.vel += axis * KNOCKBACK;
    }

    report
}

/// Resolve one landed attack: damage, afflictions, visuals, knockback.
/// Returns the winner if the victim was defeated.
fn land_hit(
    attacker_id: FighterId,
    fighters: &mut [Fighter; 2],
    effects: &mut Effects,
    rng: &mut Pcg32,
) -> Option<FighterId> {
    let victim_id = attacker_id.opponent();
    let (attacker, victim) = pair_mut(fighters, attacker_id);

    let outcome = attacker.weapon.attack();
    if matches!(attacker.weapon, WeaponState::Hammer { .. }) {
        // Rage just went up
        effects.rage_puffs(attacker.body.pos, rng);
    }

    let defeated = victim.take_damage(outcome.damage);
    effects.damage_text(victim.body.pos, outcome.damage, DAMAGE_COLOR);
    effects.hit_sparks(victim.body.pos, rng);

    if let Some(affliction) = outcome.inflict {
        if victim.weapon.apply_affliction(affliction) {
            effects.bleed_drips(victim.body.pos, rng);
        }
    }

    // Knockback along the center axis, jittered, to both bodies
    let axis = (victim.body.pos - attacker.body.pos)
        .try_normalize()
        .unwrap_or(Vec2::X);
    let jitter = |rng: &mut Pcg32| {
        Vec2::new(
            rng.random_range(-KNOCKBACK_JITTER..KNOCKBACK_JITTER),
            rng.random_range(-KNOCKBACK_JITTER..KNOCKBACK_JITTER),
        )
    };
    victim.body.vel += axis * KNOCKBACK + jitter(rng);
    attacker.body.vel -= axis * KNOCKBACK + jitter(rng);

    log::debug!(
        "{} hits {} for {:.1} ({:.0} hp left)",
        attacker.weapon.name(),
        victim.weapon.name(),
        outcome.damage,
        victim.hp,
    );

    defeated.then_some(attacker_id)
}

/// Split the fighter pair into (attacker, victim) mutable references
fn pair_mut(fighters: &mut [Fighter; 2], attacker: FighterId) -> (&mut Fighter, &mut Fighter) {
    let (left, right) = fighters.split_at_mut(1);
    match attacker {
        FighterId::Left => (&mut left[0], &mut right[0]),
        FighterId::Right => (&mut right[0], &mut left[0]),
    }
}
