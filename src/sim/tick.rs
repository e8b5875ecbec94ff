//! Frame stepping and match lifecycle
//!
//! One step runs to completion per external frame callback; all state is
//! mutated here and nowhere else. The wall-clock anchor is re-set on resume
//! so a long pause never turns into a giant dt.

use super::combat;
use super::effects::BLEED_TEXT_COLOR;
use super::kinematics;
use super::state::{FighterId, MatchPhase, Simulation, WeaponEvent, spawn_fighters};
use crate::consts::*;

impl Simulation {
    /// Idle/Paused -> Running. A no-op while already running or after the
    /// match has ended.
    pub fn start(&mut self, now_ms: f64) {
        match self.phase {
            MatchPhase::Idle | MatchPhase::Paused => {
                self.phase = MatchPhase::Running;
                self.last_step_ms = Some(now_ms);
                log::info!("match running ({} model)", self.settings.combat_model.as_str());
            }
            MatchPhase::Running | MatchPhase::Ended(_) => {}
        }
    }

    /// Running -> Paused. A no-op in any other phase.
    pub fn pause(&mut self) {
        if self.phase == MatchPhase::Running {
            self.phase = MatchPhase::Paused;
            log::info!("match paused");
        }
    }

    /// Back to Idle: fresh fighters at their start positions, empty effect
    /// pools, clock rewound. Works from any phase, including Ended.
    pub fn reset(&mut self) {
        self.fighters = spawn_fighters(&mut self.rng);
        self.effects.clear();
        self.phase = MatchPhase::Idle;
        self.time_ms = 0.0;
        self.last_step_ms = None;
        log::info!("match reset");
    }

    /// Advance by wall-clock time. Call once per frame callback; a no-op
    /// unless running. Returns whether anything UI-visible happened.
    pub fn step(&mut self, now_ms: f64) -> bool {
        if self.phase != MatchPhase::Running {
            return false;
        }
        let dt_ms = match self.last_step_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_STEP_MS),
            None => 0.0,
        };
        self.last_step_ms = Some(now_ms);
        self.tick(dt_ms)
    }

    /// The deterministic inner step: weapon timers, kinematics, combat,
    /// transient effects. Public so tests can drive exact dt sequences.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.phase != MatchPhase::Running {
            return false;
        }
        self.time_ms += f64::from(dt_ms);
        let arena = self.arena();
        let mut activity = false;

        // Status-effect timers first: bleed can tick (and even end the match)
        // before anyone moves
        for idx in 0..2 {
            for event in self.fighters[idx].weapon.update(dt_ms) {
                let WeaponEvent::BleedTick { damage } = event;
                activity = true;
                let fighter = &mut self.fighters[idx];
                let defeated = fighter.take_damage(damage);
                self.effects
                    .damage_text(fighter.body.pos, damage, BLEED_TEXT_COLOR);
                log::debug!("{} bleeds for {damage:.0}", fighter.weapon.name());
                if defeated {
                    self.end_match(id_for(idx).opponent());
                    self.effects.update(dt_ms);
                    return true;
                }
            }
        }

        for fighter in &mut self.fighters {
            kinematics::integrate(&mut fighter.body, arena, &mut self.rng);
        }

        let report = combat::resolve(
            self.settings.combat_model,
            &mut self.fighters,
            &mut self.effects,
            &mut self.rng,
        );
        activity |= report.engaged;
        if let Some(winner) = report.winner {
            self.end_match(winner);
        }

        self.effects.update(dt_ms);
        activity
    }

    fn end_match(&mut self, winner: FighterId) {
        self.phase = MatchPhase::Ended(winner);
        log::info!("{} wins", self.fighter(winner).weapon.name());
    }
}

fn id_for(index: usize) -> FighterId {
    if index == 0 {
        FighterId::Left
    } else {
        FighterId::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{CombatModel, Settings};
    use crate::sim::state::Affliction;
    use glam::Vec2;

    fn sim() -> Simulation {
        Simulation::new(Settings::default())
    }

    #[test]
    fn test_start_pause_transitions() {
        let mut sim = sim();
        assert_eq!(sim.phase, MatchPhase::Idle);

        sim.start(0.0);
        assert_eq!(sim.phase, MatchPhase::Running);

        sim.pause();
        assert_eq!(sim.phase, MatchPhase::Paused);

        sim.start(100.0);
        assert_eq!(sim.phase, MatchPhase::Running);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut sim = sim();
        sim.start(0.0);
        sim.step(16.0);
        let snapshot = sim.fighters.clone();
        let time = sim.time_ms;

        sim.start(5000.0);
        assert_eq!(sim.phase, MatchPhase::Running);
        assert_eq!(sim.time_ms, time);
        assert_eq!(sim.fighters[0].body.pos, snapshot[0].body.pos);

        // The anchor was not touched: the next step sees a normal dt
        sim.step(32.0);
        assert!(sim.time_ms <= time + 16.0 + 1e-6);
    }

    #[test]
    fn test_pause_while_paused_is_noop() {
        let mut sim = sim();
        sim.start(0.0);
        sim.pause();
        sim.pause();
        assert_eq!(sim.phase, MatchPhase::Paused);
    }

    #[test]
    fn test_step_while_paused_changes_nothing() {
        let mut sim = sim();
        sim.start(0.0);
        sim.step(16.0);
        sim.pause();

        let snapshot = sim.fighters.clone();
        assert!(!sim.step(32.0));
        assert_eq!(sim.fighters[0].body.pos, snapshot[0].body.pos);
        assert_eq!(sim.fighters[1].body.pos, snapshot[1].body.pos);
    }

    #[test]
    fn test_resume_has_no_time_jump() {
        let mut sim = sim();
        sim.start(0.0);
        sim.step(16.0);
        sim.pause();

        // Ten wall-clock seconds pass while paused
        sim.start(10_016.0);
        sim.step(10_032.0);

        // Only the 16 ms since resume was simulated
        assert!((sim.time_ms - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dt_clamped_after_stall() {
        let mut sim = sim();
        sim.start(0.0);
        sim.step(16.0);
        sim.step(5000.0);
        assert!(sim.time_ms <= 16.0 + f64::from(MAX_STEP_MS));
    }

    #[test]
    fn test_reset_round_trip() {
        let mut sim = sim();
        sim.start(0.0);
        for frame in 1..200 {
            sim.step(f64::from(frame) * 16.0);
        }
        sim.fighters[1]
            .weapon
            .apply_affliction(Affliction::Bleed(BLEED_DURATION_MS));
        sim.fighters[0].hp = 40.0;

        sim.reset();
        assert_eq!(sim.phase, MatchPhase::Idle);
        assert_eq!(sim.time_ms, 0.0);
        assert!(sim.effects.is_empty());
        for (fighter, start) in sim.fighters.iter().zip([START_LEFT, START_RIGHT]) {
            assert_eq!(fighter.body.pos, Vec2::from(start));
            assert_eq!(fighter.hp, MAX_HP);
            assert_eq!(fighter.weapon.rage(), 0);
            assert_eq!(fighter.weapon.bleed_stacks(), 0);
        }
    }

    #[test]
    fn test_reset_after_ended() {
        let mut sim = sim();
        sim.start(0.0);
        sim.fighters[1].hp = 1.0;
        sim.fighters[0].body.pos = Vec2::new(400.0, 300.0);
        sim.fighters[1].body.pos = Vec2::new(400.0, 300.0);
        sim.settings.combat_model = CombatModel::Melee;

        // Drive ticks until somebody wins (either can, the melee coin flip
        // may favor the wounded fighter first)
        for _ in 0..200 {
            sim.tick(16.0);
            if matches!(sim.phase, MatchPhase::Ended(_)) {
                break;
            }
        }
        assert!(matches!(sim.phase, MatchPhase::Ended(_)));

        // Ended is terminal: start will not revive the match
        sim.start(99_999.0);
        assert!(matches!(sim.phase, MatchPhase::Ended(_)));

        sim.reset();
        assert_eq!(sim.phase, MatchPhase::Idle);
        sim.start(0.0);
        assert_eq!(sim.phase, MatchPhase::Running);
    }

    #[test]
    fn test_defeat_blocks_further_combat() {
        let mut sim = sim();
        sim.settings.combat_model = CombatModel::Melee;
        sim.start(0.0);
        sim.fighters[0].body.pos = Vec2::new(400.0, 300.0);
        sim.fighters[1].body.pos = Vec2::new(400.0, 300.0);
        sim.fighters[0].hp = 1.0;
        sim.fighters[1].hp = 1.0;

        for _ in 0..200 {
            sim.tick(16.0);
            if matches!(sim.phase, MatchPhase::Ended(_)) {
                break;
            }
        }
        let MatchPhase::Ended(winner) = sim.phase else {
            panic!("expected a winner");
        };
        assert!(sim.fighter(winner).hp > 0.0);
        let loser_hp = sim.fighter(winner.opponent()).hp;

        // Further stepping is inert
        let winner_hp = sim.fighter(winner).hp;
        for _ in 0..10 {
            sim.tick(16.0);
        }
        assert_eq!(sim.fighter(winner).hp, winner_hp);
        assert_eq!(sim.fighter(winner.opponent()).hp, loser_hp);
    }

    #[test]
    fn test_bleed_can_end_the_match() {
        let mut sim = sim();
        sim.start(0.0);
        // Park the fighters far apart so no combat interferes
        sim.fighters[0].body.pos = Vec2::new(100.0, 100.0);
        sim.fighters[1].body.pos = Vec2::new(700.0, 100.0);
        sim.fighters[1].hp = 2.0;
        for _ in 0..3 {
            sim.fighters[1]
                .weapon
                .apply_affliction(Affliction::Bleed(BLEED_DURATION_MS));
        }

        // One full bleed interval: 3 damage against 2 hp
        sim.tick(1000.0);
        assert_eq!(sim.phase, MatchPhase::Ended(FighterId::Left));
        assert_eq!(sim.fighters[1].hp, 0.0);
    }

    #[test]
    fn test_bleed_tick_emits_one_damage_text() {
        let mut sim = sim();
        sim.start(0.0);
        sim.fighters[0].body.pos = Vec2::new(100.0, 100.0);
        sim.fighters[1].body.pos = Vec2::new(700.0, 100.0);
        for _ in 0..3 {
            sim.fighters[1]
                .weapon
                .apply_affliction(Affliction::Bleed(BLEED_DURATION_MS));
        }

        let hp_before = sim.fighters[1].hp;
        sim.tick(1000.0);
        assert_eq!(sim.fighters[1].hp, hp_before - 3.0);
        assert_eq!(sim.effects.texts.len(), 1);
        assert_eq!(sim.effects.texts[0].amount, 3.0);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            seed: 99_999,
            ..Default::default()
        };
        let mut a = Simulation::new(settings.clone());
        let mut b = Simulation::new(settings);

        a.start(0.0);
        b.start(0.0);
        for frame in 1..500 {
            let now = f64::from(frame) * 16.0;
            a.step(now);
            b.step(now);
        }

        assert_eq!(a.phase, b.phase);
        for (fa, fb) in a.fighters.iter().zip(&b.fighters) {
            assert_eq!(fa.body.pos, fb.body.pos);
            assert_eq!(fa.body.vel, fb.body.vel);
            assert_eq!(fa.hp, fb.hp);
            assert_eq!(fa.weapon.rage(), fb.weapon.rage());
        }
        assert_eq!(a.effects.particles.len(), b.effects.particles.len());
    }

    #[test]
    fn test_positions_stay_in_bounds_over_a_match() {
        let mut sim = sim();
        sim.start(0.0);
        for frame in 1..2000 {
            sim.step(f64::from(frame) * 16.0);
            for fighter in &sim.fighters {
                let body = &fighter.body;
                assert!(body.pos.x >= body.radius);
                assert!(body.pos.x <= sim.settings.arena_width - body.radius);
                assert!(body.pos.y >= body.radius);
                assert!(body.pos.y <= sim.settings.arena_height - body.radius);
            }
            if matches!(sim.phase, MatchPhase::Ended(_)) {
                break;
            }
        }
    }
}
