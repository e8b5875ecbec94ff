//! Simulation state and core types
//!
//! Everything the stepping routine mutates lives here, consolidated into one
//! `Simulation` context object - no ambient globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use crate::consts::*;
use crate::settings::Settings;

/// Identifies one of the two fighters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterId {
    Left,
    Right,
}

impl FighterId {
    pub fn index(self) -> usize {
        match self {
            FighterId::Left => 0,
            FighterId::Right => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            FighterId::Left => FighterId::Right,
            FighterId::Right => FighterId::Left,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Fighters placed, clock not running
    Idle,
    /// Active simulation
    Running,
    /// Frozen mid-match, resumable
    Paused,
    /// A fighter's HP reached zero; terminal until reset
    Ended(FighterId),
}

/// A physical body bouncing inside the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Position history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record current position to the trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Weapon tip: offset from center along the current travel direction.
    /// A resting body points right by convention.
    pub fn weapon_tip(&self) -> Vec2 {
        let dir = self.vel.try_normalize().unwrap_or(Vec2::X);
        self.pos + dir * WEAPON_REACH
    }
}

/// An ordered set of independent decaying timers.
///
/// Used for bleed: stack *size* (not magnitude) is the damage applied per
/// bleed tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimedStack {
    timers: Vec<f32>,
}

impl TimedStack {
    /// Add one timer with the given remaining duration (ms)
    pub fn push(&mut self, duration_ms: f32) {
        self.timers.push(duration_ms);
    }

    /// Decrement every timer by elapsed time, dropping the expired
    pub fn decay(&mut self, dt_ms: f32) {
        for t in &mut self.timers {
            *t -= dt_ms;
        }
        self.timers.retain(|t| *t > 0.0);
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// An effect one fighter inflicts on the other, routed through the combat
/// resolver so all cross-fighter mutation stays single-writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Affliction {
    /// One bleed timer with the given duration (ms)
    Bleed(f32),
}

/// What a landed attack does to the victim
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub damage: f32,
    pub inflict: Option<Affliction>,
}

/// Timed event surfaced by a fighter's own status effects
#[derive(Debug, Clone, PartialEq)]
pub enum WeaponEvent {
    /// Bleed damage applied to the owner this tick
    BleedTick { damage: f32 },
}

/// Weapon-specific combat state. Closed variant: the game has exactly these
/// two weapons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WeaponState {
    /// Fast, constant damage, inflicts bleed on Hammer opponents
    Katana,
    /// Slow, heavy, grows stronger with every landed hit; carries the bleed
    /// stack the Katana inflicts on it
    Hammer {
        rage: u32,
        bleed: TimedStack,
        bleed_clock_ms: f32,
    },
}

impl WeaponState {
    pub fn katana() -> Self {
        WeaponState::Katana
    }

    pub fn hammer() -> Self {
        WeaponState::Hammer {
            rage: 0,
            bleed: TimedStack::default(),
            bleed_clock_ms: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponState::Katana => "Katana",
            WeaponState::Hammer { .. } => "Hammer",
        }
    }

    /// Resolve one landed attack by this weapon
    pub fn attack(&mut self) -> AttackOutcome {
        match self {
            WeaponState::Katana => AttackOutcome {
                damage: KATANA_DAMAGE,
                inflict: Some(Affliction::Bleed(BLEED_DURATION_MS)),
            },
            WeaponState::Hammer { rage, .. } => {
                let damage = HAMMER_DAMAGE + *rage as f32 * RAGE_STEP;
                *rage += 1;
                AttackOutcome {
                    damage,
                    inflict: None,
                }
            }
        }
    }

    /// Advance timed effect state, surfacing any self-damage events
    pub fn update(&mut self, dt_ms: f32) -> Vec<WeaponEvent> {
        let mut events = Vec::new();
        if let WeaponState::Hammer {
            bleed,
            bleed_clock_ms,
            ..
        } = self
        {
            *bleed_clock_ms += dt_ms;
            if *bleed_clock_ms >= BLEED_TICK_MS {
                *bleed_clock_ms -= BLEED_TICK_MS;
                if !bleed.is_empty() {
                    events.push(WeaponEvent::BleedTick {
                        damage: bleed.len() as f32,
                    });
                }
            }
            bleed.decay(dt_ms);
        }
        events
    }

    /// Accept an affliction routed from the opponent. Returns whether it
    /// took hold (bleed only sticks to the Hammer).
    pub fn apply_affliction(&mut self, affliction: Affliction) -> bool {
        match (self, affliction) {
            (WeaponState::Hammer { bleed, .. }, Affliction::Bleed(duration)) => {
                bleed.push(duration);
                true
            }
            (WeaponState::Katana, Affliction::Bleed(_)) => false,
        }
    }

    /// Base attack-readiness stat, before effect scaling
    pub fn base_speed(&self) -> f32 {
        match self {
            WeaponState::Katana => KATANA_SPEED,
            WeaponState::Hammer { .. } => HAMMER_SPEED,
        }
    }

    /// Active bleed stack count (0 for the Katana, which cannot bleed)
    pub fn bleed_stacks(&self) -> usize {
        match self {
            WeaponState::Katana => 0,
            WeaponState::Hammer { bleed, .. } => bleed.len(),
        }
    }

    /// Rage counter (0 for the Katana)
    pub fn rage(&self) -> u32 {
        match self {
            WeaponState::Katana => 0,
            WeaponState::Hammer { rage, .. } => *rage,
        }
    }
}

/// One combatant: a body and a weapon, created together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub body: Body,
    pub weapon: WeaponState,
    pub hp: f32,
}

impl Fighter {
    pub fn new(pos: Vec2, weapon: WeaponState) -> Self {
        Self {
            body: Body::new(pos),
            weapon,
            hp: MAX_HP,
        }
    }

    /// Damage per landed hit given the current effect state
    pub fn current_damage(&self) -> f32 {
        match &self.weapon {
            WeaponState::Katana => KATANA_DAMAGE,
            WeaponState::Hammer { rage, .. } => HAMMER_DAMAGE + *rage as f32 * RAGE_STEP,
        }
    }

    /// Attack-readiness stat given the current effect state
    pub fn current_speed(&self) -> f32 {
        match &self.weapon {
            WeaponState::Katana => KATANA_SPEED,
            WeaponState::Hammer { rage, .. } => HAMMER_SPEED + *rage as f32 * RAGE_STEP,
        }
    }

    /// Apply damage, clamping HP to [0, MAX_HP]. Returns whether the fighter
    /// is defeated. A no-op on an already-defeated fighter (the match is
    /// terminal at that point).
    pub fn take_damage(&mut self, damage: f32) -> bool {
        if self.hp <= 0.0 {
            return true;
        }
        self.hp = (self.hp - damage).clamp(0.0, MAX_HP);
        self.hp == 0.0
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Serializable RNG seed wrapper
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state: two fighters, the transient effect pools, the
/// match clock, and the seeded RNG everything draws randomness from.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub settings: Settings,
    pub phase: MatchPhase,
    pub fighters: [Fighter; 2],
    pub effects: Effects,
    /// Elapsed simulated time (ms)
    pub time_ms: f64,
    /// Wall-clock anchor of the previous step; re-set on resume so pausing
    /// never produces a time jump
    pub(crate) last_step_ms: Option<f64>,
    pub(crate) rng: Pcg32,
}

impl Simulation {
    /// Create an idle simulation with fighters at their start positions
    pub fn new(settings: Settings) -> Self {
        let mut rng = RngState::new(settings.seed).to_rng();
        let fighters = spawn_fighters(&mut rng);
        let effects = Effects::new(settings.max_particles);
        Self {
            settings,
            phase: MatchPhase::Idle,
            fighters,
            effects,
            time_ms: 0.0,
            last_step_ms: None,
            rng,
        }
    }

    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.settings.arena_width, self.settings.arena_height)
    }
}

/// Build both fighters at their fixed start positions with opposite-biased
/// random upward launch impulses.
pub(crate) fn spawn_fighters(rng: &mut Pcg32) -> [Fighter; 2] {
    let mut left = Fighter::new(Vec2::from(START_LEFT), WeaponState::katana());
    let mut right = Fighter::new(Vec2::from(START_RIGHT), WeaponState::hammer());

    // Launch toward each other and upward (y grows downward)
    left.body.vel = Vec2::new(rng.random_range(1.5..3.5), -rng.random_range(2.0..5.0));
    right.body.vel = Vec2::new(-rng.random_range(1.5..3.5), -rng.random_range(2.0..5.0));

    [left, right]
}
