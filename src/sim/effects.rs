//! Transient visual effects: particles and floating damage numbers
//!
//! Draw-only state. Members have no identity: each tick they advance, then
//! the dead are filtered out. Spawn helpers are the only way bursts enter
//! the pools.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Color, heading};

/// Burst palette
pub const HIT_COLOR: Color = [1.0, 0.85, 0.3, 1.0];
pub const BLEED_COLOR: Color = [0.8, 0.12, 0.12, 1.0];
pub const RAGE_COLOR: Color = [1.0, 0.45, 0.1, 1.0];
pub const CLASH_COLOR: Color = [1.0, 0.9, 0.4, 1.0];
pub const SPARK_WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const DAMAGE_COLOR: Color = [1.0, 0.25, 0.25, 1.0];
pub const BLEED_TEXT_COLOR: Color = [0.7, 0.1, 0.1, 1.0];

/// Light pull applied to particle velocity each tick (px/frame^2)
const PARTICLE_GRAVITY: f32 = 0.05;

/// A short-lived visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Remaining lifetime (ms)
    pub life_ms: f32,
    /// Total lifetime (ms), kept for alpha interpolation at render time
    pub total_ms: f32,
    pub size: f32,
}

impl Particle {
    /// Fraction of life remaining, for alpha fading
    pub fn alpha(&self) -> f32 {
        (self.life_ms / self.total_ms).clamp(0.0, 1.0)
    }
}

/// A floating damage number rising from a hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageText {
    pub pos: Vec2,
    pub amount: f32,
    pub color: Color,
    /// Remaining lifetime (ms)
    pub life_ms: f32,
}

/// The two transient pools, capacity-capped for particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<DamageText>,
    max_particles: usize,
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            texts: Vec::new(),
            max_particles,
        }
    }

    /// Drop everything (reset)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.texts.is_empty()
    }

    /// Advance every member and reap the dead
    pub fn update(&mut self, dt_ms: f32) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life_ms -= dt_ms;
        }
        self.particles.retain(|p| p.life_ms > 0.0);

        for t in &mut self.texts {
            t.pos.y -= DAMAGE_TEXT_RISE;
            t.life_ms -= dt_ms;
        }
        self.texts.retain(|t| t.life_ms > 0.0);
    }

    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// One floating number per damage event
    pub fn damage_text(&mut self, pos: Vec2, amount: f32, color: Color) {
        self.texts.push(DamageText {
            pos,
            amount,
            color,
            life_ms: DAMAGE_TEXT_LIFE_MS,
        });
    }

    /// 8-point radial burst at a landed hit
    pub fn hit_sparks(&mut self, pos: Vec2, rng: &mut Pcg32) {
        for i in 0..8 {
            let angle = std::f32::consts::TAU * (i as f32 / 8.0);
            let speed = rng.random_range(1.5..3.5);
            self.push_particle(Particle {
                pos,
                vel: heading(angle) * speed,
                color: HIT_COLOR,
                life_ms: rng.random_range(300.0..600.0),
                total_ms: 600.0,
                size: rng.random_range(2.0..4.0),
            });
        }
    }

    /// 5 slow-falling red drips (bleed applied)
    pub fn bleed_drips(&mut self, pos: Vec2, rng: &mut Pcg32) {
        for _ in 0..5 {
            let jitter = Vec2::new(rng.random_range(-8.0..8.0), rng.random_range(-8.0..8.0));
            self.push_particle(Particle {
                pos: pos + jitter,
                vel: Vec2::new(rng.random_range(-0.3..0.3), rng.random_range(0.3..1.0)),
                color: BLEED_COLOR,
                life_ms: rng.random_range(500.0..900.0),
                total_ms: 900.0,
                size: rng.random_range(2.0..3.5),
            });
        }
    }

    /// 6 upward puffs (rage gained)
    pub fn rage_puffs(&mut self, pos: Vec2, rng: &mut Pcg32) {
        for _ in 0..6 {
            let jitter = Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
            self.push_particle(Particle {
                pos: pos + jitter,
                vel: Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-2.0..-0.8)),
                color: RAGE_COLOR,
                life_ms: rng.random_range(400.0..800.0),
                total_ms: 800.0,
                size: rng.random_range(3.0..5.0),
            });
        }
    }

    /// Weapon clash: 12-point colored ring plus 6 fast white sparks
    pub fn clash_sparks(&mut self, pos: Vec2, rng: &mut Pcg32) {
        for i in 0..12 {
            let angle = std::f32::consts::TAU * (i as f32 / 12.0);
            self.push_particle(Particle {
                pos,
                vel: heading(angle) * rng.random_range(1.0..2.5),
                color: CLASH_COLOR,
                life_ms: rng.random_range(250.0..500.0),
                total_ms: 500.0,
                size: rng.random_range(2.0..3.5),
            });
        }
        for _ in 0..6 {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            self.push_particle(Particle {
                pos,
                vel: heading(angle) * rng.random_range(4.0..7.0),
                color: SPARK_WHITE,
                life_ms: rng.random_range(150.0..350.0),
                total_ms: 350.0,
                size: rng.random_range(1.5..2.5),
            });
        }
    }
}
