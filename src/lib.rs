//! Arena Brawl - a two-combatant physics battle animation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, status effects, lifecycle)
//! - `render`: Renderer / UI sink traits and the state -> draw-call projection
//! - `settings`: Data-driven tuning (seed, combat model, arena dimensions)
//!
//! The simulation never draws or touches a DOM: it mutates state one tick at a
//! time and external adapters read the result through `render`.

pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{CombatModel, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Combatant ball radius
    pub const BALL_RADIUS: f32 = 25.0;
    /// Trail history length (visual only)
    pub const TRAIL_LENGTH: usize = 10;

    /// Downward acceleration per frame (px/frame^2, intentionally not
    /// dt-scaled; motion is coupled to frame cadence)
    pub const GRAVITY: f32 = 0.15;
    /// Per-frame velocity decay factor
    pub const FRICTION: f32 = 0.999;
    /// Speed floor - nonzero bodies are kept at least this fast (px/frame)
    pub const MIN_VELOCITY: f32 = 3.0;
    /// Below this, a velocity counts as zero and is never renormalized
    pub const SPEED_EPSILON: f32 = 0.01;
    /// Velocity kept after a wall bounce
    pub const BOUNCE_DAMPING: f32 = 0.85;
    /// Extra boost applied to floor bounces (keeps bodies airborne)
    pub const GROUND_BOOST: f32 = 1.15;
    /// Per-tick chance of a random impulse on both axes
    pub const JITTER_CHANCE: f64 = 0.02;
    /// Max magnitude of the random impulse (px/frame)
    pub const JITTER_IMPULSE: f32 = 0.5;
    /// |vel.y| below this near the floor triggers the anti-stick kick
    pub const STICK_EPSILON: f32 = 0.5;
    /// Distance from the floor within which anti-stick applies
    pub const FLOOR_PROXIMITY: f32 = 5.0;

    /// Maximum hit points
    pub const MAX_HP: f32 = 100.0;
    /// Katana base damage per landed hit
    pub const KATANA_DAMAGE: f32 = 8.0;
    /// Hammer base damage per landed hit
    pub const HAMMER_DAMAGE: f32 = 10.0;
    /// Katana base speed stat (attack-readiness weight)
    pub const KATANA_SPEED: f32 = 6.0;
    /// Hammer base speed stat
    pub const HAMMER_SPEED: f32 = 4.0;
    /// Damage and speed added per rage stack
    pub const RAGE_STEP: f32 = 0.5;
    /// Duration of one bleed timer (ms)
    pub const BLEED_DURATION_MS: f32 = 3000.0;
    /// Interval between bleed damage ticks (ms)
    pub const BLEED_TICK_MS: f32 = 1000.0;

    /// Center-to-center distance that triggers melee combat
    pub const MELEE_RANGE: f32 = 50.0;
    /// Weapon tip offset from the body center along the velocity heading
    pub const WEAPON_REACH: f32 = 45.0;
    /// Tip-to-body distance that lands a reach attack
    pub const TIP_RANGE: f32 = 30.0;
    /// Extra separation margin on top of combined radii
    pub const OVERLAP_MARGIN: f32 = 4.0;
    /// Knockback impulse magnitude applied after a landed hit
    pub const KNOCKBACK: f32 = 4.0;
    /// Jitter added on top of knockback (px/frame)
    pub const KNOCKBACK_JITTER: f32 = 1.0;

    /// Damage text lifetime (ms)
    pub const DAMAGE_TEXT_LIFE_MS: f32 = 1500.0;
    /// Damage text rise speed (px/frame, upward)
    pub const DAMAGE_TEXT_RISE: f32 = 0.8;

    /// Longest wall-clock delta fed into a single tick (ms); protects
    /// against huge jumps after a stalled frame callback
    pub const MAX_STEP_MS: f32 = 100.0;

    /// Fixed start positions for the two fighters
    pub const START_LEFT: (f32, f32) = (200.0, 300.0);
    pub const START_RIGHT: (f32, f32) = (600.0, 300.0);
}

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// Return `color` with its alpha scaled by `alpha`
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Unit vector for an angle in radians
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
