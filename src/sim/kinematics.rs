//! Per-tick motion integration and boundary bouncing
//!
//! Deliberately frame-coupled: gravity and position integration are applied
//! per tick, not scaled by dt. The game reads as "energetic perpetual
//! bouncing", not as an exact integrator, and several corrections below
//! inject energy to keep it that way.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Body;
use crate::consts::*;

/// Advance one body by one tick inside an `arena`-sized box.
///
/// Order matters: gravity, integration, friction, the minimum-speed floor,
/// random jitter, the floor anti-stick kick, then wall resolution, then the
/// trail record.
pub fn integrate(body: &mut Body, arena: Vec2, rng: &mut Pcg32) {
    body.vel.y += GRAVITY;
    body.pos += body.vel;
    body.vel *= FRICTION;

    enforce_min_speed(body);

    // Occasional random impulse keeps the motion chaotic
    if rng.random_bool(JITTER_CHANCE) {
        body.vel.x += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
        body.vel.y += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
    }

    anti_stick(body, arena);
    resolve_bounds(body, arena, rng);

    body.record_trail();
}

/// Rescale a slow-but-moving body back up to `MIN_VELOCITY`. The epsilon
/// guard keeps a genuinely resting body at rest and avoids normalizing a
/// near-zero vector into NaN.
pub fn enforce_min_speed(body: &mut Body) {
    let speed = body.vel.length();
    if speed > SPEED_EPSILON && speed < MIN_VELOCITY {
        body.vel *= MIN_VELOCITY / speed;
    }
}

/// If the body hovers near the floor with almost no vertical motion, kick it
/// vertically so it never settles. Sign follows the current direction,
/// upward when exactly zero.
fn anti_stick(body: &mut Body, arena: Vec2) {
    let near_floor = body.pos.y > arena.y - body.radius - FLOOR_PROXIMITY;
    if near_floor && body.vel.y.abs() < STICK_EPSILON {
        body.vel.y = if body.vel.y > 0.0 {
            MIN_VELOCITY
        } else {
            -MIN_VELOCITY
        };
    }
}

/// Clamp the body into the arena and reflect off any penetrated wall.
///
/// Every bounce damps the reflected component and jitters the orthogonal
/// one. The floor is special: the reflection is always upward, gets an extra
/// boost, and is forced to `2 * MIN_VELOCITY` if still too weak - bodies
/// never come to rest on the ground.
pub fn resolve_bounds(body: &mut Body, arena: Vec2, rng: &mut Pcg32) {
    let r = body.radius;

    if body.pos.x < r {
        body.pos.x = r;
        body.vel.x = body.vel.x.abs() * BOUNCE_DAMPING;
        body.vel.y += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
    } else if body.pos.x > arena.x - r {
        body.pos.x = arena.x - r;
        body.vel.x = -body.vel.x.abs() * BOUNCE_DAMPING;
        body.vel.y += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
    }

    if body.pos.y < r {
        body.pos.y = r;
        body.vel.y = body.vel.y.abs() * BOUNCE_DAMPING;
        body.vel.x += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
    } else if body.pos.y > arena.y - r {
        body.pos.y = arena.y - r;
        body.vel.y = -body.vel.y.abs() * BOUNCE_DAMPING * GROUND_BOOST;
        if body.vel.y.abs() < MIN_VELOCITY {
            body.vel.y = -2.0 * MIN_VELOCITY;
        }
        body.vel.x += rng.random_range(-JITTER_IMPULSE..JITTER_IMPULSE);
    }
}
