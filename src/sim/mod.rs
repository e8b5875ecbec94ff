//! Deterministic battle simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only, owned by the `Simulation` context
//! - No rendering or platform dependencies
//! - One step per external frame callback, tolerant of variable dt

pub mod combat;
pub mod effects;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use combat::{CombatReport, resolve};
pub use effects::{DamageText, Effects, Particle};
pub use state::{
    Affliction, AttackOutcome, Body, Fighter, FighterId, MatchPhase, RngState, Simulation,
    TimedStack, WeaponEvent, WeaponState,
};
