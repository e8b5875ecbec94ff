//! Match settings and tuning
//!
//! Everything an embedder may want to vary without recompiling. Loaded from a
//! JSON file when present, otherwise defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which collision model the combat resolver runs.
///
/// The two models come from parallel designs of the game and play very
/// differently: `Melee` trades hits whenever the balls themselves touch,
/// `Reach` extends a weapon tip along each ball's travel direction and adds
/// parries. Exactly one model runs per match; they are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CombatModel {
    /// Ball-to-ball proximity, probabilistic attacker selection
    Melee,
    /// Weapon-tip proximity with parry and anti-overlap checks
    #[default]
    Reach,
}

impl CombatModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatModel::Melee => "Melee",
            CombatModel::Reach => "Reach",
        }
    }
}

/// Match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// RNG seed for a reproducible match
    pub seed: u64,
    /// Collision model for the combat resolver
    pub combat_model: CombatModel,
    /// Arena width in pixels
    pub arena_width: f32,
    /// Arena height in pixels
    pub arena_height: f32,
    /// Cap on live particles (oldest bursts are simply not spawned past this)
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            combat_model: CombatModel::default(),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            max_particles: 512,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("settings parse failed ({e}), using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("settings read failed ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
