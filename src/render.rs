//! Rendering and UI adapters
//!
//! The simulation never draws. External embedders implement `Renderer` (a
//! canvas-like draw surface) and `UiSink` (scalar stat readouts), and call
//! `draw_frame` / `publish_ui` after each step. Nothing returned from either
//! trait feeds back into simulation state.

use glam::Vec2;

use crate::consts::*;
use crate::settings::CombatModel;
use crate::sim::{FighterId, MatchPhase, Simulation, WeaponState};
use crate::{Color, with_alpha};

/// Draw-surface capability consumed by `draw_frame`
pub trait Renderer {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn polyline(&mut self, points: &[Vec2], color: Color, width: f32);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, outlined: bool);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
}

/// Read-only stat projection pushed to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct FighterStats {
    pub name: &'static str,
    pub hp: f32,
    pub hp_pct: f32,
    pub damage: f32,
    pub speed: f32,
    pub bleed_stacks: usize,
    pub rage: u32,
}

/// UI capability: receives stat updates, renders them however it likes
pub trait UiSink {
    fn update_fighter(&mut self, id: FighterId, stats: FighterStats);
}

/// Fighter body colors
const KATANA_BODY: Color = [0.3, 0.75, 0.95, 1.0];
const HAMMER_BODY: Color = [0.95, 0.55, 0.2, 1.0];
const WEAPON_COLOR: Color = [0.85, 0.85, 0.9, 1.0];
const OVERLAY_COLOR: Color = [0.0, 0.0, 0.0, 0.6];
const WINNER_TEXT_COLOR: Color = [1.0, 0.9, 0.3, 1.0];

fn body_color(weapon: &WeaponState) -> Color {
    match weapon {
        WeaponState::Katana => KATANA_BODY,
        WeaponState::Hammer { .. } => HAMMER_BODY,
    }
}

/// Emit one frame of draw calls from the current simulation state.
pub fn draw_frame(sim: &Simulation, renderer: &mut dyn Renderer) {
    for fighter in &sim.fighters {
        let color = body_color(&fighter.weapon);

        if fighter.body.trail.len() >= 2 {
            renderer.polyline(&fighter.body.trail, with_alpha(color, 0.35), 2.0);
        }

        renderer.fill_circle(fighter.body.pos, fighter.body.radius, color);

        // Weapon silhouette only exists in the reach model; melee fighters
        // are the weapon
        if sim.settings.combat_model == CombatModel::Reach {
            let silhouette = [fighter.body.pos, fighter.body.weapon_tip()];
            renderer.polyline(&silhouette, WEAPON_COLOR, 3.0);
        }
    }

    for particle in &sim.effects.particles {
        renderer.fill_circle(
            particle.pos,
            particle.size,
            with_alpha(particle.color, particle.alpha()),
        );
    }

    for text in &sim.effects.texts {
        let alpha = (text.life_ms / DAMAGE_TEXT_LIFE_MS).clamp(0.0, 1.0);
        renderer.text(
            &format!("-{:.0}", text.amount),
            text.pos,
            16.0,
            with_alpha(text.color, alpha),
            true,
        );
    }

    if let MatchPhase::Ended(winner) = sim.phase {
        let arena = sim.arena();
        renderer.fill_rect(Vec2::ZERO, arena, OVERLAY_COLOR);
        renderer.text(
            &format!("{} wins!", sim.fighter(winner).weapon.name()),
            arena / 2.0,
            36.0,
            WINNER_TEXT_COLOR,
            true,
        );
    }
}

/// Push both fighters' stat projections to the UI sink.
pub fn publish_ui(sim: &Simulation, ui: &mut dyn UiSink) {
    for id in [FighterId::Left, FighterId::Right] {
        let fighter = sim.fighter(id);
        ui.update_fighter(
            id,
            FighterStats {
                name: fighter.weapon.name(),
                hp: fighter.hp,
                hp_pct: fighter.hp / MAX_HP * 100.0,
                damage: fighter.current_damage(),
                speed: fighter.current_speed(),
                bleed_stacks: fighter.weapon.bleed_stacks(),
                rage: fighter.weapon.rage(),
            },
        );
    }
}
