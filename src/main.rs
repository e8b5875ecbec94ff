//! Headless match runner
//!
//! Drives the simulation at a synthetic 60 Hz cadence with a draw-call
//! counting renderer and a logging UI sink. Useful for watching a match
//! play out from the terminal and for profiling the sim without a canvas.

use glam::Vec2;

use arena_brawl::render::{self, FighterStats, Renderer, UiSink};
use arena_brawl::sim::{FighterId, MatchPhase, Simulation};
use arena_brawl::{Color, Settings};

/// Counts draw calls; stands in for a real canvas
#[derive(Default)]
struct HeadlessRenderer {
    calls: u64,
}

impl Renderer for HeadlessRenderer {
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.calls += 1;
    }
    fn polyline(&mut self, _points: &[Vec2], _color: Color, _width: f32) {
        self.calls += 1;
    }
    fn text(&mut self, _text: &str, _pos: Vec2, _size: f32, _color: Color, _outlined: bool) {
        self.calls += 1;
    }
    fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: Color) {
        self.calls += 1;
    }
}

/// Logs stat updates as they arrive
struct LogUi;

impl UiSink for LogUi {
    fn update_fighter(&mut self, id: FighterId, stats: FighterStats) {
        log::info!(
            "{:?} {}: hp {:.0}/{:.0}% dmg {:.1} spd {:.1} bleed {} rage {}",
            id,
            stats.name,
            stats.hp,
            stats.hp_pct,
            stats.damage,
            stats.speed,
            stats.bleed_stacks,
            stats.rage,
        );
    }
}

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 120; // two minutes of match time

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    log::info!(
        "seed {} / {} model / {}x{} arena",
        settings.seed,
        settings.combat_model.as_str(),
        settings.arena_width,
        settings.arena_height,
    );

    let mut sim = Simulation::new(settings);
    let mut renderer = HeadlessRenderer::default();
    let mut ui = LogUi;

    render::publish_ui(&sim, &mut ui);
    sim.start(0.0);

    let mut now_ms = 0.0;
    for _ in 0..MAX_FRAMES {
        now_ms += FRAME_MS;
        let activity = sim.step(now_ms);
        render::draw_frame(&sim, &mut renderer);
        if activity {
            render::publish_ui(&sim, &mut ui);
        }
        if let MatchPhase::Ended(winner) = sim.phase {
            log::info!(
                "{} wins after {:.1}s ({} draw calls)",
                sim.fighter(winner).weapon.name(),
                sim.time_ms / 1000.0,
                renderer.calls,
            );
            return;
        }
    }

    log::info!(
        "time limit reached with no winner ({:.0} / {:.0} hp)",
        sim.fighter(FighterId::Left).hp,
        sim.fighter(FighterId::Right).hp,
    );
}
