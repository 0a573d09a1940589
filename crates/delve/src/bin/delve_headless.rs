//! # DELVE Headless
//!
//! Runs the demo scene without a window and logs what the renderer would see.
//!
//! ```bash
//! # Default config, 600 ticks at 60 Hz
//! delve_headless
//!
//! # Custom config and tick count
//! RUST_LOG=debug delve_headless delve.toml 1200
//! ```

use std::error::Error;

use delve::{darkness_alpha, Button, InputState, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let mut sim = match args.next() {
        Some(path) => Simulation::demo_with(SimulationConfig::load(&path)?),
        None => Simulation::demo(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    tracing::info!("Running demo scene for {} ticks", ticks);

    let mut input = InputState::new();
    for frame in 0..ticks {
        script_input(&mut input, frame);
        let stats = sim.tick(&input, FRAME_DT);
        input.clear_edges();

        if stats.frame % 60 == 0 {
            log_player(&sim);
            tracing::debug!(
                "frame {}: {} bodies, {} contacts, {} light cells, {} raises",
                stats.frame,
                stats.physics.bodies,
                stats.physics.contacts,
                stats.light.cells,
                stats.light.raises
            );
        }
    }

    let view = sim.visible_render_tiles();
    tracing::info!(
        "Done: {} frames, {} chunks loaded, {} tiles in view",
        sim.frame(),
        sim.world.chunk_count(),
        view.area()
    );
    Ok(())
}

/// Walks right, sprints for a while, then hops back left.
fn script_input(input: &mut InputState, frame: u64) {
    match frame {
        30 => input.press(Button::MoveRight),
        90 => input.press(Button::Sprint),
        150 => {
            input.release(Button::Sprint);
            input.release(Button::MoveRight);
            input.press(Button::MoveLeft);
            input.press(Button::Jump);
        }
        160 => input.release(Button::Jump),
        300 => input.release(Button::MoveLeft),
        _ => {}
    }
}

fn log_player(sim: &Simulation) {
    let Some(player) = sim.tracked() else {
        return;
    };
    let (Some(transform), Some(collider)) = (
        sim.ecs.transforms.get(player),
        sim.ecs.colliders.get(player),
    ) else {
        tracing::warn!("Tracked entity {:?} has no body", player);
        return;
    };

    let (tile_x, tile_y) = sim.world.tile_at_pixel(transform.pos.x, transform.pos.y);
    let light = sim.sample_light(tile_x, tile_y);
    tracing::info!(
        "frame {}: player at ({:.1}, {:.1}) tile ({}, {}) grounded={} light={} darkness={}",
        sim.frame(),
        transform.pos.x,
        transform.pos.y,
        tile_x,
        tile_y,
        collider.on_ground,
        light,
        darkness_alpha(light)
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
