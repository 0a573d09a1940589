//! # Simulation Tick
//!
//! Owns every piece of simulation state and advances it one frame at a time.
//!
//! ```text
//! tick(input, dt):
//!   1. clamp dt to [0, max_frame_dt]
//!   2. player system   (input -> velocities)
//!   3. physics         (gravity for all, then X-then-Y per body)
//!   4. follow system   (followers snap to their targets)
//!   5. camera follow   (smoothly track the tracked entity)
//!   6. gather lights   (ECS -> light source list)
//!   7. light rebuild   (visible region + margin)
//! ```
//!
//! Lighting runs last so it always reflects this tick's final positions.
//! Nothing here is global: two `Simulation`s never share state.

use delve_core::{Collider, Ecs, Follow, Handle, Light, Player, Transform, Vec2, Velocity};
use delve_procedural::{Tile, TileWorld};

use crate::camera::{Camera2D, TileRect};
use crate::config::SimulationConfig;
use crate::input::InputState;
use crate::lighting::{LightMap, LightSource, LightStats};
use crate::physics::{PhysicsResolver, PhysicsStats};
use crate::systems::{follow_system, gather_lights, player_system};

/// Counters from one [`Simulation::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Frame number after this tick.
    pub frame: u64,
    /// Delta actually simulated, after clamping.
    pub dt: f32,
    /// Physics counters.
    pub physics: PhysicsStats,
    /// Followers moved.
    pub followers: usize,
    /// Lights gathered from the ECS.
    pub lights: usize,
    /// Light map counters.
    pub light: LightStats,
}

/// All simulation state: entities, tile world, lighting and camera.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    /// Entities and components.
    pub ecs: Ecs,
    /// Tile world.
    pub world: TileWorld,
    /// Light grid from the last tick.
    pub light_map: LightMap,
    /// Camera the light grid is built around.
    pub camera: Camera2D,
    physics: PhysicsResolver,
    /// Reused every tick by the gather step.
    light_sources: Vec<LightSource>,
    tracked: Option<Handle>,
    frame: u64,
}

impl Simulation {
    /// Creates a simulation over the default sine terrain.
    ///
    /// # Panics
    ///
    /// Panics if `config.world.tile_px` is not positive. Configs produced by
    /// [`SimulationConfig::from_toml_str`] are already validated.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        let world = TileWorld::new(config.world.tile_px);
        Self::with_world(config, world)
    }

    /// Creates a simulation over an existing world.
    #[must_use]
    pub fn with_world(config: SimulationConfig, world: TileWorld) -> Self {
        if world.tile_px() != config.world.tile_px {
            tracing::warn!(
                "World uses {} px tiles but config says {}; the world wins",
                world.tile_px(),
                config.world.tile_px
            );
        }
        tracing::debug!("Simulation created: {:?}", config);

        Self {
            ecs: Ecs::new(),
            light_map: LightMap::new(&config.lighting),
            camera: Camera2D::new(
                Vec2::ZERO,
                Vec2::new(config.camera.viewport_width, config.camera.viewport_height),
            ),
            physics: PhysicsResolver::new(&config.physics),
            light_sources: Vec::with_capacity(128),
            tracked: None,
            frame: 0,
            world,
            config,
        }
    }

    /// The demo scene: a stone ledge with a grass top over `x` in `[-15, 15]`,
    /// a player dropped from `(0, 200)` and a torch floating 20 px above them.
    #[must_use]
    pub fn demo() -> Self {
        let mut config = SimulationConfig::default();
        config.lighting.ambient = 35;
        Self::demo_with(config)
    }

    /// The demo scene under a caller-supplied configuration.
    #[must_use]
    pub fn demo_with(config: SimulationConfig) -> Self {
        let mut sim = Self::new(config);

        for x in -15..=15 {
            sim.world.set(x, 10, Tile::STONE);
            sim.world.set(x, 9, Tile::GRASS);
        }

        let player = sim.ecs.spawn();
        sim.ecs.add(player, Transform::at(Vec2::new(0.0, 200.0)));
        sim.ecs.add(player, Velocity::default());
        sim.ecs.add(player, Collider::new(14.0, 20.0));
        sim.ecs.add(
            player,
            Player {
                move_speed: 360.0,
                jump_speed: 640.0,
            },
        );

        let torch = sim.ecs.spawn();
        sim.ecs.add(torch, Transform::default());
        sim.ecs.add(
            torch,
            Light {
                radius_tiles: 12,
                intensity: 255,
            },
        );
        sim.ecs.add(
            torch,
            Follow {
                target: player,
                offset: Vec2::new(0.0, -20.0),
            },
        );

        sim.camera.pos = Vec2::new(0.0, 150.0);
        sim.track(player);
        sim
    }

    /// Makes the camera follow `handle`.
    pub fn track(&mut self, handle: Handle) {
        self.tracked = Some(handle);
    }

    /// Entity the camera follows, if any.
    #[must_use]
    pub const fn tracked(&self) -> Option<Handle> {
        self.tracked
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks completed.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Light sources gathered by the last tick.
    #[must_use]
    pub fn light_sources(&self) -> &[LightSource] {
        &self.light_sources
    }

    /// Clamps a raw frame delta to `[0, max_frame_dt]`. NaN becomes 0.
    #[must_use]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        let max = self.config.max_frame_dt;
        if dt.is_nan() || dt <= 0.0 {
            return 0.0;
        }
        if dt > max {
            tracing::warn!("Frame delta {:.4}s clamped to {:.4}s", dt, max);
            return max;
        }
        dt
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, input: &InputState, dt: f32) -> TickStats {
        let dt = self.clamp_dt(dt);

        player_system(&mut self.ecs, input, &self.config.player, dt);
        let physics = self.physics.step(&mut self.ecs, &mut self.world, dt);
        let followers = follow_system(&mut self.ecs);

        if let Some(target) = self.tracked_position() {
            self.camera.follow(target, self.config.camera.follow_rate, dt);
        }

        gather_lights(&self.ecs, &mut self.light_sources);
        let light = self
            .light_map
            .build_visible(&mut self.world, &self.camera, &self.light_sources);

        self.frame += 1;
        TickStats {
            frame: self.frame,
            dt,
            physics,
            followers,
            lights: self.light_sources.len(),
            light,
        }
    }

    fn tracked_position(&self) -> Option<Vec2> {
        let handle = self.tracked?;
        if !self.ecs.alive(handle) {
            return None;
        }
        self.ecs.transforms.get(handle).map(|t| t.pos)
    }

    /// Light level at a world tile from the last tick.
    #[must_use]
    pub fn sample_light(&self, tile_x: i32, tile_y: i32) -> u8 {
        self.light_map.sample_tile(tile_x, tile_y)
    }

    /// Tiles a renderer should draw this frame: the camera view plus the
    /// configured render margin. Always inside the lit region when
    /// `render_margin <= grid_margin`.
    #[must_use]
    pub fn visible_render_tiles(&self) -> TileRect {
        self.camera
            .visible_tiles(self.world.tile_px(), self.config.lighting.render_margin)
    }

    /// Applies mouse-wheel zoom steps within the configured clamp.
    pub fn zoom(&mut self, steps: f32) {
        let camera = &self.config.camera;
        self.camera.apply_zoom_steps(steps, camera.zoom_min, camera.zoom_max);
    }

    /// Digs out the tile under a screen position.
    ///
    /// # Returns
    ///
    /// `true` if a tile was removed.
    pub fn dig_at_screen(&mut self, screen: Vec2) -> bool {
        let world_pos = self.camera.screen_to_world(screen);
        let (tile_x, tile_y) = self.world.tile_at_pixel(world_pos.x, world_pos.y);
        self.world.dig(tile_x, tile_y)
    }

    /// Places `tile` at the empty tile under a screen position.
    ///
    /// # Returns
    ///
    /// `true` if the tile was placed.
    pub fn place_at_screen(&mut self, screen: Vec2, tile: Tile) -> bool {
        let world_pos = self.camera.screen_to_world(screen);
        let (tile_x, tile_y) = self.world.tile_at_pixel(world_pos.x, world_pos.y);
        self.world.place(tile_x, tile_y, tile)
    }
}
