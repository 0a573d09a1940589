//! # Tile Physics
//!
//! Axis-separated AABB collision against solid tiles.
//!
//! Per tick:
//! 1. Gravity is added to every live velocity, clamped to terminal velocity
//! 2. Every live entity with a transform, velocity and collider moves along X
//!    and is pushed out of any solid tile it now overlaps
//! 3. The same entity then moves along Y; landing on a tile sets `on_ground`
//!
//! X is always resolved before Y. Entities missing any of the three
//! components are skipped.

use delve_core::{Collider, Ecs, Transform, Vec2, Velocity};
use delve_procedural::TileWorld;

use crate::config::PhysicsConfig;

/// Per-tick physics counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsStats {
    /// Bodies resolved against the world.
    pub bodies: usize,
    /// Solid tiles that forced a correction (either axis).
    pub contacts: usize,
    /// Bodies standing on a tile after the Y pass.
    pub grounded: usize,
}

/// Axis selector for a resolution pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Moves bodies and resolves them against the tile world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsResolver {
    gravity: f32,
    terminal_velocity: f32,
}

impl Default for PhysicsResolver {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

impl PhysicsResolver {
    /// Creates a resolver from configuration.
    #[must_use]
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
        }
    }

    /// Advances every body by `dt` seconds.
    pub fn step(&self, ecs: &mut Ecs, world: &mut TileWorld, dt: f32) -> PhysicsStats {
        self.apply_gravity(ecs, dt);

        let mut stats = PhysicsStats::default();
        for row in 0..ecs.colliders.len() {
            let handle = ecs.colliders.handle_at(row);
            // Dense rows are not proof of life; the registry is.
            if !ecs.registry.alive(handle) {
                continue;
            }
            let (Some(transform), Some(velocity), Some(collider)) = (
                ecs.transforms.get_mut(handle),
                ecs.velocities.get_mut(handle),
                ecs.colliders.get_mut(handle),
            ) else {
                continue;
            };

            stats.bodies += 1;
            stats.contacts += self.resolve_body(world, transform, velocity, collider, dt);
            if collider.on_ground {
                stats.grounded += 1;
            }
        }
        stats
    }

    /// Adds gravity to every live velocity.
    pub fn apply_gravity(&self, ecs: &mut Ecs, dt: f32) {
        let registry = &ecs.registry;
        for (handle, velocity) in ecs.velocities.iter_mut() {
            if !registry.alive(handle) {
                continue;
            }
            velocity.v.y = (velocity.v.y + self.gravity * dt).min(self.terminal_velocity);
        }
    }

    /// Resolves one body: X pass, then Y pass.
    ///
    /// # Returns
    ///
    /// Number of tile contacts across both passes.
    pub fn resolve_body(
        &self,
        world: &mut TileWorld,
        transform: &mut Transform,
        velocity: &mut Velocity,
        collider: &mut Collider,
        dt: f32,
    ) -> usize {
        let x_hits = resolve_axis(Axis::X, world, transform, velocity, collider, dt);
        let y_hits = resolve_axis(Axis::Y, world, transform, velocity, collider, dt);
        x_hits + y_hits
    }
}

/// One axis pass. Returns the number of tiles that forced a correction.
fn resolve_axis(
    axis: Axis,
    world: &mut TileWorld,
    transform: &mut Transform,
    velocity: &mut Velocity,
    collider: &mut Collider,
    dt: f32,
) -> usize {
    if axis == Axis::Y {
        collider.on_ground = false;
    }

    let pos = &mut transform.pos;
    let half = collider.half;
    let speed = match axis {
        Axis::X => velocity.v.x,
        Axis::Y => velocity.v.y,
    };
    match axis {
        Axis::X => pos.x += speed * dt,
        Axis::Y => pos.y += speed * dt,
    }

    // Push direction is fixed for the whole pass, even after the velocity is zeroed.
    let direction = if speed > 0.0 {
        1
    } else if speed < 0.0 {
        -1
    } else {
        0
    };

    let tile_px = world.tile_px();
    let size = tile_px as f32;
    let min_tx = floor_div(pos.x - half.x, size) - 1;
    let max_tx = floor_div(pos.x + half.x, size) + 1;
    let min_ty = floor_div(pos.y - half.y, size) - 1;
    let max_ty = floor_div(pos.y + half.y, size) + 1;

    let mut hits = 0;
    for ty in min_ty..=max_ty {
        for tx in min_tx..=max_tx {
            if !world.is_solid_at(tx, ty) || !overlaps_tile(*pos, half, tile_px, tx, ty) {
                continue;
            }

            let near = (match axis {
                Axis::X => tx,
                Axis::Y => ty,
            } * tile_px) as f32;
            let far = near + size;
            let (coord, extent) = match axis {
                Axis::X => (&mut pos.x, half.x),
                Axis::Y => (&mut pos.y, half.y),
            };

            match direction {
                1 => {
                    *coord = near - extent;
                    if axis == Axis::Y {
                        collider.on_ground = true;
                    }
                }
                -1 => *coord = far + extent,
                _ => {}
            }

            match axis {
                Axis::X => velocity.v.x = 0.0,
                Axis::Y => velocity.v.y = 0.0,
            }
            hits += 1;
        }
    }
    hits
}

#[inline]
fn floor_div(value: f32, size: f32) -> i32 {
    (value / size).floor() as i32
}

/// Strict overlap: touching edges do not count.
fn overlaps_tile(pos: Vec2, half: Vec2, tile_px: i32, tile_x: i32, tile_y: i32) -> bool {
    let (x0, x1) = (pos.x - half.x, pos.x + half.x);
    let (y0, y1) = (pos.y - half.y, pos.y + half.y);

    let t0 = (tile_x * tile_px) as f32;
    let t1 = t0 + tile_px as f32;
    let s0 = (tile_y * tile_px) as f32;
    let s1 = s0 + tile_px as f32;

    !(x1 <= t0 || x0 >= t1 || y1 <= s0 || y0 >= s1)
}
