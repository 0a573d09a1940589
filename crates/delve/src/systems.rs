//! Gameplay systems that run around physics each tick.
//!
//! Every system walks a store's dense rows and re-checks liveness against
//! the registry before touching an entity.

use delve_core::{lerp, Ecs, Follow, Player};

use crate::config::PlayerConfig;
use crate::input::{Button, InputState};
use crate::lighting::LightSource;

/// Turns input into player velocity.
///
/// Horizontal velocity is smoothed toward `axis * move_speed` (times the
/// sprint multiplier while sprint is held). A jump edge while grounded
/// launches the player upward and clears `on_ground`.
pub fn player_system(ecs: &mut Ecs, input: &InputState, config: &PlayerConfig, dt: f32) {
    let axis = input.move_axis();
    let sprint = if input.held(Button::Sprint) {
        config.sprint_multiplier
    } else {
        1.0
    };
    let blend = 1.0 - (-config.smoothing_rate * dt).exp();
    let jump = input.pressed(Button::Jump);

    for row in 0..ecs.players.len() {
        let handle = ecs.players.handle_at(row);
        if !ecs.registry.alive(handle) {
            continue;
        }
        let player: Player = *ecs.players.value_at(row);
        let (Some(velocity), Some(collider)) = (
            ecs.velocities.get_mut(handle),
            ecs.colliders.get_mut(handle),
        ) else {
            continue;
        };

        let target = axis * player.move_speed * sprint;
        velocity.v.x = lerp(velocity.v.x, target, blend);

        if jump && collider.on_ground {
            velocity.v.y = -player.jump_speed;
            collider.on_ground = false;
        }
    }
}

/// Snaps every follower to its target's position plus offset.
///
/// Followers whose target is dead or has no transform stay put.
///
/// # Returns
///
/// Number of followers moved.
pub fn follow_system(ecs: &mut Ecs) -> usize {
    let mut moved = 0;
    for row in 0..ecs.follows.len() {
        let handle = ecs.follows.handle_at(row);
        if !ecs.registry.alive(handle) {
            continue;
        }
        let follow: Follow = *ecs.follows.value_at(row);
        if !ecs.registry.alive(follow.target) {
            continue;
        }
        let Some(target) = ecs.transforms.get(follow.target).map(|t| t.pos) else {
            continue;
        };
        if let Some(transform) = ecs.transforms.get_mut(handle) {
            transform.pos = target + follow.offset;
            moved += 1;
        }
    }
    moved
}

/// Refills `out` with one [`LightSource`] per live entity carrying both a
/// transform and a light.
pub fn gather_lights(ecs: &Ecs, out: &mut Vec<LightSource>) {
    out.clear();
    for (handle, light) in ecs.lights.iter() {
        if !ecs.registry.alive(handle) {
            continue;
        }
        let Some(transform) = ecs.transforms.get(handle) else {
            continue;
        };
        out.push(LightSource {
            pos_px: transform.pos,
            radius_tiles: light.radius_tiles,
            intensity: light.intensity,
        });
    }
}
