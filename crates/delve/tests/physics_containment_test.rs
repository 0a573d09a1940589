//! # Physics Containment Test
//!
//! Bodies dropped into a walled pit must come to rest on the floor and never
//! end a step overlapping a solid tile.

use delve::{PhysicsConfig, PhysicsResolver};
use delve_core::{Collider, Ecs, Handle, Transform, Vec2, Velocity};
use delve_procedural::{EmptyGenerator, Tile, TileWorld};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DT: f32 = 1.0 / 60.0;

/// Stone floor at row 10 for x in [-15, 15], plus walls at x = -16 and 16.
fn walled_pit() -> TileWorld {
    let mut world = TileWorld::with_generator(32, EmptyGenerator);
    for x in -15..=15 {
        world.set(x, 10, Tile::STONE);
    }
    for y in -10..=10 {
        world.set(-16, y, Tile::STONE);
        world.set(16, y, Tile::STONE);
    }
    world
}

fn spawn_body(ecs: &mut Ecs, pos: Vec2, vel: Vec2, half: Vec2) -> Handle {
    let e = ecs.spawn();
    ecs.add(e, Transform::at(pos));
    ecs.add(e, Velocity::new(vel.x, vel.y));
    ecs.add(e, Collider::new(half.x, half.y));
    e
}

fn overlaps_solid(world: &mut TileWorld, pos: Vec2, half: Vec2) -> Option<(i32, i32)> {
    let (left, right) = (pos.x - half.x, pos.x + half.x);
    let (top, bottom) = (pos.y - half.y, pos.y + half.y);
    let x0 = (left / 32.0).floor() as i32;
    let x1 = (right / 32.0).floor() as i32;
    let y0 = (top / 32.0).floor() as i32;
    let y1 = (bottom / 32.0).floor() as i32;

    for ty in y0..=y1 {
        for tx in x0..=x1 {
            if !world.is_solid_at(tx, ty) {
                continue;
            }
            let (t0, s0) = ((tx * 32) as f32, (ty * 32) as f32);
            let strictly_inside = right > t0 && left < t0 + 32.0 && bottom > s0 && top < s0 + 32.0;
            if strictly_inside {
                return Some((tx, ty));
            }
        }
    }
    None
}

/// Test: a dropped body rests exactly on the floor top.
#[test]
fn test_drop_rests_on_floor() {
    let mut world = walled_pit();
    let mut ecs = Ecs::new();
    let resolver = PhysicsResolver::new(&PhysicsConfig::default());
    let body = spawn_body(&mut ecs, Vec2::new(0.0, 200.0), Vec2::ZERO, Vec2::new(14.0, 20.0));

    for _ in 0..240 {
        resolver.step(&mut ecs, &mut world, DT);
    }

    let pos = ecs.transforms.get(body).unwrap().pos;
    assert!((pos.y + 20.0 - 320.0).abs() < f32::EPSILON, "bottom {} != 320", pos.y + 20.0);
    assert!(ecs.colliders.get(body).unwrap().on_ground);
    assert!(ecs.velocities.get(body).unwrap().v.y.abs() < f32::EPSILON);
}

/// Test: a body resting on the floor stays put and stays grounded.
#[test]
fn test_resting_body_is_stable() {
    let mut world = walled_pit();
    let mut ecs = Ecs::new();
    let resolver = PhysicsResolver::new(&PhysicsConfig::default());
    let body = spawn_body(&mut ecs, Vec2::new(64.0, 300.0), Vec2::ZERO, Vec2::new(14.0, 20.0));

    for _ in 0..120 {
        let stats = resolver.step(&mut ecs, &mut world, DT);
        assert_eq!(stats.grounded, 1);
        assert_eq!(ecs.transforms.get(body).unwrap().pos, Vec2::new(64.0, 300.0));
    }
}

/// Test: random bodies never end a step inside a solid tile, and all settle on the floor.
#[test]
fn test_random_bodies_stay_out_of_solids() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xDE17E);
    let mut world = walled_pit();
    let mut ecs = Ecs::new();
    let resolver = PhysicsResolver::new(&PhysicsConfig::default());

    let mut bodies = Vec::new();
    for _ in 0..64 {
        let half = Vec2::new(rng.gen_range(4..=15) as f32, rng.gen_range(4..=15) as f32);
        let pos = Vec2::new(rng.gen_range(-400.0..400.0), rng.gen_range(0.0..250.0));
        let vel = Vec2::new(rng.gen_range(-600.0..600.0), rng.gen_range(-200.0..200.0));
        bodies.push((spawn_body(&mut ecs, pos, vel, half), half));
    }

    for step in 0..600 {
        resolver.step(&mut ecs, &mut world, DT);
        for &(handle, half) in &bodies {
            let pos = ecs.transforms.get(handle).unwrap().pos;
            if let Some(tile) = overlaps_solid(&mut world, pos, half) {
                panic!("body {handle:?} overlaps solid tile {tile:?} after step {step}");
            }
        }
    }

    for &(handle, half) in &bodies {
        let pos = ecs.transforms.get(handle).unwrap().pos;
        assert!((pos.y + half.y - 320.0).abs() < 1e-3, "body {handle:?} did not land");
        assert!(ecs.colliders.get(handle).unwrap().on_ground);
        assert!(pos.x - half.x >= -480.0 && pos.x + half.x <= 512.0, "body escaped the pit");
    }
}

/// Test: destroyed bodies are left where they were.
#[test]
fn test_despawned_body_is_not_simulated() {
    let mut world = walled_pit();
    let mut ecs = Ecs::new();
    let resolver = PhysicsResolver::new(&PhysicsConfig::default());
    let live = spawn_body(&mut ecs, Vec2::new(0.0, 100.0), Vec2::ZERO, Vec2::new(14.0, 20.0));
    let dead = spawn_body(&mut ecs, Vec2::new(100.0, 100.0), Vec2::ZERO, Vec2::new(14.0, 20.0));
    ecs.registry.destroy(dead);

    let stats = resolver.step(&mut ecs, &mut world, DT);
    assert_eq!(stats.bodies, 1);
    assert!(ecs.transforms.get(live).unwrap().pos.y > 100.0);
    // Components outlive the handle until pruned, untouched
    assert_eq!(ecs.transforms.get(dead).unwrap().pos, Vec2::new(100.0, 100.0));
    assert_eq!(ecs.prune_dead(), 3);
    assert!(ecs.transforms.get(dead).is_none());
}
