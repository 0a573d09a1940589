//! Benchmark for light propagation and the full simulation tick.
//!
//! Run with: cargo bench --package delve --bench lighting_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use delve::{Camera2D, InputState, LightMap, LightSource, Simulation};
use delve_core::Vec2;
use delve_procedural::TileWorld;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn benchmark_visible_rebuild(c: &mut Criterion) {
    let mut world = TileWorld::new(32);
    let camera = Camera2D::new(Vec2::new(0.0, 500.0), Vec2::new(1280.0, 720.0));
    let mut map = LightMap::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut group = c.benchmark_group("light_rebuild");
    for count in [1usize, 8, 64] {
        let lights: Vec<LightSource> = (0..count)
            .map(|_| {
                let pos = Vec2::new(rng.gen_range(-640.0..640.0), rng.gen_range(140.0..860.0));
                LightSource::new(pos, rng.gen_range(128..=255))
            })
            .collect();

        // Warm the chunk cache so the measurement is propagation only
        map.build_visible(&mut world, &camera, &lights);
        group.throughput(Throughput::Elements(map.cells().len() as u64));
        group.bench_function(format!("{count}_lights"), |b| {
            b.iter(|| black_box(map.build_visible(&mut world, &camera, &lights)));
        });
    }
    group.finish();
}

fn benchmark_demo_tick(c: &mut Criterion) {
    let mut sim = Simulation::demo();
    let input = InputState::new();

    c.bench_function("demo_tick", |b| {
        b.iter(|| black_box(sim.tick(&input, 1.0 / 60.0)));
    });
}

criterion_group!(benches, benchmark_visible_rebuild, benchmark_demo_tick);
criterion_main!(benches);
