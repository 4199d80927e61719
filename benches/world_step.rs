//! Benchmarks for the CPU-side particle update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use particle_bounce::{Particle, World, GRAVITY};

const FRAME: f32 = 1.0 / 60.0;

fn bench_particle_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_update");

    group.bench_function("free_fall", |b| {
        let mut p = Particle::new(Vec3::new(0.0, 1.0e6, 0.0), Vec3::ZERO, GRAVITY);
        let mut t = 0.0;
        b.iter(|| {
            t += FRAME;
            black_box(p.update(black_box(t)))
        })
    });

    // Starts on the plane moving down, so every call bounces
    group.bench_function("bounce", |b| {
        let p = Particle::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0), GRAVITY);
        b.iter(|| {
            let mut p = p.clone();
            black_box(p.update(black_box(FRAME)))
        })
    });

    group.finish();
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for count in [10, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut world = World::scattered(&mut rng, count);
            let mut t = 0.0;
            b.iter(|| {
                t += FRAME;
                black_box(world.step(t))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_particle_update, bench_world_step);
criterion_main!(benches);
