/*
 * Simulation Step Benchmark
 *
 * Measures the per-tick physics update (tilt translation, clamping and the
 * O(n²) overlap pass) and the overlap pass alone, for the demo's ball count
 * and a few larger crowds.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use tilt_balls::ball::spawn_balls;
use tilt_balls::physics::{self, Viewport};
use tilt_balls::{SimulationParams, Tilt, BALL_COUNT};

const VIEWPORT: Viewport = Viewport {
    width: 430.0,
    height: 860.0,
};

// Benchmark one full tick
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    let params = SimulationParams::default();

    for count in [BALL_COUNT, 200, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let mut balls = spawn_balls(n, VIEWPORT, &mut rng);

            b.iter(|| {
                physics::step(&mut balls, black_box(Tilt::new(0.3, -0.2)), VIEWPORT, &params);
            });
        });
    }

    group.finish();
}

// Benchmark the overlap pass on a freshly spawned (heavily overlapping) crowd
fn bench_resolve_overlaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_overlaps");

    for count in [BALL_COUNT, 200, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let balls = spawn_balls(n, VIEWPORT, &mut rng);

            b.iter(|| {
                let mut balls = balls.clone();
                black_box(physics::resolve_overlaps(&mut balls));
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_step, bench_resolve_overlaps
}

criterion_main!(benches);
