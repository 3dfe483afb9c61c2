//! Benchmarks for the flock tick and frame export.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use murmur::agent::{Kinematics, MAX_FORCE, MAX_SPEED};
use murmur::export::{draw_list, render_svg};
use murmur::prelude::*;
use murmur::rules::{flock_acceleration, Rule};

fn seeded(population: usize, policy: UpdatePolicy) -> Flock {
    Flock::new(
        FlockConfig::default()
            .with_seed(42)
            .with_seed_population(population)
            .with_update_policy(policy),
    )
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for population in [50, 200, 500, 1000] {
        group.bench_with_input(BenchmarkId::new("snapshot", population), &population, |b, &n| {
            let mut flock = seeded(n, UpdatePolicy::Snapshot);
            b.iter(|| flock.tick())
        });
        group.bench_with_input(BenchmarkId::new("sequential", population), &population, |b, &n| {
            let mut flock = seeded(n, UpdatePolicy::Sequential);
            b.iter(|| flock.tick())
        });
    }

    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    let flock = seeded(500, UpdatePolicy::Snapshot);
    let kinematics: Vec<Kinematics> = flock
        .agents()
        .iter()
        .map(|a| Kinematics {
            position: a.position,
            velocity: a.velocity,
        })
        .collect();
    let rules = Rule::classic(flock.params());

    for rule in rules {
        group.bench_function(rule.name(), |b| {
            b.iter(|| black_box(rule.steer(black_box(0), &kinematics, MAX_SPEED, MAX_FORCE)))
        });
    }
    group.bench_function("combined", |b| {
        b.iter(|| black_box(flock_acceleration(&rules, black_box(0), &kinematics, MAX_SPEED, MAX_FORCE)))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    let mut flock = seeded(200, UpdatePolicy::Snapshot);
    for _ in 0..100 {
        flock.tick();
    }
    let agents = flock.agents();

    group.bench_function("snapshot", |b| b.iter(|| black_box(flock.agents())));
    group.bench_function("instances", |b| b.iter(|| black_box(flock.instances())));
    group.bench_function("draw_list", |b| {
        b.iter(|| black_box(draw_list(&agents, flock.display())))
    });
    group.bench_function("svg", |b| {
        b.iter(|| black_box(render_svg(&agents, flock.display(), 800.0, 600.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_rules, bench_export);
criterion_main!(benches);
