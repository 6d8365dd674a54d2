//! Transitive requirement flattening benchmarks
//!
//! Measures how flattening scales with environment size and fan-out, and
//! the cost of deriving locks from the flattened set.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vetch_benchmarks::{criterion_config, layered_environment, top_level_requirements};
use vetch_core::{ignore_list, PackageCollection};
use vetch_graph::locked_requirements;

/// Benchmark flattening of top-level requirements
fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    group.measurement_time(std::time::Duration::from_secs(5));

    for size in [50, 200, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        let env = layered_environment(*size, 4);
        let requirements = top_level_requirements(5);

        group.bench_with_input(BenchmarkId::new("packages", size), &env, |b, env| {
            b.iter(|| black_box(requirements.flatten(env)));
        });
    }

    group.finish();
}

/// Benchmark flattening as fan-out grows
fn bench_flatten_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_fan_out");

    for fan_out in [1, 4, 16].iter() {
        let env = layered_environment(300, *fan_out);
        let requirements = top_level_requirements(1);

        group.bench_with_input(BenchmarkId::new("fan_out", fan_out), &env, |b, env| {
            b.iter(|| black_box(requirements.flatten(env)));
        });
    }

    group.finish();
}

/// Benchmark lock derivation
fn bench_locked_requirements(c: &mut Criterion) {
    let mut group = c.benchmark_group("locked_requirements");

    for size in [100, 500].iter() {
        let env = layered_environment(*size, 4);
        let packages = PackageCollection::from_environment(&env, &ignore_list(["pip"]));
        let requirements = top_level_requirements(10);

        group.bench_with_input(BenchmarkId::new("packages", size), &env, |b, env| {
            b.iter(|| black_box(locked_requirements(&packages, &requirements, env)));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_flatten, bench_flatten_fan_out, bench_locked_requirements
}
criterion_main!(benches);
