//! Strategy benchmarks.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench strategy_benchmark -- --noplot
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maxrank_core::{Dataset, PlanarSweep, Point, RankStrategy, SimplexSampling, VertexEnumeration};
use rand::{Rng, SeedableRng};

fn generate_dataset(count: usize, dim: usize, seed: u64) -> Dataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let points = (0..count)
        .map(|i| Point::new(format!("p{i}"), (0..dim).map(|_| rng.gen::<f64>()).collect()))
        .collect();
    Dataset::new(points, dim).unwrap()
}

fn bench_planar(c: &mut Criterion) {
    let mut group = c.benchmark_group("planar_sweep");

    for count in [1_000, 10_000] {
        let data = generate_dataset(count, 2, 42);
        let query = &data.points()[count / 2];
        let strategy = PlanarSweep::default();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| strategy.rank(black_box(&data), black_box(query)).unwrap());
        });
    }

    group.finish();
}

fn bench_simplex(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplex_3d");
    group.sample_size(10);

    let data = generate_dataset(60, 3, 7);
    let query = &data.points()[30];

    let exact = VertexEnumeration::default();
    group.bench_function("vertex_enumeration", |b| {
        b.iter(|| exact.rank(black_box(&data), black_box(query)).unwrap());
    });

    let approx = SimplexSampling::default();
    group.bench_function("simplex_sampling", |b| {
        b.iter(|| approx.rank(black_box(&data), black_box(query)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_planar, bench_simplex);
criterion_main!(benches);
