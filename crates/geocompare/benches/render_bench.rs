//! Criterion benchmarks for the per-viewport render transform and measurement.
//! Focus sizes: n in {1, 10, 100, 1000} vertices.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geocompare::geo::{LatLng, MapId, Viewport, WebMercator};
use geocompare::measure::{self, Mode};
use geocompare::shape::Shape;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_shape(n: usize, seed: u64) -> Shape {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| Vector2::new(rng.gen_range(-2000.0..2000.0), rng.gen_range(-2000.0..2000.0)))
        .collect();
    Shape::from_parts(
        MapId::One,
        LatLng::new(48.8566, 2.3522),
        LatLng::new(40.7128, -74.0060),
        rng.gen::<f64>() * std::f64::consts::TAU,
        points,
    )
    .expect("n >= 1")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let origin = Viewport::new(LatLng::new(48.8566, 2.3522), 13.0);
    let comparison = Viewport::new(LatLng::new(40.7128, -74.0060), 12.5);
    for &n in &[1usize, 10, 100, 1000] {
        let shape = random_shape(n, 7);
        group.bench_with_input(BenchmarkId::new("origin_points", n), &shape, |b, s| {
            b.iter(|| s.render_points(&WebMercator, &origin, MapId::One))
        });
        group.bench_with_input(BenchmarkId::new("comparison_points", n), &shape, |b, s| {
            b.iter(|| s.render_points(&WebMercator, &comparison, MapId::Two))
        });
        let outline = shape.render_points(&WebMercator, &comparison, MapId::Two);
        group.bench_with_input(BenchmarkId::new("planar_area", n), &outline, |b, pts| {
            b.iter(|| measure::value(Mode::Area, pts))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
