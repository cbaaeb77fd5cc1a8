use criterion::{black_box, criterion_group, criterion_main, Criterion};
use epi_core::dft::{compute_coefficients, transform_points};
use epi_core::geometry::{convex_hull, resample};
use epi_core::Point;

fn lissajous(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(100.0 * (3.0 * t).cos(), 100.0 * (2.0 * t).sin())
        })
        .collect()
}

fn bench_dft_600(c: &mut Criterion) {
    let points = lissajous(600);
    c.bench_function("dft_600", |b| {
        b.iter(|| black_box(transform_points(black_box(&points))));
    });
}

fn bench_compute_coefficients_600(c: &mut Criterion) {
    let points = lissajous(600);
    c.bench_function("compute_coefficients_600_terms_80", |b| {
        b.iter(|| black_box(compute_coefficients(black_box(&points), 80, 250.0)));
    });
}

fn bench_resample_600(c: &mut Criterion) {
    let points = lissajous(2000);
    c.bench_function("resample_2000_to_600", |b| {
        b.iter(|| black_box(resample(black_box(&points), 600)));
    });
}

fn bench_convex_hull_2000(c: &mut Criterion) {
    let points = lissajous(2000);
    c.bench_function("convex_hull_2000", |b| {
        b.iter(|| black_box(convex_hull(black_box(&points))));
    });
}

criterion_group!(
    benches,
    bench_dft_600,
    bench_compute_coefficients_600,
    bench_resample_600,
    bench_convex_hull_2000,
);
criterion_main!(benches);
