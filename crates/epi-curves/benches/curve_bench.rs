use criterion::{black_box, criterion_group, criterion_main, Criterion};
use epi_curves::CurveGenerator;

fn bench_generate_600(c: &mut Criterion) {
    let mut generator = CurveGenerator::new(600, Some(5));

    c.bench_function("generate_random_parametric_path_600", |b| {
        b.iter(|| black_box(generator.generate_random_parametric_path()));
    });
}

criterion_group!(benches, bench_generate_600);
criterion_main!(benches);
