use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qd_math::Calibrator;

fn bench_calibration(c: &mut Criterion) {
    let calibrator = Calibrator::new((0.0, 1.0), 1e-10, 100);

    c.bench_function("calibrate_linear", |b| {
        b.iter(|| {
            calibrator
                .solve(|p| 10.0 + 50.0 * p, black_box(17.5))
                .unwrap()
        })
    });

    c.bench_function("calibrate_exponential", |b| {
        b.iter(|| {
            calibrator
                .solve(|p| (5.0 * p).exp(), black_box(20.0))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_calibration);
criterion_main!(benches);
