//! Benchmarks for linear regression and the Gauss-Jordan inverse.

use cocinar::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// y = 1 + 2*x1 - x2 + 0.5*x3 with a little deterministic wiggle
fn synthetic(size: usize) -> (Matrix<f64>, Vector<f64>) {
    let x_data: Vec<f64> = (0..size * 3)
        .map(|i| ((i * 7919) % 101) as f64 / 10.0)
        .collect();
    let x = Matrix::from_vec(size, 3, x_data).expect("valid shape");
    let y: Vector<f64> = (0..size)
        .map(|i| 1.0 + 2.0 * x.get(i, 0) - x.get(i, 1) + 0.5 * x.get(i, 2) + (i % 3) as f64 * 0.01)
        .collect();
    (x, y)
}

fn bench_linear_regression_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_regression_fit");

    for size in [10, 50, 100, 500].iter() {
        let (x, y) = synthetic(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                LinearRegression::new()
                    .fit(black_box(&x), black_box(&y))
                    .expect("full rank")
            });
        });
    }

    group.finish();
}

fn bench_linear_regression_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_regression_predict");

    for size in [10, 50, 100, 500].iter() {
        let (x, y) = synthetic(*size);
        let model = LinearRegression::new().fit(&x, &y).expect("full rank");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| model.predict(black_box(&x)).expect("matching shape"));
        });
    }

    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_inverse");

    for n in [3, 6, 12, 24].iter() {
        let data: Vec<f64> = (0..n * n)
            .map(|i| if i % (n + 1) == 0 { 10.0 * *n as f64 } else { (i % 7) as f64 })
            .collect();
        let m = Matrix::from_vec(*n, *n, data).expect("square");

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| black_box(&m).inverse().expect("diagonally dominant"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_linear_regression_fit,
    bench_linear_regression_predict,
    bench_inverse
);
criterion_main!(benches);
