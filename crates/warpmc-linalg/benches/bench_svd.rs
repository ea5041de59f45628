use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use warpmc_linalg::{pseudo_inverse, svd, Matrix};

fn random_matrix(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix {
    let data = (0..rows * cols)
        .map(|_| rng.random_range(-1.0..1.0))
        .collect::<Vec<f64>>();
    Matrix::from_row_slice(rows, cols, &data).unwrap()
}

fn bench_svd(c: &mut Criterion) {
    let mut group = c.benchmark_group("Svd");
    let mut rng = StdRng::seed_from_u64(0);

    // system shapes produced by the model fitter for 16 correspondences
    for (rows, cols) in [(32, 4), (32, 6), (48, 9)].iter() {
        let parameter_string = format!("{}x{}", rows, cols);
        let a = random_matrix(*rows, *cols, &mut rng);

        group.bench_with_input(BenchmarkId::new("svd", &parameter_string), &a, |b, a| {
            b.iter(|| svd(black_box(a)))
        });

        group.bench_with_input(
            BenchmarkId::new("pseudo_inverse", &parameter_string),
            &a,
            |b, a| b.iter(|| pseudo_inverse(black_box(a))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_svd);
criterion_main!(benches);
