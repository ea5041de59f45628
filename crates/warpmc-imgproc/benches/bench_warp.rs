use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use warpmc_image::Plane;
use warpmc_imgproc::warp::{warp_affine, warp_plane_exact, WarpConfig};
use warpmc_motion::{MotionModel, ShearParams};

fn bench_warp(c: &mut Criterion) {
    let mut group = c.benchmark_group("Warp");

    // a slight rotation with zoom, inside the block filter range
    let model = MotionModel::Affine {
        translation: [3 << 15, -(5 << 14)],
        linear: [66100, 900, -850, 65900],
    };
    let shear = ShearParams::from_model(&model).unwrap();

    for (width, height) in [(16, 16), (64, 64), (128, 128)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let reference =
            Plane::<u8>::from_fn([width * 2, height * 2].into(), |x, y| ((x * 3 + y * 5) % 251) as u8)
                .unwrap();
        let pred = Plane::<u8>::from_size_val([*width, *height].into(), 0).unwrap();
        let position = (width / 2, height / 2);
        let config = WarpConfig::default();

        group.bench_with_input(
            BenchmarkId::new("warp_affine", &parameter_string),
            &(&reference, &pred),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    warp_affine(
                        black_box(&model),
                        black_box(&shear),
                        black_box(&src.view()),
                        black_box(&mut dst.view_mut()),
                        position,
                        &config,
                    )
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("warp_plane_exact", &parameter_string),
            &(&reference, &pred),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    warp_plane_exact(
                        black_box(&model),
                        black_box(&src.view()),
                        black_box(&mut dst.view_mut()),
                        position,
                        &config,
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp);
criterion_main!(benches);
