use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use postblur_image::{ColorImage, IntensityPlane};
use postblur_imgproc::{
    filter::{horizontal_filter, kernels::CosineKernel, EdgeMode},
    parallel::ExecutionStrategy,
    BlurConfig, ParallelGaussianBlur,
};

fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cosine Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for tap_count in [1, 5, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * (2 * *tap_count + 1)) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, tap_count);

            let image_size = [*width, *height].into();
            let image = ColorImage::from_size_val(image_size, 0.5).unwrap();
            let plane = IntensityPlane::from_size_val(image_size, 0.5).unwrap();

            group.bench_with_input(
                BenchmarkId::new("horizontal_filter", &parameter_string),
                &plane,
                |b, src| {
                    let kernel = CosineKernel::approximate(*tap_count);
                    let mut dst = IntensityPlane::from_size_val(src.size(), 0.0).unwrap();
                    b.iter(|| {
                        dst.as_slice_mut().fill(0.0);
                        black_box(horizontal_filter(src, &mut dst, &kernel, EdgeMode::Omit))
                    })
                },
            );

            for (name, strategy) in [
                ("blur_serial", ExecutionStrategy::Serial),
                ("blur_parallel", ExecutionStrategy::Parallel),
            ] {
                let blur = ParallelGaussianBlur::new(
                    BlurConfig::default()
                        .with_tap_count(*tap_count)
                        .with_strategy(strategy),
                )
                .unwrap();

                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &image,
                    |b, src| b.iter(|| black_box(blur.process(src))),
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, bench_blur);
criterion_main!(benches);
