use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bench_utils::*;
use ditherworks::{
    color_palette::ColorMode,
    dithering::threshold::{ThresholdType, threshold_transform::ThresholdImpl},
    prelude::{GrayscaleTransform, RgbTransform, TextureTransform},
    texture::{Texture, TextureRef},
};

/// Working buffer a threshold pass reads for `mode`
fn threshold_data(mode: &ColorMode, size: u32) -> Texture<f32> {
    let image = gradient_image(size);
    let mut work = Texture::new(size, size, mode.planes());
    match mode {
        ColorMode::Monochrome => GrayscaleTransform::Seq
            .build()
            .once(image.as_texture_slice(), work.as_texture_mut_slice()),
        ColorMode::Palette(_) => {
            RgbTransform::default().once(image.as_texture_slice(), work.as_texture_mut_slice())
        }
    };
    black_box(work)
}

fn criterion_benchmark(c: &mut Criterion) {
    for kind in [ThresholdType::Bayer, ThresholdType::BlueNoise] {
        let mut group = c.benchmark_group(format!("threshold_{kind:?}").to_lowercase());

        for colors in [0, 4, 16] {
            let mode = color_mode_preset(colors);
            let input = threshold_data(&mode, BENCH_IMAGE_SIZE);
            let mut output = Texture::<u8>::new(input.width(), input.height(), mode.planes());

            for strategy in [ThresholdImpl::Scalar, ThresholdImpl::ScalarPar] {
                let mut transform = strategy.build(kind.to_config(), &mode);
                transform.prepare(input.shape(), output.shape());

                let id = BenchmarkId::new(format!("{strategy:?}").to_lowercase(), colors);
                group.bench_with_input(id, &colors, |b, _| {
                    b.iter(|| {
                        let res =
                            transform.apply(input.as_texture_slice(), output.as_texture_mut_slice());
                        black_box(res);
                    });
                });
            }
        }

        group.finish();
    }
}

criterion_group!(threshold_strategy, criterion_benchmark);
criterion_main!(threshold_strategy);
