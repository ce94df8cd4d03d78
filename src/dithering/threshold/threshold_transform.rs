use std::borrow::Cow;

use ditherworks_macros::simd_targets;

use crate::{
    color_palette::ColorMode,
    prelude::TextureTransform,
    texture::{Shape, Shape2D, TextureMutSlice, TextureRef, TextureSlice},
    utils::{
        self,
        num::clamped_index,
        pixel::{RGB, luminance},
    },
};

/// Tiled threshold map shared by every threshold algorithm.
#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    /// square tile, values normalized to `[0, 1)`
    matrix: Cow<'static, [f32]>,
    /// tile side
    side: usize,
    /// monochrome compares `intensity > t * mono_scale`
    mono_scale: f32,
}

impl ThresholdConfig {
    pub fn new(side: usize, matrix: impl Into<Cow<'static, [f32]>>, mono_scale: f32) -> Self {
        let matrix = matrix.into();
        assert!(
            side > 0 && side * side == matrix.len(),
            "threshold side does not match matrix buffer length"
        );
        Self {
            matrix,
            side,
            mono_scale,
        }
    }

    #[inline(always)]
    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.matrix[(y % self.side) * self.side + x % self.side]
    }
}

/// Output levels of a threshold pass.
#[derive(Debug, Clone)]
enum Levels {
    /// 1 plane in, 1 plane out.
    Monochrome { scale: f32 },
    /// 3 planes in, 3 planes out, colors darkest first.
    Palette { sorted: Vec<RGB> },
}

impl Levels {
    fn new(config: &ThresholdConfig, mode: &ColorMode) -> Self {
        match mode {
            ColorMode::Monochrome => Levels::Monochrome {
                scale: config.mono_scale,
            },
            ColorMode::Palette(palette) => Levels::Palette {
                sorted: palette.sorted_by_luminance(),
            },
        }
    }

    fn planes(&self) -> usize {
        match self {
            Levels::Monochrome { .. } => 1,
            Levels::Palette { .. } => 3,
        }
    }
}

/// Strategy for running a threshold pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdImpl {
    /// Row after row on the calling thread.
    Scalar,
    /// Rows spread over the rayon pool.
    ScalarPar,
}

impl ThresholdImpl {
    /// Detect best-fit strategy
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        // estimated usable threads
        let par_hint = rayon::current_num_threads();

        if par_hint == 1 || width * height < 65536 {
            return ThresholdImpl::Scalar;
        }
        ThresholdImpl::ScalarPar
    }

    pub fn build(self, config: ThresholdConfig, mode: &ColorMode) -> ThresholdTransform {
        ThresholdTransform {
            levels: Levels::new(&config, mode),
            config,
            strategy: self,
            tiled: Vec::new(),
            width: 0,
        }
    }
}

/// Threshold pass from an `f32` working buffer (luminance plane or RGB)
/// into the final 8-bit texture.
#[derive(Debug)]
pub struct ThresholdTransform {
    config: ThresholdConfig,
    levels: Levels,
    strategy: ThresholdImpl,
    /// `side` rows of the tile, each expanded to the image width
    tiled: Vec<f32>,
    width: usize,
}

impl TextureTransform for ThresholdTransform {
    type Input = f32;
    type Output = u8;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        debug_assert_eq!(input.planes() as usize, self.levels.planes());
        debug_assert_eq!(output.planes() as usize, self.levels.planes());
        if input.width() as usize != self.width {
            self.prepare(input.shape(), output.shape());
        }

        let pass = Pass {
            width: self.width,
            planes: self.levels.planes(),
            side: self.config.side,
            tiled: &self.tiled,
            levels: &self.levels,
        };
        match self.strategy {
            ThresholdImpl::Scalar => scalar_impl(input.as_ref(), output.as_mut(), &pass),
            ThresholdImpl::ScalarPar => scalar_par_impl(input.as_ref(), output.as_mut(), &pass),
        }
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, _: Shape) {
        let (width, _, _) = in_shape;
        let config = &self.config;
        self.width = width;
        self.tiled =
            utils::transform::precompute_tiled_rows(config.side, width, |x, y| config.value(x, y));
    }
}

struct Pass<'a> {
    width: usize,
    planes: usize,
    side: usize,
    tiled: &'a [f32],
    levels: &'a Levels,
}

impl Pass<'_> {
    #[inline(always)]
    fn row(&self, y: usize, in_row: &[f32], out_row: &mut [u8]) {
        let start = (y % self.side) * self.width;
        let tiled_row = &self.tiled[start..start + self.width];

        match self.levels {
            Levels::Monochrome { scale } => out_row
                .iter_mut()
                .zip(in_row)
                .zip(tiled_row)
                .for_each(|((out, value), t)| *out = if *value > t * scale { 255 } else { 0 }),
            Levels::Palette { sorted } => {
                let n = sorted.len() as f32;
                out_row
                    .chunks_exact_mut(3)
                    .zip(in_row.chunks_exact(3))
                    .zip(tiled_row)
                    .for_each(|((out, rgb), t)| {
                        let l = luminance(rgb[0], rgb[1], rgb[2]) / 255.0;
                        let adjusted = l + (t - 0.5) / n;
                        let color = sorted[clamped_index(adjusted * n, sorted.len() - 1)];
                        out.copy_from_slice(&color.to_array());
                    });
            }
        }
    }
}

#[simd_targets]
fn scalar_impl(in_buf: &[f32], out_buf: &mut [u8], pass: &Pass<'_>) {
    let row_len = pass.width * pass.planes;
    if row_len == 0 {
        return;
    }
    out_buf
        .chunks_exact_mut(row_len)
        .zip(in_buf.chunks_exact(row_len))
        .enumerate()
        .for_each(|(y, (out_row, in_row))| pass.row(y, in_row, out_row));
}

#[simd_targets]
fn scalar_par_impl(in_buf: &[f32], out_buf: &mut [u8], pass: &Pass<'_>) {
    use rayon::prelude::*;

    let row_len = pass.width * pass.planes;
    if row_len == 0 {
        return;
    }
    out_buf
        .par_chunks_exact_mut(row_len)
        .zip(in_buf.par_chunks_exact(row_len))
        .enumerate()
        .for_each(|(y, (out_row, in_row))| pass.row(y, in_row, out_row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color_palette::Palette, dithering::threshold::matrices::bayer_normalized,
        texture::Texture,
    };

    fn ramp(width: u32, height: u32, planes: u32) -> Texture<f32> {
        let len = (width * height * planes) as usize;
        Texture::from_vec(
            width,
            height,
            planes,
            (0..len).map(|v| (v * 7 % 256) as f32).collect(),
        )
    }

    fn run(
        strategy: ThresholdImpl,
        config: &ThresholdConfig,
        mode: &ColorMode,
        input: &Texture<f32>,
    ) -> Texture<u8> {
        let (width, height, _) = input.shape();
        let mut output = Texture::new(width as u32, height as u32, mode.planes());
        strategy
            .build(config.clone(), mode)
            .once(input.as_texture_slice(), output.as_texture_mut_slice());
        output
    }

    #[test]
    fn test_config_tiles_matrix() {
        let config = ThresholdConfig::new(2, vec![0.0, 0.25, 0.5, 0.75], 255.0);
        assert_eq!(config.value(0, 0), 0.0);
        assert_eq!(config.value(3, 0), 0.25);
        assert_eq!(config.value(2, 5), 0.5);
        assert_eq!(config.value(5, 7), 0.75);
    }

    #[test]
    #[should_panic(expected = "threshold side does not match")]
    fn test_config_rejects_bad_side() {
        ThresholdConfig::new(3, vec![0.0; 4], 255.0);
    }

    #[test]
    fn test_monochrome_rule() {
        let config = ThresholdConfig::new(1, vec![0.5], 256.0);
        let input = Texture::from_vec(3, 1, 1, vec![127.0, 128.0, 129.0]);
        let output = run(ThresholdImpl::Scalar, &config, &ColorMode::Monochrome, &input);
        assert_eq!(output.as_ref(), &[0, 0, 255]);
    }

    #[test]
    fn test_palette_rule_picks_sorted_level() {
        let palette =
            Palette::new(vec![RGB::WHITE, RGB::new(128, 128, 128), RGB::BLACK]).unwrap();
        let mode = ColorMode::Palette(palette);
        // t = 0.5 cancels the offset, index = round(L * 3)
        let config = ThresholdConfig::new(1, vec![0.5], 255.0);
        let input = Texture::from_vec(
            3,
            1,
            3,
            vec![0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 255.0, 255.0, 255.0],
        );
        let output = run(ThresholdImpl::Scalar, &config, &mode, &input);
        assert_eq!(output.as_ref(), &[0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn test_transform_reused_across_widths() {
        let config = ThresholdConfig::new(4, bayer_normalized(), 255.0);
        let mut transform = ThresholdImpl::Scalar.build(config.clone(), &ColorMode::Monochrome);

        for width in [5u32, 9] {
            let input = ramp(width, 6, 1);
            let mut output = Texture::new(width, 6, 1);
            transform.apply(input.as_texture_slice(), output.as_texture_mut_slice());
            let expected = run(ThresholdImpl::Scalar, &config, &ColorMode::Monochrome, &input);
            assert_eq!(output, expected);
        }
    }
}
