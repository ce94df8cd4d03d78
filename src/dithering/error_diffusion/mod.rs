use matrices::{
    ATKINSON, BURKES, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, Kernel, SIERRA, SIERRA_LITE,
    SIERRA_TWO_ROW, STUCKI,
};

use crate::{
    color_palette::{ColorMode, Palette},
    prelude::*,
    utils::{iterator::GridIterator, num::to_channel},
};

pub mod matrices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDiffusionType {
    FloydSteinberg,
    Atkinson,
    Stucki,
    JarvisJudiceNinke,
    Burkes,
    Sierra,
    SierraTwoRow,
    SierraLite,
}

impl ErrorDiffusionType {
    pub fn kernel(&self) -> Kernel {
        match self {
            ErrorDiffusionType::FloydSteinberg => FLOYD_STEINBERG,
            ErrorDiffusionType::Atkinson => ATKINSON,
            ErrorDiffusionType::Stucki => STUCKI,
            ErrorDiffusionType::JarvisJudiceNinke => JARVIS_JUDICE_NINKE,
            ErrorDiffusionType::Burkes => BURKES,
            ErrorDiffusionType::Sierra => SIERRA,
            ErrorDiffusionType::SierraTwoRow => SIERRA_TWO_ROW,
            ErrorDiffusionType::SierraLite => SIERRA_LITE,
        }
    }

    /// Dither `input` into a new texture, 1 plane in monochrome mode and
    /// 3 planes in palette mode.
    ///
    /// Scans strictly in raster order; each pixel is quantized only after
    /// every earlier pixel has pushed its error into it.
    pub fn dither(&self, input: TextureSlice<u8>, mode: &ColorMode) -> Texture<u8> {
        let (width, height) = input.shape_2d();
        let mut work = Texture::<f32>::new(width as u32, height as u32, mode.planes());

        match mode {
            ColorMode::Monochrome => {
                GrayscaleTransform::auto(input.shape_2d())
                    .build()
                    .once(input, work.as_texture_mut_slice());
                diffuse(work.as_texture_mut_slice(), self.kernel(), &Threshold127);
            }
            ColorMode::Palette(palette) => {
                RgbTransform::default().once(input, work.as_texture_mut_slice());
                diffuse(work.as_texture_mut_slice(), self.kernel(), &Nearest(palette));
            }
        }

        work.map(to_channel)
    }
}

/// Maps an accumulated pixel onto an output level in place.
trait Quantizer {
    fn quantize(&self, pixel: &mut [f32]);
}

/// Black/white split of a luminance plane.
struct Threshold127;

impl Quantizer for Threshold127 {
    #[inline(always)]
    fn quantize(&self, pixel: &mut [f32]) {
        pixel[0] = if pixel[0] > 127.0 { 255.0 } else { 0.0 };
    }
}

/// Nearest palette entry of the truncated RGB triple.
struct Nearest<'a>(&'a Palette);

impl Quantizer for Nearest<'_> {
    #[inline(always)]
    fn quantize(&self, pixel: &mut [f32]) {
        // `as` truncates toward zero, accumulated values stay unclamped
        let sample = [pixel[0] as i32, pixel[1] as i32, pixel[2] as i32];
        let color = self.0.nearest(sample);
        pixel
            .iter_mut()
            .zip(color.to_array())
            .for_each(|(dst, src)| *dst = src as f32);
    }
}

/// Quantize-then-diffuse over the whole working buffer.
///
/// Error reaching a target outside the grid is dropped.
fn diffuse<Q: Quantizer>(mut work: TextureMutSlice<f32>, kernel: Kernel, quantizer: &Q) {
    let (width, height, planes) = work.shape();
    let divisor = kernel.divisor as f32;
    let buf = work.as_mut();
    let mut error = [0f32; 3];

    for (x, y, idx) in GridIterator::new(width, height) {
        let start = idx * planes;
        let pixel = &mut buf[start..start + planes];
        error[..planes].copy_from_slice(pixel);
        quantizer.quantize(pixel);
        error
            .iter_mut()
            .zip(pixel.iter())
            .for_each(|(e, q)| *e -= *q);

        for &(dx, dy, weight) in kernel.entries {
            let tx = x as isize + dx;
            let ty = y + dy as usize;
            if tx < 0 || tx as usize >= width || ty >= height {
                continue;
            }

            let target = (ty * width + tx as usize) * planes;
            buf[target..target + planes]
                .iter_mut()
                .zip(&error[..planes])
                .for_each(|(v, e)| *v += *e * weight as f32 / divisor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::pixel::RGB;

    fn gray(width: u32, height: u32, value: u8) -> Texture<u8> {
        Texture::filled(width, height, &[value])
    }

    #[test]
    fn test_flat_gray_keeps_average_tone() {
        let input = gray(100, 100, 128);
        let output = ErrorDiffusionType::FloydSteinberg
            .dither(input.as_texture_slice(), &ColorMode::Monochrome);

        let whites = output.as_ref().iter().filter(|v| **v == 255).count();
        assert!(output.as_ref().iter().all(|v| *v == 0 || *v == 255));
        assert!(whites > 5000, "{whites} white pixels");
    }

    #[test]
    fn test_error_reaches_right_neighbour() {
        // 100 -> 0 leaves 100 of error, 7/16 of it pushes the next pixel past 127
        let input = Texture::from_vec(2, 1, 1, vec![100, 100]);
        let output = ErrorDiffusionType::FloydSteinberg
            .dither(input.as_texture_slice(), &ColorMode::Monochrome);
        assert_eq!(output.as_ref(), &[0, 255]);
    }

    #[test]
    fn test_edge_error_is_dropped() {
        let input = gray(1, 1, 200);
        for kind in [
            ErrorDiffusionType::FloydSteinberg,
            ErrorDiffusionType::Atkinson,
            ErrorDiffusionType::JarvisJudiceNinke,
        ] {
            let output = kind.dither(input.as_texture_slice(), &ColorMode::Monochrome);
            assert_eq!(output.as_ref(), &[255]);
        }
    }

    #[test]
    fn test_saturated_input_is_stable() {
        for value in [0, 255] {
            let input = gray(13, 7, value);
            let output = ErrorDiffusionType::Sierra
                .dither(input.as_texture_slice(), &ColorMode::Monochrome);
            assert!(output.as_ref().iter().all(|v| *v == value));
        }
    }

    #[test]
    fn test_palette_output_uses_palette_colors() {
        let palette = Palette::new(vec![
            RGB::new(15, 56, 15),
            RGB::new(48, 98, 48),
            RGB::new(139, 172, 15),
            RGB::new(155, 188, 15),
        ])
        .unwrap();
        let input = Texture::from_vec(
            8,
            4,
            3,
            (0..8 * 4 * 3).map(|v| (v * 29 % 256) as u8).collect(),
        );
        let output = ErrorDiffusionType::Burkes
            .dither(input.as_texture_slice(), &ColorMode::Palette(palette.clone()));

        assert_eq!(output.shape(), (8, 4, 3));
        for pixel in output.as_ref().chunks_exact(3) {
            assert!(palette.colors().iter().any(|c| c.to_array() == pixel));
        }
    }

    #[test]
    fn test_palette_mode_accepts_gray_input() {
        let palette = Palette::new(vec![RGB::BLACK, RGB::WHITE]).unwrap();
        let input = gray(4, 4, 255);
        let output = ErrorDiffusionType::SierraLite
            .dither(input.as_texture_slice(), &ColorMode::Palette(palette));
        assert!(output.as_ref().iter().all(|v| *v == 255));
    }
}
