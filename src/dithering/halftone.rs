use rayon::prelude::*;

use crate::{
    color_palette::{ColorMode, Palette},
    error::{Error, Result},
    prelude::*,
    utils::{iterator::GridIterator, num::clamped_index, pixel::luminance},
};

/// Default cell side.
pub const DEFAULT_DOT_SIZE: usize = 8;

/// Background and dot colors, dots ordered light to dark.
struct Ink {
    background: Vec<u8>,
    dots: Vec<Vec<u8>>,
}

impl Ink {
    fn monochrome() -> Self {
        Self {
            background: vec![255],
            dots: vec![vec![0]],
        }
    }

    fn palette(palette: &Palette) -> Self {
        Self {
            background: palette.lightest().to_array().to_vec(),
            dots: palette
                .sorted_by_luminance()
                .iter()
                .rev()
                .map(|color| color.to_array().to_vec())
                .collect(),
        }
    }

    #[inline]
    fn dot(&self, l: f32) -> &[u8] {
        let n = self.dots.len();
        &self.dots[clamped_index((1.0 - l) * n as f32, n - 1)]
    }
}

/// Render one dot per `dot_size × dot_size` cell, its radius growing with
/// the darkness of the cell.
///
/// Cells that don't fit entirely inside the image keep the background.
pub fn halftone(input: TextureSlice<u8>, mode: &ColorMode, dot_size: usize) -> Result<Texture<u8>> {
    if dot_size == 0 {
        return Err(Error::InvalidDotSize);
    }

    let (width, height) = input.shape_2d();
    let (width, height) = (width as u32, height as u32);
    let mut work = Texture::<f32>::new(width, height, mode.planes());
    let ink = match mode {
        ColorMode::Monochrome => {
            GrayscaleTransform::auto(input.shape_2d())
                .build()
                .once(input, work.as_texture_mut_slice());
            Ink::monochrome()
        }
        ColorMode::Palette(palette) => {
            RgbTransform::default().once(input, work.as_texture_mut_slice());
            Ink::palette(palette)
        }
    };

    let mut output = Texture::filled(width, height, &ink.background);
    render(work.as_texture_slice(), output.as_texture_mut_slice(), dot_size, &ink);
    Ok(output)
}

/// Bands of `dot_size` rows are independent and rendered in parallel.
fn render(work: TextureSlice<f32>, mut output: TextureMutSlice<u8>, dot_size: usize, ink: &Ink) {
    let (width, _, planes) = work.shape();
    let band_len = width * planes * dot_size;
    if band_len == 0 {
        return;
    }
    let src = work.as_ref();

    output
        .as_mut()
        .par_chunks_exact_mut(band_len)
        .zip(src.par_chunks_exact(band_len))
        .for_each(|(out_band, in_band)| {
            for (x0, _, _) in GridIterator::cells(width, dot_size, dot_size) {
                let l = cell_intensity(in_band, width, planes, x0, dot_size) / 255.0;
                let radius = dot_size as f32 / 2.0 * (1.0 - l.clamp(0.0, 1.0));
                if radius <= 0.0 {
                    continue;
                }

                let color = ink.dot(l);
                let center = (dot_size / 2) as f32;
                for (i, j, _) in GridIterator::new(dot_size, dot_size) {
                    let (di, dj) = (i as f32 - center, j as f32 - center);
                    if di * di + dj * dj <= radius * radius {
                        let start = (j * width + x0 + i) * planes;
                        out_band[start..start + planes].copy_from_slice(color);
                    }
                }
            }
        });
}

/// Luminance of the average color of the cell starting at column `x0`.
///
/// RGB cells are rounded to a whole intensity like the grayscale plane.
fn cell_intensity(band: &[f32], width: usize, planes: usize, x0: usize, dot_size: usize) -> f32 {
    let mut sum = [0f32; 3];
    for (i, j, _) in GridIterator::new(dot_size, dot_size) {
        let start = (j * width + x0 + i) * planes;
        sum.iter_mut()
            .zip(&band[start..start + planes])
            .for_each(|(acc, v)| *acc += *v);
    }

    let count = (dot_size * dot_size) as f32;
    match planes {
        1 => sum[0] / count,
        _ => luminance(sum[0] / count, sum[1] / count, sum[2] / count).round(),
    }
}
