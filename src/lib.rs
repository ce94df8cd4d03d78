use image::{DynamicImage, imageops::FilterType};

use crate::{config::ProcessConfig, error::Result, texture::Texture};

pub mod color_palette;
pub mod config;
pub mod dithering;
pub mod error;
pub mod texture;
pub mod transform;
pub mod utils;


pub mod prelude {
    pub use crate::color_palette::{ColorMode, Palette};
    pub use crate::dithering::{DitherOptions, DitheringType};
    pub use crate::texture::prelude::*;
    pub use crate::transform::prelude::*;
    pub use crate::utils::prelude::*;
}

/// Dither a decoded image and upscale the result by
/// [ProcessConfig::output_scale] with nearest-neighbour sampling.
pub fn run(config: &ProcessConfig, original_img: DynamicImage) -> Result<DynamicImage> {
    let input = Texture::from_dynamic_image(&original_img);

    let output = config.algorithm.dither(
        input.as_texture_slice(),
        &config.color_mode,
        &config.options(),
    )?;
    let new_image = output.into_dynamic_image()?;

    if config.output_scale <= 1 {
        return Ok(new_image);
    }
    let new_image = new_image.resize_exact(
        new_image.width() * config.output_scale,
        new_image.height() * config.output_scale,
        FilterType::Nearest,
    );

    Ok(new_image)
}
