use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    color_palette::{ColorMode, PALETTES},
    texture::Texture,
    utils::pixel::RGB,
};

pub const TEST_IMAGE_SIZE: usize = 64;

/// Seeded so failures reproduce.
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn rand_rgb(rng: &mut StdRng) -> RGB {
    RGB::new(rng.random(), rng.random(), rng.random())
}

pub fn gen_random_image(width: usize, height: usize, planes: usize) -> Texture<u8> {
    let mut rng = test_rng();
    let buffer = (0..width * height * planes).map(|_| rng.random()).collect();
    Texture::from_vec(width as u32, height as u32, planes as u32, buffer)
}

/// Image made only of `colors`, picked at random per pixel.
pub fn gen_palette_image(width: usize, height: usize, colors: &[RGB]) -> Texture<u8> {
    let mut rng = test_rng();
    let buffer = (0..width * height)
        .flat_map(|_| colors[rng.random_range(0..colors.len())].to_array())
        .collect();
    Texture::from_vec(width as u32, height as u32, 3, buffer)
}

pub fn random_palette(size: usize) -> ColorMode {
    let mut rng = test_rng();
    ColorMode::custom((0..size).map(|_| rand_rgb(&mut rng)).collect())
        .expect("palette size must be positive")
}

/// Monochrome plus every catalog palette.
pub fn all_color_modes() -> Vec<ColorMode> {
    PALETTES
        .iter()
        .map(|entry| ColorMode::from_palette_name(entry.id).expect("catalog entry"))
        .collect()
}
