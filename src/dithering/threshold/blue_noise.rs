use std::sync::OnceLock;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::texture::Texture;

/// Side of the generated threshold tile.
pub const BLUE_NOISE_SIDE: usize = 64;
/// Seed of the process-wide tile.
pub const BLUE_NOISE_SEED: u64 = 42;

const SIGMA: f32 = 1.5;

static BLUE_NOISE: OnceLock<Texture<f32>> = OnceLock::new();

/// Shared 64x64 threshold tile, generated on first use.
pub fn blue_noise() -> &'static Texture<f32> {
    BLUE_NOISE.get_or_init(|| {
        tracing::debug!(seed = BLUE_NOISE_SEED, "generating blue noise tile");
        generate_blue_noise(BLUE_NOISE_SEED)
    })
}

/// Uncached generator: seeded uniform noise, Gaussian blurred with wrapping
/// edges and min-max normalized onto `0.0..=1.0`.
pub fn generate_blue_noise(seed: u64) -> Texture<f32> {
    let side = BLUE_NOISE_SIDE;
    let mut rng = StdRng::seed_from_u64(seed);
    let noise: Vec<f32> = (0..side * side).map(|_| rng.random::<f32>()).collect();

    let weights = gaussian_weights(SIGMA);
    let rows = blur(&noise, side, &weights, |x, y| y * side + x);
    let both = blur(&rows, side, &weights, |x, y| x * side + y);

    Texture::from_vec(side as u32, side as u32, 1, normalize(both))
}

fn gaussian_weights(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil() as isize;
    let weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// One 1D pass along the axis picked by `index(along, across)`.
fn blur<F>(src: &[f32], side: usize, weights: &[f32], index: F) -> Vec<f32>
where
    F: Fn(usize, usize) -> usize,
{
    let radius = (weights.len() / 2) as isize;
    let mut dst = vec![0f32; src.len()];
    for across in 0..side {
        for along in 0..side {
            let value = weights
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let tap = (along as isize + k as isize - radius).rem_euclid(side as isize);
                    src[index(tap as usize, across)] * w
                })
                .sum();
            dst[index(along, across)] = value;
        }
    }
    dst
}

fn normalize(values: Vec<f32>) -> Vec<f32> {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = max - min;
    if range <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .into_iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureRef;

    #[test]
    fn test_cached_tile_is_shared_and_stable() {
        let first = blue_noise();
        let second = blue_noise();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &generate_blue_noise(BLUE_NOISE_SEED));
    }

    #[test]
    fn test_tile_shape_and_range() {
        let tile = blue_noise();
        assert_eq!(tile.shape(), (BLUE_NOISE_SIDE, BLUE_NOISE_SIDE, 1));

        let min = tile.as_ref().iter().copied().fold(f32::INFINITY, f32::min);
        let max = tile.as_ref().iter().copied().fold(0.0, f32::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_seed_changes_tile() {
        assert_ne!(generate_blue_noise(1), generate_blue_noise(2));
    }

    #[test]
    fn test_gaussian_weights() {
        let weights = gaussian_weights(SIGMA);
        assert_eq!(weights.len(), 11);
        assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(weights[0], weights[10]);
        assert!(weights[5] > weights[4]);
    }
}
