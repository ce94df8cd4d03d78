pub mod blue_noise;
pub mod matrices;
pub mod threshold_transform;

use std::borrow::Cow;

use crate::{
    color_palette::ColorMode,
    dithering::threshold::{
        blue_noise::{BLUE_NOISE_SIDE, blue_noise},
        matrices::{BAYER_SIDE, bayer_normalized},
        threshold_transform::{ThresholdConfig, ThresholdImpl},
    },
    prelude::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdType {
    /// 4x4 Bayer tile compared against 8-bit intensity (thresholds 0..=240).
    Ordered,
    /// 4x4 Bayer tile compared against intensity / 255.
    Bayer,
    /// Generated 64x64 blue noise tile.
    BlueNoise,
}

impl ThresholdType {
    pub fn to_config(&self) -> ThresholdConfig {
        match self {
            ThresholdType::Ordered => ThresholdConfig::new(BAYER_SIDE, bayer_normalized(), 256.0),
            ThresholdType::Bayer => ThresholdConfig::new(BAYER_SIDE, bayer_normalized(), 255.0),
            ThresholdType::BlueNoise => ThresholdConfig::new(
                BLUE_NOISE_SIDE,
                Cow::Borrowed(blue_noise().as_ref()),
                255.0,
            ),
        }
    }

    /// Quickly dither 1 thing. Prefer [ThresholdImpl::build] to reuse a
    /// transform across frames of the same width.
    pub fn dither(&self, input: TextureSlice<u8>, mode: &ColorMode) -> Texture<u8> {
        let (width, height) = input.shape_2d();
        let (width, height) = (width as u32, height as u32);
        let mut work = Texture::<f32>::new(width, height, mode.planes());
        let mut output = Texture::<u8>::new(width, height, mode.planes());

        match mode {
            ColorMode::Monochrome => {
                GrayscaleTransform::auto(input.shape_2d())
                    .build()
                    .once(input, work.as_texture_mut_slice());
            }
            ColorMode::Palette(_) => {
                RgbTransform::default().once(input, work.as_texture_mut_slice());
            }
        }

        ThresholdImpl::auto(input.shape_2d())
            .build(self.to_config(), mode)
            .once(work.as_texture_slice(), output.as_texture_mut_slice());
        output
    }
}
