use std::{fmt::Display, str::FromStr};

use tracing::debug;

use crate::{
    color_palette::{ColorMode, Palette},
    dithering::{error_diffusion::ErrorDiffusionType, threshold::ThresholdType},
    error::{Error, Result},
    texture::{Texture, TextureRef, TextureSlice},
};

pub mod error_diffusion;
pub mod halftone;
pub mod threshold;

/// Every supported algorithm, one variant per external identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DitheringType {
    FloydSteinberg,
    Ordered,
    Atkinson,
    Bayer,
    Stucki,
    Jarvis,
    Burkes,
    Sierra,
    SierraTwoRow,
    SierraLite,
    Halftone,
    BlueNoise,
}

/// Parameters only some algorithms look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherOptions {
    /// Halftone cell side.
    pub dot_size: usize,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            dot_size: halftone::DEFAULT_DOT_SIZE,
        }
    }
}

/// Engine family behind an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    ErrorDiffusion(ErrorDiffusionType),
    Threshold(ThresholdType),
    Halftone,
}

impl DitheringType {
    pub const ALL: [DitheringType; 12] = [
        DitheringType::FloydSteinberg,
        DitheringType::Ordered,
        DitheringType::Atkinson,
        DitheringType::Bayer,
        DitheringType::Stucki,
        DitheringType::Jarvis,
        DitheringType::Burkes,
        DitheringType::Sierra,
        DitheringType::SierraTwoRow,
        DitheringType::SierraLite,
        DitheringType::Halftone,
        DitheringType::BlueNoise,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(&self) -> &'static str {
        match self {
            DitheringType::FloydSteinberg => "floyd-steinberg",
            DitheringType::Ordered => "ordered",
            DitheringType::Atkinson => "atkinson",
            DitheringType::Bayer => "bayer",
            DitheringType::Stucki => "stucki",
            DitheringType::Jarvis => "jarvis",
            DitheringType::Burkes => "burkes",
            DitheringType::Sierra => "sierra",
            DitheringType::SierraTwoRow => "sierra-two-row",
            DitheringType::SierraLite => "sierra-lite",
            DitheringType::Halftone => "halftone",
            DitheringType::BlueNoise => "blue-noise",
        }
    }

    pub fn family(&self) -> Family {
        use ErrorDiffusionType as E;
        use ThresholdType as T;

        match self {
            DitheringType::FloydSteinberg => Family::ErrorDiffusion(E::FloydSteinberg),
            DitheringType::Atkinson => Family::ErrorDiffusion(E::Atkinson),
            DitheringType::Stucki => Family::ErrorDiffusion(E::Stucki),
            DitheringType::Jarvis => Family::ErrorDiffusion(E::JarvisJudiceNinke),
            DitheringType::Burkes => Family::ErrorDiffusion(E::Burkes),
            DitheringType::Sierra => Family::ErrorDiffusion(E::Sierra),
            DitheringType::SierraTwoRow => Family::ErrorDiffusion(E::SierraTwoRow),
            DitheringType::SierraLite => Family::ErrorDiffusion(E::SierraLite),
            DitheringType::Ordered => Family::Threshold(T::Ordered),
            DitheringType::Bayer => Family::Threshold(T::Bayer),
            DitheringType::BlueNoise => Family::Threshold(T::BlueNoise),
            DitheringType::Halftone => Family::Halftone,
        }
    }

    /// Dither `input` (1, 3 or 4 planes) into a new texture of the same
    /// size: 1 plane in monochrome mode, 3 planes in palette mode.
    ///
    /// Rejects empty inputs and unsupported plane counts before any work.
    pub fn dither(
        &self,
        input: TextureSlice<u8>,
        mode: &ColorMode,
        options: &DitherOptions,
    ) -> Result<Texture<u8>> {
        if input.is_empty() {
            return Err(Error::InvalidDimensions {
                width: input.width(),
                height: input.height(),
            });
        }
        if !matches!(input.planes(), 1 | 3 | 4) {
            return Err(Error::PlaneMismatch(input.planes()));
        }

        debug!(
            algorithm = %self,
            width = input.width(),
            height = input.height(),
            colors = mode.palette().map_or(2, Palette::len),
            "dithering"
        );

        match self.family() {
            Family::ErrorDiffusion(kind) => Ok(kind.dither(input, mode)),
            Family::Threshold(kind) => Ok(kind.dither(input, mode)),
            Family::Halftone => halftone::halftone(input, mode, options.dot_size),
        }
    }
}

impl Display for DitheringType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DitheringType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DitheringType::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for kind in DitheringType::ALL {
            assert_eq!(kind.to_string().parse::<DitheringType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        for name in ["", "floyd_steinberg", "Bayer", "random"] {
            assert!(matches!(
                name.parse::<DitheringType>(),
                Err(Error::UnknownAlgorithm(n)) if n == name
            ));
        }
    }

    #[test]
    fn test_zero_sized_input_is_rejected() {
        let empty = Texture::<u8>::new(0, 3, 1);
        let result = DitheringType::FloydSteinberg.dither(
            empty.as_texture_slice(),
            &ColorMode::Monochrome,
            &DitherOptions::default(),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
    }

    #[test]
    fn test_two_planes_are_rejected() {
        let input = Texture::<u8>::new(2, 2, 2);
        let result = DitheringType::Bayer.dither(
            input.as_texture_slice(),
            &ColorMode::Monochrome,
            &DitherOptions::default(),
        );
        assert!(matches!(result, Err(Error::PlaneMismatch(2))));
    }

    #[test]
    fn test_jarvis_maps_to_jarvis_judice_ninke() {
        assert_eq!(
            DitheringType::Jarvis.family(),
            Family::ErrorDiffusion(ErrorDiffusionType::JarvisJudiceNinke)
        );
    }

    #[test]
    fn test_halftone_forwards_dot_size() {
        let input = Texture::<u8>::new(4, 4, 1);
        let result = DitheringType::Halftone.dither(
            input.as_texture_slice(),
            &ColorMode::Monochrome,
            &DitherOptions { dot_size: 0 },
        );
        assert!(matches!(result, Err(Error::InvalidDotSize)));
    }
}
