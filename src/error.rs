use thiserror::Error;

use crate::utils::pixel::ParseColorError;

/// The main error type for the ditherworks crate
#[derive(Debug, Error)]
pub enum Error {
    /// Algorithm identifier is not part of the supported vocabulary
    #[error("unknown dithering algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// Palette name is not present in the palette catalog
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),

    /// Palette mode was requested without any colors
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Input has no pixels to process
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Halftone cells need at least one pixel per side
    #[error("halftone dot size must be greater than zero")]
    InvalidDotSize,

    /// Input texture is neither luminance nor RGB(A)
    #[error("unsupported plane count {0}, expected 1, 3 or 4")]
    PlaneMismatch(u32),

    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("config error: {0}")]
    Config(String),

    /// Error occurred while decoding or encoding an image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<json::Error> for Error {
    fn from(err: json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

// Convenience type alias for Results using the crate error
pub type Result<T = ()> = std::result::Result<T, Error>;
