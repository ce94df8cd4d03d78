use std::{fmt::Display, num::ParseIntError, str::FromStr};

use thiserror::Error;

/// Luminance weights shared by palette ordering, grayscale conversion
/// and the threshold/halftone engines.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Weighted brightness of an RGB triple, in the same range as its channels.
#[inline(always)]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("`{0}` should have 3 or 6 hex digits")]
    InvalidLength(String),
    #[error("`{0}` contains non-ascii characters")]
    NotAscii(String),
    #[error("`{0}` is not hexadecimal: {1}")]
    InvalidHex(String, ParseIntError),
}

/// 8-bit RGB color, used for palette entries.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub const BLACK: RGB = RGB::new(0, 0, 0);
    pub const WHITE: RGB = RGB::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> RGB {
        RGB { r, g, b }
    }

    pub fn from_hex(string: &str) -> Result<RGB, ParseColorError> {
        let clean = string.trim().trim_start_matches('#');
        if !clean.is_ascii() {
            return Err(ParseColorError::NotAscii(string.to_string()));
        }
        let expanded: String = match clean.len() {
            3 => clean.chars().flat_map(|c| [c, c]).collect(),
            6 => clean.to_string(),
            _ => return Err(ParseColorError::InvalidLength(string.to_string())),
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|err| ParseColorError::InvalidHex(string.to_string(), err))
        };

        Ok(RGB {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn luminance(&self) -> f32 {
        luminance(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Squared Euclidean distance to an integer sample, which may lie
    /// outside of the channel range while error is being diffused.
    #[inline(always)]
    pub fn distance_squared(&self, sample: [i32; 3]) -> i64 {
        let dr = (self.r as i32 - sample[0]) as i64;
        let dg = (self.g as i32 - sample[1]) as i64;
        let db = (self.b as i32 - sample[2]) as i64;
        dr * dr + dg * dg + db * db
    }
}

impl From<[u8; 3]> for RGB {
    fn from(value: [u8; 3]) -> Self {
        RGB::new(value[0], value[1], value[2])
    }
}

impl FromStr for RGB {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RGB::from_hex(s)
    }
}

impl Display for RGB {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_and_short() {
        assert_eq!(RGB::from_hex("#0f380f").unwrap(), RGB::new(15, 56, 15));
        assert_eq!(RGB::from_hex("9BBC0F").unwrap(), RGB::new(155, 188, 15));
        assert_eq!(RGB::from_hex("#fff").unwrap(), RGB::WHITE);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            RGB::from_hex("#12345"),
            Err(ParseColorError::InvalidLength(_))
        ));
        assert!(matches!(
            RGB::from_hex("zz0000"),
            Err(ParseColorError::InvalidHex(..))
        ));
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(RGB::new(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_luminance_of_extremes() {
        assert_eq!(RGB::BLACK.luminance(), 0.0);
        assert!((RGB::WHITE.luminance() - 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_distance_squared_accepts_out_of_range_samples() {
        assert_eq!(RGB::BLACK.distance_squared([-10, 0, 0]), 100);
        assert_eq!(RGB::WHITE.distance_squared([300, 255, 255]), 45 * 45);
    }
}
