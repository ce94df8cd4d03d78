use std::{fs, path::Path};

use json::JsonValue;

use crate::{
    color_palette::{ColorMode, MONOCHROME_PALETTE_ID, Palette},
    dithering::{DitherOptions, DitheringType, halftone::DEFAULT_DOT_SIZE},
    error::{Error, Result},
    utils::pixel::RGB,
};

/// Everything one run needs besides the image itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    pub algorithm: DitheringType,
    pub color_mode: ColorMode,
    pub dot_size: usize,
    /// Nearest-neighbour upscale applied to the dithered image.
    pub output_scale: u32,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            algorithm: DitheringType::FloydSteinberg,
            color_mode: ColorMode::Monochrome,
            dot_size: DEFAULT_DOT_SIZE,
            output_scale: 1,
        }
    }
}

impl ProcessConfig {
    pub fn options(&self) -> DitherOptions {
        DitherOptions {
            dot_size: self.dot_size,
        }
    }

    /// Parse a config document. Missing keys keep their defaults.
    pub fn to_config(json_string: &str) -> Result<ProcessConfig> {
        let json = json::parse(json_string)?;
        let mut config = ProcessConfig::default();

        if !json.is_object() {
            return Err(config_error("config should be a json object"));
        }

        if !json["algorithm"].is_null() {
            config.algorithm = match json["algorithm"].as_str() {
                Some(name) => name.parse()?,
                None => return Err(config_error("Couldn't parse algorithm")),
            };
        }

        match (&json["palette"], &json["colors"]) {
            (JsonValue::Null, JsonValue::Null) => {}
            (palette, JsonValue::Null) => {
                config.color_mode = match palette.as_str() {
                    Some(name) => ColorMode::from_palette_name(name)?,
                    None => return Err(config_error("Couldn't parse palette")),
                };
            }
            (JsonValue::Null, colors) => config.color_mode = parse_colors(colors)?,
            _ => return Err(config_error("palette and colors are mutually exclusive")),
        }

        if !json["dot_size"].is_null() {
            config.dot_size = match json["dot_size"].as_usize() {
                Some(val) => val,
                None => return Err(config_error("Couldn't parse dot_size")),
            };
        }

        if !json["output_scale"].is_null() {
            config.output_scale = match json["output_scale"].as_u32() {
                Some(val) if val > 0 => val,
                _ => return Err(config_error("output_scale should be a positive integer")),
            };
        }

        Ok(config)
    }

    pub fn to_json(&self) -> String {
        let mut data = JsonValue::new_object();

        data["algorithm"] = self.algorithm.into();
        match &self.color_mode {
            ColorMode::Monochrome => data["palette"] = MONOCHROME_PALETTE_ID.into(),
            ColorMode::Palette(palette) => data["colors"] = palette.into(),
        }
        data["dot_size"] = self.dot_size.into();
        data["output_scale"] = self.output_scale.into();

        data.pretty(2)
    }

    pub fn read_config(path: impl AsRef<Path>) -> Result<ProcessConfig> {
        let json_string = fs::read_to_string(path)?;
        ProcessConfig::to_config(&json_string)
    }

    pub fn write_config(&self, path: impl AsRef<Path>) -> Result {
        fs::write(path, self.to_json())?;
        Ok(())
    }
}

/// Custom color lists need at least two entries to be worth dithering to.
pub fn parse_colors(colors: &JsonValue) -> Result<ColorMode> {
    if !colors.is_array() || colors.len() <= 1 {
        return Err(config_error("colors should be an array of 2 or more hex strings"));
    }

    let colors = colors
        .members()
        .map(|color| -> Result<RGB> {
            match color.as_str() {
                Some(hex) => Ok(RGB::from_hex(hex)?),
                None => Err(config_error("colors should be hex strings")),
            }
        })
        .collect::<Result<Vec<RGB>>>()?;
    ColorMode::custom(colors)
}

fn config_error(msg: &str) -> Error {
    Error::Config(msg.to_string())
}

impl From<DitheringType> for JsonValue {
    fn from(kind: DitheringType) -> Self {
        JsonValue::String(kind.id().to_string())
    }
}

impl From<RGB> for JsonValue {
    fn from(rgb: RGB) -> Self {
        rgb.to_hex().into()
    }
}

impl From<&Palette> for JsonValue {
    fn from(palette: &Palette) -> Self {
        JsonValue::Array(palette.colors().iter().map(|c| (*c).into()).collect())
    }
}
