use ditherworks_macros::simd_targets;
use itertools::Itertools;

use crate::{
    error::{Error, Result},
    utils::pixel::RGB,
};

/// Ordered, non-empty set of output colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<RGB>,
}

impl Palette {
    pub fn new(colors: Vec<RGB>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|hex| RGB::from_hex(hex.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[RGB] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors from darkest to lightest. Stable, so entries with equal
    /// luminance keep their palette order.
    pub fn sorted_by_luminance(&self) -> Vec<RGB> {
        self.colors
            .iter()
            .copied()
            .sorted_by(|a, b| a.luminance().total_cmp(&b.luminance()))
            .collect()
    }

    pub fn darkest(&self) -> RGB {
        self.extreme(|a, b| b < a)
    }

    pub fn lightest(&self) -> RGB {
        self.extreme(|a, b| b > a)
    }

    // first entry wins on ties, matching the sorted view
    fn extreme(&self, better: impl Fn(f32, f32) -> bool) -> RGB {
        self.colors
            .iter()
            .copied()
            .reduce(|best, color| {
                if better(best.luminance(), color.luminance()) {
                    color
                } else {
                    best
                }
            })
            .unwrap_or(RGB::BLACK)
    }

    /// Index of the entry closest to `sample` by Euclidean RGB distance.
    /// Ties go to the entry that comes first.
    #[inline]
    pub fn nearest_index(&self, sample: [i32; 3]) -> usize {
        nearest_index(&self.colors, sample)
    }

    #[inline]
    pub fn nearest(&self, sample: [i32; 3]) -> RGB {
        self.colors[self.nearest_index(sample)]
    }
}

#[simd_targets]
fn nearest_index(colors: &[RGB], sample: [i32; 3]) -> usize {
    colors
        .iter()
        .position_min_by_key(|color| color.distance_squared(sample))
        .unwrap_or(0)
}

/// Output colors of one dithering call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColorMode {
    /// Implicit black/white; algorithms run on a single luminance plane.
    #[default]
    Monochrome,
    /// Arbitrary palette; algorithms run on RGB.
    Palette(Palette),
}

impl ColorMode {
    /// Explicit color list, always dithered in palette mode.
    pub fn custom(colors: Vec<RGB>) -> Result<Self> {
        Ok(ColorMode::Palette(Palette::new(colors)?))
    }

    /// Look a palette up in the catalog. `bw` selects monochrome.
    pub fn from_palette_name(name: &str) -> Result<Self> {
        let entry = PALETTES
            .iter()
            .find(|entry| entry.id == name)
            .ok_or_else(|| Error::UnknownPalette(name.to_string()))?;
        if entry.id == MONOCHROME_PALETTE_ID {
            return Ok(ColorMode::Monochrome);
        }
        Ok(ColorMode::Palette(entry.palette()))
    }

    pub fn palette(&self) -> Option<&Palette> {
        match self {
            ColorMode::Monochrome => None,
            ColorMode::Palette(palette) => Some(palette),
        }
    }

    /// Planes of the texture produced in this mode.
    pub fn planes(&self) -> u32 {
        match self {
            ColorMode::Monochrome => 1,
            ColorMode::Palette(_) => 3,
        }
    }
}

pub const MONOCHROME_PALETTE_ID: &str = "bw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCategory {
    Classic,
    Retro,
    Artistic,
    Modern,
}

impl PaletteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteCategory::Classic => "classic",
            PaletteCategory::Retro => "retro",
            PaletteCategory::Artistic => "artistic",
            PaletteCategory::Modern => "modern",
        }
    }
}

/// Catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct NamedPalette {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PaletteCategory,
    pub colors: &'static [RGB],
}

impl NamedPalette {
    pub fn palette(&self) -> Palette {
        Palette {
            colors: self.colors.to_vec(),
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> RGB {
    RGB::new(r, g, b)
}

pub const PALETTES: [NamedPalette; 9] = [
    NamedPalette {
        id: MONOCHROME_PALETTE_ID,
        name: "Black & White",
        category: PaletteCategory::Classic,
        colors: &[rgb(0, 0, 0), rgb(255, 255, 255)],
    },
    NamedPalette {
        id: "gameboy",
        name: "Game Boy",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(15, 56, 15),
            rgb(48, 98, 48),
            rgb(139, 172, 15),
            rgb(155, 188, 15),
        ],
    },
    NamedPalette {
        id: "gameboy-pocket",
        name: "Game Boy Pocket",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(0, 0, 0),
            rgb(85, 85, 85),
            rgb(170, 170, 170),
            rgb(255, 255, 255),
        ],
    },
    NamedPalette {
        id: "nes",
        name: "NES",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(0, 0, 0),
            rgb(252, 252, 252),
            rgb(188, 188, 188),
            rgb(124, 124, 124),
            rgb(164, 0, 0),
            rgb(228, 0, 88),
            rgb(216, 40, 120),
            rgb(252, 116, 180),
            rgb(0, 120, 248),
            rgb(104, 68, 252),
            rgb(248, 120, 88),
            rgb(248, 56, 0),
            rgb(0, 168, 0),
            rgb(0, 168, 68),
            rgb(184, 248, 24),
            rgb(172, 124, 0),
            rgb(248, 184, 0),
            rgb(248, 216, 120),
            rgb(0, 0, 168),
            rgb(0, 88, 248),
            rgb(88, 216, 84),
            rgb(152, 120, 248),
            rgb(248, 88, 152),
            rgb(60, 188, 252),
        ],
    },
    NamedPalette {
        id: "c64",
        name: "Commodore 64",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(0, 0, 0),
            rgb(255, 255, 255),
            rgb(136, 0, 0),
            rgb(170, 255, 238),
            rgb(204, 68, 204),
            rgb(0, 204, 85),
            rgb(0, 0, 170),
            rgb(238, 238, 119),
            rgb(221, 136, 85),
            rgb(102, 68, 0),
            rgb(255, 119, 119),
            rgb(51, 51, 51),
            rgb(119, 119, 119),
            rgb(170, 255, 102),
            rgb(0, 136, 255),
            rgb(187, 187, 187),
        ],
    },
    NamedPalette {
        id: "cga-mode4-p1",
        name: "CGA Mode 4 (Cyan)",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(0, 0, 0),
            rgb(0, 255, 255),
            rgb(255, 0, 255),
            rgb(255, 255, 255),
        ],
    },
    NamedPalette {
        id: "cga-mode4-p0",
        name: "CGA Mode 4 (Green)",
        category: PaletteCategory::Retro,
        colors: &[
            rgb(0, 0, 0),
            rgb(0, 255, 0),
            rgb(255, 0, 0),
            rgb(255, 255, 0),
        ],
    },
    NamedPalette {
        id: "sepia",
        name: "Sepia",
        category: PaletteCategory::Artistic,
        colors: &[
            rgb(44, 33, 24),
            rgb(92, 64, 51),
            rgb(155, 118, 83),
            rgb(199, 172, 132),
            rgb(242, 227, 198),
        ],
    },
    NamedPalette {
        id: "nord",
        name: "Nord",
        category: PaletteCategory::Modern,
        colors: &[
            rgb(46, 52, 64),
            rgb(59, 66, 82),
            rgb(67, 76, 94),
            rgb(76, 86, 106),
            rgb(216, 222, 233),
            rgb(229, 233, 240),
            rgb(236, 239, 244),
            rgb(143, 188, 187),
            rgb(136, 192, 208),
            rgb(129, 161, 193),
            rgb(94, 129, 172),
            rgb(191, 97, 106),
            rgb(208, 135, 112),
            rgb(235, 203, 139),
            rgb(163, 190, 140),
            rgb(180, 142, 173),
        ],
    },
];
