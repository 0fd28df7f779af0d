//! Sixteen-entry gradient palettes addressed by an 8-bit index.
//!
//! Palettes are shared, immutable constants resolved by name when a remote
//! request asks for one.

use crate::color::{Rgb, blend_colors, rgb_from_u32};

const ENTRIES: usize = 16;

/// A 16-color palette sampled with linear blending between neighbours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgb; ENTRIES],
}

impl Palette {
    pub const fn new(entries: [Rgb; ENTRIES]) -> Self {
        Self { entries }
    }

    /// Build a palette from sixteen `0xRRGGBB` values
    pub const fn from_hex(hex: [u32; ENTRIES]) -> Self {
        let mut entries = [Rgb { r: 0, g: 0, b: 0 }; ENTRIES];
        let mut i = 0;
        while i < ENTRIES {
            entries[i] = rgb_from_u32(hex[i]);
            i += 1;
        }
        Self { entries }
    }

    /// Two-color gradient palette
    #[allow(clippy::cast_possible_truncation)]
    pub const fn gradient(from: Rgb, to: Rgb) -> Self {
        let mut entries = [from; ENTRIES];
        let mut i = 0;
        while i < ENTRIES {
            entries[i] = blend_colors(from, to, (i * 17) as u8);
            i += 1;
        }
        Self { entries }
    }

    /// Sample the palette, wrapping from the last entry back to the first
    pub fn color_at(&self, index: u8) -> Rgb {
        let hi = usize::from(index >> 4);
        let lo = index & 0x0F;
        let current = self.entries[hi];
        if lo == 0 {
            return current;
        }
        let next = self.entries[(hi + 1) % ENTRIES];
        blend_colors(current, next, lo << 4)
    }

    /// Raw palette entries
    pub const fn entries(&self) -> &[Rgb; ENTRIES] {
        &self.entries
    }
}

// Named colors, 0xRRGGBB
const BLACK: u32 = 0x00_0000;
const WHITE: u32 = 0xFF_FFFF;
const RED: u32 = 0xFF_0000;
const DARK_RED: u32 = 0x8B_0000;
const ORANGE_RED: u32 = 0xFF_4500;
const GREEN: u32 = 0x00_8000;
const DARK_GREEN: u32 = 0x00_6400;
const LIME_GREEN: u32 = 0x32_CD32;
const BLUE: u32 = 0x00_00FF;
const MEDIUM_BLUE: u32 = 0x00_00CD;
const DARK_BLUE: u32 = 0x00_008B;
const PURPLE: u32 = 0x80_0080;
const MAROON: u32 = 0x80_0000;
const VIOLET: u32 = 0xEE_82EE;
const DARK_VIOLET: u32 = 0x94_00D3;
const PINK: u32 = 0xFF_C0CB;
const DEEP_PINK: u32 = 0xFF_1493;
const HOT_PINK: u32 = 0xFF_69B4;
const LIGHT_PINK: u32 = 0xFF_B6C1;
const LIGHT_CORAL: u32 = 0xF0_8080;
const MEDIUM_PURPLE: u32 = 0x93_70DB;
const MAGENTA: u32 = 0xFF_00FF;
const DARK_MAGENTA: u32 = 0x8B_008B;
const DARK_SALMON: u32 = 0xE9_967A;
const MEDIUM_VIOLET_RED: u32 = 0xC7_1585;

pub static RGB_COLORS: Palette = Palette::from_hex([
    RED, GREEN, BLUE, RED, GREEN, BLUE, RED, GREEN, BLUE, RED, GREEN, BLUE, RED, GREEN, BLUE,
    BLUE,
]);

pub static BLUE_COLORS: Palette = Palette::from_hex([
    DARK_BLUE,
    MEDIUM_BLUE,
    BLUE,
    MEDIUM_BLUE,
    DARK_BLUE,
    MEDIUM_BLUE,
    BLUE,
    MEDIUM_BLUE,
    DARK_BLUE,
    MEDIUM_BLUE,
    BLUE,
    MEDIUM_BLUE,
    DARK_BLUE,
    MEDIUM_BLUE,
    BLUE,
    MEDIUM_BLUE,
]);

pub static RED_COLORS: Palette = Palette::from_hex([
    RED, DARK_RED, DARK_RED, DARK_RED, RED, DARK_RED, DARK_RED, DARK_RED, RED, DARK_RED,
    DARK_RED, DARK_RED, RED, DARK_RED, DARK_RED, ORANGE_RED,
]);

pub static GREEN_COLORS: Palette = Palette::from_hex([
    GREEN, DARK_GREEN, DARK_GREEN, DARK_GREEN, GREEN, DARK_GREEN, DARK_GREEN, DARK_GREEN,
    GREEN, DARK_GREEN, DARK_GREEN, DARK_GREEN, GREEN, DARK_GREEN, DARK_GREEN, LIME_GREEN,
]);

pub static MAGENTA_COLORS: Palette = Palette::from_hex([
    PINK,
    DEEP_PINK,
    HOT_PINK,
    LIGHT_PINK,
    LIGHT_CORAL,
    PURPLE,
    MEDIUM_PURPLE,
    MAGENTA,
    DARK_MAGENTA,
    DARK_SALMON,
    MEDIUM_VIOLET_RED,
    PINK,
    DEEP_PINK,
    HOT_PINK,
    LIGHT_PINK,
    MAGENTA,
]);

pub static PURPLE_COLORS: Palette = Palette::from_hex([
    PURPLE, MAROON, VIOLET, DARK_VIOLET, PURPLE, MAROON, VIOLET, DARK_VIOLET, PURPLE, MAROON,
    VIOLET, DARK_VIOLET, PINK, MAROON, VIOLET, DARK_VIOLET,
]);

pub static SPECTRUM_COLORS: Palette = Palette::from_hex([
    0xFD_0E35, // Red
    0xFF_8833, // Orange
    0xFF_EB00, // Middle yellow
    0xAF_E313, // Inchworm
    0x3A_A655, // Green
    0x8D_D9CC, // Middle blue green
    0x00_66FF, // Blue III
    0xDB_91EF, // Lilac
    0xFD_0E35,
    0xFF_8833,
    0xFF_EB00,
    0xAF_E313,
    0x3A_A655,
    0x8D_D9CC,
    0x00_66FF,
    0xDB_91EF,
]);

pub static BG_COLORS: Palette = Palette::from_hex([
    WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, GREEN, GREEN, GREEN, GREEN, GREEN, RED, RED, RED,
    RED, RED,
]);

pub static BLUE_SWEEP: Palette = Palette::gradient(rgb_from_u32(BLUE), rgb_from_u32(GREEN));

pub static BLUE_STRIPES: Palette = Palette::from_hex([
    WHITE, BLUE, BLUE, BLUE, BLUE, WHITE, BLACK, BLACK, WHITE, BLUE, BLUE, BLUE, BLUE, WHITE,
    BLACK, BLACK,
]);

pub static MAGENTA_STRIPES: Palette = Palette::from_hex([
    WHITE, MAGENTA, MAGENTA, MAGENTA, MAGENTA, WHITE, BLACK, BLACK, WHITE, MAGENTA, MAGENTA,
    MAGENTA, MAGENTA, WHITE, BLACK, BLACK,
]);

pub static RAINBOW_COLORS: Palette = Palette::from_hex([
    0xFF_0000, 0xD5_2A00, 0xAB_5500, 0xAB_7F00, 0xAB_AB00, 0x56_D500, 0x00_FF00, 0x00_D52A,
    0x00_AB55, 0x00_56AA, 0x00_00FF, 0x2A_00D5, 0x55_00AB, 0x7F_0081, 0xAB_0055, 0xD5_002B,
]);

pub static HEAT_COLORS: Palette = Palette::from_hex([
    0x00_0000, 0x33_0000, 0x66_0000, 0x99_0000, 0xCC_0000, 0xFF_0000, 0xFF_3300, 0xFF_6600,
    0xFF_9900, 0xFF_CC00, 0xFF_FF00, 0xFF_FF33, 0xFF_FF66, 0xFF_FF99, 0xFF_FFCC, 0xFF_FFFF,
]);

/// Names accepted by [`palette_by_name`]
pub const PALETTE_NAMES: [&str; 13] = [
    "RGB",
    "Blue",
    "Red",
    "Green",
    "Magenta",
    "Purple",
    "spectrum",
    "BG",
    "blueSweep",
    "BlueStripes",
    "MagentaStripes",
    "rainbowPalette",
    "Heat",
];

/// Resolve a pre-registered palette by its exact, case-sensitive name
pub fn palette_by_name(name: &str) -> Option<&'static Palette> {
    Some(match name {
        "RGB" => &RGB_COLORS,
        "Blue" => &BLUE_COLORS,
        "Red" => &RED_COLORS,
        "Green" => &GREEN_COLORS,
        "Magenta" => &MAGENTA_COLORS,
        "Purple" => &PURPLE_COLORS,
        "spectrum" => &SPECTRUM_COLORS,
        "BG" => &BG_COLORS,
        "blueSweep" => &BLUE_SWEEP,
        "BlueStripes" => &BLUE_STRIPES,
        "MagentaStripes" => &MAGENTA_STRIPES,
        "rainbowPalette" => &RAINBOW_COLORS,
        "Heat" => &HEAT_COLORS,
        _ => return None,
    })
}
