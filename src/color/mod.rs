pub mod palette;
mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use palette::{PALETTE_NAMES, Palette, palette_by_name};
pub use utils::{
    add_colors, blend_colors, fade_to_black_by, fill_every_nth, fill_rainbow, hsv2rgb,
    rgb_from_u32,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
