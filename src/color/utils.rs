pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{blend8, scale8},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub const fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Dim a color towards black (0 = unchanged, 255 = black)
#[inline]
pub const fn fade_to_black_by(color: Rgb, amount: u8) -> Rgb {
    let keep = 255 - amount;
    Rgb {
        r: scale8(color.r, keep),
        g: scale8(color.g, keep),
        b: scale8(color.b, keep),
    }
}

/// Per-channel saturating addition
#[inline]
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Fill the strip with a rainbow starting at `start_hue`
pub fn fill_rainbow(leds: &mut [Rgb], start_hue: u8, delta_hue: u8) {
    let mut hue = start_hue;
    for led in leds {
        *led = hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        });
        hue = hue.wrapping_add(delta_hue);
    }
}

/// Paint every `every_nth` pixel with `color` and blank the rest.
///
/// `every_nth` of 0 or 1 paints the whole strip.
pub fn fill_every_nth(leds: &mut [Rgb], color: Rgb, every_nth: usize) {
    let step = every_nth.max(1);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if i % step == 0 { color } else { super::BLACK };
    }
}
