//! Palette scrolled along the strip

use super::{Effect, RenderContext};
use crate::{
    color::{Palette, Rgb},
    math8::wrap_hue,
};

/// Samples a palette along the strip and slides it over time
#[derive(Debug, Clone)]
pub struct PaletteEffect {
    palette: &'static Palette,
    /// Palette index step between neighbouring pixels
    density: u8,
    /// Palette indices per second
    speed: f32,
    offset: f32,
}

impl PaletteEffect {
    pub fn new(palette: &'static Palette, density: u8, speed: f32) -> Self {
        Self {
            palette,
            density,
            speed: if speed.is_finite() { speed } else { 0.0 },
            offset: 0.0,
        }
    }
}

impl Effect for PaletteEffect {
    fn draw(&mut self, leds: &mut [Rgb], ctx: &mut RenderContext<'_>) {
        self.offset = libm::fmodf(self.offset + self.speed * ctx.clock.delta_seconds(), 256.0);

        let mut index = wrap_hue(self.offset);
        for led in leds {
            *led = self.palette.color_at(index);
            index = index.wrapping_add(self.density);
        }
    }

    fn friendly_name(&self) -> &str {
        "Palette Effect"
    }
}
