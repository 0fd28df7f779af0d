//! Solid single color fill

use super::{Effect, RenderContext};
use crate::color::Rgb;

const SOLID_FILL_NAME: &str = "Solid Fill Effect";

/// Fills every LED of the channel with one color
#[derive(Debug, Clone)]
pub struct SolidFillEffect {
    color: Rgb,
}

impl SolidFillEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl Effect for SolidFillEffect {
    fn init(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        leds.fill(self.color);
    }

    // The overlay paints into the same buffer
    fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        leds.fill(self.color);
    }

    fn friendly_name(&self) -> &str {
        SOLID_FILL_NAME
    }
}
