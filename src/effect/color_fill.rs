use super::{Effect, RenderContext};
use crate::color::{Rgb, fill_every_nth};

/// Lights every n-th LED with a fixed color and keeps the rest dark
#[derive(Debug, Clone)]
pub struct ColorFillEffect {
    color: Rgb,
    every_nth: usize,
}

impl ColorFillEffect {
    pub const fn new(color: Rgb, every_nth: usize) -> Self {
        Self { color, every_nth }
    }
}

impl Effect for ColorFillEffect {
    fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        fill_every_nth(leds, self.color, self.every_nth);
    }

    fn friendly_name(&self) -> &str {
        "Color Fill Effect"
    }
}
