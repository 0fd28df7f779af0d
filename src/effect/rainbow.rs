//! Scrolling rainbow fills

use rand::Rng;

use super::{Effect, RenderContext};
use crate::{
    color::{Rgb, WHITE, fill_rainbow},
    math8::wrap_hue,
};

const MIN_SPEED_DIVISOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainbowStyle {
    /// Plain scrolling rainbow
    Fill,
    /// Scrolling rainbow with one random white sparkle per frame
    Twinkle,
}

/// Rainbow whose start hue advances by `elapsed_ms / speed_divisor` per frame
#[derive(Debug, Clone)]
pub struct RainbowFillEffect {
    style: RainbowStyle,
    speed_divisor: f32,
    delta_hue: u8,
    hue: f32,
}

impl RainbowFillEffect {
    pub fn new(style: RainbowStyle, speed_divisor: f32, delta_hue: u8) -> Self {
        let speed_divisor = if speed_divisor.is_finite() && speed_divisor > MIN_SPEED_DIVISOR {
            speed_divisor
        } else {
            MIN_SPEED_DIVISOR
        };
        Self {
            style,
            speed_divisor,
            delta_hue,
            hue: 0.0,
        }
    }

    /// Current start hue on the 0-255 wheel
    pub fn hue(&self) -> u8 {
        wrap_hue(self.hue)
    }
}

impl Effect for RainbowFillEffect {
    fn init(&mut self, _leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.hue = 0.0;
    }

    fn draw(&mut self, leds: &mut [Rgb], ctx: &mut RenderContext<'_>) {
        let elapsed_ms = ctx.clock.delta_seconds() * 1000.0;
        self.hue = libm::fmodf(self.hue + elapsed_ms / self.speed_divisor, 256.0);

        fill_rainbow(leds, wrap_hue(self.hue), self.delta_hue);

        if self.style == RainbowStyle::Twinkle && !leds.is_empty() {
            let sparkle = ctx.rng.random_range(0..leds.len());
            leds[sparkle] = WHITE;
        }
    }

    fn friendly_name(&self) -> &str {
        match self.style {
            RainbowStyle::Fill => "RainbowFill Effect",
            RainbowStyle::Twinkle => "RainbowTwinkle Effect",
        }
    }
}
