//! Randomly placed pixels that light up and fade away

use rand::Rng;

use super::{Effect, RenderContext};
use crate::{
    color::{BLACK, Rgb, rgb_from_u32},
    particle::{Lifetime, Motion, Particle, ParticleSystem, Shade},
};

const TWINKLE_COLORS: [Rgb; 4] = [
    rgb_from_u32(0xFF_0000),
    rgb_from_u32(0x00_FF00),
    rgb_from_u32(0x00_00FF),
    rgb_from_u32(0xFF_FFFF),
];

/// Keeps up to `count` lit pixels, spawning one new twinkle per frame
#[derive(Debug, Clone)]
pub struct TwinkleEffect {
    /// Maximum lit pixels; 0 means half the strip
    count: usize,
    lifetime: Lifetime,
    lit: ParticleSystem,
}

impl TwinkleEffect {
    pub fn new(count: usize, hold: f32, fade: f32) -> Self {
        Self {
            count,
            lifetime: Lifetime::new(0.0, 0.0, hold, fade),
            lit: ParticleSystem::new(),
        }
    }

    fn target_count(&self, strip_len: usize) -> usize {
        if self.count == 0 {
            strip_len / 2
        } else {
            self.count.min(strip_len)
        }
    }
}

impl Effect for TwinkleEffect {
    fn init(&mut self, _leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.lit.clear();
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn draw(&mut self, leds: &mut [Rgb], ctx: &mut RenderContext<'_>) {
        let target = self.target_count(leds.len());
        self.lit.cull(ctx.clock, target);

        if self.lit.len() < target {
            let position = ctx.rng.random_range(0..leds.len());
            let color = TWINKLE_COLORS[ctx.rng.random_range(0..TWINKLE_COLORS.len())];
            let twinkle = Particle::new(ctx.clock, self.lifetime, Shade::Fixed(color))
                .with_motion(Motion::new(position as f32, 0.0));
            self.lit.spawn(twinkle);
        }

        leds.fill(BLACK);
        for twinkle in self.lit.iter() {
            let index = twinkle.position_or(0.0) as usize;
            if let Some(led) = leds.get_mut(index) {
                *led = twinkle.color(ctx.clock);
            }
        }
    }

    fn friendly_name(&self) -> &str {
        "Twinkle Effect"
    }
}
