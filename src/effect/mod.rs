//! Effect system with runtime-selected effect variants
//!
//! Effects are built by the [`EffectFactory`](crate::factory::EffectFactory)
//! from remote requests and owned by a single channel as `Box<dyn Effect>`.
//! The status overlay is the one effect every channel always owns.

mod color_fill;
mod flag;
mod marquee;
mod palette_scroll;
mod rainbow;
mod solid_fill;
mod starry_night;
mod status;
mod twinkle;

use rand::rngs::SmallRng;

pub use color_fill::ColorFillEffect;
pub use flag::BulgarianFlagEffect;
pub use marquee::MarqueeEffect;
pub use palette_scroll::PaletteEffect;
pub use rainbow::{RainbowFillEffect, RainbowStyle};
pub use solid_fill::SolidFillEffect;
pub use starry_night::{
    STAR_PRESETS, StarField, StarKind, StarPreset, StarryNightConfig, StarryNightEffect,
};
pub(crate) use starry_night::preset_by_key;
pub use status::{StatusEffect, StatusError};
pub use twinkle::TwinkleEffect;

use crate::{clock::FrameClock, color::Rgb};

/// Per-tick services lent to effects by the station
pub struct RenderContext<'a> {
    /// Frame clock, already advanced for this tick
    pub clock: &'a FrameClock,
    /// Shared random source
    pub rng: &'a mut SmallRng,
}

impl<'a> RenderContext<'a> {
    pub fn new(clock: &'a FrameClock, rng: &'a mut SmallRng) -> Self {
        Self { clock, rng }
    }
}

pub trait Effect {
    /// Called once when the effect becomes active on a channel
    fn init(&mut self, _leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {}

    /// Render a single frame into the channel buffer.
    ///
    /// Must not block: it runs on the render loop once per tick.
    fn draw(&mut self, leds: &mut [Rgb], ctx: &mut RenderContext<'_>);

    /// Human readable name published to the outside world
    fn friendly_name(&self) -> &str;
}
