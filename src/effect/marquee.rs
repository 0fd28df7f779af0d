//! Theater-marquee rainbow with travelling dark gaps

use smart_leds::hsv::Hsv;

use super::{Effect, RenderContext};
use crate::color::{BLACK, Rgb, hsv2rgb};

const GAP_SPACING: f32 = 5.0;
const SCROLL_STEP: f32 = 0.1;
const PHASE_STEP: u8 = 4;
const HUE_STEP: u8 = 8;

#[derive(Debug, Clone)]
pub struct MarqueeEffect {
    mirror: bool,
    scroll: f32,
    phase: u8,
}

impl MarqueeEffect {
    pub const fn new(mirror: bool) -> Self {
        Self {
            mirror,
            scroll: 0.0,
            phase: 0,
        }
    }

    fn hue_color(hue: u8) -> Rgb {
        hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        })
    }

    /// Pixel indices of the dark gaps within `span` pixels
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn gaps(&self, span: usize) -> impl Iterator<Item = usize> {
        let start = self.scroll;
        (0..)
            .map(move |step| start + GAP_SPACING * step as f32)
            .take_while(move |pos| (*pos as usize) < span)
            .map(|pos| pos as usize)
    }
}

impl Effect for MarqueeEffect {
    fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.scroll += SCROLL_STEP;
        if self.scroll > GAP_SPACING {
            self.scroll -= GAP_SPACING;
        }
        self.phase = self.phase.wrapping_add(PHASE_STEP);

        let len = leds.len();
        let mut hue = self.phase;

        if self.mirror {
            for i in 0..len.div_ceil(2) {
                let color = Self::hue_color(hue);
                leds[i] = color;
                leds[len - 1 - i] = color;
                hue = hue.wrapping_add(HUE_STEP);
            }
            for gap in self.gaps(len / 2) {
                leds[gap] = BLACK;
                leds[len - 1 - gap] = BLACK;
            }
        } else {
            for led in leds.iter_mut() {
                hue = hue.wrapping_add(HUE_STEP);
                *led = Self::hue_color(hue);
            }
            for gap in self.gaps(len) {
                leds[gap] = BLACK;
            }
        }
    }

    fn friendly_name(&self) -> &str {
        "Marquee Effect"
    }
}
