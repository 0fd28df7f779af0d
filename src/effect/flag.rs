use super::{Effect, RenderContext};
use crate::color::{BLACK, Rgb, WHITE, rgb_from_u32};

const GREEN: Rgb = rgb_from_u32(0x00_9B49);
const RED: Rgb = rgb_from_u32(0xD6_2612);

/// Static white-green-red tricolor split into equal thirds
#[derive(Debug, Clone)]
pub struct BulgarianFlagEffect {
    reverse: bool,
}

impl BulgarianFlagEffect {
    pub const fn new(reverse: bool) -> Self {
        Self { reverse }
    }

    fn paint(&self, leds: &mut [Rgb]) {
        let slice = leds.len() / 3;
        if slice == 0 {
            leds.fill(BLACK);
            return;
        }
        let (first, last) = if self.reverse { (RED, WHITE) } else { (WHITE, RED) };

        for (i, led) in leds.iter_mut().enumerate() {
            *led = match i / slice {
                0 => first,
                1 => GREEN,
                2 => last,
                _ => BLACK,
            };
        }
    }
}

impl Effect for BulgarianFlagEffect {
    fn init(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.paint(leds);
    }

    fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.paint(leds);
    }

    fn friendly_name(&self) -> &str {
        "Bulgarian Flag Effect"
    }
}
