//! Status overlay shown while a channel has no effect or is in error

use super::{Effect, RenderContext};
use crate::color::{Rgb, fill_every_nth, rgb_from_u32};

const STATUS_EVERY_NTH: usize = 3;

const IDLE_COLOR: Rgb = rgb_from_u32(0x00_8000);
const GENERAL_COLOR: Rgb = rgb_from_u32(0xFF_0000);
const WIFI_COLOR: Rgb = rgb_from_u32(0xFF_A500);
const MESSAGING_COLOR: Rgb = rgb_from_u32(0x80_0080);

/// Error shown by the overlay.
///
/// Variants are ordered by specificity: a link error outranks a transient
/// effect-creation error, and a network outage outranks a messaging outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum StatusError {
    #[default]
    None,
    /// Effect creation failed; expires after the display dwell
    General,
    /// Messaging link is down
    Messaging,
    /// Network link is down
    Wifi,
}

impl StatusError {
    /// Overlay color for this error
    pub const fn color(self) -> Rgb {
        match self {
            Self::None => IDLE_COLOR,
            Self::General => GENERAL_COLOR,
            Self::Wifi => WIFI_COLOR,
            Self::Messaging => MESSAGING_COLOR,
        }
    }

    /// Whether the error reflects a link state rather than a failed request
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Wifi | Self::Messaging)
    }
}

/// Persistent per-channel overlay painting every third pixel in a status color
#[derive(Debug, Clone, Default)]
pub struct StatusEffect {
    error: StatusError,
}

impl StatusEffect {
    pub const fn new() -> Self {
        Self {
            error: StatusError::None,
        }
    }

    pub const fn error(&self) -> StatusError {
        self.error
    }

    pub fn set_error(&mut self, error: StatusError) {
        self.error = error;
    }
}

impl Effect for StatusEffect {
    fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        fill_every_nth(leds, self.error.color(), STATUS_EVERY_NTH);
    }

    fn friendly_name(&self) -> &str {
        "Status Fill Effect"
    }
}
