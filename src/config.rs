use alloc::{vec, vec::Vec};

use embassy_time::Duration;

/// Pixels per strip when nothing else is known
pub const DEFAULT_LED_COUNT: usize = 110;
pub const DEFAULT_BRIGHTNESS: u8 = 255;
/// How long a failed effect change stays on the strip
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_secs(30);
pub const DEFAULT_CHANNEL_COUNT: usize = 2;
pub const DEFAULT_SEED: u64 = 0x5EED_1ED5;

/// Configuration of a single output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub led_count: usize,
    pub brightness: u8,
    pub enabled: bool,
}

impl ChannelConfig {
    pub const fn new(led_count: usize) -> Self {
        Self {
            led_count,
            brightness: DEFAULT_BRIGHTNESS,
            enabled: true,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LED_COUNT)
    }
}

/// Configuration for the station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationConfig {
    /// One entry per hardware channel, in output order
    pub channels: Vec<ChannelConfig>,
    /// Dwell of the general error overlay
    pub error_display: Duration,
    /// Seed of the random source lent to effects
    pub seed: u64,
}

impl StationConfig {
    /// `count` identical channels of `led_count` pixels each
    pub fn uniform(count: usize, led_count: usize) -> Self {
        Self {
            channels: vec![ChannelConfig::new(led_count); count],
            ..Self::default()
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            channels: vec![ChannelConfig::default(); DEFAULT_CHANNEL_COUNT],
            error_display: DEFAULT_ERROR_DISPLAY,
            seed: DEFAULT_SEED,
        }
    }
}
