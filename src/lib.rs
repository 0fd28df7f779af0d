#![no_std]

extern crate alloc;

pub mod clock;
pub mod color;
pub mod command;
pub mod config;
pub mod effect;
pub mod factory;
pub mod frame_scheduler;
pub mod manager;
pub mod math8;
pub mod particle;
pub mod station;

use core::fmt;

pub use clock::FrameClock;
pub use command::{CommandError, CommandQueue, Link, StationCommand, parse_brightness_payload};
pub use config::{ChannelConfig, StationConfig};
pub use effect::{Effect, RenderContext, StatusError};
pub use factory::{ChannelTarget, CreateError, CreatedEffect, EffectFactory, FactoryError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use manager::{ChangeOutcome, ChannelManager, ChannelState, NO_EFFECT_NAME};
pub use station::Station;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The station is generic over this trait.
pub trait OutputDriver {
    /// Write one channel's colors to its strip, scaled by `brightness`
    fn write(&mut self, channel: usize, colors: &[Rgb], brightness: u8) -> Result<(), OutputError>;
}

/// Receives the text of the last effect change failure, or an empty
/// string once a change succeeds.
pub trait ErrorReporter {
    fn report_error(&mut self, text: &str);
}

/// Reporter for hosts without an upstream error topic
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report_error(&mut self, text: &str) {
        if !text.is_empty() {
            log::error!("station: {}", text);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// The strip did not accept the frame
    Transfer,
    /// No strip is attached to this channel
    NoSuchChannel(usize),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "LED transfer failed"),
            Self::NoSuchChannel(index) => write!(f, "no strip on channel {}", index),
        }
    }
}

impl core::error::Error for OutputError {}

/// Install the ESP serial logger as the `log` backend
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
