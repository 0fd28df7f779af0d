//! The owning context of the engine.
//!
//! A [`Station`] holds everything the render loop touches: the frame clock,
//! the random source, the effect factory, one manager per channel, the
//! output driver and the error reporter. Remote commands are applied
//! between ticks, so configuration and rendering never race.

use alloc::vec::Vec;

use embassy_time::Instant;
use rand::{SeedableRng, rngs::SmallRng};
use serde::{Serialize, Serializer};

use crate::{
    ErrorReporter, OutputDriver,
    clock::FrameClock,
    command::{CommandQueue, Link, StationCommand},
    config::StationConfig,
    effect::RenderContext,
    factory::{ChannelTarget, EffectFactory},
    manager::ChannelManager,
};

pub struct Station<O: OutputDriver, R: ErrorReporter> {
    clock: FrameClock,
    rng: SmallRng,
    factory: EffectFactory,
    channels: Vec<ChannelManager>,
    output: O,
    reporter: R,
}

impl<O: OutputDriver, R: ErrorReporter> Station<O, R> {
    /// Create a station with the built-in effects registered
    pub fn new(config: &StationConfig, output: O, reporter: R, now: Instant) -> Self {
        Self::with_factory(config, EffectFactory::new(), output, reporter, now)
    }

    /// Create a station around a custom factory
    pub fn with_factory(
        config: &StationConfig,
        factory: EffectFactory,
        output: O,
        reporter: R,
        now: Instant,
    ) -> Self {
        let channels = config
            .channels
            .iter()
            .enumerate()
            .map(|(index, channel)| ChannelManager::new(index, channel, config.error_display))
            .collect();

        Self {
            clock: FrameClock::new(now),
            rng: SmallRng::seed_from_u64(config.seed),
            factory,
            channels,
            output,
            reporter,
        }
    }

    /// Advance the clock once, then render and flush every channel in order
    pub fn tick(&mut self, now: Instant) {
        self.clock.advance(now);
        let mut ctx = RenderContext::new(&self.clock, &mut self.rng);
        for channel in &mut self.channels {
            channel.tick(&mut ctx, &mut self.output);
        }
    }

    /// Offer an effect request to every channel.
    ///
    /// Each channel runs the factory on its own, so a broadcast request
    /// gives every channel an independent instance.
    pub fn change_effect(&mut self, payload: &[u8]) {
        let mut ctx = RenderContext::new(&self.clock, &mut self.rng);
        for channel in &mut self.channels {
            channel.change_effect(payload, &mut self.factory, &mut ctx, &mut self.reporter);
        }
    }

    pub fn set_brightness(&mut self, target: ChannelTarget, brightness: u8) {
        if let ChannelTarget::Channel(index) = target {
            if index >= self.channels.len() {
                log::warn!("station: no channel {} for brightness", index);
                return;
            }
        }
        for channel in &mut self.channels {
            if target.includes(channel.index()) {
                channel.set_brightness(brightness);
            }
        }
    }

    /// Enable or disable a channel, returning `false` if it does not exist
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> bool {
        let Some(channel) = self.channels.get_mut(index) else {
            log::warn!("station: no channel {} to enable", index);
            return false;
        };
        if enabled {
            channel.enable();
        } else {
            channel.disable(&mut self.output);
        }
        true
    }

    pub fn on_link_status_changed(&mut self, link: Link, up: bool) {
        for channel in &mut self.channels {
            channel.on_link_status_changed(link, up);
        }
    }

    pub fn apply(&mut self, command: StationCommand) {
        match command {
            StationCommand::ChangeEffect(payload) => self.change_effect(payload.as_bytes()),
            StationCommand::SetBrightness(target, brightness) => {
                self.set_brightness(target, brightness);
            }
            StationCommand::LinkStatus(link, up) => self.on_link_status_changed(link, up),
            StationCommand::Enable(index, enabled) => {
                self.set_enabled(index, enabled);
            }
        }
    }

    /// Apply every pending command, returning how many were applied
    pub fn process_commands<const SIZE: usize>(&mut self, queue: &CommandQueue<SIZE>) -> usize {
        let mut applied = 0;
        while let Some(command) = queue.try_pop() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    pub fn channels(&self) -> &[ChannelManager] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelManager> {
        self.channels.get(index)
    }

    pub fn current_effect_name(&self, index: usize) -> Option<&str> {
        self.channel(index).map(ChannelManager::current_effect_name)
    }

    pub fn current_brightness(&self, index: usize) -> Option<u8> {
        self.channel(index).map(ChannelManager::brightness)
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.channel(index).is_some_and(ChannelManager::is_enabled)
    }

    /// Failed flushes over all channels since startup
    pub fn flush_failures(&self) -> u32 {
        self.channels
            .iter()
            .fold(0, |total, channel| total.saturating_add(channel.flush_failures()))
    }

    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn factory_mut(&mut self) -> &mut EffectFactory {
        &mut self.factory
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Serialize the per-channel status as JSON into `buf`.
    ///
    /// ```text
    /// {"channels":[{"effect":"Marquee Effect","brightness":255,"enabled":true}]}
    /// ```
    pub fn write_status(&self, buf: &mut [u8]) -> serde_json_core::ser::Result<usize> {
        serde_json_core::to_slice(
            &StationStatus {
                channels: ChannelList(&self.channels),
            },
            buf,
        )
    }
}

#[derive(Serialize)]
struct StationStatus<'a> {
    channels: ChannelList<'a>,
}

struct ChannelList<'a>(&'a [ChannelManager]);

impl Serialize for ChannelList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|channel| ChannelStatus {
            effect: channel.current_effect_name(),
            brightness: channel.brightness(),
            enabled: channel.is_enabled(),
        }))
    }
}

#[derive(Serialize)]
struct ChannelStatus<'a> {
    effect: &'a str,
    brightness: u8,
    enabled: bool,
}
