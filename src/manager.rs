//! Per-channel effect ownership and rendering.
//!
//! A channel is in one of three states:
//!
//! - no effect: the status overlay is drawn as an idle placeholder
//! - effect active: the active effect is drawn every tick
//! - error overlay: the overlay preempts the active effect without dropping it
//!
//! Link errors follow the link state. A general error (a rejected effect
//! request) expires on its own after the configured dwell.

use alloc::{boxed::Box, vec, vec::Vec};

use embassy_time::{Duration, Instant};

use crate::{
    ErrorReporter, OutputDriver,
    color::{BLACK, Rgb},
    command::Link,
    config::ChannelConfig,
    effect::{Effect, RenderContext, StatusEffect, StatusError},
    factory::EffectFactory,
};

/// Name published while a channel has no active effect
pub const NO_EFFECT_NAME: &str = "No Effect Playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    NoEffect,
    EffectActive,
    ErrorOverlay,
}

/// What a change request did to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// A new effect is active
    Applied,
    /// The request was addressed to another channel
    Ignored,
    /// The request was rejected and the error overlay raised
    Failed,
}

/// Owns the pixel buffer, active effect and status overlay of one channel
pub struct ChannelManager {
    index: usize,
    leds: Vec<Rgb>,
    brightness: u8,
    enabled: bool,

    effect: Option<Box<dyn Effect>>,
    overlay: StatusEffect,

    network_down: bool,
    messaging_down: bool,
    general_error_at: Option<Instant>,
    error_display: Duration,

    flush_failures: u32,
}

impl ChannelManager {
    pub fn new(index: usize, config: &ChannelConfig, error_display: Duration) -> Self {
        Self {
            index,
            leds: vec![BLACK; config.led_count],
            brightness: config.brightness,
            enabled: config.enabled,
            effect: None,
            overlay: StatusEffect::new(),
            network_down: false,
            messaging_down: false,
            general_error_at: None,
            error_display,
            flush_failures: 0,
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// Pixel buffer as last rendered
    pub fn leds(&self) -> &[Rgb] {
        &self.leds
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Applied by the output driver on the next flush
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn flush_failures(&self) -> u32 {
        self.flush_failures
    }

    /// Error currently shown by the overlay, the most specific one wins
    pub const fn error(&self) -> StatusError {
        if self.network_down {
            StatusError::Wifi
        } else if self.messaging_down {
            StatusError::Messaging
        } else if self.general_error_at.is_some() {
            StatusError::General
        } else {
            StatusError::None
        }
    }

    pub const fn state(&self) -> ChannelState {
        if !matches!(self.error(), StatusError::None) {
            ChannelState::ErrorOverlay
        } else if self.effect.is_some() {
            ChannelState::EffectActive
        } else {
            ChannelState::NoEffect
        }
    }

    pub fn current_effect_name(&self) -> &str {
        self.effect
            .as_ref()
            .map_or(NO_EFFECT_NAME, |effect| effect.friendly_name())
    }

    /// Run an effect request against this channel.
    ///
    /// On success the previous effect is dropped before the new one is
    /// initialized. On failure the active effect keeps running underneath
    /// the error overlay.
    pub fn change_effect<R: ErrorReporter + ?Sized>(
        &mut self,
        payload: &[u8],
        factory: &mut EffectFactory,
        ctx: &mut RenderContext<'_>,
        reporter: &mut R,
    ) -> ChangeOutcome {
        match factory.create_effect(payload) {
            Ok(created) if !created.target.includes(self.index) => {
                log::debug!(
                    "station: channel {} skips effect for {:?}",
                    self.index,
                    created.target
                );
                ChangeOutcome::Ignored
            }
            Ok(created) => {
                self.effect = None;
                let mut effect = created.effect;
                effect.init(&mut self.leds, ctx);
                log::info!(
                    "station: channel {} now plays '{}'",
                    self.index,
                    effect.friendly_name()
                );
                self.effect = Some(effect);
                self.general_error_at = None;
                reporter.report_error("");
                ChangeOutcome::Applied
            }
            Err(err) if !err.target.includes(self.index) => ChangeOutcome::Ignored,
            Err(err) => {
                log::warn!("station: channel {} keeps its effect: {}", self.index, err);
                if !self.error().is_link() {
                    self.general_error_at = Some(ctx.clock.frame_start());
                }
                reporter.report_error(factory.last_error());
                ChangeOutcome::Failed
            }
        }
    }

    /// Mirror a link state on the overlay
    pub fn on_link_status_changed(&mut self, link: Link, up: bool) {
        match link {
            Link::Network => self.network_down = !up,
            Link::Messaging => self.messaging_down = !up,
        }
        if !up {
            // Link errors replace a pending general error
            self.general_error_at = None;
        }
        log::debug!(
            "station: channel {} {:?} link {}, showing {:?}",
            self.index,
            link,
            if up { "up" } else { "down" },
            self.error()
        );
    }

    /// Render one frame and flush it
    pub fn tick<O: OutputDriver + ?Sized>(&mut self, ctx: &mut RenderContext<'_>, output: &mut O) {
        if !self.enabled {
            return;
        }

        let error = self.error();
        match self.effect.as_mut() {
            Some(effect) if error == StatusError::None => effect.draw(&mut self.leds, ctx),
            _ => {
                self.overlay.set_error(error);
                self.overlay.draw(&mut self.leds, ctx);
            }
        }

        if let Some(since) = self.general_error_at {
            let now = ctx.clock.frame_start();
            // A dwell past the end of time never expires
            let expired = since
                .checked_add(self.error_display)
                .is_some_and(|expires| now >= expires);
            if expired {
                log::debug!("station: channel {} error expired", self.index);
                self.general_error_at = None;
            }
        }

        self.flush(output);
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            log::info!("station: channel {} enabled", self.index);
        }
        self.enabled = true;
    }

    /// Blank the strip immediately and stop drawing until re-enabled
    pub fn disable<O: OutputDriver + ?Sized>(&mut self, output: &mut O) {
        self.enabled = false;
        self.leds.fill(BLACK);
        self.flush(output);
        log::info!("station: channel {} disabled", self.index);
    }

    fn flush<O: OutputDriver + ?Sized>(&mut self, output: &mut O) {
        if let Err(err) = output.write(self.index, &self.leds, self.brightness) {
            self.flush_failures = self.flush_failures.saturating_add(1);
            log::warn!("station: channel {} flush failed: {}", self.index, err);
        }
    }
}
