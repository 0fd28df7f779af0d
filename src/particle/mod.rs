//! Time-aging visual elements.
//!
//! A particle is assembled from independent components: a [`Lifetime`]
//! describing its four life stages, a [`Shade`] that provides its base color
//! and an optional [`Motion`]. Effects combine them as needed instead of
//! inheriting behavior.

mod system;

use embassy_time::Instant;
use rand::Rng;

pub use system::ParticleSystem;

use crate::{
    clock::FrameClock,
    color::{Palette, Rgb, WHITE, add_colors, fade_to_black_by},
    math8::unit_to_u8,
};

/// Stage of a particle's life at a given age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    /// Fading in from black
    PreIgnition,
    /// Flashing towards full ignition
    Ignition,
    /// Fully lit
    Hold,
    /// Linear fade out
    Fade,
    /// Fully faded, eligible for removal
    Expired,
}

/// Four sequential life stage durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub preignition: f32,
    pub ignition: f32,
    pub hold: f32,
    pub fade: f32,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new(0.0, 0.5, 1.0, 1.5)
    }
}

/// Negative and NaN durations collapse to zero
const fn non_negative(seconds: f32) -> f32 {
    if seconds > 0.0 { seconds } else { 0.0 }
}

impl Lifetime {
    pub const fn new(preignition: f32, ignition: f32, hold: f32, fade: f32) -> Self {
        Self {
            preignition: non_negative(preignition),
            ignition: non_negative(ignition),
            hold: non_negative(hold),
            fade: non_negative(fade),
        }
    }

    /// Sum of all four stages
    pub fn total(&self) -> f32 {
        self.preignition + self.ignition + self.hold + self.fade
    }

    /// How much a particle of this lifetime is dimmed at `age`.
    ///
    /// Returns a fraction in `[0, 1]` where 0 is full brightness and 1 is
    /// black.
    pub fn fadeout_amount(&self, age: f32) -> f32 {
        let mut age = if age > 0.0 { age } else { 0.0 };

        if self.preignition > 0.0 && age < self.preignition {
            return (1.0 - age / self.preignition).clamp(0.0, 1.0);
        }
        age -= self.preignition;

        if self.ignition > 0.0 && age < self.ignition {
            return (age / self.ignition).clamp(0.0, 1.0);
        }
        age -= self.ignition;

        if age < self.hold {
            return 0.0;
        }
        if self.fade <= 0.0 || age > self.hold + self.fade {
            return 1.0;
        }
        ((age - self.hold) / self.fade).clamp(0.0, 1.0)
    }

    /// Life stage at `age`
    pub fn stage(&self, age: f32) -> LifeStage {
        let age = if age > 0.0 { age } else { 0.0 };
        if age >= self.total() {
            LifeStage::Expired
        } else if age < self.preignition {
            LifeStage::PreIgnition
        } else if age < self.preignition + self.ignition {
            LifeStage::Ignition
        } else if age < self.preignition + self.ignition + self.hold {
            LifeStage::Hold
        } else {
            LifeStage::Fade
        }
    }

    /// Progress through the ignition stage (0.0-1.0), if `age` falls into it
    pub fn ignition_progress(&self, age: f32) -> Option<f32> {
        if self.ignition <= 0.0 {
            return None;
        }
        let into_ignition = age - self.preignition;
        if into_ignition >= 0.0 && into_ignition < self.ignition {
            Some(into_ignition / self.ignition)
        } else {
            None
        }
    }
}

/// Something that was born at a known instant and lives for a known time
pub trait Lifespan {
    /// Frame start at which the object was created
    fn birth(&self) -> Instant;

    /// Total lifetime in seconds
    fn total_lifetime(&self) -> f32;

    /// Age in seconds at the current frame
    fn age(&self, clock: &FrameClock) -> f32 {
        clock.seconds_since(self.birth())
    }

    /// Whether the object has outlived its lifetime
    fn is_expired(&self, clock: &FrameClock) -> bool {
        self.age(clock) >= self.total_lifetime()
    }
}

/// Base color source of a particle
#[derive(Debug, Clone, Copy)]
pub enum Shade {
    /// Fixed RGB color
    Fixed(Rgb),
    /// Palette entry at an 8-bit index
    Palette {
        palette: &'static Palette,
        index: u8,
    },
}

impl Shade {
    /// Undimmed base color
    pub fn base_color(&self) -> Rgb {
        match self {
            Self::Fixed(color) => *color,
            Self::Palette { palette, index } => palette.color_at(*index),
        }
    }

    /// Same shade with a different palette index; fixed colors are unchanged
    #[must_use]
    pub const fn with_index(self, new_index: u8) -> Self {
        match self {
            Self::Fixed(_) => self,
            Self::Palette { palette, .. } => Self::Palette {
                palette,
                index: new_index,
            },
        }
    }
}

/// Position and velocity along the strip, in pixels and pixels per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: f32,
    pub velocity: f32,
}

impl Motion {
    pub const fn new(position: f32, velocity: f32) -> Self {
        Self { position, velocity }
    }

    /// Motion with a velocity drawn uniformly from `[-max_speed, max_speed]`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, position: f32, max_speed: f32) -> Self {
        let velocity = if max_speed.is_finite() && max_speed > 0.0 {
            // random_range panics once the span overflows f32
            (rng.random::<f32>() * 2.0 - 1.0) * max_speed
        } else {
            0.0
        };
        Self { position, velocity }
    }

    /// Integrate the position over `delta_seconds`
    pub fn advance(&mut self, delta_seconds: f32) {
        self.position += self.velocity * delta_seconds;
    }
}

/// A fading, optionally moving, colored element
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    birth: Instant,
    lifetime: Lifetime,
    pub shade: Shade,
    pub motion: Option<Motion>,
    /// Width in pixels
    pub size: f32,
}

impl Particle {
    /// Create a particle born at the current frame start
    pub fn new(clock: &FrameClock, lifetime: Lifetime, shade: Shade) -> Self {
        Self {
            birth: clock.frame_start(),
            lifetime,
            shade,
            motion: None,
            size: 1.0,
        }
    }

    #[must_use]
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub const fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Dimming fraction at the current frame
    pub fn fadeout_amount(&self, clock: &FrameClock) -> f32 {
        self.lifetime.fadeout_amount(self.age(clock))
    }

    /// Life stage at the current frame
    pub fn stage(&self, clock: &FrameClock) -> LifeStage {
        self.lifetime.stage(self.age(clock))
    }

    /// Pixel position: the motion position, or `fallback` for static particles
    pub fn position_or(&self, fallback: f32) -> f32 {
        self.motion.map_or(fallback, |motion| motion.position)
    }

    /// Advance the motion component, if any
    pub fn update_position(&mut self, clock: &FrameClock) {
        if let Some(motion) = self.motion.as_mut() {
            motion.advance(clock.delta_seconds());
        }
    }

    /// Rendered color at the current frame.
    ///
    /// During ignition a white flash ramps up on top of the base color;
    /// afterwards the base color is dimmed by [`Lifetime::fadeout_amount`].
    pub fn color(&self, clock: &FrameClock) -> Rgb {
        let age = self.age(clock);
        let base = self.shade.base_color();

        if let Some(progress) = self.lifetime.ignition_progress(age) {
            let flash = fade_to_black_by(WHITE, 255 - unit_to_u8(progress));
            return add_colors(flash, base);
        }

        fade_to_black_by(base, unit_to_u8(self.lifetime.fadeout_amount(age)))
    }
}

impl Lifespan for Particle {
    fn birth(&self) -> Instant {
        self.birth
    }

    fn total_lifetime(&self) -> f32 {
        self.lifetime.total()
    }
}
