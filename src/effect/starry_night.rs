//! Particle based star field.
//!
//! A star family crossed with a palette: the star kind decides lifetime and
//! shading, the palette decides the colors.

use alloc::{borrow::Cow, format};

use rand::Rng;

use super::{Effect, RenderContext};
use crate::{
    color::{Palette, Rgb, add_colors, fade_to_black_by, palette, rgb_from_u32},
    math8::{unit_to_u8, wrap_hue},
    particle::{Lifespan, Lifetime, Motion, Particle, ParticleSystem, Shade},
};

/// New stars per pixel per second at probability 1.0
const SPAWN_RATE_PER_PIXEL: f32 = 0.05;

/// Palette indices per second for color cycling stars
const COLOR_CYCLE_SPEED: f32 = 96.0;

const MAX_PROBABILITY: f32 = 100.0;
const MAX_STAR_SIZE: f32 = 256.0;
/// Pixels per second
const MAX_STAR_SPEED: f32 = 1000.0;

/// Trail kept by blur star fields when no blur factor is given
const BLUR_STAR_TRAIL: f32 = 0.5;

const CHRISTMAS_COLORS: [Rgb; 4] = [
    rgb_from_u32(0xEE_3327),
    rgb_from_u32(0x00_AC57),
    rgb_from_u32(0xFA_A419),
    rgb_from_u32(0x00_83CB),
];

/// Star behaviors that can be combined with any palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    Star,
    QuietStar,
    BubblyStar,
    FlashStar,
    ColorCycleStar,
    MultiColorStar,
    ChristmasLightStar,
    HotWhiteStar,
    /// Multi color star under its alternate name
    RandomPaletteColorStar,
    LongLifeSparkleStar,
}

impl StarKind {
    pub const ALL: [Self; 10] = [
        Self::Star,
        Self::QuietStar,
        Self::BubblyStar,
        Self::FlashStar,
        Self::ColorCycleStar,
        Self::MultiColorStar,
        Self::ChristmasLightStar,
        Self::HotWhiteStar,
        Self::RandomPaletteColorStar,
        Self::LongLifeSparkleStar,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Star => "Star",
            Self::QuietStar => "QuietStar",
            Self::BubblyStar => "BubblyStar",
            Self::FlashStar => "FlashStar",
            Self::ColorCycleStar => "ColorCycleStar",
            Self::MultiColorStar => "MultiColorStar",
            Self::ChristmasLightStar => "ChristmasLightStar",
            Self::HotWhiteStar => "HotWhiteStar",
            Self::RandomPaletteColorStar => "RandomPaletteColorStar",
            Self::LongLifeSparkleStar => "LongLifeSparkleStar",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn parse_from_str(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Stage durations of a star of this kind
    pub const fn lifetime(self) -> Lifetime {
        match self {
            Self::Star => Lifetime::new(0.0, 0.5, 1.0, 1.5),
            Self::QuietStar => Lifetime::new(0.0, 0.0, 2.0, 2.0),
            Self::BubblyStar => Lifetime::new(0.4, 0.0, 0.6, 1.0),
            Self::FlashStar => Lifetime::new(0.0, 0.1, 0.05, 0.25),
            Self::ColorCycleStar => Lifetime::new(0.0, 0.0, 2.0, 1.0),
            Self::MultiColorStar | Self::RandomPaletteColorStar => {
                Lifetime::new(0.0, 0.25, 1.0, 1.0)
            }
            Self::ChristmasLightStar => Lifetime::new(0.5, 0.0, 2.0, 0.5),
            Self::HotWhiteStar => Lifetime::new(0.0, 1.0, 0.5, 1.0),
            Self::LongLifeSparkleStar => Lifetime::new(0.0, 0.3, 4.0, 3.0),
        }
    }

    fn shade<R: Rng + ?Sized>(self, palette: &'static Palette, rng: &mut R) -> Shade {
        match self {
            Self::ChristmasLightStar => {
                Shade::Fixed(CHRISTMAS_COLORS[rng.random_range(0..CHRISTMAS_COLORS.len())])
            }
            _ => Shade::Palette {
                palette,
                index: rng.random(),
            },
        }
    }
}

/// Rendering style of a star field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarField {
    /// Stars are redrawn on a fresh frame
    #[default]
    StarryNight,
    /// Stars leave a fading trail behind
    BlurStar,
}

impl StarField {
    pub const ALL: [Self; 2] = [Self::StarryNight, Self::BlurStar];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StarryNight => "StarryNightEffect",
            Self::BlurStar => "BlurStarEffect",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn parse_from_str(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Blur factor used when the request does not set one
    pub const fn default_blur(self) -> f32 {
        match self {
            Self::StarryNight => 0.0,
            Self::BlurStar => BLUR_STAR_TRAIL,
        }
    }
}

/// Bring `value` into `[min, max]`, NaN becomes `min`
fn bounded(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Tunables of a star field
#[derive(Debug, Clone, Copy)]
pub struct StarryNightConfig {
    pub field: StarField,
    pub kind: StarKind,
    pub palette: &'static Palette,
    /// Spawn rate multiplier
    pub probability: f32,
    /// Star width in pixels
    pub star_size: f32,
    /// Maximum drift speed in pixels per second
    pub max_speed: f32,
    /// How much of the previous frame survives (0 = cleared, 1 = kept)
    pub blur_factor: f32,
}

impl StarryNightConfig {
    pub fn new(kind: StarKind, palette: &'static Palette) -> Self {
        Self {
            field: StarField::StarryNight,
            kind,
            palette,
            probability: 1.0,
            star_size: 1.0,
            max_speed: 0.0,
            blur_factor: 0.0,
        }
    }

    /// Same config with every tunable brought into its renderable range
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            probability: bounded(self.probability, 0.0, MAX_PROBABILITY),
            star_size: bounded(self.star_size, 1.0, MAX_STAR_SIZE),
            max_speed: bounded(self.max_speed, 0.0, MAX_STAR_SPEED),
            blur_factor: bounded(self.blur_factor, 0.0, 1.0),
            ..self
        }
    }
}

/// Built-in star field recipe selectable by name
#[derive(Debug, Clone, Copy)]
pub struct StarPreset {
    /// Friendly name of the resulting effect
    pub name: &'static str,
    /// `buildIn` values selecting this preset
    pub keys: &'static [&'static str],
    pub kind: StarKind,
    pub palette: &'static Palette,
    pub probability: f32,
    pub star_size: f32,
    pub max_speed: f32,
}

impl StarPreset {
    pub fn config(&self) -> StarryNightConfig {
        StarryNightConfig {
            field: StarField::StarryNight,
            kind: self.kind,
            palette: self.palette,
            probability: self.probability,
            star_size: self.star_size,
            max_speed: self.max_speed,
            blur_factor: 0.0,
        }
    }
}

pub static STAR_PRESETS: [StarPreset; 8] = [
    StarPreset {
        name: "Rainbow Twinkle Stars",
        keys: &["Rainbow Twinkle Stars"],
        kind: StarKind::QuietStar,
        palette: &palette::RAINBOW_COLORS,
        probability: 1.0,
        star_size: 1.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Green Twinkle Stars",
        keys: &["Green Twinkle", "Green Twinkle Stars"],
        kind: StarKind::QuietStar,
        palette: &palette::GREEN_COLORS,
        probability: 1.0,
        star_size: 1.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Blue Sparkle Stars",
        keys: &["Blue Sparkle"],
        kind: StarKind::Star,
        palette: &palette::BLUE_COLORS,
        probability: 1.0,
        star_size: 1.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Red Twinkle Stars",
        keys: &["Red Twinkle"],
        kind: StarKind::QuietStar,
        palette: &palette::RED_COLORS,
        probability: 1.0,
        star_size: 1.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Lava Stars",
        keys: &["Lava Stars"],
        kind: StarKind::HotWhiteStar,
        palette: &palette::HEAT_COLORS,
        probability: 1.0,
        star_size: 1.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Little Blooming Rainbow Stars",
        keys: &["Blooming Little Rainbow Stars", "Little Blooming Rainbow Stars"],
        kind: StarKind::BubblyStar,
        palette: &palette::RAINBOW_COLORS,
        probability: 1.0,
        star_size: 2.0,
        max_speed: 2.0,
    },
    StarPreset {
        name: "Big Blooming Rainbow Stars",
        keys: &["Blooming Rainbow Stars"],
        kind: StarKind::BubblyStar,
        palette: &palette::MAGENTA_COLORS,
        probability: 2.0,
        star_size: 6.0,
        max_speed: 1.0,
    },
    StarPreset {
        name: "Neon Bars",
        keys: &["Neon Bars"],
        kind: StarKind::BubblyStar,
        palette: &palette::MAGENTA_COLORS,
        probability: 0.5,
        star_size: 8.0,
        max_speed: 0.0,
    },
];

/// Exact, case-sensitive lookup by `buildIn` key
pub(crate) fn preset_by_key(key: &str) -> Option<&'static StarPreset> {
    STAR_PRESETS.iter().find(|preset| preset.keys.contains(&key))
}

/// Field of fading, optionally drifting stars
#[derive(Debug, Clone)]
pub struct StarryNightEffect {
    name: Cow<'static, str>,
    config: StarryNightConfig,
    stars: ParticleSystem,
    spawn_debt: f32,
}

impl StarryNightEffect {
    pub fn new(config: StarryNightConfig) -> Self {
        Self::with_name(
            Cow::Owned(format!(
                "{} {}",
                config.kind.as_str(),
                config.field.as_str()
            )),
            config,
        )
    }

    pub fn from_preset(preset: &StarPreset) -> Self {
        Self::with_name(Cow::Borrowed(preset.name), preset.config())
    }

    fn with_name(name: Cow<'static, str>, config: StarryNightConfig) -> Self {
        Self {
            name,
            config: config.sanitized(),
            stars: ParticleSystem::new(),
            spawn_debt: 0.0,
        }
    }

    pub const fn config(&self) -> &StarryNightConfig {
        &self.config
    }

    /// Live stars
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    #[allow(clippy::cast_precision_loss)]
    fn spawn_stars(&mut self, strip_len: usize, ctx: &mut RenderContext<'_>) {
        if strip_len == 0 {
            return;
        }
        let rate = self.config.probability * SPAWN_RATE_PER_PIXEL * strip_len as f32;
        self.spawn_debt += rate * ctx.clock.delta_seconds();
        if !self.spawn_debt.is_finite() {
            self.spawn_debt = 0.0;
        }

        let mut spawned = 0;
        while self.spawn_debt >= 1.0 && spawned < strip_len {
            self.spawn_debt -= 1.0;
            spawned += 1;

            let position = ctx.rng.random_range(0..strip_len) as f32;
            let shade = self.config.kind.shade(self.config.palette, ctx.rng);
            let motion = Motion::random(ctx.rng, position, self.config.max_speed);
            let star = Particle::new(ctx.clock, self.config.kind.lifetime(), shade)
                .with_motion(motion)
                .with_size(self.config.star_size);
            self.stars.spawn(star);
        }
        // Backlog beyond one strip's worth is dropped
        if self.spawn_debt >= 1.0 {
            self.spawn_debt = 0.0;
        }
    }

    fn star_color(&self, star: &Particle, ctx: &RenderContext<'_>) -> Rgb {
        if self.config.kind != StarKind::ColorCycleStar {
            return star.color(ctx.clock);
        }
        let Shade::Palette { index, .. } = star.shade else {
            return star.color(ctx.clock);
        };
        let shift = wrap_hue(star.age(ctx.clock) * COLOR_CYCLE_SPEED);
        let mut cycled = *star;
        cycled.shade = star.shade.with_index(index.wrapping_add(shift));
        cycled.color(ctx.clock)
    }
}

impl Effect for StarryNightEffect {
    fn init(&mut self, _leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
        self.stars.clear();
        self.spawn_debt = 0.0;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw(&mut self, leds: &mut [Rgb], ctx: &mut RenderContext<'_>) {
        let keep = self.config.blur_factor.clamp(0.0, 1.0);
        let dim = 255 - unit_to_u8(keep);
        for led in leds.iter_mut() {
            *led = fade_to_black_by(*led, dim);
        }

        self.spawn_stars(leds.len(), ctx);

        for star in self.stars.iter_mut() {
            star.update_position(ctx.clock);
        }
        self.stars.cull(ctx.clock, leds.len());

        let len = leds.len() as f32;
        for star in self.stars.iter() {
            let color = self.star_color(star, ctx);
            let start = libm::floorf(star.position_or(0.0));
            let width = libm::floorf(star.size).max(1.0).min(len);
            let lo = start.max(0.0);
            let hi = (start + width).min(len);
            // Also rejects NaN bounds
            if !(lo < hi) {
                continue;
            }
            for led in &mut leds[lo as usize..hi as usize] {
                *led = add_colors(*led, color);
            }
        }
    }

    fn friendly_name(&self) -> &str {
        &self.name
    }
}
