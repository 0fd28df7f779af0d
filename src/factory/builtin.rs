//! Constructors for the effects every factory knows about.

use alloc::{boxed::Box, string::ToString};

use super::{EffectRequest, FactoryError};
use crate::{
    color::{Palette, Rgb, palette_by_name},
    effect::{
        BulgarianFlagEffect, ColorFillEffect, Effect, MarqueeEffect, PaletteEffect,
        RainbowFillEffect, RainbowStyle, SolidFillEffect, StarField, StarKind,
        StarryNightConfig, StarryNightEffect, TwinkleEffect, preset_by_key,
    },
};

type BuildResult = Result<Box<dyn Effect>, FactoryError>;

const SOLID_FILL_COLOR: Rgb = Rgb::new(255, 255, 255);
const COLOR_FILL_COLOR: Rgb = Rgb::new(246, 200, 160);
const COLOR_FILL_EVERY_NTH: u16 = 10;
const RAINBOW_SPEED_DIVISOR: f32 = 12.0;
const RAINBOW_DELTA_HUE: u8 = 14;
const DEFAULT_PALETTE: &str = "RGB";
const PALETTE_DENSITY: u8 = 16;
const PALETTE_SPEED: f32 = 32.0;
const SIMPLE_RAINBOW_SPEED: f32 = 12.0;
const TWINKLE_HOLD: f32 = 0.4;
const TWINKLE_FADE: f32 = 0.6;
const DEFAULT_STAR_KIND: StarKind = StarKind::BubblyStar;
const STAR_PROBABILITY: f32 = 1.0;
const STAR_SIZE: f32 = 1.0;
const STAR_MAX_SPEED: f32 = 100.0;

/// `buildIn` palette effects: key, palette, density and speed
const PALETTE_PRESETS: [(&str, &str, u8, f32); 3] = [
    ("Rainbow2", "rainbowPalette", PALETTE_DENSITY, PALETTE_SPEED),
    ("Rainbow", "Magenta", PALETTE_DENSITY, PALETTE_SPEED),
    ("RanbowSimple", "rainbowPalette", 16, SIMPLE_RAINBOW_SPEED),
];

/// Registry names paired with their constructors
pub(super) const BUILTIN_EFFECTS: [(&str, super::EffectConstructor); 10] = [
    ("SolidFill", solid_fill),
    ("ColorFill", color_fill),
    ("RainbowFillEffect", rainbow_fill),
    ("RainbowTwinkleEffect", rainbow_twinkle),
    ("Marquee", marquee),
    ("BulgarianFlag", bulgarian_flag),
    ("PaletteEffect", palette_effect),
    ("PaletterEffect", palette_effect),
    ("TwinkleEffect", twinkle),
    ("StarryNightEffect", starry_night),
];

fn color_or(request: &EffectRequest<'_>, default: Rgb) -> Rgb {
    Rgb::new(
        request.red.unwrap_or(default.r),
        request.green.unwrap_or(default.g),
        request.blue.unwrap_or(default.b),
    )
}

fn palette_or_default(request: &EffectRequest<'_>) -> Result<&'static Palette, FactoryError> {
    let name = request.palette.unwrap_or(DEFAULT_PALETTE);
    palette_by_name(name).ok_or_else(|| FactoryError::UnknownPalette(name.to_string()))
}

fn solid_fill(request: &EffectRequest<'_>) -> BuildResult {
    Ok(Box::new(SolidFillEffect::new(color_or(
        request,
        SOLID_FILL_COLOR,
    ))))
}

fn color_fill(request: &EffectRequest<'_>) -> BuildResult {
    let every_nth = request.every_nth.unwrap_or(COLOR_FILL_EVERY_NTH);
    Ok(Box::new(ColorFillEffect::new(
        color_or(request, COLOR_FILL_COLOR),
        usize::from(every_nth),
    )))
}

fn rainbow(request: &EffectRequest<'_>, style: RainbowStyle) -> BuildResult {
    Ok(Box::new(RainbowFillEffect::new(
        style,
        request.speed_divisor.unwrap_or(RAINBOW_SPEED_DIVISOR),
        request.delta_hue.unwrap_or(RAINBOW_DELTA_HUE),
    )))
}

fn rainbow_fill(request: &EffectRequest<'_>) -> BuildResult {
    rainbow(request, RainbowStyle::Fill)
}

fn rainbow_twinkle(request: &EffectRequest<'_>) -> BuildResult {
    rainbow(request, RainbowStyle::Twinkle)
}

fn marquee(request: &EffectRequest<'_>) -> BuildResult {
    Ok(Box::new(MarqueeEffect::new(request.mirror.unwrap_or(false))))
}

fn bulgarian_flag(request: &EffectRequest<'_>) -> BuildResult {
    Ok(Box::new(BulgarianFlagEffect::new(
        request.reverse.unwrap_or(false),
    )))
}

fn palette_effect(request: &EffectRequest<'_>) -> BuildResult {
    if let Some(key) = request.build_in {
        let (_, name, density, speed) = PALETTE_PRESETS
            .iter()
            .find(|(preset, ..)| *preset == key)
            .ok_or_else(|| FactoryError::UnknownPreset {
                family: "PaletteEffect",
                preset: key.to_string(),
            })?;
        let palette =
            palette_by_name(name).ok_or_else(|| FactoryError::UnknownPalette(name.to_string()))?;
        return Ok(Box::new(PaletteEffect::new(palette, *density, *speed)));
    }

    Ok(Box::new(PaletteEffect::new(
        palette_or_default(request)?,
        request.density.unwrap_or(PALETTE_DENSITY),
        request.speed.unwrap_or(PALETTE_SPEED),
    )))
}

fn twinkle(request: &EffectRequest<'_>) -> BuildResult {
    Ok(Box::new(TwinkleEffect::new(
        usize::from(request.count.unwrap_or(0)),
        request.hold_time.unwrap_or(TWINKLE_HOLD),
        request.fade_time.unwrap_or(TWINKLE_FADE),
    )))
}

fn starry_night(request: &EffectRequest<'_>) -> BuildResult {
    if let Some(key) = request.build_in {
        if let Some(preset) = preset_by_key(key) {
            return Ok(Box::new(StarryNightEffect::from_preset(preset)));
        }
        log::warn!("effects: no built-in star field {}, building from parameters", key);
    }

    let field = match request.star_effect {
        Some(name) => {
            StarField::parse_from_str(name).ok_or_else(|| FactoryError::UnknownVariant {
                family: "StarryNightEffect",
                variant: name.to_string(),
            })?
        }
        None => StarField::default(),
    };

    let kind = match request.star_type {
        Some(name) => {
            StarKind::parse_from_str(name).ok_or_else(|| FactoryError::UnknownVariant {
                family: "StarryNightEffect",
                variant: name.to_string(),
            })?
        }
        None => DEFAULT_STAR_KIND,
    };

    let config = StarryNightConfig {
        field,
        probability: request.probability.unwrap_or(STAR_PROBABILITY),
        star_size: request.star_size.unwrap_or(STAR_SIZE),
        max_speed: request.max_speed.unwrap_or(STAR_MAX_SPEED),
        blur_factor: request.blur_factor.unwrap_or(field.default_blur()),
        ..StarryNightConfig::new(kind, palette_or_default(request)?)
    };

    Ok(Box::new(StarryNightEffect::new(config)))
}
