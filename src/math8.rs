//! 8-bit fixed point helpers in the spirit of `FastLED`'s `lib8tion`.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16;
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    );
    partial = partial.wrapping_add(0x8000);

    (partial >> 16) as u8
}

/// Map a unit fraction (0.0-1.0) onto 0-255.
///
/// Values outside the unit range (and NaN) saturate.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(fraction: f32) -> u8 {
    if fraction.is_nan() || fraction <= 0.0 {
        return 0;
    }
    if fraction >= 1.0 {
        return 255;
    }
    (fraction * 255.0) as u8
}

/// Wrap a floating point hue onto the 0-255 color wheel
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wrap_hue(hue: f32) -> u8 {
    let wrapped = libm::fmodf(hue, 256.0);
    let wrapped = if wrapped < 0.0 { wrapped + 256.0 } else { wrapped };
    libm::floorf(wrapped) as u8
}
