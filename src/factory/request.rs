//! Wire shape of a "change effect" request.
//!
//! One flat struct covers every known field; each effect constructor reads
//! the fields it cares about and substitutes its defaults. Unknown fields
//! are ignored by the deserializer.

use serde::Deserialize;

/// Channel a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelTarget {
    /// Every channel
    All,
    /// A single channel by zero-based index
    Channel(usize),
}

impl ChannelTarget {
    /// Absent or negative indices address every channel
    pub fn from_raw(raw: Option<i32>) -> Self {
        match raw.map(usize::try_from) {
            Some(Ok(index)) => Self::Channel(index),
            _ => Self::All,
        }
    }

    /// Whether the channel at `index` is addressed
    pub const fn includes(self, index: usize) -> bool {
        match self {
            Self::All => true,
            Self::Channel(target) => target == index,
        }
    }
}

/// Parsed "change effect" payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectRequest<'a> {
    #[serde(borrow)]
    pub name: Option<&'a str>,
    pub channel: Option<i32>,

    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
    pub every_nth: Option<u16>,

    pub speed_divisor: Option<f32>,
    pub delta_hue: Option<u8>,
    pub mirror: Option<bool>,
    pub reverse: Option<bool>,

    #[serde(borrow)]
    pub palette: Option<&'a str>,
    pub density: Option<u8>,
    pub speed: Option<f32>,

    pub count: Option<u16>,
    pub hold_time: Option<f32>,
    pub fade_time: Option<f32>,

    #[serde(borrow)]
    pub star_effect: Option<&'a str>,
    #[serde(borrow)]
    pub star_type: Option<&'a str>,
    #[serde(borrow)]
    pub build_in: Option<&'a str>,
    pub probability: Option<f32>,
    pub star_size: Option<f32>,
    pub max_speed: Option<f32>,
    pub blur_factor: Option<f32>,
}

impl EffectRequest<'_> {
    /// Addressed channel
    pub fn target(&self) -> ChannelTarget {
        ChannelTarget::from_raw(self.channel)
    }
}
