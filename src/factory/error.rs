use alloc::string::String;
use core::fmt;

use super::ChannelTarget;

/// Why a request could not be turned into an effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Payload is not a valid request object
    Parse(String),
    /// Payload has no `name`
    MissingName,
    /// No effect is registered under this name
    UnknownEffect(String),
    /// No palette is registered under this name
    UnknownPalette(String),
    /// A family member selector did not match
    UnknownVariant {
        family: &'static str,
        variant: String,
    },
    /// A built-in preset selector did not match
    UnknownPreset {
        family: &'static str,
        preset: String,
    },
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(reason) => write!(f, "Malformed effect request: {}", reason),
            Self::MissingName => write!(f, "Effect name is missing."),
            Self::UnknownEffect(name) => write!(f, "Effect {} does not exist.", name),
            Self::UnknownPalette(name) => write!(f, "Unknown palette name: {}", name),
            Self::UnknownVariant { family, variant } => {
                write!(f, "{} has no variant named {}", family, variant)
            }
            Self::UnknownPreset { family, preset } => {
                write!(f, "{} has no built-in preset named {}", family, preset)
            }
        }
    }
}

impl core::error::Error for FactoryError {}

/// A failed request together with the channel it was addressed to.
///
/// Requests that could not be parsed far enough to read `channel` are
/// addressed to every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateError {
    pub target: ChannelTarget,
    pub error: FactoryError,
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl core::error::Error for CreateError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}
