//! Remote effect construction
//!
//! A request is a small JSON object whose `name` selects a registered
//! constructor. Every other field is an optional parameter of that effect.
//!
//! ```text
//! {"name":"StarryNightEffect","starType":"QuietStar","palette":"Blue","channel":1}
//! ```

mod builtin;
mod error;
mod request;

use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

pub use error::{CreateError, FactoryError};
pub use request::{ChannelTarget, EffectRequest};

use crate::effect::Effect;

/// Builds an effect from the request fields it understands
pub type EffectConstructor = fn(&EffectRequest<'_>) -> Result<Box<dyn Effect>, FactoryError>;

/// A freshly built effect and the channel it should be installed on
pub struct CreatedEffect {
    pub target: ChannelTarget,
    pub effect: Box<dyn Effect>,
}

/// Name-indexed registry of effect constructors.
///
/// Also remembers the text of the most recent failure so it can be shown
/// to whoever sent the request.
pub struct EffectFactory {
    registry: Vec<(&'static str, EffectConstructor)>,
    last_error: String,
}

impl Default for EffectFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectFactory {
    /// Factory with every built-in effect registered
    pub fn new() -> Self {
        let mut factory = Self::empty();
        for (name, constructor) in builtin::BUILTIN_EFFECTS {
            factory.register(name, constructor);
        }
        factory
    }

    /// Factory that knows no effects
    pub const fn empty() -> Self {
        Self {
            registry: Vec::new(),
            last_error: String::new(),
        }
    }

    /// Register a constructor, replacing any previous one with the same name
    pub fn register(&mut self, name: &'static str, constructor: EffectConstructor) {
        match self.registry.iter_mut().find(|(known, _)| *known == name) {
            Some(entry) => entry.1 = constructor,
            None => self.registry.push((name, constructor)),
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.iter().map(|(name, _)| *name)
    }

    /// Text of the most recent failure, empty after a success
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Build the effect described by a JSON request payload
    pub fn create_effect(&mut self, payload: &[u8]) -> Result<CreatedEffect, CreateError> {
        let result = self.build(payload);
        match &result {
            Ok(created) => {
                self.last_error.clear();
                log::info!(
                    "effects: created '{}' for {:?}",
                    created.effect.friendly_name(),
                    created.target
                );
            }
            Err(err) => {
                self.last_error = err.to_string();
                log::warn!("effects: request rejected: {}", err);
            }
        }
        result
    }

    fn build(&self, payload: &[u8]) -> Result<CreatedEffect, CreateError> {
        let request = match serde_json_core::from_slice::<EffectRequest<'_>>(payload) {
            Ok((request, _)) => request,
            Err(err) => {
                return Err(CreateError {
                    target: ChannelTarget::All,
                    error: FactoryError::Parse(err.to_string()),
                });
            }
        };

        let target = request.target();
        let fail = |error| CreateError { target, error };

        let name = request.name.ok_or_else(|| fail(FactoryError::MissingName))?;
        let constructor = self
            .lookup(name)
            .ok_or_else(|| fail(FactoryError::UnknownEffect(name.to_string())))?;
        let effect = constructor(&request).map_err(fail)?;

        Ok(CreatedEffect { target, effect })
    }

    fn lookup(&self, name: &str) -> Option<EffectConstructor> {
        self.registry
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, constructor)| *constructor)
    }
}
