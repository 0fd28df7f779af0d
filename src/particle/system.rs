use alloc::collections::VecDeque;

use super::{Lifespan, Particle};
use crate::clock::FrameClock;

/// Age-ordered particle storage, oldest first.
///
/// New particles are always born at the current frame start, so pushing to
/// the back keeps the sequence ordered and expiry only ever inspects the
/// front.
#[derive(Debug, Clone)]
pub struct ParticleSystem<T = Particle> {
    particles: VecDeque<T>,
}

impl<T> Default for ParticleSystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ParticleSystem<T> {
    pub const fn new() -> Self {
        Self {
            particles: VecDeque::new(),
        }
    }

    /// Add a newborn particle
    pub fn spawn(&mut self, particle: T) {
        self.particles.push_back(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Surviving particles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.particles.iter_mut()
    }
}

impl<T: Lifespan> ParticleSystem<T> {
    /// Drop expired particles from the front, then the oldest ones until at
    /// most `capacity` remain.
    ///
    /// Returns the number of particles removed.
    pub fn cull(&mut self, clock: &FrameClock, capacity: usize) -> usize {
        let before = self.particles.len();

        while self
            .particles
            .front()
            .is_some_and(|oldest| oldest.is_expired(clock))
        {
            self.particles.pop_front();
        }

        while self.particles.len() > capacity {
            self.particles.pop_front();
        }

        before - self.particles.len()
    }
}
