//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_float(&self) -> f32 {
        use rand::Rng;
        rand::thread_rng().gen::<f32>()
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub f32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_float(&self) -> f32 {
        self.0
    }
}
