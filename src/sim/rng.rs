//! Seeded randomness for the simulation
//!
//! A linear congruential generator with no hidden state: every function takes
//! the seed explicitly, and the caller persists it in `MetaState::rand_seed`.
//! Each logical source of randomness within a tick draws at its own fixed
//! offset from the tick seed (see [`Draw`]).

use crate::consts::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, SEED_STRIDE};

/// Call sites that draw from the tick seed, each at a fixed offset.
///
/// Offsets are two apart so a Gaussian (which consumes `seed` and `seed + 1`)
/// never shares a uniform with the next source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Error injected into the AI's predicted target
    Deviation,
    /// Idle target re-roll
    Wander,
    /// Pickup appearing this tick
    PickupSpawn,
    /// Which kind a collected pickup grants
    PickupKind,
    /// AI deciding to fire its held power-up
    AiActivation,
    RespawnX,
    RespawnY,
    RespawnAngle,
    RespawnSide,
}

impl Draw {
    pub const fn offset(self) -> u32 {
        match self {
            Draw::Deviation => 3,
            Draw::Wander => 10,
            Draw::PickupSpawn => 20,
            Draw::PickupKind => 24,
            Draw::AiActivation => 30,
            Draw::RespawnX => 40,
            Draw::RespawnY => 42,
            Draw::RespawnAngle => 44,
            Draw::RespawnSide => 46,
        }
    }

    /// Seed for this source given the current tick seed
    #[inline]
    pub fn seed(self, tick_seed: u32) -> u32 {
        tick_seed.wrapping_add(self.offset())
    }
}

/// One LCG step: `(A * seed + C) mod M`
#[inline]
pub fn next_seed(seed: u32) -> u32 {
    ((LCG_MULTIPLIER * seed as u64 + LCG_INCREMENT) % LCG_MODULUS) as u32
}

/// Uniform value in [0, 1) derived from `seed`
#[inline]
pub fn next_uniform(seed: u32) -> f64 {
    next_seed(seed) as f64 / LCG_MODULUS as f64
}

/// Uniform value in [lo, hi]
pub fn uniform_range(seed: u32, lo: f32, hi: f32) -> f32 {
    lo + (next_uniform(seed) * (hi - lo) as f64) as f32
}

/// True with probability `p`
pub fn bernoulli(seed: u32, p: f64) -> bool {
    next_uniform(seed) < p
}

/// Approximately normal deviate via Box–Muller over the uniforms at
/// `seed` and `seed + 1`.
pub fn gaussian(seed: u32, variance: f32, mean: f32) -> f32 {
    let u1 = next_uniform(seed);
    let u2 = next_uniform(seed.wrapping_add(1));
    // 1 - u1 lies in (0, 1], keeping the log finite
    let z = (-2.0 * (1.0 - u1).ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + (variance.max(0.0) as f64).sqrt() as f32 * z as f32
}

/// Seed for the next tick. Fixed stride, independent of how many draws the
/// tick consumed.
#[inline]
pub fn advance_seed(seed: u32) -> u32 {
    seed.wrapping_add(SEED_STRIDE)
}
