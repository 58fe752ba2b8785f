//! Power Pong - a paddle duel against a predictive AI, with power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, power-ups, event reducer)
//! - `platform`: Fixed-timestep session driver and input sources
//! - `settings`: Driver settings loaded from JSON
//! - `hud`: Text summary of a snapshot

pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in board pixels, speeds in pixels per tick.
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Maximum ticks per driver frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions (y grows downward)
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const BASE_PADDLE_HEIGHT: f32 = 80.0;
    pub const PLAYER_PADDLE_X: f32 = 24.0;
    pub const AI_PADDLE_X: f32 = BOARD_WIDTH - PLAYER_PADDLE_X - PADDLE_WIDTH;

    /// Goal lines: the paddle faces. Past these the ball is in a side's paddle zone.
    pub const PLAYER_GOAL_X: f32 = PLAYER_PADDLE_X + PADDLE_WIDTH;
    pub const AI_GOAL_X: f32 = AI_PADDLE_X;

    /// Paddle speeds
    pub const PLAYER_PADDLE_SPEED: f32 = 6.0;
    pub const AI_PADDLE_SPEED: f32 = 5.0;
    pub const BOOSTED_PADDLE_SPEED: f32 = 10.0;
    pub const EXPANDED_PADDLE_SIZE: f32 = 1.6;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Paddle deflection never pushes the ball past this
    pub const BALL_MAX_SPEED: f32 = 14.0;

    /// Paddle deflection: exit angle and speed factor band
    pub const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
    pub const DEFLECT_MIN_FACTOR: f32 = 0.95;
    pub const DEFLECT_MAX_FACTOR: f32 = 1.2;

    /// Respawn band for the main ball after a point
    pub const RESPAWN_X_MIN: f32 = 300.0;
    pub const RESPAWN_X_MAX: f32 = 500.0;
    pub const RESPAWN_Y_MIN: f32 = 150.0;
    pub const RESPAWN_Y_MAX: f32 = 450.0;
    pub const RESPAWN_MAX_ANGLE: f32 = PI / 4.0;

    /// Power-up pickup box and motion
    pub const PICKUP_BOX_MIN_X: f32 = 240.0;
    pub const PICKUP_BOX_MAX_X: f32 = 560.0;
    pub const PICKUP_BOX_MIN_Y: f32 = 120.0;
    pub const PICKUP_BOX_MAX_Y: f32 = 480.0;
    pub const PICKUP_RADIUS: f32 = 12.0;
    pub const PICKUP_SPEED: f32 = 2.0;
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.003;

    /// Power-up effects
    pub const POWER_UP_DURATION: u32 = 300; // 5 seconds at 60 Hz
    pub const FAST_BALL_FACTOR: f32 = 1.5;
    pub const AI_ACTIVATION_CHANCE: f64 = 0.01;

    /// AI targeting
    pub const PREDICTION_VARIANCE: f32 = 900.0;
    pub const WANDER_VARIANCE: f32 = 2500.0;
    pub const WANDER_MEAN: f32 = (BOARD_HEIGHT - BASE_PADDLE_HEIGHT) / 2.0;
    pub const AI_WANDER_ZONE: f32 = 200.0;

    /// First side to this many points wins
    pub const WIN_SCORE: u32 = 7;

    /// Linear congruential generator (glibc constants)
    pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
    pub const LCG_INCREMENT: u64 = 12_345;
    pub const LCG_MODULUS: u64 = 1 << 31;
    /// Seed advance per simulated tick
    pub const SEED_STRIDE: u32 = 64;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
