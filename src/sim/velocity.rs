//! Velocity as magnitude + angle, and the reflection rules
//!
//! Wall reflections only rotate the angle, so speed is preserved bit-exactly.
//! The paddle deflection is the one place speed depends on where the ball
//! struck: off-centre hits leave steeper and faster.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::consts::*;
use crate::{normalize_angle, polar_to_cartesian};

/// A 2-D velocity in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub magnitude: f32,
    /// Radians in [-π, π); 0 points toward the AI, positive is downward
    pub angle: f32,
}

impl Velocity {
    pub fn new(magnitude: f32, angle: f32) -> Self {
        Self {
            magnitude,
            angle: normalize_angle(angle),
        }
    }

    /// Cartesian delta per tick
    #[inline]
    pub fn components(&self) -> Vec2 {
        polar_to_cartesian(self.magnitude, self.angle)
    }

    /// Bounce off a vertical surface (negates the x component)
    pub fn reflect_x(self) -> Self {
        Self::new(self.magnitude, std::f32::consts::PI - self.angle)
    }

    /// Bounce off a horizontal surface (negates the y component)
    pub fn reflect_y(self) -> Self {
        Self::new(self.magnitude, -self.angle)
    }

    /// Same heading, speed multiplied by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            angle: self.angle,
        }
    }

    /// Bounce off `side`'s paddle with a signed contact offset in [-1, 1]
    /// (negative = above centre).
    ///
    /// The exit angle is `strength * MAX_BOUNCE_ANGLE` measured from the
    /// horizontal, heading away from the paddle. Speed is scaled by
    /// [`deflection_factor`].
    pub fn reflect_off_paddle(self, strength: f32, side: Side) -> Self {
        let strength = strength.clamp(-1.0, 1.0);
        let exit = strength * MAX_BOUNCE_ANGLE;
        let angle = match side {
            Side::Player => exit,
            Side::Ai => std::f32::consts::PI - exit,
        };
        Self::new(
            self.magnitude * deflection_factor(self.magnitude, strength),
            angle,
        )
    }
}

/// Speed multiplier for a paddle hit
///
/// Grows linearly with `|strength|` across
/// `[DEFLECT_MIN_FACTOR, DEFLECT_MAX_FACTOR]`, then is cut back so the exit
/// speed stays under `BALL_MAX_SPEED` where possible. The result never leaves
/// the band.
pub fn deflection_factor(speed: f32, strength: f32) -> f32 {
    let s = strength.abs().min(1.0);
    let factor = DEFLECT_MIN_FACTOR + (DEFLECT_MAX_FACTOR - DEFLECT_MIN_FACTOR) * s;
    if speed > 0.0 && speed * factor > BALL_MAX_SPEED {
        (BALL_MAX_SPEED / speed).clamp(DEFLECT_MIN_FACTOR, factor)
    } else {
        factor
    }
}
