//! Collision detection and response
//!
//! Ball-like bodies bounce off paddles and the walls of their region. A body
//! is only reflected by a surface it is moving toward, so a ball that still
//! overlaps a surface one tick after bouncing is not sent back into it.

use glam::Vec2;

use super::state::{Ball, GameState, Side};
use super::velocity::Velocity;
use crate::consts::*;

/// Which ball-like body a rule is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Main,
    /// The AI's lookahead shadow
    Heuristic,
    Pickup,
}

impl BallKind {
    /// The body, if it exists in `state`
    pub fn body(self, state: &GameState) -> Option<Ball> {
        match self {
            BallKind::Main => Some(state.ball),
            BallKind::Heuristic => state.brain.heuristic_ball,
            BallKind::Pickup => Some(state.pickup.ball),
        }
    }

    /// Region the body bounces inside, as (min, max)
    pub fn region(self) -> (Vec2, Vec2) {
        match self {
            BallKind::Main | BallKind::Heuristic => {
                (Vec2::ZERO, Vec2::new(BOARD_WIDTH, BOARD_HEIGHT))
            }
            BallKind::Pickup => (
                Vec2::new(PICKUP_BOX_MIN_X, PICKUP_BOX_MIN_Y),
                Vec2::new(PICKUP_BOX_MAX_X, PICKUP_BOX_MAX_Y),
            ),
        }
    }
}

/// Vertical span of `side`'s paddle as (top, bottom)
pub fn paddle_contact_range(side: Side, state: &GameState) -> (f32, f32) {
    let paddle = state.paddle(side);
    (paddle.y, paddle.y + paddle.extent())
}

/// True if `ball` has crossed `side`'s goal line and overlaps the paddle
/// vertically
pub fn touches_paddle(ball: &Ball, side: Side, state: &GameState) -> bool {
    let crossed = match side {
        Side::Player => ball.pos.x - ball.radius <= side.goal_x(),
        Side::Ai => ball.pos.x + ball.radius >= side.goal_x(),
    };
    if !crossed {
        return false;
    }
    let (top, bottom) = paddle_contact_range(side, state);
    ball.pos.y + ball.radius >= top && ball.pos.y - ball.radius <= bottom
}

/// False once the main ball has conceded a point. A conceded ball runs on to
/// the wall and respawns; no paddle can return it.
pub fn ball_in_play(state: &GameState) -> bool {
    !state.meta.score_just_updated
}

/// Contact test for the main ball
pub fn ball_touches_paddle(side: Side, state: &GameState) -> bool {
    ball_in_play(state) && touches_paddle(&state.ball, side, state)
}

/// Signed offset of the ball centre from the paddle centre, in half paddle
/// heights, clamped to [-1, 1]
pub fn contact_strength(ball: &Ball, side: Side, state: &GameState) -> f32 {
    let paddle = state.paddle(side);
    let half = paddle.extent() / 2.0;
    ((ball.pos.y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// Paddle that deflects `ball` this tick, AI checked first
fn deflecting_paddle(ball: &Ball, state: &GameState) -> Option<Side> {
    let vx = ball.velocity.components().x;
    [Side::Ai, Side::Player]
        .into_iter()
        .find(|&side| touches_paddle(ball, side, state) && vx * side.toward() > 0.0)
}

/// Velocity for the body `kind` after resolving this tick's contacts.
///
/// Paddles take precedence over the side walls; side walls over the top and
/// bottom walls. Returns the current velocity when the body touches nothing,
/// and a zero velocity when the body does not exist.
pub fn next_ball_velocity(kind: BallKind, state: &GameState) -> Velocity {
    let Some(ball) = kind.body(state) else {
        return Velocity::new(0.0, 0.0);
    };
    let velocity = ball.velocity;
    let delta = velocity.components();
    let (min, max) = kind.region();
    let r = ball.radius;

    let paddles = match kind {
        BallKind::Main => ball_in_play(state),
        BallKind::Heuristic => true,
        BallKind::Pickup => false,
    };
    if paddles {
        if let Some(side) = deflecting_paddle(&ball, state) {
            return velocity.reflect_off_paddle(contact_strength(&ball, side, state), side);
        }
    }

    let side_wall = (ball.pos.x - r <= min.x && delta.x < 0.0)
        || (ball.pos.x + r >= max.x && delta.x > 0.0);
    if side_wall {
        return velocity.reflect_x();
    }

    let top_or_bottom = (ball.pos.y - r <= min.y && delta.y < 0.0)
        || (ball.pos.y + r >= max.y && delta.y > 0.0);
    if top_or_bottom {
        return velocity.reflect_y();
    }

    velocity
}

/// True when the main ball has reached a side wall without a paddle in the way
pub fn exited_board(state: &GameState) -> bool {
    let ball = &state.ball;
    let at_wall = ball.pos.x - ball.radius <= 0.0 || ball.pos.x + ball.radius >= BOARD_WIDTH;
    at_wall && !Side::BOTH.iter().any(|&side| ball_touches_paddle(side, state))
}

/// Side whose goal line the main ball's centre is past, heading in or
/// stopped, with no paddle contact. A ball already returned concedes nothing.
pub fn conceding_side(state: &GameState) -> Option<Side> {
    let x = state.ball.pos.x;
    let vx = state.ball.velocity.components().x;
    let side = if x < PLAYER_GOAL_X {
        Side::Player
    } else if x > AI_GOAL_X {
        Side::Ai
    } else {
        return None;
    };
    let returning = vx * side.toward() < 0.0;
    (!returning && !ball_touches_paddle(side, state)).then_some(side)
}
