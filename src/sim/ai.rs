//! AI opponent: lookahead targeting and paddle steering
//!
//! When the player returns the ball, the AI launches a heuristic ball that
//! follows the same bounce rules at double speed. Where it meets the AI's goal
//! line becomes the paddle target, blurred by a Gaussian error whose spread
//! tracks the score: the AI gets sloppier while it leads and sharper while it
//! trails.

use super::collision::{BallKind, ball_touches_paddle, next_ball_velocity};
use super::rng::{Draw, gaussian};
use super::state::{AiState, Ball, GameState, Side};
use crate::consts::*;

/// Heuristic ball integrates this many velocity steps per tick
pub const LOOKAHEAD_FACTOR: f32 = 2.0;

/// Step `current` toward `target` by `speed`.
///
/// Within one `speed` of the target the paddle holds still, so it never
/// oscillates around the target.
pub fn move_paddle_toward(current: f32, target: f32, speed: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= speed {
        current
    } else {
        current + speed * gap.signum()
    }
}

/// Spread of the injected targeting error
pub fn prediction_variance(state: &GameState) -> f32 {
    let lead = (1.0 + state.score.ai as f32) / (1.0 + state.score.player as f32);
    PREDICTION_VARIANCE * lead / state.meta.difficulty.level() as f32
}

/// Zero-mean error added to the predicted target
pub fn prediction_deviation(state: &GameState) -> f32 {
    let seed = Draw::Deviation.seed(state.meta.rand_seed);
    gaussian(seed, prediction_variance(state), 0.0)
}

/// Clamp a target so the AI paddle stays on the board
pub fn clamp_target(y: f32, state: &GameState) -> f32 {
    y.clamp(0.0, state.ai.paddle.max_y())
}

/// True once the heuristic ball has reached the AI's goal line
fn has_arrived(ball: &Ball) -> bool {
    ball.pos.x + ball.radius >= AI_GOAL_X
}

/// The main ball is drifting away from the AI, close to its goal line
fn should_wander(state: &GameState) -> bool {
    let ball = &state.ball;
    state.brain.heuristic_ball.is_none()
        && ball.pos.x >= AI_GOAL_X - AI_WANDER_ZONE
        && ball.velocity.components().x < 0.0
}

/// Recompute `y_target`: from an arrived heuristic ball, or an idle re-roll
pub fn update_ai_target(state: GameState) -> GameState {
    let target = match state.brain.heuristic_ball {
        Some(h) if has_arrived(&h) => {
            let predicted = h.pos.y - state.ai.paddle.extent() / 2.0;
            let target = predicted + prediction_deviation(&state);
            log::trace!("AI predicts y={:.1}, aiming at {:.1}", predicted, target);
            target
        }
        _ if should_wander(&state) => {
            let seed = Draw::Wander.seed(state.meta.rand_seed);
            gaussian(seed, WANDER_VARIANCE, WANDER_MEAN)
        }
        _ => state.brain.y_target,
    };

    GameState {
        brain: AiState {
            y_target: clamp_target(target, &state),
            ..state.brain
        },
        ..state
    }
}

/// Spawn, advance or retire the heuristic ball
pub fn update_heuristic_ball(state: GameState) -> GameState {
    let heuristic_ball = match state.brain.heuristic_ball {
        Some(h) if has_arrived(&h) => None,
        Some(h) => {
            let velocity = next_ball_velocity(BallKind::Heuristic, &state);
            Some(h.with_velocity(velocity).advanced(LOOKAHEAD_FACTOR))
        }
        None if ball_touches_paddle(Side::Player, &state) => {
            // Shadow the ball as it leaves the player's paddle
            let velocity = next_ball_velocity(BallKind::Main, &state);
            Some(state.ball.with_velocity(velocity))
        }
        None => None,
    };

    GameState {
        brain: AiState {
            heuristic_ball,
            ..state.brain
        },
        ..state
    }
}

/// Move the AI paddle toward its target
pub fn steer_ai_paddle(state: GameState) -> GameState {
    let paddle = state.ai.paddle;
    let y = move_paddle_toward(paddle.y, state.brain.y_target, paddle.speed);
    state.with_paddle(Side::Ai, paddle.at(y))
}
