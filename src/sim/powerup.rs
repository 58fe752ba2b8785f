//! Power-up lifecycle: spawn, pickup, activation, effects, expiry
//!
//! Per side: nothing held → held(kind) → active(kind, ticks) → nothing.
//! Both sides run independently and may have effects active at once.

use super::collision::{BallKind, ball_touches_paddle, next_ball_velocity};
use super::rng::{Draw, bernoulli, next_uniform};
use super::state::{ActivePowerUp, GameState, MetaState, Pickup, PowerUpKind, Side, SideState};
use crate::consts::*;

/// Apply `side`'s running effect for this tick.
///
/// Sustained effects (Speed, Expand) hold while more than one tick remains
/// and revert on the last; one-shot effects (FastBall, Return) fire on the
/// first tick only.
pub fn apply_effect(side: Side, state: GameState) -> GameState {
    let Some(active) = state.side(side).active else {
        return state;
    };
    let sustained = active.ticks_remaining > 1;
    let paddle = state.side(side).paddle;

    match active.kind {
        PowerUpKind::None => state,
        PowerUpKind::Speed => {
            let speed = if sustained {
                BOOSTED_PADDLE_SPEED
            } else {
                side.base_speed()
            };
            state.with_paddle(side, paddle.with_speed(speed))
        }
        PowerUpKind::Expand => {
            let size = if sustained { EXPANDED_PADDLE_SIZE } else { 1.0 };
            state.with_paddle(side, paddle.with_size(size))
        }
        PowerUpKind::FastBall if active.is_first_tick() => {
            let ball = state.ball;
            state.with_ball(ball.with_velocity(ball.velocity.scaled(FAST_BALL_FACTOR)))
        }
        PowerUpKind::Return if active.is_first_tick() => {
            let ball = state.ball;
            state.with_ball(ball.with_velocity(ball.velocity.reflect_x()))
        }
        PowerUpKind::FastBall | PowerUpKind::Return => state,
    }
}

/// Effects for both sides, player first
pub fn apply_effects(state: GameState) -> GameState {
    Side::BOTH
        .into_iter()
        .fold(state, |state, side| apply_effect(side, state))
}

/// One tick off every running effect; finished effects are dropped
pub fn count_down(state: GameState) -> GameState {
    Side::BOTH.into_iter().fold(state, |state, side| {
        let current = *state.side(side);
        let active = current.active.and_then(|a| {
            let ticks_remaining = a.ticks_remaining.saturating_sub(1);
            (ticks_remaining > 0).then_some(ActivePowerUp {
                ticks_remaining,
                ..a
            })
        });
        state.with_side(side, SideState { active, ..current })
    })
}

/// Turn a held power-up into a running one. No-op when nothing is held or an
/// effect is still running.
pub fn activate(side: Side, state: GameState) -> GameState {
    let current = *state.side(side);
    if current.held.is_none() || current.active.is_some() {
        return state;
    }
    log::debug!("{:?} activates {:?}", side, current.held);
    state.with_side(
        side,
        SideState {
            held: PowerUpKind::None,
            active: Some(ActivePowerUp::start(current.held)),
            ..current
        },
    )
}

/// Player fires on intent, AI on a small random chance
pub fn check_activation(state: GameState) -> GameState {
    let state = if state.meta.power_up_intent && !state.player.held.is_none() {
        let activated = activate(Side::Player, state);
        if activated.player.active != state.player.active {
            // Intent is consumed by a successful activation
            activated.with_meta(MetaState {
                power_up_intent: false,
                ..activated.meta
            })
        } else {
            activated
        }
    } else {
        state
    };

    let seed = Draw::AiActivation.seed(state.meta.rand_seed);
    if bernoulli(seed, AI_ACTIVATION_CHANCE) {
        activate(Side::Ai, state)
    } else {
        state
    }
}

/// Remember who touched the main ball last
pub fn record_last_hit(state: GameState) -> GameState {
    let hit = [Side::Ai, Side::Player]
        .into_iter()
        .find(|&side| ball_touches_paddle(side, &state));
    match hit {
        Some(side) => state.with_meta(MetaState {
            last_hit: Some(side),
            ..state.meta
        }),
        None => state,
    }
}

/// Uniform pick among the grantable kinds
pub fn random_kind(seed: u32) -> PowerUpKind {
    let kinds = PowerUpKind::GRANTABLE;
    let index = (next_uniform(seed) * kinds.len() as f64) as usize;
    kinds[index.min(kinds.len() - 1)]
}

/// Main ball runs into the active pickup: it disappears, and the side that
/// last hit the ball receives a power-up if its hands are empty
pub fn resolve_pickup_collision(state: GameState) -> GameState {
    if !state.pickup.is_active || !state.ball.overlaps(&state.pickup.ball) {
        return state;
    }
    let state = GameState {
        pickup: Pickup {
            is_active: false,
            ..state.pickup
        },
        ..state
    };
    let Some(side) = state.meta.last_hit else {
        return state;
    };
    let current = *state.side(side);
    if !current.held.is_none() {
        return state;
    }
    let kind = random_kind(Draw::PickupKind.seed(state.meta.rand_seed));
    log::debug!("{:?} collects {:?}", side, kind);
    state.with_side(side, SideState { held: kind, ..current })
}

/// Low-probability chance each tick for the pickup to appear
pub fn maybe_spawn_pickup(state: GameState) -> GameState {
    if state.pickup.is_active {
        return state;
    }
    let seed = Draw::PickupSpawn.seed(state.meta.rand_seed);
    if !bernoulli(seed, PICKUP_SPAWN_CHANCE) {
        return state;
    }
    GameState {
        pickup: Pickup {
            is_active: true,
            ..state.pickup
        },
        ..state
    }
}

/// Bounce the pickup around its box (whether or not it is visible)
pub fn advance_pickup(state: GameState) -> GameState {
    let velocity = next_ball_velocity(BallKind::Pickup, &state);
    GameState {
        pickup: Pickup {
            ball: state.pickup.ball.with_velocity(velocity).advanced(1.0),
            ..state.pickup
        },
        ..state
    }
}
