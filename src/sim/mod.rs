//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded LCG only, one offset per draw site
//! - Every step maps a state value to a new state value
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod menu;
pub mod powerup;
pub mod rng;
pub mod state;
pub mod tick;
pub mod velocity;

pub use collision::BallKind;
pub use menu::{Button, Menu, active_menu};
pub use state::{
    ActivePowerUp, AiState, Ball, Difficulty, Direction, GameState, MetaState, Paddle, Pickup,
    PowerUpKind, Score, Side, SideState,
};
pub use tick::{Event, update};
pub use velocity::Velocity;
