//! Game state and core simulation types
//!
//! Every record here is a plain value. Simulation steps take a state and
//! return the next one; nothing is mutated behind the reducer's back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::velocity::Velocity;
use crate::consts::*;

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, left edge
    Player,
    /// Computer opponent, right edge
    Ai,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Ai];

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Fixed x of the paddle's left edge
    pub fn paddle_x(self) -> f32 {
        match self {
            Side::Player => PLAYER_PADDLE_X,
            Side::Ai => AI_PADDLE_X,
        }
    }

    /// x of the paddle face the ball strikes
    pub fn goal_x(self) -> f32 {
        match self {
            Side::Player => PLAYER_GOAL_X,
            Side::Ai => AI_GOAL_X,
        }
    }

    /// Paddle speed with no power-up running
    pub fn base_speed(self) -> f32 {
        match self {
            Side::Player => PLAYER_PADDLE_SPEED,
            Side::Ai => AI_PADDLE_SPEED,
        }
    }

    /// Sign of x velocity pointing toward this side's paddle
    pub fn toward(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Ai => 1.0,
        }
    }
}

/// Paddle movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Stop,
    Down,
}

impl Direction {
    pub fn from_sign(sign: i8) -> Self {
        match sign.signum() {
            -1 => Direction::Up,
            1 => Direction::Down,
            _ => Direction::Stop,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Stop => 0.0,
            Direction::Down => 1.0,
        }
    }
}

/// A paddle. `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Height multiplier, >= 1
    pub size: f32,
    pub direction: Direction,
}

impl Paddle {
    /// Vertically centred paddle for `side`
    pub fn new(side: Side) -> Self {
        Self {
            x: side.paddle_x(),
            y: (BOARD_HEIGHT - BASE_PADDLE_HEIGHT) / 2.0,
            speed: side.base_speed(),
            size: 1.0,
            direction: Direction::Stop,
        }
    }

    /// Height in pixels
    #[inline]
    pub fn extent(&self) -> f32 {
        self.size * BASE_PADDLE_HEIGHT
    }

    /// Largest legal `y` for this paddle
    #[inline]
    pub fn max_y(&self) -> f32 {
        (BOARD_HEIGHT - self.extent()).max(0.0)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.extent() / 2.0
    }

    /// Copy with `y` clamped to the board
    pub fn at(self, y: f32) -> Self {
        Self {
            y: y.clamp(0.0, self.max_y()),
            ..self
        }
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }

    pub fn with_speed(self, speed: f32) -> Self {
        Self { speed, ..self }
    }

    /// Copy with a new size, re-clamped so the taller paddle stays on board
    pub fn with_size(self, size: f32) -> Self {
        let resized = Self {
            size: size.max(1.0),
            ..self
        };
        resized.at(resized.y)
    }
}

/// A ball-like body: the main ball, the AI's heuristic ball, or the pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub velocity: Velocity,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, velocity: Velocity) -> Self {
        Self {
            pos,
            radius,
            velocity,
        }
    }

    pub fn with_velocity(self, velocity: Velocity) -> Self {
        Self { velocity, ..self }
    }

    /// Position after `steps` ticks at the current velocity
    pub fn advanced(self, steps: f32) -> Self {
        Self {
            pos: self.pos + self.velocity.components() * steps,
            ..self
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.pos - r, self.pos + r)
    }

    pub fn overlaps(&self, other: &Ball) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
    }
}

/// The shared power-up pickup, bouncing around its box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub ball: Ball,
    /// Visible and collectable
    pub is_active: bool,
}

impl Default for Pickup {
    fn default() -> Self {
        let center = Vec2::new(
            (PICKUP_BOX_MIN_X + PICKUP_BOX_MAX_X) / 2.0,
            (PICKUP_BOX_MIN_Y + PICKUP_BOX_MAX_Y) / 2.0,
        );
        Self {
            ball: Ball::new(
                center,
                PICKUP_RADIUS,
                Velocity::new(PICKUP_SPEED, std::f32::consts::FRAC_PI_4),
            ),
            is_active: false,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    #[default]
    None,
    /// Faster paddle
    Speed,
    /// One-shot speed boost on the ball
    FastBall,
    /// Immediately sends the ball back
    Return,
    /// Taller paddle
    Expand,
}

impl PowerUpKind {
    /// Kinds a pickup can grant
    pub const GRANTABLE: [PowerUpKind; 4] = [
        PowerUpKind::Speed,
        PowerUpKind::FastBall,
        PowerUpKind::Return,
        PowerUpKind::Expand,
    ];

    pub fn is_none(self) -> bool {
        self == PowerUpKind::None
    }
}

/// A power-up whose effect is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub ticks_remaining: u32,
}

impl ActivePowerUp {
    /// Freshly triggered, full duration
    pub fn start(kind: PowerUpKind) -> Self {
        Self {
            kind,
            ticks_remaining: POWER_UP_DURATION,
        }
    }

    /// True on the first tick of the effect
    pub fn is_first_tick(&self) -> bool {
        self.ticks_remaining == POWER_UP_DURATION
    }
}

/// Everything one side owns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideState {
    pub paddle: Paddle,
    /// Collected but not yet triggered
    pub held: PowerUpKind,
    pub active: Option<ActivePowerUp>,
}

impl SideState {
    pub fn new(side: Side) -> Self {
        Self {
            paddle: Paddle::new(side),
            held: PowerUpKind::None,
            active: None,
        }
    }

    pub fn with_paddle(self, paddle: Paddle) -> Self {
        Self { paddle, ..self }
    }
}

/// The AI's private targeting state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    /// Where the AI paddle's top edge is heading
    pub y_target: f32,
    /// Fast-forwarded shadow of the main ball, never rendered
    pub heuristic_ball: Option<Ball>,
}

impl Default for AiState {
    fn default() -> Self {
        Self {
            y_target: (BOARD_HEIGHT - BASE_PADDLE_HEIGHT) / 2.0,
            heuristic_ball: None,
        }
    }
}

/// AI skill selected on the start menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 1, 2 or 3
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Game phase flags and bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaState {
    pub difficulty: Difficulty,
    pub has_started: bool,
    pub is_paused: bool,
    pub has_ended: bool,
    pub rand_seed: u32,
    /// Side whose paddle touched the main ball most recently
    pub last_hit: Option<Side>,
    /// Player wants to fire their held power-up
    pub power_up_intent: bool,
    /// A point was counted for the current crossing
    pub score_just_updated: bool,
}

impl Default for MetaState {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            has_started: false,
            is_paused: true,
            has_ended: false,
            rand_seed: 1,
            last_hit: None,
            power_up_intent: false,
            score_just_updated: false,
        }
    }
}

impl MetaState {
    pub fn show_start(&self) -> bool {
        self.is_paused && !self.has_started
    }

    pub fn show_pause(&self) -> bool {
        self.is_paused && self.has_started && !self.has_ended
    }

    pub fn show_end(&self) -> bool {
        self.is_paused && self.has_ended
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// One more point for `side`
    pub fn credited(self, side: Side) -> Self {
        match side {
            Side::Player => Self {
                player: self.player + 1,
                ..self
            },
            Side::Ai => Self {
                ai: self.ai + 1,
                ..self
            },
        }
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.ai >= win_score {
            Some(Side::Ai)
        } else {
            None
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: SideState,
    pub ai: SideState,
    pub brain: AiState,
    /// Main ball
    pub ball: Ball,
    pub pickup: Pickup,
    pub score: Score,
    pub meta: MetaState,
    /// Simulated (unpaused) ticks since reset
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial state: start menu showing, nothing moving
    pub fn new() -> Self {
        Self {
            player: SideState::new(Side::Player),
            ai: SideState::new(Side::Ai),
            brain: AiState::default(),
            ball: Ball::new(
                Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0),
                BALL_RADIUS,
                Velocity::new(BALL_START_SPEED, 0.0),
            ),
            pickup: Pickup::default(),
            score: Score::default(),
            meta: MetaState::default(),
            time_ticks: 0,
        }
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    /// Copy with `side`'s state replaced
    pub fn with_side(self, side: Side, state: SideState) -> Self {
        match side {
            Side::Player => Self {
                player: state,
                ..self
            },
            Side::Ai => Self { ai: state, ..self },
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.side(side).paddle
    }

    pub fn with_paddle(self, side: Side, paddle: Paddle) -> Self {
        let updated = self.side(side).with_paddle(paddle);
        self.with_side(side, updated)
    }

    pub fn with_ball(self, ball: Ball) -> Self {
        Self { ball, ..self }
    }

    pub fn with_meta(self, meta: MetaState) -> Self {
        Self { meta, ..self }
    }
}
