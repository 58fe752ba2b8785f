//! Platform layer
//!
//! Turns wall-clock time and input into the ordered event stream the
//! simulation consumes:
//! - Fixed-timestep ticking with a substep cap
//! - Input sources polled once per tick
//! - A session owning the only game state

pub mod autoplay;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{Event, GameState, update};

pub use autoplay::Autoplay;

/// Accumulates frame time and releases whole ticks
#[derive(Debug, Clone)]
pub struct FixedTicker {
    dt: f32,
    accumulator: f32,
    /// Ticks released so far
    count: u64,
}

impl FixedTicker {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            count: 0,
        }
    }

    /// Add `elapsed` seconds and return how many ticks are due.
    ///
    /// At most `MAX_SUBSTEPS` ticks are released per call; time beyond that
    /// is dropped so a long stall doesn't turn into a burst.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.dt && due < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.dt);
        }
        self.count += due as u64;
        due
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Something that produces player input
pub trait InputSource {
    /// Events to apply before the next tick, in order
    fn poll(&mut self, state: &GameState) -> Vec<Event>;
}

/// A game in progress: one state, one input source, one clock
pub struct Session<I: InputSource> {
    state: GameState,
    input: I,
    ticker: FixedTicker,
}

impl<I: InputSource> Session<I> {
    pub fn new(input: I, dt: f32) -> Self {
        Self {
            state: GameState::new(),
            input,
            ticker: FixedTicker::new(dt),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks issued so far
    pub fn ticks(&self) -> u64 {
        self.ticker.count()
    }

    /// Apply pending input, then one tick
    pub fn step(&mut self) -> &GameState {
        for event in self.input.poll(&self.state) {
            self.state = update(self.state, event);
        }
        self.state = update(self.state, Event::Tick(self.ticker.count));
        self.ticker.count += 1;
        &self.state
    }

    /// Feed wall-clock time; runs however many ticks are due
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let due = self.ticker.advance(elapsed);
        let first = self.ticker.count - due as u64;
        for n in 0..due as u64 {
            for event in self.input.poll(&self.state) {
                self.state = update(self.state, event);
            }
            self.state = update(self.state, Event::Tick(first + n));
        }
        due
    }

    /// Game over, and nobody is going to press Play again
    pub fn is_finished(&self) -> bool {
        self.state.meta.has_ended
    }
}
