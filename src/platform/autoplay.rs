//! Scripted player for headless runs
//!
//! Plays like a distracted human: it starts the game, follows the ball after
//! a short reaction delay, tolerates a wobbly dead band around the paddle
//! centre, and now and then fires a held power-up. All of it is seeded, so a
//! run is reproducible from `Settings::autoplay_seed`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::InputSource;
use crate::sim::{Button, Difficulty, Direction, Event, GameState, Menu, active_menu};

/// Chance per decision of firing a held power-up
const FIRE_CHANCE: f64 = 0.05;

pub struct Autoplay {
    rng: Pcg32,
    difficulty: Difficulty,
    /// Ticks until the next decision
    cooldown: u32,
    direction: Direction,
}

impl Autoplay {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            cooldown: 0,
            direction: Direction::Stop,
        }
    }

    fn start_button(&self) -> Button {
        match self.difficulty {
            Difficulty::Easy => Button::Easy,
            Difficulty::Medium => Button::Medium,
            Difficulty::Hard => Button::Hard,
        }
    }

    /// Click somewhere inside `button`
    fn click(&mut self, button: Button) -> Event {
        let r = button.rect();
        Event::PointerClick {
            x: self.rng.random_range(r.x_min + 1.0..r.x_max - 1.0),
            y: self.rng.random_range(r.y_min + 1.0..r.y_max - 1.0),
        }
    }

    fn play(&mut self, state: &GameState) -> Vec<Event> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }
        self.cooldown = self.rng.random_range(2..8);

        let mut events = Vec::new();
        let paddle = &state.player.paddle;
        let slack: f32 = self.rng.random_range(4.0..24.0);
        let gap = state.ball.pos.y - paddle.center_y();
        let direction = if gap.abs() <= slack {
            Direction::Stop
        } else if gap < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        if direction != self.direction {
            self.direction = direction;
            events.push(Event::MovePaddle(direction));
        }

        let ready = !state.player.held.is_none() && state.player.active.is_none();
        if ready && !state.meta.power_up_intent && self.rng.random_bool(FIRE_CHANCE) {
            log::debug!("Autoplay fires {:?}", state.player.held);
            events.push(Event::SetPowerUpIntent(true));
        }
        events
    }
}

impl InputSource for Autoplay {
    fn poll(&mut self, state: &GameState) -> Vec<Event> {
        match active_menu(&state.meta) {
            Some(Menu::Start) => {
                self.direction = Direction::Stop;
                vec![self.click(self.start_button())]
            }
            Some(Menu::Pause) => vec![self.click(Button::Resume)],
            Some(Menu::End) => Vec::new(),
            None => self.play(state),
        }
    }
}
