//! Menu layout and click handling
//!
//! Buttons are laid out in board coordinates. A click is routed to whichever
//! menu is visible; clicks that land on no button are ignored.

use serde::{Deserialize, Serialize};

use super::state::{Difficulty, GameState, MetaState};

/// Axis-aligned button hit box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Rect {
    pub const fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Which overlay is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Menu {
    Start,
    Pause,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Easy,
    Medium,
    Hard,
    Resume,
    Quit,
    PlayAgain,
}

impl Button {
    pub fn rect(self) -> Rect {
        match self {
            Button::Easy => Rect::new(250.0, 350.0, 340.0, 400.0),
            Button::Medium => Rect::new(350.0, 450.0, 340.0, 400.0),
            Button::Hard => Rect::new(450.0, 550.0, 340.0, 400.0),
            Button::Resume => Rect::new(325.0, 475.0, 260.0, 310.0),
            Button::Quit | Button::PlayAgain => Rect::new(325.0, 475.0, 330.0, 380.0),
        }
    }

    /// Difficulty picked by a start-menu button
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Button::Easy => Some(Difficulty::Easy),
            Button::Medium => Some(Difficulty::Medium),
            Button::Hard => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl Menu {
    /// Buttons in hit-test order
    pub fn buttons(self) -> &'static [Button] {
        match self {
            Menu::Start => &[Button::Easy, Button::Medium, Button::Hard],
            Menu::Pause => &[Button::Resume, Button::Quit],
            Menu::End => &[Button::PlayAgain],
        }
    }

    pub fn button_at(self, x: f32, y: f32) -> Option<Button> {
        self.buttons()
            .iter()
            .copied()
            .find(|b| b.rect().contains(x, y))
    }
}

/// The visible menu, if any
pub fn active_menu(meta: &MetaState) -> Option<Menu> {
    if meta.show_start() {
        Some(Menu::Start)
    } else if meta.show_end() {
        Some(Menu::End)
    } else if meta.show_pause() {
        Some(Menu::Pause)
    } else {
        None
    }
}

/// Seed derived from where the player clicked to start
pub fn click_seed(x: f32, y: f32) -> u32 {
    let x = x.round().max(0.0) as u32;
    let y = y.round().max(0.0) as u32;
    x.wrapping_mul(1000).wrapping_add(y)
}

/// Route a pointer click at board coordinates `(x, y)`
pub fn handle_click(state: GameState, x: f32, y: f32) -> GameState {
    let Some(button) = active_menu(&state.meta).and_then(|menu| menu.button_at(x, y)) else {
        return state;
    };

    match button {
        Button::Easy | Button::Medium | Button::Hard => {
            let difficulty = button.difficulty().unwrap_or_default();
            let rand_seed = click_seed(x, y);
            log::info!("Game started on {:?} (seed {})", difficulty, rand_seed);
            state.with_meta(MetaState {
                difficulty,
                has_started: true,
                is_paused: false,
                rand_seed,
                ..state.meta
            })
        }
        Button::Resume => {
            log::info!("Resumed");
            state.with_meta(MetaState {
                is_paused: false,
                ..state.meta
            })
        }
        Button::Quit | Button::PlayAgain => {
            log::info!("Reset to start menu");
            GameState::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Score;

    fn playing() -> GameState {
        handle_click(GameState::new(), 300.0, 370.0)
    }

    #[test]
    fn test_start_click_starts_game() {
        let state = playing();
        assert!(state.meta.has_started);
        assert!(!state.meta.is_paused);
        assert_eq!(state.meta.difficulty, Difficulty::Easy);
        assert_eq!(state.meta.rand_seed, 300_370);
    }

    #[test]
    fn test_each_difficulty_button() {
        let state = handle_click(GameState::new(), 400.0, 350.0);
        assert_eq!(state.meta.difficulty, Difficulty::Medium);
        let state = handle_click(GameState::new(), 549.6, 399.0);
        assert_eq!(state.meta.difficulty, Difficulty::Hard);
        assert_eq!(state.meta.rand_seed, 550_399);
    }

    #[test]
    fn test_missed_click_is_noop() {
        let state = GameState::new();
        assert_eq!(handle_click(state, 10.0, 10.0), state);
        assert_eq!(handle_click(state, 300.0, 420.0), state);
    }

    #[test]
    fn test_click_while_playing_is_noop() {
        let state = playing();
        assert_eq!(active_menu(&state.meta), None);
        assert_eq!(handle_click(state, 400.0, 285.0), state);
        assert_eq!(handle_click(state, 300.0, 370.0), state);
    }

    #[test]
    fn test_pause_menu_resume_and_quit() {
        let mut paused = playing();
        paused.meta.is_paused = true;
        paused.score = Score { player: 2, ai: 1 };
        assert_eq!(active_menu(&paused.meta), Some(Menu::Pause));

        let resumed = handle_click(paused, 400.0, 285.0);
        assert!(!resumed.meta.is_paused);
        assert_eq!(resumed.score, paused.score);

        let quit = handle_click(paused, 400.0, 355.0);
        assert_eq!(quit, GameState::new());
    }

    #[test]
    fn test_end_menu_play_again() {
        let mut ended = playing();
        ended.meta.is_paused = true;
        ended.meta.has_ended = true;
        ended.score = Score { player: 7, ai: 3 };
        assert_eq!(active_menu(&ended.meta), Some(Menu::End));

        // Resume is not on the end menu
        assert_eq!(handle_click(ended, 400.0, 285.0), ended);
        assert_eq!(handle_click(ended, 400.0, 355.0), GameState::new());
    }
}
