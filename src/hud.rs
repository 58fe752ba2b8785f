//! Text HUD
//!
//! A one-line summary of a snapshot, for logs and terminals.

use crate::sim::{GameState, Menu, PowerUpKind, SideState, active_menu};

fn power_ups(side: &SideState) -> String {
    let held = match side.held {
        PowerUpKind::None => "-".to_string(),
        kind => format!("{:?}", kind),
    };
    match side.active {
        Some(active) => format!("{} [{:?} {}]", held, active.kind, active.ticks_remaining),
        None => held,
    }
}

/// e.g. `t=1200 You 3 - 2 AI | you: Speed | ai: - [Expand 140]`
pub fn status_line(state: &GameState) -> String {
    let mut line = format!(
        "t={} You {} - {} AI | you: {} | ai: {}",
        state.time_ticks,
        state.score.player,
        state.score.ai,
        power_ups(&state.player),
        power_ups(&state.ai),
    );
    if state.pickup.is_active {
        line.push_str(" | pickup up");
    }
    match active_menu(&state.meta) {
        Some(Menu::Start) => line.push_str(" | start menu"),
        Some(Menu::Pause) => line.push_str(" | paused"),
        Some(Menu::End) => line.push_str(" | game over"),
        None => {}
    }
    line
}
