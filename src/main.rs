//! Power Pong entry point
//!
//! Runs a headless session against the scripted player and prints the final
//! state as JSON. Usage: `power-pong [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use power_pong::Settings;
    use power_pong::hud::status_line;
    use power_pong::platform::{Autoplay, Session};

    env_logger::init();
    log::info!("Power Pong (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    log::info!("{:?}", settings);

    let bot = Autoplay::new(settings.autoplay_seed, settings.difficulty);
    let mut session = Session::new(bot, settings.tick_dt());

    let mut last = Instant::now();
    while session.ticks() < settings.max_ticks && !session.is_finished() {
        let before = session.ticks();
        if settings.realtime {
            std::thread::sleep(Duration::from_secs_f32(settings.tick_dt()));
            let now = Instant::now();
            session.advance(now.duration_since(last).as_secs_f32());
            last = now;
        } else {
            session.step();
        }

        let every = settings.status_every;
        if every > 0 && session.ticks() / every > before / every {
            log::info!("{}", status_line(session.state()));
        }
    }

    log::info!("Finished after {} ticks: {}", session.ticks(), status_line(session.state()));
    match serde_json::to_string_pretty(session.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
