//! Willager Arena entry point
//!
//! Runs a headless match in demo mode: the autopilot plays against the waves
//! on a fixed 16 ms manual clock until the match ends or the tick limit is hit,
//! then prints the final snapshot as JSON.
//!
//! Usage: `willager-arena [settings.json] [max_ticks]`

#[cfg(not(target_arch = "wasm32"))]
use willager_arena::Settings;
#[cfg(not(target_arch = "wasm32"))]
use willager_arena::sim::{GameLoop, GamePhase, GameState, ManualClock, StateSnapshot, TickInput};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 16.0;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Willager Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let clock = ManualClock::new(0.0);
    let mut game_loop = GameLoop::new(&clock, settings.max_frame_dt_ms);
    let mut state = GameState::new(settings);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    game_loop.start();
    let mut last_wave = state.wave_number;
    while !state.phase.is_terminal() && state.time_ticks < max_ticks {
        clock.advance(FRAME_MS);
        game_loop.advance(&mut state, &input);

        if state.wave_number != last_wave {
            last_wave = state.wave_number;
            log::debug!(
                "tick {}: wave {}, player health {}",
                state.time_ticks,
                state.wave_number,
                state.player.body.health
            );
        }
    }
    game_loop.stop();

    match state.phase {
        GamePhase::Victory => log::info!("Victory after {} ticks", state.time_ticks),
        GamePhase::GameOver => log::info!(
            "Defeated on wave {} after {} ticks",
            state.wave_number,
            state.time_ticks
        ),
        _ => log::info!("Tick limit reached on wave {}", state.wave_number),
    }

    match StateSnapshot::capture(&state).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}
