//! Headless demo entry point
//!
//! Runs a scripted autopilot session against the simulation core and logs
//! the outcome. Useful as a smoke run and a determinism sanity check;
//! rendering and real input live in host applications.

use nova_invaders::GameConfig;
use nova_invaders::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Display frame duration the demo drives at (60 Hz)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Stop after ten minutes of simulated play
const MAX_TICKS: u64 = 60 * 600;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);
    let config = GameConfig::default();
    let mut state = GameState::new(seed, &config);
    state.start_game(&config);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..MAX_TICKS {
        for event in tick(&mut state, &input, FRAME_MS, &config) {
            match event {
                GameEvent::LevelComplete { level } => {
                    log::info!("Level {} cleared, score {}", level, state.score);
                    state.advance_level(&config);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over, final score {}", score);
                }
                GameEvent::LifeLost { remaining } => {
                    log::info!("Life lost, {} remaining", remaining);
                }
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let hud = state.hud(&config);
    println!(
        "seed {:#x}: score {} at level {} ({} ticks)",
        seed, hud.score, hud.level, state.time_ticks
    );
}
