//! Tron entry point
//!
//! Headless native runner: plays one round without input and prints the
//! final frame as JSON. Usage: `tron [settings.json]`

use anyhow::Result;

use tron_core::{GameSettings, Round};

/// Ten simulated minutes at 120 Hz
const MAX_TICKS: u64 = 10 * 60 * 120;

fn main() -> Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    log::info!(
        "{} starting ({}x{}, {} players)",
        settings.title,
        settings.arena_width,
        settings.arena_height,
        settings.players.len()
    );

    let mut round = Round::new(&settings);
    let outcome = round.run_until_over(MAX_TICKS);
    if outcome.is_over() {
        log::info!("{}", round.state.result.status_message());
    } else {
        log::warn!("No crash after {} ticks", round.state.time_ticks);
    }

    println!("{}", serde_json::to_string_pretty(&round.snapshot())?);
    Ok(())
}
