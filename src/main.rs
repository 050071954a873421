//! Blockhop demo entry point
//!
//! Window setup, input devices and rendering belong to the host
//! application; this binary wires the core to a scripted input source and a
//! null render sink and runs the level headless. Run with
//! `RUST_LOG=debug` to watch the simulation.

use std::path::Path;

use blockhop::Settings;
use blockhop::level;
use blockhop::runner::{self, NullRender, ScriptedInput};
use blockhop::sim::AssetBank;

fn main() {
    env_logger::init();
    log::info!("blockhop starting");

    let settings = Settings::load_or_default(Path::new("blockhop.json"));
    let rows = read_level_rows(Path::new(&settings.level));
    let assets = AssetBank::untextured();

    let mut state = match level::build_level(&rows, &assets, &settings) {
        Ok(state) => state,
        Err(err) => {
            log::error!("cannot start level '{}': {err}", settings.level);
            std::process::exit(1);
        }
    };

    let mut input = ScriptedInput::demo();
    let mut render = NullRender;
    let outcome = runner::run(&mut state, &mut input, &mut render);

    log::info!(
        "run ended after {} ticks: {outcome:?} (health {}, position {:.0},{:.0})",
        state.time_ticks,
        state.player.health,
        state.player.rect.left(),
        state.player.rect.top(),
    );
}

/// Read a level file into symbol rows
///
/// A missing file degrades to an empty grid; the level builder then decides
/// whether that is fatal.
fn read_level_rows(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(err) => {
            log::error!(
                "level file {} not readable ({err}), using empty grid",
                path.display()
            );
            Vec::new()
        }
    }
}
