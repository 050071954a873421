//! Fixed timestep game tick
//!
//! One call advances the whole world by one frame. The ordering is
//! load-bearing: jump handling, then player integration, then the collision
//! pass with its single reaction, then every hazard's own machine, then the
//! camera. All state mutation for a tick completes before the next tick's
//! input is sampled.

use crate::consts::MAX_JUMPS;

use super::camera::Camera;
use super::collision;
use super::object::{WorldObject, solid_bodies};
use super::player::Player;

/// Input commands for a single tick
///
/// `jump` is an edge (key went down this tick), not a held state; movement
/// keys are level-sampled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub quit: bool,
}

/// How a tick left the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Quit was requested; the host should terminate
    Quit,
    /// Health reached zero; the host should terminate
    Died,
}

/// Complete world state advanced by [`tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub objects: Vec<WorldObject>,
    pub camera: Camera,
    /// Ticks simulated since the level started
    pub time_ticks: u64,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.quit {
        return TickOutcome::Quit;
    }

    if input.jump && state.player.jump_count < MAX_JUMPS {
        state.player.jump();
    }

    state.player.advance();
    collision::handle_move(&mut state.player, &mut state.objects, input);

    // Solids cannot move mid-update, so one snapshot serves every trap
    let solids = solid_bodies(&state.objects);
    for obj in &mut state.objects {
        obj.update(&mut state.player, &solids);
    }

    state.camera.follow(&state.player);
    state.time_ticks += 1;

    if state.player.health == 0 {
        log::info!("player died on tick {}", state.time_ticks);
        return TickOutcome::Died;
    }
    TickOutcome::Continue
}
