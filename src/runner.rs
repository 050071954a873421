//! Fixed-rate loop driver and collaborator seams
//!
//! Input sampling and rendering sit behind small traits so the core can run
//! headless in tests and demos; a windowed front end supplies real
//! implementations of the same seams. The clock blocks the loop thread
//! until the next tick boundary, so one iteration is one frame.

use std::time::{Duration, Instant};

use crate::consts::TICK_RATE;
use crate::sim::{GameState, TickInput, TickOutcome, tick};

/// Per-tick source of pressed keys and the quit signal
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Consumer of each finished tick's state
///
/// Implementations only ever read a tick's finalized state; they must not
/// interleave with the physics pass for that tick.
pub trait RenderSink {
    fn present(&mut self, state: &GameState);
}

/// Render sink that draws nothing
#[derive(Debug, Default)]
pub struct NullRender;

impl RenderSink for NullRender {
    fn present(&mut self, _state: &GameState) {}
}

/// Replays a fixed input script, then requests quit
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<TickInput>) -> Self {
        Self { script, cursor: 0 }
    }

    /// A short sightseeing run: walk right across the level, show off the
    /// double jump, then quit
    pub fn demo() -> Self {
        let script = (0..360)
            .map(|t| TickInput {
                move_right: true,
                jump: matches!(t, 30 | 38 | 180),
                ..Default::default()
            })
            .collect();
        Self::new(script)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self.script.get(self.cursor).copied().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        });
        self.cursor += 1;
        input
    }
}

/// Blocks the loop thread until the next tick boundary
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    deadline: Instant,
}

impl FrameClock {
    pub fn new(rate: u32) -> Self {
        let period = Duration::from_secs(1) / rate;
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }

    /// Sleep off whatever remains of the current tick
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        }
        self.deadline += self.period;
        // After a long stall, resync instead of replaying the backlog
        if self.deadline < Instant::now() {
            self.deadline = Instant::now() + self.period;
        }
    }
}

/// Drive the simulation until quit or death
pub fn run(
    state: &mut GameState,
    input: &mut dyn InputSource,
    render: &mut dyn RenderSink,
) -> TickOutcome {
    let mut clock = FrameClock::new(TICK_RATE);
    loop {
        clock.wait();
        let commands = input.poll();
        match tick(state, &commands) {
            TickOutcome::Continue => render.present(state),
            TickOutcome::Quit => return TickOutcome::Quit,
            TickOutcome::Died => {
                render.present(state);
                return TickOutcome::Died;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_quits_after_script() {
        let mut input = ScriptedInput::new(vec![TickInput::default(); 3]);
        for _ in 0..3 {
            assert!(!input.poll().quit);
        }
        assert!(input.poll().quit);
        assert!(input.poll().quit);
    }

    #[test]
    fn test_frame_clock_paces_roughly_at_rate() {
        let mut clock = FrameClock::new(240);
        let start = Instant::now();
        for _ in 0..12 {
            clock.wait();
        }
        // 12 ticks at 240 Hz is 50 ms; allow generous scheduling slack
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(40), "{elapsed:?}");
    }
}
