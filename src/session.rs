//! Frame driver
//!
//! Feeds wall-clock frame deltas into the simulation: clamps each delta,
//! keeps the session clock, and samples controls once per frame.

use crate::error::Result;
use crate::sim::{ControlInput, GameState, tick};

/// Anything that can answer "which controls are held this frame"
pub trait ControlSource {
    fn poll(&mut self, state: &GameState) -> ControlInput;
}

/// A fixed set of held controls
impl ControlSource for ControlInput {
    fn poll(&mut self, _state: &GameState) -> ControlInput {
        *self
    }
}

/// A running game plus its session clock
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    /// Seconds of simulated time since the session started
    elapsed: f32,
    frames: u64,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Session time reached by the last frame
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame of `raw_delta` wall-clock seconds.
    ///
    /// Long frames are clamped to the tuning's max delta and negative ones to
    /// zero, so the session clock can fall behind wall-clock time.
    pub fn frame<C: ControlSource + ?Sized>(&mut self, raw_delta: f32, controls: &mut C) -> Result<()> {
        let max = self.state.tuning.max_frame_delta;
        let delta = if raw_delta.is_nan() {
            0.0
        } else {
            raw_delta.clamp(0.0, max)
        };
        if raw_delta > max {
            log::warn!("Frame delta {raw_delta:.3}s clamped to {max:.3}s");
        }

        self.elapsed += delta;
        self.frames += 1;

        let input = controls.poll(&self.state);
        tick(&mut self.state, &input, delta, self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::Maze;

    fn session() -> Session {
        Session::new(GameState::new(Maze::reference().unwrap(), Tuning::default(), 3))
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut session = session();
        let mut idle = ControlInput::default();
        session.frame(0.5, &mut idle).unwrap();
        assert!((session.elapsed() - 1.0 / 30.0).abs() < 1e-6);
        session.frame(-1.0, &mut idle).unwrap();
        assert!((session.elapsed() - 1.0 / 30.0).abs() < 1e-6);
        session.frame(0.01, &mut idle).unwrap();
        assert!((session.elapsed() - (1.0 / 30.0 + 0.01)).abs() < 1e-6);
        assert_eq!(session.frames(), 3);
    }

    #[test]
    fn test_first_frame_spawns_an_adversary() {
        let mut session = session();
        session.frame(1.0 / 60.0, &mut ControlInput::default()).unwrap();
        assert_eq!(session.state.adversaries.len(), 1);
    }

    struct Scripted {
        polls: u32,
    }

    impl ControlSource for Scripted {
        fn poll(&mut self, _state: &GameState) -> ControlInput {
            self.polls += 1;
            ControlInput {
                forward: true,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_controls_polled_once_per_frame() {
        let mut session = session();
        let mut source = Scripted { polls: 0 };
        for _ in 0..30 {
            session.frame(1.0 / 60.0, &mut source).unwrap();
        }
        assert_eq!(source.polls, 30);
        // Walked left from the spawn: 30 frames at 2 units/s
        let pos = session.state.player.body.pos;
        assert!((pos.x - 12.0).abs() < 1e-3);
        assert_eq!(pos.y, -23.0);
    }
}
