//! Maze Chase - a grid-constrained maze chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, collisions, actors, game state)
//! - `session`: Frame driver that feeds clamped deltas and controls into `sim`
//! - `settings`: Data-driven game balance
//! - `error`: Crate error type

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::{ControlSource, Session};
pub use settings::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step accepted from the frame loop (seconds)
    pub const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;

    /// Actor defaults
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const ADVERSARY_SPEED: f32 = 1.5;
    /// Added to both speeds every time a level is cleared
    pub const SPEED_STEP: f32 = 1.0;
    pub const PLAYER_RADIUS: f32 = 0.25;
    pub const ADVERSARY_RADIUS: f32 = PLAYER_RADIUS * 1.25;
    /// Player turn rate (radians per second)
    pub const TURN_RATE: f32 = std::f32::consts::FRAC_PI_2;

    /// Timers (seconds)
    pub const FEAR_DURATION: f32 = 10.0;
    pub const WON_PAUSE: f32 = 3.0;
    pub const LOST_PAUSE: f32 = 4.0;
    pub const SPAWN_INTERVAL: f32 = 8.0;
    pub const NOTIFICATION_DURATION: f32 = 3.0;

    pub const MAX_ADVERSARIES: usize = 4;
    pub const STARTING_LIVES: u32 = 3;

    /// Score values
    pub const DOT_SCORE: u64 = 10;
    pub const PELLET_SCORE: u64 = 50;
    pub const ADVERSARY_SCORE: u64 = 200;
}

/// Grid cell nearest to a continuous position.
///
/// Rounds half up on both axes, so every lookup, wall probe and
/// cell-crossing check agrees on which cell a point belongs to.
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    (pos + Vec2::splat(0.5)).floor().as_ivec2()
}

/// Continuous position of a cell's center
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2()
}

/// Rotate a horizontal direction about the vertical axis (counterclockwise for positive angles)
#[inline]
pub fn rotate_about_vertical(dir: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(dir).normalize_or(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_of_rounds_half_up() {
        assert_eq!(cell_of(Vec2::new(0.5, -0.5)), IVec2::new(1, 0));
        assert_eq!(cell_of(Vec2::new(0.49, -0.51)), IVec2::new(0, -1));
        assert_eq!(cell_of(Vec2::new(-0.5, 2.5)), IVec2::new(0, 3));
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let left = rotate_about_vertical(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((left - Vec2::Y).length() < 1e-6);
        let right = rotate_about_vertical(Vec2::X, -std::f32::consts::FRAC_PI_2);
        assert!((right + Vec2::Y).length() < 1e-6);
    }
}
