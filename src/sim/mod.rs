//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Deltas and session time come from the caller
//! - Seeded RNG only
//! - Stable iteration order (adversaries in spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod maze;
pub mod navigation;
pub mod state;
pub mod tick;

pub use actor::{Actor, Adversary, AdversaryMode, Body, Player};
pub use collision::{WallContact, bodies_touch, distance_between, resolve_wall_collision, wrap_position};
pub use maze::{Bounds, CollectibleKind, Maze, REFERENCE_LEVEL, Tile};
pub use navigation::{FearChange, Turn, navigate, open_turns, update_fear};
pub use state::{GameEvent, GameMode, GameState, Notification, NotificationKind};
pub use tick::{ControlInput, tick};
