//! Collision between actors and the maze grid
//!
//! Wall collision is a point-probe approximation: one probe per cardinal
//! direction at the body's radius, each snapped to its nearest cell. Bodies
//! can tunnel through walls if they move close to a full cell per tick, which
//! bounded speeds and the clamped frame delta keep from happening.

use glam::Vec2;

use super::actor::Body;
use super::maze::{Bounds, Maze};
use crate::cell_of;

/// Which faces a body was pushed back from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallContact {
    pub fn hit(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Push a body out of any wall its edge probes land in.
///
/// Each axis is corrected independently, so a body wedged into a corner is
/// corrected on both axes in the same call. The correction puts the body's
/// edge flush with the wall face (cell boundary +/- radius).
pub fn resolve_wall_collision(body: &mut Body, maze: &Maze) -> WallContact {
    let r = body.radius;
    let left = cell_of(body.pos + Vec2::NEG_X * r);
    let right = cell_of(body.pos + Vec2::X * r);
    let top = cell_of(body.pos + Vec2::Y * r);
    let bottom = cell_of(body.pos + Vec2::NEG_Y * r);

    let mut contact = WallContact::default();

    if maze.is_wall_cell(left) {
        body.pos.x = left.x as f32 + 0.5 + r;
        contact.left = true;
    }
    if maze.is_wall_cell(right) {
        body.pos.x = right.x as f32 - 0.5 - r;
        contact.right = true;
    }
    if maze.is_wall_cell(top) {
        body.pos.y = top.y as f32 - 0.5 - r;
        contact.top = true;
    }
    if maze.is_wall_cell(bottom) {
        body.pos.y = bottom.y as f32 + 0.5 + r;
        contact.bottom = true;
    }

    contact
}

/// Euclidean distance between two bodies' centers
#[inline]
pub fn distance_between(a: &Body, b: &Body) -> f32 {
    a.pos.distance(b.pos)
}

/// Capture test: centers closer than the sum of both radii
#[inline]
pub fn bodies_touch(a: &Body, b: &Body) -> bool {
    distance_between(a, b) < a.radius + b.radius
}

/// Teleport a body that left the grid to the opposite edge.
///
/// Horizontal and vertical axes wrap independently. Returns true if the body moved.
pub fn wrap_position(body: &mut Body, bounds: &Bounds) -> bool {
    let before = body.pos;
    let (left, right) = (bounds.left as f32, bounds.right as f32);
    let (top, bottom) = (bounds.top as f32, bounds.bottom as f32);

    if body.pos.x < left {
        body.pos.x = right;
    } else if body.pos.x > right {
        body.pos.x = left;
    }

    if body.pos.y > top {
        body.pos.y = bottom;
    } else if body.pos.y < bottom {
        body.pos.y = top;
    }

    body.pos != before
}
