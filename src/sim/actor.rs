//! Actors: the player and the adversaries chasing it
//!
//! Both share a [`Body`] (position, unit direction, speed, radius). Direction
//! always stays a unit vector in the horizontal plane.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{cell_of, rotate_about_vertical};

/// Kinematic state shared by every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Unit heading
    pub dir: Vec2,
    /// Units per second
    pub speed: f32,
    /// Collision radius
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            dir: dir.normalize_or(Vec2::NEG_X),
            speed,
            radius,
        }
    }

    /// Advance along the current heading. Negative `delta` moves backward.
    /// Returns the distance covered.
    pub fn translate(&mut self, delta: f32) -> f32 {
        let step = self.speed * delta;
        self.pos += self.dir * step;
        step.abs()
    }

    /// Rotate the heading about the vertical axis (positive = left)
    pub fn rotate(&mut self, angle: f32) {
        self.dir = rotate_about_vertical(self.dir, angle);
    }

    /// Cell the body's center is in
    #[inline]
    pub fn cell(&self) -> IVec2 {
        cell_of(self.pos)
    }
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Total forward/backward travel since the last respawn (drives the chomp animation)
    pub distance_moved: f32,
}

impl Player {
    /// Players spawn facing left
    pub fn new(spawn: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            body: Body::new(spawn, Vec2::NEG_X, speed, radius),
            distance_moved: 0.0,
        }
    }

    pub fn step_forward(&mut self, delta: f32) {
        self.distance_moved += self.body.translate(delta);
    }

    pub fn step_backward(&mut self, delta: f32) {
        self.distance_moved += self.body.translate(-delta);
    }

    pub fn turn(&mut self, angle: f32) {
        self.body.rotate(angle);
    }

    /// Back to spawn, facing left, animation distance cleared
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.body.dir = Vec2::NEG_X;
        self.distance_moved = 0.0;
    }
}

/// Adversary behavior state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AdversaryMode {
    /// Chasing; touching the player costs a life
    #[default]
    Hunting,
    /// Frightened since `since` (session seconds); touching the player eats it
    Fleeing { since: f32 },
}

/// An autonomously navigating pursuer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    /// Spawn-order id, unique within a level
    pub id: u32,
    pub body: Body,
    pub mode: AdversaryMode,
}

impl Adversary {
    /// Adversaries spawn hunting and heading left
    pub fn new(id: u32, spawn: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            id,
            body: Body::new(spawn, Vec2::NEG_X, speed, radius),
            mode: AdversaryMode::Hunting,
        }
    }

    #[inline]
    pub fn is_fleeing(&self) -> bool {
        matches!(self.mode, AdversaryMode::Fleeing { .. })
    }

    /// Session time the current fear began, if fleeing
    pub fn fear_started(&self) -> Option<f32> {
        match self.mode {
            AdversaryMode::Fleeing { since } => Some(since),
            AdversaryMode::Hunting => None,
        }
    }
}

/// Read-only view over either kind of actor
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
    Player(&'a Player),
    Adversary(&'a Adversary),
}

impl<'a> Actor<'a> {
    pub fn body(&self) -> &'a Body {
        match self {
            Actor::Player(p) => &p.body,
            Actor::Adversary(a) => &a.body,
        }
    }
}
