//! Game balance and timing
//!
//! Every value has a default, so a tuning file only needs the keys it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Data-driven gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Player speed on the first level (units/s)
    pub player_speed: f32,
    /// Adversary speed on the first level (units/s)
    pub adversary_speed: f32,
    /// Added to both speeds on every level clear
    pub speed_step: f32,
    /// Player turn rate (radians/s)
    pub turn_rate: f32,
    pub player_radius: f32,
    pub adversary_radius: f32,

    // === Timers (seconds) ===
    pub fear_duration: f32,
    /// Pause after clearing a level before the next one starts
    pub won_pause: f32,
    /// Pause after losing a life before respawning
    pub lost_pause: f32,
    pub spawn_interval: f32,
    pub notification_duration: f32,
    /// Longest frame delta the simulation will accept
    pub max_frame_delta: f32,

    // === Population ===
    pub max_adversaries: usize,
    pub starting_lives: u32,

    // === Scoring ===
    pub dot_score: u64,
    pub pellet_score: u64,
    pub adversary_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            speed_step: SPEED_STEP,
            turn_rate: TURN_RATE,
            player_radius: PLAYER_RADIUS,
            adversary_radius: ADVERSARY_RADIUS,

            fear_duration: FEAR_DURATION,
            won_pause: WON_PAUSE,
            lost_pause: LOST_PAUSE,
            spawn_interval: SPAWN_INTERVAL,
            notification_duration: NOTIFICATION_DURATION,
            max_frame_delta: MAX_FRAME_DELTA,

            max_adversaries: MAX_ADVERSARIES,
            starting_lives: STARTING_LIVES,

            dot_score: DOT_SCORE,
            pellet_score: PELLET_SCORE,
            adversary_score: ADVERSARY_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player_speed", self.player_speed),
            ("adversary_speed", self.adversary_speed),
            ("turn_rate", self.turn_rate),
            ("player_radius", self.player_radius),
            ("adversary_radius", self.adversary_radius),
            ("fear_duration", self.fear_duration),
            ("spawn_interval", self.spawn_interval),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("speed_step", self.speed_step),
            ("won_pause", self.won_pause),
            ("lost_pause", self.lost_pause),
            ("notification_duration", self.notification_duration),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidTuning(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.max_adversaries == 0 {
            return Err(Error::InvalidTuning(
                "max_adversaries must be at least 1".into(),
            ));
        }

        // Probes only reach the neighbouring cells while radii stay under half a cell
        if self.player_radius >= 0.5 {
            return Err(Error::InvalidTuning(format!(
                "player_radius must be below 0.5, got {}",
                self.player_radius
            )));
        }

        Ok(())
    }
}
