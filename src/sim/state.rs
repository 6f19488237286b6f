//! Game state and core simulation types
//!
//! One record owns everything the tick mutates: the maze, the player, the
//! adversaries, timers, and the seeded RNG used for turn choices.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::actor::{Actor, Adversary, Player};
use super::maze::Maze;
use crate::settings::Tuning;

/// Overall game mode. `Won` and `Lost` remember when they began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameMode {
    Playing,
    /// Level cleared; the next level starts after the won pause
    Won { at: f32 },
    /// Caught by a hunting adversary; respawn after the lost pause if lives remain
    Lost { at: f32 },
}

impl GameMode {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, GameMode::Playing)
    }
}

/// Which message a notification carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Won,
    Died,
    GameOver,
}

impl NotificationKind {
    pub fn message(self) -> &'static str {
        match self {
            NotificationKind::Won => "You won =D",
            NotificationKind::Died => "You died =(",
            NotificationKind::GameOver => "Game over =(",
        }
    }

    /// Relative text size for the display
    pub fn size(self) -> f32 {
        match self {
            NotificationKind::Won => 1.0,
            NotificationKind::Died | NotificationKind::GameOver => 0.1,
        }
    }
}

/// Transient on-screen message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub size: f32,
    /// Session time after which the message is dropped
    pub expires_at: f32,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    DotEaten,
    PelletEaten,
    FearStarted { id: u32 },
    FearEnded { id: u32 },
    AdversarySpawned { id: u32 },
    AdversaryEaten { id: u32 },
    PlayerCaught { lives_left: u32 },
    LevelWon { level: u32 },
    LevelStarted { level: u32 },
    PlayerRespawned,
    /// The player was pushed back out of a wall
    WallBumped,
    GameOver,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the turn-choice RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub maze: Maze,
    pub mode: GameMode,
    /// 1-based level number
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Dots consumed this level
    pub dots_eaten: u32,
    pub player: Player,
    /// Live adversaries in spawn order
    pub adversaries: Vec<Adversary>,
    /// Session time of the last spawn
    pub last_spawn_at: f32,
    pub next_adversary_id: u32,
    /// Current speeds; both grow by `tuning.speed_step` per cleared level
    pub player_speed: f32,
    pub adversary_speed: f32,
    pub notifications: Vec<Notification>,
    /// Events emitted by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(maze: Maze, tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(maze.player_spawn(), tuning.player_speed, tuning.player_radius);
        Self {
            seed,
            mode: GameMode::Playing,
            level: 1,
            lives: tuning.starting_lives,
            score: 0,
            dots_eaten: 0,
            player,
            adversaries: Vec::new(),
            // First spawn is due on the very first tick
            last_spawn_at: -tuning.spawn_interval,
            next_adversary_id: 1,
            player_speed: tuning.player_speed,
            adversary_speed: tuning.adversary_speed,
            notifications: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            maze,
        }
    }

    /// Dots needed to clear the level
    #[inline]
    pub fn total_dots(&self) -> u32 {
        self.maze.total_dots()
    }

    /// The player followed by every adversary in spawn order
    pub fn actors(&self) -> impl Iterator<Item = Actor<'_>> + '_ {
        std::iter::once(Actor::Player(&self.player))
            .chain(self.adversaries.iter().map(Actor::Adversary))
    }

    pub fn adversary(&self, id: u32) -> Option<&Adversary> {
        self.adversaries.iter().find(|a| a.id == id)
    }

    /// Add a hunting adversary at the spawn marker
    pub(crate) fn spawn_adversary(&mut self, now: f32) -> u32 {
        let id = self.next_adversary_id;
        self.next_adversary_id += 1;
        self.adversaries.push(Adversary::new(
            id,
            self.maze.adversary_spawn(),
            self.adversary_speed,
            self.tuning.adversary_radius,
        ));
        self.last_spawn_at = now;
        self.events.push(GameEvent::AdversarySpawned { id });
        log::debug!("Adversary {id} spawned at t={now:.2}");
        id
    }

    pub(crate) fn respawn_player(&mut self) {
        let spawn = self.maze.player_spawn();
        self.player.respawn(spawn);
        self.player.body.speed = self.player_speed;
    }

    /// Start the next level: fresh collectibles, no adversaries, faster actors
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        self.player_speed += self.tuning.speed_step;
        self.adversary_speed += self.tuning.speed_step;
        self.respawn_player();
        self.maze.reset_collectibles();
        self.adversaries.clear();
        self.next_adversary_id = 1;
        self.dots_eaten = 0;
        self.mode = GameMode::Playing;
        self.events.push(GameEvent::LevelStarted { level: self.level });
        log::info!(
            "Level {} started (player speed {:.1}, adversary speed {:.1})",
            self.level,
            self.player_speed,
            self.adversary_speed
        );
    }

    /// Caught by a hunting adversary. Lives never drop below zero.
    pub(crate) fn lose_life(&mut self, now: f32) {
        self.lives = self.lives.saturating_sub(1);
        self.mode = GameMode::Lost { at: now };
        self.events.push(GameEvent::PlayerCaught {
            lives_left: self.lives,
        });

        if self.lives > 0 {
            log::info!("Life lost, {} remaining", self.lives);
            self.notify(NotificationKind::Died, now);
        } else {
            log::info!("Game over at level {} with score {}", self.level, self.score);
            self.events.push(GameEvent::GameOver);
            self.notify(NotificationKind::GameOver, now);
        }
    }

    pub(crate) fn notify(&mut self, kind: NotificationKind, now: f32) {
        self.notifications.push(Notification {
            kind,
            message: kind.message().to_string(),
            size: kind.size(),
            expires_at: now + self.tuning.notification_duration,
        });
    }

    /// True once the last life is gone; nothing restarts the game after this
    pub fn is_game_over(&self) -> bool {
        self.lives == 0 && matches!(self.mode, GameMode::Lost { .. })
    }

    /// Player position (camera target for renderers)
    pub fn player_pos(&self) -> Vec2 {
        self.player.body.pos
    }
}
