//! Per-frame simulation tick
//!
//! Order within one tick:
//! 1. Player movement, wall correction, consumption (only while playing)
//! 2. Win check and the won/lost pause timers
//! 3. Adversaries in spawn order: fear, navigation, wrap, capture
//! 4. Deferred removal of eaten adversaries
//! 5. Spawn cadence

use serde::{Deserialize, Serialize};

use super::collision::{bodies_touch, resolve_wall_collision, wrap_position};
use super::maze::CollectibleKind;
use super::navigation::{FearChange, navigate, update_fear};
use super::state::{GameEvent, GameMode, GameState, NotificationKind};
use crate::error::Result;

/// Control signals sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Advance the game by `delta` seconds, ending at session time `now`.
///
/// Fails only on an invariant violation (an adversary with no open heading),
/// after which the state should not be ticked again.
pub fn tick(state: &mut GameState, input: &ControlInput, delta: f32, now: f32) -> Result<()> {
    state.events.clear();
    state.notifications.retain(|n| now <= n.expires_at);

    let power_up = update_player(state, input, delta);
    update_mode(state, now);
    update_adversaries(state, power_up, delta, now)?;

    if state.adversaries.len() < state.tuning.max_adversaries
        && now - state.last_spawn_at >= state.tuning.spawn_interval
    {
        state.spawn_adversary(now);
    }

    Ok(())
}

/// Move the player and eat whatever it lands on. Returns true if a power
/// pellet was eaten this tick.
fn update_player(state: &mut GameState, input: &ControlInput, delta: f32) -> bool {
    let mut power_up = false;

    if state.mode.is_playing() {
        let turn = state.tuning.turn_rate * delta;
        let player = &mut state.player;
        if input.forward {
            player.step_forward(delta);
        }
        if input.turn_left {
            player.turn(turn);
        }
        if input.turn_right {
            player.turn(-turn);
        }
        if input.backward {
            player.step_backward(delta);
        }

        if resolve_wall_collision(&mut player.body, &state.maze).hit() {
            state.events.push(GameEvent::WallBumped);
        }

        match state.maze.consume(player.body.pos) {
            Some(CollectibleKind::Dot) => {
                state.dots_eaten += 1;
                state.score += state.tuning.dot_score;
                state.events.push(GameEvent::DotEaten);
            }
            Some(CollectibleKind::Pellet) => {
                power_up = true;
                state.score += state.tuning.pellet_score;
                state.events.push(GameEvent::PelletEaten);
                log::debug!("Power pellet eaten");
            }
            None => {}
        }
    }

    wrap_position(&mut state.player.body, state.maze.bounds());
    power_up
}

fn update_mode(state: &mut GameState, now: f32) {
    match state.mode {
        GameMode::Playing if state.dots_eaten == state.total_dots() => {
            state.mode = GameMode::Won { at: now };
            state.events.push(GameEvent::LevelWon { level: state.level });
            state.notify(NotificationKind::Won, now);
            log::info!("Level {} cleared, score {}", state.level, state.score);
        }
        GameMode::Won { at } if now - at >= state.tuning.won_pause => {
            state.advance_level();
        }
        // Game over is terminal: with no lives left this arm never matches
        GameMode::Lost { at } if state.lives > 0 && now - at >= state.tuning.lost_pause => {
            state.mode = GameMode::Playing;
            state.respawn_player();
            state.events.push(GameEvent::PlayerRespawned);
            log::debug!("Player respawned");
        }
        _ => {}
    }
}

fn update_adversaries(state: &mut GameState, power_up: bool, delta: f32, now: f32) -> Result<()> {
    let mut eaten = Vec::new();

    for index in 0..state.adversaries.len() {
        let adversary = &mut state.adversaries[index];
        let id = adversary.id;

        match update_fear(adversary, power_up, now, state.tuning.fear_duration) {
            FearChange::Started => {
                state.events.push(GameEvent::FearStarted { id });
                log::debug!("Adversary {id} fleeing");
            }
            FearChange::Ended => {
                state.events.push(GameEvent::FearEnded { id });
                log::debug!("Adversary {id} hunting again");
            }
            FearChange::None => {}
        }

        if let Some(turn) = navigate(adversary, &state.maze, delta, &mut state.rng)? {
            log::trace!("Adversary {id} took {turn:?} at {:?}", adversary.body.cell());
        }
        wrap_position(&mut adversary.body, state.maze.bounds());

        let touching = bodies_touch(&state.player.body, &adversary.body);
        let fleeing = adversary.is_fleeing();

        if touching && state.mode.is_playing() {
            if fleeing {
                eaten.push(id);
                state.score += state.tuning.adversary_score;
                state.events.push(GameEvent::AdversaryEaten { id });
                log::debug!("Adversary {id} eaten");
            } else {
                state.lose_life(now);
            }
        }
    }

    if !eaten.is_empty() {
        state.adversaries.retain(|a| !eaten.contains(&a.id));
    }

    Ok(())
}
