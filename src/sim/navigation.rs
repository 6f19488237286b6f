//! Adversary navigation
//!
//! Adversaries move along their heading until they pass a cell center, then
//! pick a new heading uniformly among the open ones (straight, left, right;
//! never a reversal) and snap onto the center line of the new corridor.
//! Fear is a per-adversary timer restarted by every power pellet.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::actor::{Adversary, AdversaryMode};
use super::maze::Maze;
use crate::cell_of;
use crate::error::{Error, Result};

/// Heading change relative to the current direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Straight,
    /// +90 degrees about the vertical axis
    Left,
    /// -90 degrees about the vertical axis
    Right,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Straight, Turn::Left, Turn::Right];

    /// Heading after taking this turn
    pub fn apply(self, dir: Vec2) -> Vec2 {
        match self {
            Turn::Straight => dir,
            Turn::Left => dir.perp(),
            Turn::Right => -dir.perp(),
        }
    }
}

/// Result of a fear update for one adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FearChange {
    None,
    /// Became (or stayed) frightened with a fresh timer
    Started,
    /// Timer ran out; hunting again
    Ended,
}

/// Apply this tick's pellet event and expire stale fear.
///
/// A pellet (re)starts the timer even if the adversary is already fleeing.
pub fn update_fear(
    adversary: &mut Adversary,
    power_up: bool,
    now: f32,
    fear_duration: f32,
) -> FearChange {
    if power_up {
        adversary.mode = AdversaryMode::Fleeing { since: now };
        return FearChange::Started;
    }

    match adversary.mode {
        AdversaryMode::Fleeing { since } if now - since >= fear_duration => {
            adversary.mode = AdversaryMode::Hunting;
            FearChange::Ended
        }
        _ => FearChange::None,
    }
}

/// Turns that do not run into a wall when leaving `cell` heading `dir`
pub fn open_turns(maze: &Maze, cell: IVec2, dir: Vec2) -> Vec<Turn> {
    Turn::ALL
        .into_iter()
        .filter(|turn| {
            let offset = turn.apply(dir).round().as_ivec2();
            !maze.is_wall_cell(cell + offset)
        })
        .collect()
}

/// Move one adversary for one tick.
///
/// Returns the turn taken if the adversary reached a new cell center this
/// tick. Fails if every candidate heading is walled off.
pub fn navigate<R: Rng>(
    adversary: &mut Adversary,
    maze: &Maze,
    delta: f32,
    rng: &mut R,
) -> Result<Option<Turn>> {
    let body = &mut adversary.body;

    // The probe half a cell ahead changes exactly when the body passes a center
    let previous = cell_of(body.pos + body.dir * 0.5);
    body.translate(delta);
    let current = cell_of(body.pos + body.dir * 0.5);

    if current == previous {
        return Ok(None);
    }

    let cell = cell_of(body.pos);
    let candidates = open_turns(maze, cell, body.dir);
    let turn = match candidates.len() {
        0 => {
            return Err(Error::AdversaryStuck {
                id: adversary.id,
                x: cell.x,
                y: cell.y,
            });
        }
        1 => candidates[0],
        n => candidates[rng.random_range(0..n)],
    };

    body.dir = turn.apply(body.dir);
    // Snap to the center line and keep moving so the turn doesn't stall
    body.pos = cell.as_vec2() + body.dir * body.speed * delta;

    Ok(Some(turn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    // A T-junction at (3, -1): the corridor runs left-right, a branch goes down
    const JUNCTION: &[&str] = &[
        "#######",
        "#P   G#",
        "### ###",
        "### ###",
        "#######",
    ];

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn adversary_at(x: f32, y: f32, dir: Vec2) -> Adversary {
        let mut adv = Adversary::new(1, Vec2::new(x, y), 1.5, 0.3125);
        adv.body.dir = dir;
        adv
    }

    #[test]
    fn test_turn_apply() {
        assert_eq!(Turn::Left.apply(Vec2::NEG_X), Vec2::NEG_Y);
        assert_eq!(Turn::Right.apply(Vec2::NEG_X), Vec2::Y);
        assert_eq!(Turn::Straight.apply(Vec2::X), Vec2::X);
    }

    #[test]
    fn test_open_turns_at_junction() {
        let maze = Maze::from_rows(JUNCTION).unwrap();
        // Heading left through the junction: straight and left (down) are open
        let turns = open_turns(&maze, IVec2::new(3, -1), Vec2::NEG_X);
        assert_eq!(turns, vec![Turn::Straight, Turn::Left]);
        // Heading up the branch into the corridor: left and right, not straight
        let turns = open_turns(&maze, IVec2::new(3, -1), Vec2::Y);
        assert_eq!(turns, vec![Turn::Left, Turn::Right]);
    }

    #[test]
    fn test_no_decision_between_centers() {
        let maze = Maze::from_rows(JUNCTION).unwrap();
        let mut adv = adversary_at(5.0, -1.0, Vec2::NEG_X);
        // Leaving the center of cell 5 moves the half-cell probe from 5 to 4,
        // after which it stays in cell 4 until the next center.
        let first = navigate(&mut adv, &maze, 0.1 / 1.5, &mut rng()).unwrap();
        assert_eq!(first, Some(Turn::Straight));
        let turn = navigate(&mut adv, &maze, 0.2 / 1.5, &mut rng()).unwrap();
        assert_eq!(turn, None);
        assert!((adv.body.pos - Vec2::new(4.7, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_corridor_goes_straight_and_snaps() {
        let maze = Maze::from_rows(&["#######", "#P   G#", "#######"]).unwrap();
        let mut adv = adversary_at(4.05, -1.0, Vec2::NEG_X);
        let turn = navigate(&mut adv, &maze, 0.1, &mut rng()).unwrap();
        assert_eq!(turn, Some(Turn::Straight));
        // Snapped onto the center of cell 4 and nudged one tick along
        assert!((adv.body.pos - Vec2::new(4.0 - 0.15, -1.0)).length() < 1e-5);
        assert_eq!(adv.body.dir, Vec2::NEG_X);
    }

    #[test]
    fn test_junction_choice_is_random_among_open() {
        let maze = Maze::from_rows(JUNCTION).unwrap();
        let mut rng = rng();
        let mut straight = 0;
        let mut left = 0;
        for _ in 0..200 {
            let mut adv = adversary_at(3.05, -1.0, Vec2::NEG_X);
            match navigate(&mut adv, &maze, 0.1, &mut rng).unwrap() {
                Some(Turn::Straight) => {
                    straight += 1;
                    assert_eq!(adv.body.dir, Vec2::NEG_X);
                }
                Some(Turn::Left) => {
                    left += 1;
                    assert_eq!(adv.body.dir, Vec2::NEG_Y);
                    assert!((adv.body.pos - Vec2::new(3.0, -1.15)).length() < 1e-5);
                }
                other => panic!("unexpected turn {other:?}"),
            }
        }
        assert!(straight > 50 && left > 50);
    }

    #[test]
    fn test_dead_end_is_fatal() {
        let maze = Maze::from_rows(&["#####", "#P G#", "#####"]).unwrap();
        // Heading left into cell 1 whose only exit is back the way it came
        let mut adv = adversary_at(1.05, -1.0, Vec2::NEG_X);
        let err = navigate(&mut adv, &maze, 0.1, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::AdversaryStuck { id: 1, x: 1, y: -1 }));
    }

    #[test]
    fn test_fear_restarts_and_expires() {
        let mut adv = adversary_at(0.0, 0.0, Vec2::NEG_X);
        assert_eq!(update_fear(&mut adv, true, 5.0, 10.0), FearChange::Started);
        assert_eq!(adv.fear_started(), Some(5.0));
        assert_eq!(update_fear(&mut adv, false, 14.9, 10.0), FearChange::None);
        // A second pellet restarts the timer
        assert_eq!(update_fear(&mut adv, true, 7.0, 10.0), FearChange::Started);
        assert_eq!(update_fear(&mut adv, false, 15.0, 10.0), FearChange::None);
        assert!(adv.is_fleeing());
        assert_eq!(update_fear(&mut adv, false, 17.0, 10.0), FearChange::Ended);
        assert!(!adv.is_fleeing());
        assert_eq!(update_fear(&mut adv, false, 30.0, 10.0), FearChange::None);
    }
}
