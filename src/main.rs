//! Maze Chase headless runner
//!
//! Plays a session with a wandering autopilot at a fixed frame rate, logs
//! gameplay events, and prints a summary when the time runs out or the game
//! ends.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use maze_chase::sim::{ControlInput, GameEvent, GameMode, GameState, Maze};
use maze_chase::{ControlSource, Result, Session, Tuning};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Seed for adversary turns and the autopilot
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds to run for
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Frames per simulated second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// JSON tuning file (missing keys keep their defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Maze layout file, one character per cell
    #[arg(long)]
    maze: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Holds forward and picks a new random turn whenever it stops making progress
struct Autopilot {
    rng: Pcg32,
    held: ControlInput,
    frames_left: u32,
    last_pos: Vec2,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            // Separate stream from the simulation's own RNG
            rng: Pcg32::seed_from_u64(seed ^ 0x5EED_A070),
            held: ControlInput::default(),
            frames_left: 0,
            last_pos: Vec2::ZERO,
        }
    }

    fn pick(&mut self) {
        let turn = self.rng.random_range(0..3);
        self.held = ControlInput {
            forward: true,
            backward: false,
            turn_left: turn == 1,
            turn_right: turn == 2,
        };
        self.frames_left = self.rng.random_range(10..90);
    }
}

impl ControlSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> ControlInput {
        let pos = state.player.body.pos;
        let stalled = pos.distance(self.last_pos) < 1e-4;
        self.last_pos = pos;

        if self.frames_left == 0 || (stalled && state.mode.is_playing()) {
            self.pick();
        }
        self.frames_left = self.frames_left.saturating_sub(1);
        self.held
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    frames: u64,
    elapsed: f32,
    level: u32,
    lives: u32,
    score: u64,
    dots_eaten: u32,
    total_dots: u32,
    adversaries: usize,
    mode: GameMode,
    game_over: bool,
}

fn load_maze(path: Option<&PathBuf>) -> Result<Maze> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| maze_chase::Error::Io {
                path: path.clone(),
                source,
            })?;
            Maze::parse(&text)
        }
        None => Maze::reference(),
    }
}

fn log_events(state: &GameState, now: f32) {
    for event in &state.events {
        match event {
            GameEvent::DotEaten | GameEvent::WallBumped => {}
            GameEvent::LevelWon { level } => log::info!("[{now:7.2}] level {level} won"),
            GameEvent::PlayerCaught { lives_left } => {
                log::info!("[{now:7.2}] caught, {lives_left} lives left")
            }
            other => log::debug!("[{now:7.2}] {other:?}"),
        }
    }
}

fn run(cli: &Cli) -> Result<Summary> {
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let maze = load_maze(cli.maze.as_ref())?;

    log::info!(
        "Maze Chase starting: seed {}, {} dots, {}s at {} fps",
        cli.seed,
        maze.total_dots(),
        cli.seconds,
        cli.fps
    );

    let mut session = Session::new(GameState::new(maze, tuning, cli.seed));
    let mut autopilot = Autopilot::new(cli.seed);
    let frame_delta = 1.0 / cli.fps.max(1) as f32;
    let frames = (cli.seconds.max(0.0) * cli.fps as f32).round() as u64;

    for _ in 0..frames {
        session.frame(frame_delta, &mut autopilot)?;
        log_events(&session.state, session.elapsed());
        if session.state.is_game_over() {
            break;
        }
    }

    let state = &session.state;
    Ok(Summary {
        seed: state.seed,
        frames: session.frames(),
        elapsed: session.elapsed(),
        level: state.level,
        lives: state.lives,
        score: state.score,
        dots_eaten: state.dots_eaten,
        total_dots: state.total_dots(),
        adversaries: state.adversaries.len(),
        mode: state.mode,
        game_over: state.is_game_over(),
    })
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) if cli.json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode summary: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(summary) => {
            println!(
                "level {} | score {} | lives {} | dots {}/{} | {:.1}s over {} frames{}",
                summary.level,
                summary.score,
                summary.lives,
                summary.dots_eaten,
                summary.total_dots,
                summary.elapsed,
                summary.frames,
                if summary.game_over { " | game over" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Simulation aborted: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
