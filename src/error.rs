//! Crate error type
//!
//! Everything here is fatal: layout and tuning errors surface before the
//! first tick, and a stuck adversary aborts the simulation.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("maze layout is empty")]
    EmptyLayout,

    #[error("unknown tile {ch:?} at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },

    #[error("maze has no player spawn marker 'P'")]
    MissingPlayerSpawn,

    #[error("maze has no adversary spawn marker 'G'")]
    MissingAdversarySpawn,

    #[error("duplicate spawn marker {marker:?} at row {row}, column {column}")]
    DuplicateSpawn { marker: char, row: usize, column: usize },

    /// Straight, left and right are all walls. Only a malformed maze gets here.
    #[error("adversary {id} stuck at cell ({x}, {y}): no open direction")]
    AdversaryStuck { id: u32, x: i32, y: i32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tuning parse error: {0}")]
    Json(#[from] serde_json::Error),
}
