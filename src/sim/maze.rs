//! Grid map: the tile lattice actors move through
//!
//! Cells are addressed as `IVec2 { x: column, y: -row }`, so the top row sits
//! at `y = 0` and rows grow downward into negative `y`. Continuous positions
//! map to cells with [`cell_of`].

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{cell_center, cell_of};

/// The stock maze: 28x31 cells, 240 dots, 4 power pellets, a horizontal
/// wrap tunnel on row 14.
pub const REFERENCE_LEVEL: &[&str] = &[
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##    G     ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Counts toward clearing the level
    Dot,
    /// Frightens every live adversary
    Pellet,
}

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Collectible { kind: CollectibleKind, consumed: bool },
}

impl Tile {
    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Unconsumed collectible of the given kind
    #[inline]
    pub fn is_available(&self, kind: CollectibleKind) -> bool {
        matches!(self, Tile::Collectible { kind: k, consumed: false } if *k == kind)
    }
}

/// Fixed extents of the grid, in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= self.left && cell.x <= self.right && cell.y <= self.top && cell.y >= self.bottom
    }
}

/// Parsed maze with per-tile consumed state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    /// Tiles by row (index = -y), then column. Rows may be ragged.
    rows: Vec<Vec<Tile>>,
    bounds: Bounds,
    player_spawn: IVec2,
    adversary_spawn: IVec2,
    total_dots: u32,
}

impl Maze {
    /// The stock maze
    pub fn reference() -> Result<Self> {
        Self::from_rows(REFERENCE_LEVEL)
    }

    /// Parse a layout with one row per line
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Parse a layout given as rows of one character per cell.
    ///
    /// `#` wall, `.` dot, `o` pellet, `P` player spawn, `G` adversary spawn,
    /// space open corridor. Cells past the end of a row are out of bounds.
    pub fn from_rows<S: AsRef<str>>(layout: &[S]) -> Result<Self> {
        let mut rows = Vec::with_capacity(layout.len());
        let mut player_spawn = None;
        let mut adversary_spawn = None;
        let mut total_dots = 0;
        let mut widest = 0;

        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref().trim_end_matches('\r');
            let mut tiles = Vec::with_capacity(line.len());

            for (column, ch) in line.chars().enumerate() {
                let cell = IVec2::new(column as i32, -(row as i32));
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => {
                        total_dots += 1;
                        Tile::Collectible {
                            kind: CollectibleKind::Dot,
                            consumed: false,
                        }
                    }
                    'o' => Tile::Collectible {
                        kind: CollectibleKind::Pellet,
                        consumed: false,
                    },
                    ' ' => Tile::Empty,
                    'P' | 'G' => {
                        let slot = if ch == 'P' {
                            &mut player_spawn
                        } else {
                            &mut adversary_spawn
                        };
                        if slot.is_some() {
                            return Err(Error::DuplicateSpawn {
                                marker: ch,
                                row,
                                column,
                            });
                        }
                        *slot = Some(cell);
                        // Spawn markers are not occupancy tiles
                        Tile::Empty
                    }
                    _ => return Err(Error::UnknownTile { ch, row, column }),
                };
                tiles.push(tile);
            }

            widest = widest.max(tiles.len());
            rows.push(tiles);
        }

        if widest == 0 {
            return Err(Error::EmptyLayout);
        }

        let player_spawn = player_spawn.ok_or(Error::MissingPlayerSpawn)?;
        let adversary_spawn = adversary_spawn.ok_or(Error::MissingAdversarySpawn)?;

        let bounds = Bounds {
            left: 0,
            right: widest as i32 - 1,
            top: 0,
            bottom: -(rows.len() as i32 - 1),
        };

        log::debug!(
            "Parsed maze {}x{}: {} dots",
            widest,
            rows.len(),
            total_dots
        );

        Ok(Self {
            rows,
            bounds,
            player_spawn,
            adversary_spawn,
            total_dots,
        })
    }

    /// Raw tile at a cell, `None` outside the drawn grid
    fn tile(&self, cell: IVec2) -> Option<&Tile> {
        if cell.x < 0 || cell.y > 0 {
            return None;
        }
        self.rows.get((-cell.y) as usize)?.get(cell.x as usize)
    }

    fn tile_mut(&mut self, cell: IVec2) -> Option<&mut Tile> {
        if cell.x < 0 || cell.y > 0 {
            return None;
        }
        self.rows.get_mut((-cell.y) as usize)?.get_mut(cell.x as usize)
    }

    /// Occupying tile at a cell. Open corridor and out-of-bounds both read as `None`.
    pub fn tile_at_cell(&self, cell: IVec2) -> Option<Tile> {
        self.tile(cell).copied().filter(|t| *t != Tile::Empty)
    }

    /// Occupying tile nearest a continuous position
    pub fn tile_at(&self, pos: Vec2) -> Option<Tile> {
        self.tile_at_cell(cell_of(pos))
    }

    pub fn is_wall_cell(&self, cell: IVec2) -> bool {
        self.tile(cell).is_some_and(Tile::is_wall)
    }

    /// True iff the tile nearest `pos` is a wall. Absent tiles are passable.
    pub fn is_wall(&self, pos: Vec2) -> bool {
        self.is_wall_cell(cell_of(pos))
    }

    /// Consume the collectible nearest `pos`.
    ///
    /// Returns the kind when an unconsumed collectible was taken; anything
    /// else (wall, empty, already consumed, out of bounds) is a no-op.
    pub fn consume(&mut self, pos: Vec2) -> Option<CollectibleKind> {
        match self.tile_mut(cell_of(pos)) {
            Some(Tile::Collectible { kind, consumed }) if !*consumed => {
                *consumed = true;
                Some(*kind)
            }
            _ => None,
        }
    }

    /// Put every collectible back for a new level
    pub fn reset_collectibles(&mut self) {
        for tile in self.rows.iter_mut().flatten() {
            if let Tile::Collectible { consumed, .. } = tile {
                *consumed = false;
            }
        }
    }

    /// Whether the renderer should draw the tile at a cell
    pub fn is_visible(&self, cell: IVec2) -> bool {
        match self.tile(cell) {
            Some(Tile::Wall) => true,
            Some(Tile::Collectible { consumed, .. }) => !consumed,
            _ => false,
        }
    }

    /// Every occupying tile with its cell, row by row
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, tiles)| {
            tiles.iter().enumerate().filter_map(move |(column, tile)| {
                (*tile != Tile::Empty).then(|| (IVec2::new(column as i32, -(row as i32)), *tile))
            })
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Number of dots the level was built with. Never changes.
    pub fn total_dots(&self) -> u32 {
        self.total_dots
    }

    pub fn player_spawn(&self) -> Vec2 {
        cell_center(self.player_spawn)
    }

    pub fn adversary_spawn(&self) -> Vec2 {
        cell_center(self.adversary_spawn)
    }

    /// Center of the map (for cameras framing the whole level)
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.bounds.left + self.bounds.right) as f32 / 2.0,
            (self.bounds.top + self.bounds.bottom) as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SMALL: &[&str] = &[
        "#######",
        "#P.o.G#",
        "#######",
    ];

    #[test]
    fn test_reference_level() {
        let maze = Maze::reference().unwrap();
        assert_eq!(maze.total_dots(), 240);
        assert_eq!(
            *maze.bounds(),
            Bounds {
                left: 0,
                right: 27,
                top: 0,
                bottom: -30
            }
        );
        assert_eq!(maze.player_spawn(), Vec2::new(13.0, -23.0));
        assert_eq!(maze.adversary_spawn(), Vec2::new(13.0, -11.0));
        let pellets = maze
            .tiles()
            .filter(|(_, t)| t.is_available(CollectibleKind::Pellet))
            .count();
        assert_eq!(pellets, 4);
    }

    #[test]
    fn test_spawn_markers_are_not_tiles() {
        let maze = Maze::from_rows(SMALL).unwrap();
        assert_eq!(maze.tile_at(maze.player_spawn()), None);
        assert_eq!(maze.tile_at(maze.adversary_spawn()), None);
        assert!(!maze.is_wall(maze.player_spawn()));
    }

    #[test]
    fn test_missing_spawns_fail() {
        assert!(matches!(
            Maze::from_rows(&["#.G#"]),
            Err(Error::MissingPlayerSpawn)
        ));
        assert!(matches!(
            Maze::from_rows(&["#P.#"]),
            Err(Error::MissingAdversarySpawn)
        ));
        assert!(matches!(
            Maze::from_rows(&["#PGP#"]),
            Err(Error::DuplicateSpawn {
                marker: 'P',
                row: 0,
                column: 3
            })
        ));
        assert!(matches!(Maze::from_rows::<&str>(&[]), Err(Error::EmptyLayout)));
    }

    #[test]
    fn test_unknown_tile_reports_position() {
        let err = Maze::from_rows(&["#PG#", "#x #"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownTile {
                ch: 'x',
                row: 1,
                column: 1
            }
        ));
    }

    #[test]
    fn test_parse_text() {
        let maze = Maze::parse("#####\r\n#P.G#\n#####").unwrap();
        assert_eq!(maze.total_dots(), 1);
        assert_eq!(maze.bounds().bottom, -2);
    }

    #[test]
    fn test_out_of_bounds_is_passable() {
        let maze = Maze::from_rows(&["#P.G#", "#"]).unwrap();
        // Past the end of a short row
        assert_eq!(maze.tile_at_cell(IVec2::new(3, -1)), None);
        assert!(!maze.is_wall_cell(IVec2::new(3, -1)));
        // Outside the grid entirely
        assert!(!maze.is_wall(Vec2::new(-3.0, 4.0)));
        assert!(!maze.is_wall(Vec2::new(40.0, -40.0)));
        assert!(maze.is_wall(Vec2::new(0.2, -0.8)));
    }

    #[test]
    fn test_consume_and_reset() {
        let mut maze = Maze::from_rows(SMALL).unwrap();
        let dot = Vec2::new(2.2, -0.9);
        assert_eq!(maze.consume(dot), Some(CollectibleKind::Dot));
        // Already consumed
        assert_eq!(maze.consume(dot), None);
        assert!(!maze.is_visible(IVec2::new(2, -1)));
        // Consumed tiles stay in the grid
        assert_eq!(
            maze.tile_at(dot),
            Some(Tile::Collectible {
                kind: CollectibleKind::Dot,
                consumed: true
            })
        );
        assert_eq!(maze.consume(Vec2::new(3.0, -1.0)), Some(CollectibleKind::Pellet));
        assert_eq!(maze.consume(Vec2::new(0.0, 0.0)), None);
        assert_eq!(maze.consume(Vec2::new(-5.0, 0.0)), None);

        maze.reset_collectibles();
        assert!(maze.is_visible(IVec2::new(2, -1)));
        assert!(maze.is_visible(IVec2::new(3, -1)));
        assert_eq!(maze.total_dots(), 2);
    }

    proptest! {
        #[test]
        fn prop_tile_lookup_matches_rounded_cell(x in -3.0f32..31.0, y in -34.0f32..3.0) {
            let maze = Maze::reference().unwrap();
            let rounded = Vec2::new((x + 0.5).floor(), (y + 0.5).floor());
            prop_assert_eq!(maze.tile_at(Vec2::new(x, y)), maze.tile_at(rounded));
            prop_assert_eq!(maze.is_wall(Vec2::new(x, y)), maze.is_wall(rounded));
        }
    }
}
