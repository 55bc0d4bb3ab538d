use std::fmt;

use crate::SnapshotError;

use super::{position::Position, tile::Terrain};

/// Terrain grid of the board, stored row-major.
///
/// Only static terrain lives here. Lookups take signed [`Position`]s and return
/// `None` for anything outside `[0, width) × [0, height)`, so callers can probe
/// neighbours of edge cells without bounds bookkeeping.
///
/// # Example
///
/// ```
/// use blastgrid_engine::{Board, Position, Terrain};
///
/// let board = Board::from_tiles(3, 2, "#+.\n..*").unwrap();
/// assert_eq!(board.terrain(Position::new(1, 0)), Some(Terrain::BreakableBlock));
/// assert_eq!(board.terrain(Position::new(-1, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
}

impl Board {
    /// Builds a board filled with [`Terrain::Empty`].
    pub fn empty(width: usize, height: usize) -> Result<Self, SnapshotError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Terrain::Empty; len],
        })
    }

    /// Parses the tile string of the game state.
    ///
    /// Whitespace is skipped, so multi-line board art is accepted as well as
    /// the flat string sent by the server.
    pub fn from_tiles(width: usize, height: usize, tiles: &str) -> Result<Self, SnapshotError> {
        let expected = cell_count(width, height)?;
        let cells = tiles
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .enumerate()
            .map(|(index, ch)| {
                Terrain::from_char(ch).ok_or(SnapshotError::InvalidTile { index, ch })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if cells.len() != expected {
            return Err(SnapshotError::TileCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Row-major index of `pos`, or `None` when it lies outside the board.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Terrain at `pos`, or `None` outside the board.
    #[must_use]
    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    /// Replaces the terrain at `pos`. Returns `false` if `pos` is off the board.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) -> bool {
        match self.index_of(pos) {
            Some(i) => {
                self.cells[i] = terrain;
                true
            }
            None => false,
        }
    }

    /// Iterates over every on-board position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        // Both fit in `i32`, see `cell_count`.
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Flat tile string, as found in the game state.
    #[must_use]
    pub fn to_tiles(&self) -> String {
        self.cells.iter().map(|t| t.as_char()).collect()
    }
}

/// Number of cells of a `width` × `height` board.
///
/// Every cell must be addressable by a [`Position`], so each dimension is
/// capped at `i32::MAX`.
fn cell_count(width: usize, height: usize) -> Result<usize, SnapshotError> {
    if width == 0 || height == 0 {
        return Err(SnapshotError::EmptyBoard { width, height });
    }
    let max = usize::try_from(i32::MAX).unwrap_or(usize::MAX);
    if width > max || height > max {
        return Err(SnapshotError::BoardTooLarge { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(SnapshotError::BoardTooLarge { width, height })
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for terrain in row {
                write!(f, "{}", terrain.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
