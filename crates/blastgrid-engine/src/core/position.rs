use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Coordinates are signed so that neighbours of edge cells (e.g. `(-1, 2)`)
/// can be expressed and queried. `y` grows downward.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[derive(derive_more::Display)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position `distance` cells away in `direction`.
    ///
    /// Coordinates saturate at the `i32` limits. A board is never wider than
    /// `i32::MAX` cells, so a saturated coordinate is always off the board.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
        }
    }

    /// Returns the adjacent position in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// Iterates over the four cardinally adjacent positions, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Position)> {
        Direction::ALL.into_iter().map(move |d| (d, self.step(d)))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("down")]
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit offset `(dx, dy)` of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}
