//! Snapshot model for the bomb-placement grid game.
//!
//! A [`GameSnapshot`] is an immutable point-in-time view of the board terrain,
//! the live bombs, the players and the bonuses lying on the floor. It is built
//! once per decision cycle (usually by deserializing the server's JSON state)
//! and then only read.

pub use self::{core::*, snapshot::*};

pub mod core;
pub mod snapshot;

/// Kind of entity referenced by [`SnapshotError::EntityOutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EntityKind {
    #[display("bomb")]
    Bomb,
    #[display("player")]
    Player,
    #[display("bonus")]
    Bonus,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("board must have non-zero width and height, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[display("board of {width}x{height} cells is too large")]
    BoardTooLarge { width: usize, height: usize },
    #[display("tile count does not match board size, expected {expected}, received {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[display("invalid tile character {ch:?} at index {index}")]
    InvalidTile { index: usize, ch: char },
    #[display("{kind} '{id}' is outside the board at {position}")]
    EntityOutOfBounds {
        kind: EntityKind,
        id: String,
        position: Position,
    },
}
