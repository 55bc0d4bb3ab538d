//! Whether standing on a cell is survivable right now.

use blastgrid_engine::{GameSnapshot, Position, TileClass};
use serde::Serialize;

use crate::blast;

/// Safety verdict for a cell, most severe reason first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[derive(derive_more::Display, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Safety {
    #[display("safe")]
    Safe,
    /// The cell is on fire.
    #[display("burning")]
    Burning,
    /// A bomb's blast reaches the cell.
    #[display("threatened")]
    Threatened,
}

/// Classifies the cell at `pos`, whose observer-relative class is `tile`.
///
/// Fire wins over blast analysis: a burning cell is reported as
/// [`Safety::Burning`] without casting any ray.
#[must_use]
pub fn safety(snapshot: &GameSnapshot, tile: TileClass, pos: Position) -> Safety {
    if tile == TileClass::Explosion {
        Safety::Burning
    } else if blast::is_threatened(snapshot, pos) {
        Safety::Threatened
    } else {
        Safety::Safe
    }
}

/// `false` if `tile` is [`TileClass::Explosion`] or a blast reaches `pos`.
#[must_use]
pub fn is_safe(snapshot: &GameSnapshot, tile: TileClass, pos: Position) -> bool {
    safety(snapshot, tile, pos).is_safe()
}
