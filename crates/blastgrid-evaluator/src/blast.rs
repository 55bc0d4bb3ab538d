//! Blast propagation by ray casting.
//!
//! A bomb's blast travels along the four cardinal directions up to its range
//! and stops at the first [`Block`](blastgrid_engine::Terrain::Block) or
//! [`BreakableBlock`](blastgrid_engine::Terrain::BreakableBlock). Rather than
//! painting every bomb's blast onto a global map, the analysis runs backwards
//! from the queried cell: each ray walks outward from the origin until it hits
//! a wall or the board edge, and every bomb found along the way is compared
//! against the distance travelled. This keeps a query at O(width + height)
//! with no state shared between queries.
//!
//! Bombs do not stop a ray. A second bomb further out on the same line is
//! still evaluated, so overlapping blast lines are all reported.

use blastgrid_engine::{Board, BombId, Direction, GameSnapshot, Position};
use serde::Serialize;

/// A bomb whose blast reaches the analysed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlastThreat {
    pub bomb_id: BombId,
    /// Direction from the analysed cell towards the bomb, or `None` when the
    /// bomb lies on the cell itself.
    pub direction: Option<Direction>,
    /// Cells between the analysed cell and the bomb along the ray.
    pub distance: u32,
    /// Ticks until the bomb detonates.
    pub countdown: u32,
}

/// Walks outward from `origin` along `direction`.
///
/// Yields `(distance, position)` for every cell a blast could travel through,
/// starting at distance 1. Stops before the first blast-opaque cell or the
/// board edge; the blocking cell itself is not yielded.
pub fn ray_cells(
    board: &Board,
    origin: Position,
    direction: Direction,
) -> impl Iterator<Item = (u32, Position)> + '_ {
    (1_i32..)
        .map(move |d| (d.unsigned_abs(), origin.offset(direction, d)))
        .map_while(move |(d, pos)| match board.terrain(pos) {
            Some(terrain) if !terrain.is_blast_opaque() => Some((d, pos)),
            _ => None,
        })
}

fn origin_threats(
    snapshot: &GameSnapshot,
    origin: Position,
) -> impl Iterator<Item = BlastThreat> + '_ {
    snapshot.bombs_at(origin).map(|(id, bomb)| BlastThreat {
        bomb_id: id.clone(),
        direction: None,
        distance: 0,
        countdown: bomb.countdown,
    })
}

fn ray_threats(
    snapshot: &GameSnapshot,
    origin: Position,
    direction: Direction,
) -> impl Iterator<Item = BlastThreat> + '_ {
    ray_cells(snapshot.board(), origin, direction).flat_map(move |(distance, pos)| {
        snapshot
            .bombs_at(pos)
            .filter(move |(_, bomb)| bomb.reaches(distance))
            .map(move |(id, bomb)| BlastThreat {
                bomb_id: id.clone(),
                direction: Some(direction),
                distance,
                countdown: bomb.countdown,
            })
    })
}

fn all_threats(
    snapshot: &GameSnapshot,
    origin: Position,
) -> impl Iterator<Item = BlastThreat> + '_ {
    // Off-board cells are walls; no blast ends up there.
    let origin = snapshot.board().contains(origin).then_some(origin);
    origin.into_iter().flat_map(move |origin| {
        let rays = Direction::ALL
            .into_iter()
            .flat_map(move |d| ray_threats(snapshot, origin, d));
        origin_threats(snapshot, origin).chain(rays)
    })
}

/// Whether a bomb found along `direction` from `origin` reaches `origin`.
#[must_use]
pub fn ray_threat(snapshot: &GameSnapshot, origin: Position, direction: Direction) -> bool {
    snapshot.board().contains(origin) && ray_threats(snapshot, origin, direction).next().is_some()
}

/// Whether any bomb's blast reaches `origin`.
///
/// A bomb on `origin` itself always qualifies. Any single qualifying bomb is
/// enough; the scan stops at the first one.
#[must_use]
pub fn is_threatened(snapshot: &GameSnapshot, origin: Position) -> bool {
    all_threats(snapshot, origin).next().is_some()
}

/// Every bomb whose blast reaches `origin`.
///
/// Bombs on `origin` come first, then rays in [`Direction::ALL`] order, nearest
/// bomb first within a ray.
#[must_use]
pub fn threats(snapshot: &GameSnapshot, origin: Position) -> Vec<BlastThreat> {
    all_threats(snapshot, origin).collect()
}

/// The qualifying bomb that detonates first.
///
/// Ties on countdown go to the nearer bomb, then to the smaller bomb id.
#[must_use]
pub fn earliest_threat(snapshot: &GameSnapshot, origin: Position) -> Option<BlastThreat> {
    all_threats(snapshot, origin).min_by(earliest_first)
}

pub(crate) fn earliest_first(a: &BlastThreat, b: &BlastThreat) -> std::cmp::Ordering {
    a.countdown
        .cmp(&b.countdown)
        .then(a.distance.cmp(&b.distance))
        .then_with(|| a.bomb_id.cmp(&b.bomb_id))
}
