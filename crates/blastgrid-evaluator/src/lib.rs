//! Threat analysis for the bomb-placement grid game.
//!
//! Every query in this crate is a pure function of an immutable
//! [`GameSnapshot`](blastgrid_engine::GameSnapshot). Nothing is cached across
//! snapshots, so analyses for different cells or different observers can run
//! on separate threads sharing one borrowed snapshot.
//!
//! # Architecture
//!
//! ```text
//! Feature Extraction (fixed-size vector around the observer)
//!     ↓ uses
//! Cell Analysis (lazy per-cell bundle of the queries below)
//!     ↓ uses
//! Tile Safety / Scoring Potential
//!     ↓ uses
//! Blast Propagation (ray casting from a cell)
//!     ↓ uses
//! Tile Query (observer-relative classification, off-board = Block)
//! ```
//!
//! - [`tile_query`] - classifies a coordinate relative to an observing player
//! - [`blast`] - casts the four cardinal rays and reports bombs whose blast reaches the origin
//! - [`safety`] - a cell is safe when it is neither burning nor threatened
//! - [`scoring`] - one-hop heuristic: a breakable block or an enemy next to the cell
//! - [`cell_analysis`] - bundles the above for one cell, computing each part on demand
//! - [`feature`] - thin fixed-size feature vector builder consumed by external policies
//!
//! # Example
//!
//! ```
//! use blastgrid_engine::{Board, Bomb, GameSnapshot, Player, PlayerId, Position, TileClass};
//! use blastgrid_evaluator::{blast, tile_query::TileQuery};
//!
//! let board = Board::empty(7, 7)?;
//! let snapshot = GameSnapshot::builder(board)
//!     .player(Player::new("p1", Position::new(3, 5)))
//!     .bomb("b1", Bomb::new(Position::new(3, 3), 2, 5))
//!     .build()?;
//!
//! assert!(blast::is_threatened(&snapshot, Position::new(3, 5)));
//!
//! let query = TileQuery::new(&snapshot, &PlayerId::from("p1"))?;
//! assert_eq!(query.classify(Position::new(-1, 2)), TileClass::Block);
//! assert!(!query.is_safe(Position::new(3, 5)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use blastgrid_engine::PlayerId;

pub mod blast;
pub mod cell_analysis;
pub mod feature;
pub mod safety;
pub mod scoring;
pub mod tile_query;

#[cfg(test)]
pub(crate) mod test_util;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    /// The observer is not part of the snapshot. This is a caller bug.
    #[display("observer '{id}' is not present in the snapshot")]
    UnknownObserver {
        #[error(not(source))]
        id: PlayerId,
    },
    #[display("feature count does not match, expected {expected}, received {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
}
