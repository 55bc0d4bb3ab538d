//! Per-cell bundle of the threat queries.
//!
//! [`CellAnalysis`] answers every question about one cell for one observer:
//! its classification, the bombs threatening it, whether it is safe and
//! whether bombing it could score. Each part is computed on first access and
//! cached, so a consumer that only needs the tile class never casts a ray.

use std::cell::OnceCell;

use blastgrid_engine::{GameSnapshot, Position, TileClass};

use crate::{
    blast::{self, BlastThreat},
    safety::Safety,
    tile_query::TileQuery,
};

#[derive(Debug)]
pub struct CellAnalysis<'a> {
    query: TileQuery<'a>,
    position: Position,
    tile: OnceCell<TileClass>,
    threats: OnceCell<Vec<BlastThreat>>,
    scoring_potential: OnceCell<bool>,
}

impl<'a> CellAnalysis<'a> {
    #[must_use]
    pub fn new(query: TileQuery<'a>, position: Position) -> Self {
        Self {
            query,
            position,
            tile: OnceCell::new(),
            threats: OnceCell::new(),
            scoring_potential: OnceCell::new(),
        }
    }

    /// Analysis of the cell the observer stands on.
    #[must_use]
    pub fn at_observer(query: TileQuery<'a>) -> Self {
        Self::new(query, query.observer().position)
    }

    #[must_use]
    pub fn query(&self) -> TileQuery<'a> {
        self.query
    }

    #[must_use]
    pub fn snapshot(&self) -> &'a GameSnapshot {
        self.query.snapshot()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn tile(&self) -> TileClass {
        *self.tile.get_or_init(|| self.query.classify(self.position))
    }

    /// Every bomb whose blast reaches the cell. See [`blast::threats`].
    #[must_use]
    pub fn threats(&self) -> &[BlastThreat] {
        self.threats
            .get_or_init(|| blast::threats(self.snapshot(), self.position))
    }

    #[must_use]
    pub fn is_threatened(&self) -> bool {
        !self.threats().is_empty()
    }

    /// See [`blast::earliest_threat`].
    #[must_use]
    pub fn earliest_threat(&self) -> Option<&BlastThreat> {
        self.threats().iter().min_by(|a, b| blast::earliest_first(a, b))
    }

    #[must_use]
    pub fn safety(&self) -> Safety {
        if self.tile() == TileClass::Explosion {
            Safety::Burning
        } else if self.is_threatened() {
            Safety::Threatened
        } else {
            Safety::Safe
        }
    }

    /// Same verdict as [`crate::safety::is_safe`], reusing the cached threats.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.safety().is_safe()
    }

    #[must_use]
    pub fn has_scoring_potential(&self) -> bool {
        *self
            .scoring_potential
            .get_or_init(|| self.query.has_scoring_potential(self.position))
    }

    /// Whether the observer is standing on a live bomb.
    #[must_use]
    pub fn has_bomb(&self) -> bool {
        self.snapshot().has_bomb_at(self.position)
    }
}

/// Analyses every on-board cell of the query's snapshot in row-major order.
pub fn analyze_board<'a>(query: TileQuery<'a>) -> impl Iterator<Item = CellAnalysis<'a>> {
    query
        .snapshot()
        .board()
        .positions()
        .map(move |pos| CellAnalysis::new(query, pos))
}
