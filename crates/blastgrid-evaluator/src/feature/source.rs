//! Feature source types for extracting values around the observer.
//!
//! Each source reads one number off a [`CellAnalysis`] of the observer's own
//! cell. Tile-valued sources report [`TileClass::code`]; flag-valued sources
//! report `0.0` or `1.0`.

use std::fmt;

use blastgrid_engine::{Direction, TileClass};

use crate::{cell_analysis::CellAnalysis, safety};

#[must_use]
pub fn all_feature_sources() -> Vec<BoxedFeatureSource> {
    let mut sources: Vec<BoxedFeatureSource> = vec![];
    // surroundings
    for distance in [1, 2] {
        for direction in Direction::ALL {
            sources.push(Box::new(NeighborTile::new(direction, distance)));
        }
    }
    // danger
    sources.push(Box::new(StandingOnBomb));
    sources.push(Box::new(InBlastPath));
    for direction in Direction::ALL {
        sources.push(Box::new(NeighborSafe::new(direction)));
    }
    // opportunity
    sources.push(Box::new(ScoringPotential));
    sources
}

pub trait FeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedFeatureSource;
    #[must_use]
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32;
}

pub type BoxedFeatureSource = Box<dyn FeatureSource>;

impl Clone for BoxedFeatureSource {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl FeatureSource for BoxedFeatureSource {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedFeatureSource {
        self.as_ref().clone_boxed()
    }

    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        self.as_ref().extract(analysis)
    }
}

/// Class of the tile `distance` cells away in `direction`.
///
/// Off-board cells report [`TileClass::Block`].
#[derive(Debug, Clone)]
pub struct NeighborTile {
    direction: Direction,
    distance: i32,
    id: String,
    name: String,
}

impl NeighborTile {
    #[must_use]
    pub fn new(direction: Direction, distance: i32) -> Self {
        Self {
            direction,
            distance,
            id: format!("tile_{direction}_{distance}"),
            name: format!("Tile {distance} {direction}"),
        }
    }
}

impl FeatureSource for NeighborTile {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn clone_boxed(&self) -> BoxedFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        let pos = analysis.position().offset(self.direction, self.distance);
        f32::from(analysis.query().classify(pos).code())
    }
}

/// Whether a live bomb lies on the analysed cell.
#[derive(Debug, Clone)]
pub struct StandingOnBomb;

impl FeatureSource for StandingOnBomb {
    fn id(&self) -> &'static str {
        "standing_on_bomb"
    }
    fn name(&self) -> &'static str {
        "Standing on Bomb"
    }
    fn clone_boxed(&self) -> BoxedFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        f32::from(analysis.has_bomb())
    }
}

/// Whether any bomb's blast reaches the analysed cell.
#[derive(Debug, Clone)]
pub struct InBlastPath;

impl FeatureSource for InBlastPath {
    fn id(&self) -> &'static str {
        "in_blast_path"
    }
    fn name(&self) -> &'static str {
        "In Blast Path"
    }
    fn clone_boxed(&self) -> BoxedFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        f32::from(analysis.is_threatened())
    }
}

/// Whether no fire or blast reaches the adjacent cell in `direction`.
///
/// This is `1.0` for walls and off-board cells too, since nothing threatens
/// them. It does not mean the cell can be entered; the tile features carry that.
#[derive(Debug, Clone)]
pub struct NeighborSafe {
    direction: Direction,
    id: String,
    name: String,
}

impl NeighborSafe {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            id: format!("safe_{direction}"),
            name: format!("Safe {direction}"),
        }
    }
}

impl FeatureSource for NeighborSafe {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn clone_boxed(&self) -> BoxedFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        let pos = analysis.position().step(self.direction);
        let tile: TileClass = analysis.query().classify(pos);
        f32::from(safety::is_safe(analysis.snapshot(), tile, pos))
    }
}

/// Whether a bomb dropped on the analysed cell could hit a breakable block or an enemy.
#[derive(Debug, Clone)]
pub struct ScoringPotential;

impl FeatureSource for ScoringPotential {
    fn id(&self) -> &'static str {
        "scoring_potential"
    }
    fn name(&self) -> &'static str {
        "Scoring Potential"
    }
    fn clone_boxed(&self) -> BoxedFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, analysis: &CellAnalysis<'_>) -> f32 {
        f32::from(analysis.has_scoring_potential())
    }
}
