use blastgrid_engine::{PlayerId, TileClass};
use blastgrid_evaluator::{blast::BlastThreat, cell_analysis::CellAnalysis, safety::Safety};
use serde::Serialize;

/// Threat report of a whole board, as seen by one player.
#[derive(Debug, Clone, Serialize)]
pub struct BoardReport {
    pub observer: PlayerId,
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellReport {
    pub x: i32,
    pub y: i32,
    pub tile: TileClass,
    pub safety: Safety,
    pub threatened: bool,
    pub safe: bool,
    pub scoring_potential: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_threat: Option<BlastThreat>,
}

impl CellReport {
    pub fn from_analysis(analysis: &CellAnalysis<'_>) -> Self {
        let position = analysis.position();
        Self {
            x: position.x,
            y: position.y,
            tile: analysis.tile(),
            safety: analysis.safety(),
            threatened: analysis.is_threatened(),
            safe: analysis.is_safe(),
            scoring_potential: analysis.has_scoring_potential(),
            earliest_threat: analysis.earliest_threat().cloned(),
        }
    }
}
