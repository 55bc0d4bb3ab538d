use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use blastgrid_engine::{GameSnapshot, PlayerId};
use blastgrid_evaluator::{cell_analysis, safety::Safety, tile_query::TileQuery};

use crate::{
    schema::report::{BoardReport, CellReport},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the game snapshot file (JSON format)
    snapshot: PathBuf,
    /// Player whose point of view is used for tile classification
    #[arg(long)]
    player: String,
    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    format: ReportFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        snapshot,
        player,
        format,
        output,
    } = arg;

    let snapshot = util::read_snapshot_file(snapshot)?;
    let report = build_report(&snapshot, &PlayerId::from(player.as_str()))?;
    tracing::info!(
        observer = %report.observer,
        threatened = report.cells.iter().filter(|c| c.threatened).count(),
        "analyzed board"
    );

    let mut output = Output::from_output_path(output.clone())?;
    match format {
        ReportFormat::Text => output.write_text(&render_text(&report))?,
        ReportFormat::Json => output.write_json(&report)?,
    }
    Ok(())
}

fn build_report(snapshot: &GameSnapshot, observer: &PlayerId) -> anyhow::Result<BoardReport> {
    let query = TileQuery::new(snapshot, observer)
        .with_context(|| format!("Cannot analyze the board as player '{observer}'"))?;
    let cells = cell_analysis::analyze_board(query)
        .map(|cell| CellReport::from_analysis(&cell))
        .collect();
    Ok(BoardReport {
        observer: observer.clone(),
        tick: snapshot.tick(),
        width: snapshot.width(),
        height: snapshot.height(),
        cells,
    })
}

fn safety_mark(cell: &CellReport) -> char {
    match cell.safety {
        Safety::Safe => '.',
        Safety::Threatened => '!',
        Safety::Burning => '*',
    }
}

fn scoring_mark(cell: &CellReport) -> char {
    if cell.scoring_potential { 'o' } else { '.' }
}

/// Renders the tile, safety and scoring grids side by side.
fn render_text(report: &BoardReport) -> String {
    let col = report.width.max("scoring".len()) + 2;
    let mut text = String::new();
    writeln!(
        text,
        "tick {} as {} ({}x{})",
        report.tick, report.observer, report.width, report.height
    )
    .unwrap();
    writeln!(text, "{:<col$}{:<col$}scoring", "tiles", "safety").unwrap();
    for row in report.cells.chunks(report.width) {
        let tiles: String = row.iter().map(|c| c.tile.as_char()).collect();
        let safety: String = row.iter().map(safety_mark).collect();
        let scoring: String = row.iter().map(scoring_mark).collect();
        writeln!(text, "{tiles:<col$}{safety:<col$}{scoring}").unwrap();
    }
    writeln!(
        text,
        "legend: @ you, E enemy, B bomb, * fire, # block, + breakable, $ bonus; \
         ! threatened, * burning; o scoring potential"
    )
    .unwrap();
    text
}
