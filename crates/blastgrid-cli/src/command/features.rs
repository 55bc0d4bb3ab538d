use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use blastgrid_engine::{GameSnapshot, PlayerId};
use blastgrid_evaluator::feature::{DEFAULT_FEATURE_COUNT, FeatureExtractor, FeatureVector};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Path to the game snapshot file (JSON format)
    snapshot: PathBuf,
    /// Extract only this player's features (default: every living player)
    #[arg(long)]
    player: Option<String>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FeatureTable {
    feature_ids: Vec<String>,
    players: BTreeMap<PlayerId, FeatureVector<DEFAULT_FEATURE_COUNT>>,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg {
        snapshot,
        player,
        output,
    } = arg;

    let snapshot = util::read_snapshot_file(snapshot)?;
    let observers = match player {
        Some(id) => vec![PlayerId::from(id.as_str())],
        None => snapshot
            .players()
            .filter(|p| p.is_alive)
            .map(|p| p.id.clone())
            .collect(),
    };
    let table = extract_all(&snapshot, observers)?;
    tracing::info!(players = table.players.len(), "extracted feature vectors");

    Output::from_output_path(output.clone())?.write_json(&table)?;
    Ok(())
}

fn extract_all(
    snapshot: &GameSnapshot,
    observers: Vec<PlayerId>,
) -> anyhow::Result<FeatureTable> {
    let extractor = FeatureExtractor::default();
    let mut players = BTreeMap::new();
    for observer in observers {
        let features = extractor
            .extract::<DEFAULT_FEATURE_COUNT>(snapshot, &observer)
            .with_context(|| format!("Failed to extract features for player '{observer}'"))?;
        players.insert(observer, features);
    }
    Ok(FeatureTable {
        feature_ids: extractor.ids().map(str::to_owned).collect(),
        players,
    })
}

#[cfg(test)]
mod tests {
    use blastgrid_engine::{Board, Player, Position};

    use super::*;

    #[test]
    fn test_extract_all_players() {
        let board = Board::empty(5, 5).unwrap();
        let snapshot = GameSnapshot::builder(board)
            .player(Player::new("p1", Position::new(0, 0)))
            .player(Player::new("p2", Position::new(4, 4)))
            .build()
            .unwrap();
        let observers = snapshot.players().map(|p| p.id.clone()).collect();
        let table = extract_all(&snapshot, observers).unwrap();
        assert_eq!(table.feature_ids.len(), DEFAULT_FEATURE_COUNT);
        assert_eq!(table.players.len(), 2);

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["feature_ids"][0], "tile_up_1");
        assert_eq!(
            value["players"]["p1"].as_array().unwrap().len(),
            DEFAULT_FEATURE_COUNT
        );
    }

    #[test]
    fn test_extract_unknown_player_fails() {
        let snapshot = GameSnapshot::builder(Board::empty(2, 2).unwrap())
            .build()
            .unwrap();
        let err = extract_all(&snapshot, vec![PlayerId::from("p1")]).unwrap_err();
        assert!(format!("{err:#}").contains("player 'p1'"));
    }
}
