//! One-hop scoring heuristic.
//!
//! A bomb dropped on a cell is likely to pay off when a breakable block or an
//! enemy sits right next to it. Only the four orthogonal neighbours are
//! inspected: blast range and chain reactions are not modelled.

use blastgrid_engine::{Direction, GameSnapshot, PlayerId, Position, TileClass};

use crate::{AnalysisError, tile_query::TileQuery};

/// Neighbours of `pos` that a bomb there could score on, with their class.
pub fn scoring_targets(
    query: TileQuery<'_>,
    pos: Position,
) -> impl Iterator<Item = (Direction, TileClass)> + '_ {
    pos.neighbors()
        .map(move |(d, n)| (d, query.classify(n)))
        .filter(|(_, class)| matches!(class, TileClass::BreakableBlock | TileClass::Enemy))
}

/// Whether a breakable block or an enemy is adjacent to `pos`, as seen by `observer`.
pub fn has_scoring_potential(
    snapshot: &GameSnapshot,
    pos: Position,
    observer: &PlayerId,
) -> Result<bool, AnalysisError> {
    Ok(TileQuery::new(snapshot, observer)?.has_scoring_potential(pos))
}

#[cfg(test)]
mod tests {
    use blastgrid_engine::Bomb;

    use super::*;
    use crate::test_util::{me, parse_board};

    #[test]
    fn test_breakable_neighbor_scores() {
        let with_block = parse_board(
            "
            .....
            .@+..
            .....
            ",
        )
        .build()
        .unwrap();
        assert!(has_scoring_potential(&with_block, Position::new(1, 1), &me()).unwrap());

        let without_block = parse_board(
            "
            .....
            .@...
            .....
            ",
        )
        .build()
        .unwrap();
        assert!(!has_scoring_potential(&without_block, Position::new(1, 1), &me()).unwrap());
    }

    #[test]
    fn test_enemy_neighbor_scores() {
        let snapshot = parse_board(
            "
            .E.
            .@.
            ...
            ",
        )
        .build()
        .unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        let targets: Vec<_> = scoring_targets(query, Position::new(1, 1)).collect();
        assert_eq!(targets, [(Direction::Up, TileClass::Enemy)]);
    }

    #[test]
    fn test_two_cells_away_does_not_score() {
        let snapshot = parse_board(
            "
            .......
            .@..+..
            .......
            ...E...
            ",
        )
        .build()
        .unwrap();
        assert!(!has_scoring_potential(&snapshot, Position::new(1, 1), &me()).unwrap());
        assert!(!has_scoring_potential(&snapshot, Position::new(2, 1), &me()).unwrap());
        assert!(has_scoring_potential(&snapshot, Position::new(3, 1), &me()).unwrap());
    }

    #[test]
    fn test_cell_itself_is_not_inspected() {
        let snapshot = parse_board(
            "
            ...
            .+.
            .@.
            ",
        )
        .build()
        .unwrap();
        // (1, 1) is breakable but has no scoring neighbour of its own.
        assert!(!has_scoring_potential(&snapshot, Position::new(1, 1), &me()).unwrap());
    }

    #[test]
    fn test_walls_bombs_and_self_do_not_score() {
        let snapshot = parse_board(
            "
            #.
            @.
            ",
        )
        .bomb("b1", Bomb::new(Position::new(1, 1), 1, 4))
        .build()
        .unwrap();
        // Edge, wall, bomb and the observer itself surround these cells.
        assert!(!has_scoring_potential(&snapshot, Position::new(0, 1), &me()).unwrap());
        assert!(!has_scoring_potential(&snapshot, Position::new(1, 0), &me()).unwrap());
    }

    #[test]
    fn test_extreme_coordinates_do_not_score() {
        let snapshot = parse_board("@+").build().unwrap();
        for pos in [
            Position::new(i32::MAX, 0),
            Position::new(i32::MIN, 0),
            Position::new(0, i32::MAX),
            Position::new(0, i32::MIN),
            Position::new(i32::MAX, i32::MAX),
            Position::new(i32::MIN, i32::MIN),
        ] {
            assert!(!has_scoring_potential(&snapshot, pos, &me()).unwrap(), "{pos}");
        }
    }

    #[test]
    fn test_scoring_rejects_unknown_observer() {
        let snapshot = parse_board("@+").build().unwrap();
        assert!(matches!(
            has_scoring_potential(&snapshot, Position::new(0, 0), &PlayerId::from("nobody")),
            Err(AnalysisError::UnknownObserver { .. })
        ));
    }
}
