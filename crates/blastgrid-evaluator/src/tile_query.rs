//! Observer-relative tile classification.
//!
//! [`TileQuery`] binds a snapshot to an observing player, so that every
//! classification made through it reports the observer's own cell as
//! [`TileClass::Player`] and other players' cells as [`TileClass::Enemy`].
//! There is no ambient "current player": the observer travels with the query.
//!
//! Coordinates outside the board are not an error. They classify as
//! [`TileClass::Block`], which makes the board edge indistinguishable from a
//! solid wall for every consumer.

use blastgrid_engine::{GameSnapshot, Player, PlayerId, Position, Terrain, TileClass};

use crate::{AnalysisError, safety, scoring};

#[derive(Debug, Clone, Copy)]
pub struct TileQuery<'a> {
    snapshot: &'a GameSnapshot,
    observer: &'a Player,
}

impl<'a> TileQuery<'a> {
    /// Binds `snapshot` to the player `observer`.
    ///
    /// Fails with [`AnalysisError::UnknownObserver`] when the snapshot has no
    /// such player.
    pub fn new(snapshot: &'a GameSnapshot, observer: &PlayerId) -> Result<Self, AnalysisError> {
        let observer = snapshot
            .player(observer)
            .ok_or_else(|| AnalysisError::UnknownObserver {
                id: observer.clone(),
            })?;
        Ok(Self { snapshot, observer })
    }

    #[must_use]
    pub fn snapshot(&self) -> &'a GameSnapshot {
        self.snapshot
    }

    #[must_use]
    pub fn observer(&self) -> &'a Player {
        self.observer
    }

    /// Classifies the cell at `pos`.
    ///
    /// Walls come first, then fire, then bombs, then living players, then
    /// bonuses. A player standing on a burning cell or on a bomb is therefore
    /// reported as [`TileClass::Explosion`] or [`TileClass::Bomb`].
    #[must_use]
    pub fn classify(&self, pos: Position) -> TileClass {
        let Some(terrain) = self.snapshot.board().terrain(pos) else {
            return TileClass::Block;
        };
        match terrain {
            Terrain::Block => return TileClass::Block,
            Terrain::BreakableBlock => return TileClass::BreakableBlock,
            Terrain::Explosion => return TileClass::Explosion,
            Terrain::Empty => {}
        }
        if self.snapshot.has_bomb_at(pos) {
            return TileClass::Bomb;
        }

        let mut occupants = self.snapshot.players_at(pos).peekable();
        if occupants.peek().is_some() {
            return if occupants.any(|p| p.id == self.observer.id) {
                TileClass::Player
            } else {
                TileClass::Enemy
            };
        }

        if self.snapshot.bonus_at(pos).is_some() {
            return TileClass::Bonus;
        }
        TileClass::FreeSpace
    }

    /// See [`safety::is_safe`].
    #[must_use]
    pub fn is_safe(&self, pos: Position) -> bool {
        safety::is_safe(self.snapshot, self.classify(pos), pos)
    }

    /// See [`scoring::has_scoring_potential`].
    #[must_use]
    pub fn has_scoring_potential(&self, pos: Position) -> bool {
        scoring::scoring_targets(*self, pos).next().is_some()
    }
}

/// One-shot classification of `pos` as seen by `observer`.
pub fn classify(
    snapshot: &GameSnapshot,
    pos: Position,
    observer: &PlayerId,
) -> Result<TileClass, AnalysisError> {
    Ok(TileQuery::new(snapshot, observer)?.classify(pos))
}

#[cfg(test)]
mod tests {
    use blastgrid_engine::{Board, Bomb};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::test_util::{ME, empty_board, me, parse_board};

    #[test]
    fn test_out_of_bounds_is_block() {
        let snapshot = empty_board(5, 4)
            .player(Player::new(ME, Position::new(0, 0)))
            .build()
            .unwrap();
        assert_eq!(
            classify(&snapshot, Position::new(-1, 2), &me()).unwrap(),
            TileClass::Block
        );
    }

    #[test]
    fn test_out_of_bounds_is_block_everywhere() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let width = rng.random_range(1..12_usize);
            let height = rng.random_range(1..12_usize);
            let snapshot = empty_board(width, height)
                .player(Player::new(ME, Position::new(0, 0)))
                .build()
                .unwrap();
            let query = TileQuery::new(&snapshot, &me()).unwrap();

            let w = i32::try_from(width).unwrap();
            let h = i32::try_from(height).unwrap();
            let x = rng.random_range(-20..w + 20);
            let y = if (0..w).contains(&x) {
                // x is on the board, so push y off it
                if rng.random_bool(0.5) {
                    rng.random_range(-20..0)
                } else {
                    rng.random_range(h..h + 20)
                }
            } else {
                rng.random_range(-20..h + 20)
            };
            let pos = Position::new(x, y);
            assert_eq!(
                query.classify(pos),
                TileClass::Block,
                "{pos} on a {width}x{height} board should be Block"
            );
        }
    }

    #[test]
    fn test_extreme_coordinates_are_block() {
        let snapshot = parse_board("@+").build().unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        for (x, y) in [
            (i32::MIN, i32::MIN),
            (i32::MIN, i32::MAX),
            (i32::MAX, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MAX, 0),
        ] {
            let pos = Position::new(x, y);
            assert_eq!(query.classify(pos), TileClass::Block, "{pos}");
            assert!(query.is_safe(pos), "{pos}");
            assert!(!query.has_scoring_potential(pos), "{pos}");
        }
    }

    #[test]
    fn test_terrain_classes() {
        let snapshot = parse_board(
            "
            @#+
            *$.
            ",
        )
        .build()
        .unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        assert_eq!(query.classify(Position::new(0, 0)), TileClass::Player);
        assert_eq!(query.classify(Position::new(1, 0)), TileClass::Block);
        assert_eq!(query.classify(Position::new(2, 0)), TileClass::BreakableBlock);
        assert_eq!(query.classify(Position::new(0, 1)), TileClass::Explosion);
        assert_eq!(query.classify(Position::new(1, 1)), TileClass::Bonus);
        assert_eq!(query.classify(Position::new(2, 1)), TileClass::FreeSpace);
    }

    #[test]
    fn test_classification_is_observer_relative() {
        let snapshot = parse_board("@.E").build().unwrap();
        let mine = TileQuery::new(&snapshot, &me()).unwrap();
        let theirs = TileQuery::new(&snapshot, &PlayerId::from("e0")).unwrap();

        assert_eq!(mine.classify(Position::new(0, 0)), TileClass::Player);
        assert_eq!(mine.classify(Position::new(2, 0)), TileClass::Enemy);
        assert_eq!(theirs.classify(Position::new(0, 0)), TileClass::Enemy);
        assert_eq!(theirs.classify(Position::new(2, 0)), TileClass::Player);
    }

    #[test]
    fn test_bomb_and_fire_override_players() {
        let snapshot = parse_board("@E")
            .bomb("b1", Bomb::new(Position::new(0, 0), 1, 3))
            .bomb("b2", Bomb::new(Position::new(1, 0), 1, 3))
            .build()
            .unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        assert_eq!(query.classify(Position::new(0, 0)), TileClass::Bomb);
        assert_eq!(query.classify(Position::new(1, 0)), TileClass::Bomb);

        let burning = Board::from_tiles(2, 1, "*.").unwrap();
        let snapshot = GameSnapshot::builder(burning)
            .player(Player::new(ME, Position::new(0, 0)))
            .bomb("b1", Bomb::new(Position::new(0, 0), 1, 3))
            .build()
            .unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        assert_eq!(query.classify(Position::new(0, 0)), TileClass::Explosion);
    }

    #[test]
    fn test_dead_enemy_is_not_reported() {
        let mut enemy = Player::new("e0", Position::new(1, 0));
        enemy.is_alive = false;
        let snapshot = parse_board("@.").player(enemy).build().unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        assert_eq!(query.classify(Position::new(1, 0)), TileClass::FreeSpace);
    }

    #[test]
    fn test_observer_sharing_cell_sees_itself() {
        let snapshot = parse_board("@.")
            .player(Player::new("e0", Position::new(0, 0)))
            .build()
            .unwrap();
        let query = TileQuery::new(&snapshot, &me()).unwrap();
        assert_eq!(query.classify(Position::new(0, 0)), TileClass::Player);
    }

    #[test]
    fn test_unknown_observer_fails_fast() {
        let snapshot = parse_board("@.").build().unwrap();
        let err = classify(&snapshot, Position::new(0, 0), &PlayerId::from("ghost")).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnknownObserver {
                id: PlayerId::from("ghost")
            }
        );
        assert_eq!(
            err.to_string(),
            "observer 'ghost' is not present in the snapshot"
        );
    }
}
