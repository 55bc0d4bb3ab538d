//! Immutable point-in-time view of a game.
//!
//! [`GameSnapshot`] owns the board and the entity collections and keeps a
//! per-cell index of them, so that "what stands on this cell" is answered in
//! constant time while rays are cast across the board.
//!
//! Snapshots are validated on construction: every entity must lie on the
//! board. Once built they are never mutated; analysis code only borrows them.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    EntityKind, SnapshotError,
    core::{Board, Bomb, BombId, Bonus, BonusId, Player, PlayerId, Position},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData", into = "SnapshotData")]
pub struct GameSnapshot {
    tick: u64,
    board: Board,
    players: BTreeMap<PlayerId, Player>,
    bombs: BTreeMap<BombId, Bomb>,
    bonuses: BTreeMap<BonusId, Bonus>,
    players_by_cell: HashMap<Position, Vec<PlayerId>>,
    bombs_by_cell: HashMap<Position, Vec<BombId>>,
    bonuses_by_cell: HashMap<Position, BonusId>,
}

impl GameSnapshot {
    #[must_use]
    pub fn builder(board: Board) -> SnapshotBuilder {
        SnapshotBuilder {
            tick: 0,
            board,
            players: BTreeMap::new(),
            bombs: BTreeMap::new(),
            bonuses: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.board.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.board.height()
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn bombs(&self) -> impl Iterator<Item = (&BombId, &Bomb)> {
        self.bombs.iter()
    }

    /// Bombs lying on `pos`. Usually zero or one.
    pub fn bombs_at(&self, pos: Position) -> impl Iterator<Item = (&BombId, &Bomb)> {
        self.bombs_by_cell
            .get(&pos)
            .into_iter()
            .flatten()
            .map(|id| (id, &self.bombs[id]))
    }

    #[must_use]
    pub fn has_bomb_at(&self, pos: Position) -> bool {
        self.bombs_by_cell.contains_key(&pos)
    }

    /// Living players standing on `pos`.
    pub fn players_at(&self, pos: Position) -> impl Iterator<Item = &Player> {
        self.players_by_cell
            .get(&pos)
            .into_iter()
            .flatten()
            .map(|id| &self.players[id])
    }

    #[must_use]
    pub fn bonus_at(&self, pos: Position) -> Option<(&BonusId, &Bonus)> {
        let id = self.bonuses_by_cell.get(&pos)?;
        Some((id, &self.bonuses[id]))
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    tick: u64,
    board: Board,
    players: BTreeMap<PlayerId, Player>,
    bombs: BTreeMap<BombId, Bomb>,
    bonuses: BTreeMap<BonusId, Bonus>,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Adds a player, replacing any player with the same id.
    #[must_use]
    pub fn player(mut self, player: Player) -> Self {
        self.players.insert(player.id.clone(), player);
        self
    }

    #[must_use]
    pub fn bomb(mut self, id: impl Into<BombId>, bomb: Bomb) -> Self {
        self.bombs.insert(id.into(), bomb);
        self
    }

    #[must_use]
    pub fn bonus(mut self, id: impl Into<BonusId>, bonus: Bonus) -> Self {
        self.bonuses.insert(id.into(), bonus);
        self
    }

    pub fn build(self) -> Result<GameSnapshot, SnapshotError> {
        let Self {
            tick,
            board,
            players,
            bombs,
            bonuses,
        } = self;

        let check = |kind, id: &str, position| {
            if board.contains(position) {
                Ok(())
            } else {
                Err(SnapshotError::EntityOutOfBounds {
                    kind,
                    id: id.to_owned(),
                    position,
                })
            }
        };

        let mut players_by_cell: HashMap<Position, Vec<PlayerId>> = HashMap::new();
        for (id, player) in &players {
            if !player.is_alive {
                continue;
            }
            check(EntityKind::Player, id.as_str(), player.position)?;
            players_by_cell
                .entry(player.position)
                .or_default()
                .push(id.clone());
        }

        let mut bombs_by_cell: HashMap<Position, Vec<BombId>> = HashMap::new();
        for (id, bomb) in &bombs {
            check(EntityKind::Bomb, id.as_str(), bomb.position)?;
            bombs_by_cell.entry(bomb.position).or_default().push(id.clone());
        }

        let mut bonuses_by_cell = HashMap::new();
        for (id, bonus) in &bonuses {
            check(EntityKind::Bonus, id.as_str(), bonus.position)?;
            bonuses_by_cell.insert(bonus.position, id.clone());
        }

        Ok(GameSnapshot {
            tick,
            board,
            players,
            bombs,
            bonuses,
            players_by_cell,
            bombs_by_cell,
            bonuses_by_cell,
        })
    }
}

/// Wire representation of the game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotData {
    #[serde(default)]
    tick: u64,
    width: usize,
    height: usize,
    tiles: String,
    players: BTreeMap<String, Player>,
    #[serde(default)]
    bombs: BTreeMap<BombId, Bomb>,
    #[serde(default)]
    bonuses: BTreeMap<BonusId, Bonus>,
}

impl TryFrom<SnapshotData> for GameSnapshot {
    type Error = SnapshotError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        let board = Board::from_tiles(data.width, data.height, &data.tiles)?;
        let mut builder = GameSnapshot::builder(board).tick(data.tick);
        // Players are keyed by their own `id`; the map key is redundant on the wire.
        for player in data.players.into_values() {
            builder = builder.player(player);
        }
        for (id, bomb) in data.bombs {
            builder = builder.bomb(id, bomb);
        }
        for (id, bonus) in data.bonuses {
            builder = builder.bonus(id, bonus);
        }
        builder.build()
    }
}

impl From<GameSnapshot> for SnapshotData {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            tick: snapshot.tick,
            width: snapshot.board.width(),
            height: snapshot.board.height(),
            tiles: snapshot.board.to_tiles(),
            players: snapshot
                .players
                .into_iter()
                .map(|(id, p)| (id.as_str().to_owned(), p))
                .collect(),
            bombs: snapshot.bombs,
            bonuses: snapshot.bonuses,
        }
    }
}
