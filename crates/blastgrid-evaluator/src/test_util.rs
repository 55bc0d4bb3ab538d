use blastgrid_engine::{
    Board, Bonus, BonusKind, GameSnapshot, Player, PlayerId, Position, SnapshotBuilder, Terrain,
};

pub(crate) const ME: &str = "me";

pub(crate) fn me() -> PlayerId {
    PlayerId::from(ME)
}

/// Parses board art into a snapshot builder.
///
/// Terrain uses the tile string characters (`.`, `#`, `+`, `*`). On top of
/// that, `@` places the observer `me`, `E` places enemies `e0`, `e1`, ... in
/// reading order, and `$` places a fire bonus. Those cells have empty terrain.
/// Bombs are added by the caller.
pub(crate) fn parse_board(art: &str) -> SnapshotBuilder {
    let rows: Vec<&str> = art
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let height = rows.len();
    let width = rows[0].len();
    let mut board = Board::empty(width, height).unwrap();
    let mut players = vec![];
    let mut bonuses = vec![];
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width, "ragged board art at row {y}");
        for (x, ch) in row.chars().enumerate() {
            let pos = Position::new(i32::try_from(x).unwrap(), i32::try_from(y).unwrap());
            let terrain = match ch {
                '@' => {
                    players.push(Player::new(ME, pos));
                    Terrain::Empty
                }
                'E' => {
                    let id = format!("e{}", players.iter().filter(|p| p.id.as_str() != ME).count());
                    players.push(Player::new(id.as_str(), pos));
                    Terrain::Empty
                }
                '$' => {
                    bonuses.push(Bonus {
                        position: pos,
                        kind: BonusKind::Fire,
                    });
                    Terrain::Empty
                }
                ch => Terrain::from_char(ch).unwrap_or_else(|| panic!("unknown art char {ch:?}")),
            };
            board.set_terrain(pos, terrain);
        }
    }
    let mut builder = GameSnapshot::builder(board);
    for player in players {
        builder = builder.player(player);
    }
    for (i, bonus) in bonuses.into_iter().enumerate() {
        builder = builder.bonus(format!("x{i}").as_str(), bonus);
    }
    builder
}

pub(crate) fn empty_board(width: usize, height: usize) -> SnapshotBuilder {
    GameSnapshot::builder(Board::empty(width, height).unwrap())
}
