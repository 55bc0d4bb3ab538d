use serde::{Deserialize, Serialize};

/// Static content of a board cell, as stored in the tile string.
///
/// Bombs, players and bonuses are not terrain; they are tracked separately by
/// [`GameSnapshot`](crate::GameSnapshot) and overlay the terrain when a tile is
/// classified.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(derive_more::IsVariant)]
#[repr(u8)]
pub enum Terrain {
    /// Walkable floor.
    #[default]
    Empty,
    /// Indestructible wall.
    Block,
    /// Wall that a blast destroys.
    BreakableBlock,
    /// Cell currently on fire.
    Explosion,
}

impl Terrain {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Block => '#',
            Terrain::BreakableBlock => '+',
            Terrain::Explosion => '*',
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Terrain::Empty),
            '#' => Some(Terrain::Block),
            '+' => Some(Terrain::BreakableBlock),
            '*' => Some(Terrain::Explosion),
            _ => None,
        }
    }

    /// Whether a blast travelling through this cell stops here.
    #[must_use]
    pub const fn is_blast_opaque(self) -> bool {
        matches!(self, Terrain::Block | Terrain::BreakableBlock)
    }
}

/// Classification of a cell as seen by one observing player.
///
/// The discriminant is the stable numeric code used when tiles are exported
/// as features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(derive_more::Display, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileClass {
    #[display("free_space")]
    FreeSpace = 0,
    #[display("block")]
    Block = 1,
    #[display("breakable_block")]
    BreakableBlock = 2,
    #[display("bomb")]
    Bomb = 3,
    #[display("explosion")]
    Explosion = 4,
    #[display("bonus")]
    Bonus = 5,
    #[display("enemy")]
    Enemy = 6,
    #[display("player")]
    Player = 7,
}

impl TileClass {
    pub const ALL: [TileClass; 8] = [
        TileClass::FreeSpace,
        TileClass::Block,
        TileClass::BreakableBlock,
        TileClass::Bomb,
        TileClass::Explosion,
        TileClass::Bonus,
        TileClass::Enemy,
        TileClass::Player,
    ];

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Single-character glyph used by text renderings.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            TileClass::FreeSpace => '.',
            TileClass::Block => '#',
            TileClass::BreakableBlock => '+',
            TileClass::Bomb => 'B',
            TileClass::Explosion => '*',
            TileClass::Bonus => '$',
            TileClass::Enemy => 'E',
            TileClass::Player => '@',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_char_roundtrip() {
        for terrain in [
            Terrain::Empty,
            Terrain::Block,
            Terrain::BreakableBlock,
            Terrain::Explosion,
        ] {
            assert_eq!(Terrain::from_char(terrain.as_char()), Some(terrain));
        }
        assert_eq!(Terrain::from_char('x'), None);
    }

    #[test]
    fn test_only_walls_stop_blasts() {
        assert!(Terrain::Block.is_blast_opaque());
        assert!(Terrain::BreakableBlock.is_blast_opaque());
        assert!(!Terrain::Empty.is_blast_opaque());
        assert!(!Terrain::Explosion.is_blast_opaque());
    }

    #[test]
    fn test_tile_class_codes_are_sequential() {
        for (i, class) in TileClass::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(class.code()), i, "unexpected code for {class}");
        }
    }
}
