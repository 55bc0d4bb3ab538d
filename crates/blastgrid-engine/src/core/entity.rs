use serde::{Deserialize, Serialize};

use super::position::Position;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[derive(derive_more::Display, derive_more::From)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of a player, unique within a snapshot.
    PlayerId
);
string_id!(
    /// Identifier of a bomb, unique within a snapshot.
    BombId
);
string_id!(
    /// Identifier of a bonus, unique within a snapshot.
    BonusId
);

/// A live bomb waiting to detonate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bomb {
    #[serde(flatten)]
    pub position: Position,
    /// Number of cells the blast reaches along each cardinal direction.
    pub range: u32,
    /// Ticks remaining until detonation.
    pub countdown: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

impl Bomb {
    #[must_use]
    pub fn new(position: Position, range: u32, countdown: u32) -> Self {
        Self {
            position,
            range,
            countdown,
            player_id: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Whether the blast covers a cell `distance` steps away along an unobstructed ray.
    #[must_use]
    pub fn reaches(&self, distance: u32) -> bool {
        self.range >= distance
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(flatten)]
    pub position: Position,
    pub bombs_left: u32,
    pub max_bombs: u32,
    pub bomb_range: u32,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
    #[serde(default)]
    pub score: i64,
}

fn default_alive() -> bool {
    true
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            bombs_left: 1,
            max_bombs: 1,
            bomb_range: 2,
            is_alive: true,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Raises the player's maximum bomb count.
    Bomb,
    /// Raises the player's blast range.
    Fire,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(flatten)]
    pub position: Position,
    pub kind: BonusKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bomb_reach_is_inclusive() {
        let bomb = Bomb::new(Position::new(0, 0), 2, 5);
        assert!(bomb.reaches(0));
        assert!(bomb.reaches(2));
        assert!(!bomb.reaches(3));
    }


    #[test]
    fn test_player_deserialize_defaults() {
        let json = r#"{"id":"p2","x":4,"y":1,"bombsLeft":0,"maxBombs":2,"bombRange":3}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, PlayerId::from("p2"));
        assert_eq!(player.position, Position::new(4, 1));
        assert_eq!(player.max_bombs, 2);
        assert!(player.is_alive);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_bomb_serializes_flat_position() {
        let bomb = Bomb::new(Position::new(3, 4), 2, 7).with_owner("p1".into());
        let value = serde_json::to_value(&bomb).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"x": 3, "y": 4, "range": 2, "countdown": 7, "playerId": "p1"})
        );
    }
}
