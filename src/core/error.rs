//! Error type shared by the simulation core.
//!
//! Recoverable player mistakes (not enough MP, nothing to cast) never reach
//! this type; they are written to the battle log and refused in place.

use thiserror::Error;

/// Kind of map entity being placed during world generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Enemy,
    Chest,
    Npc,
    Player,
}

impl std::fmt::Display for SpawnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpawnKind::Enemy => "enemy",
            SpawnKind::Chest => "chest",
            SpawnKind::Npc => "npc",
            SpawnKind::Player => "player",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unsatisfiable spawn: could not place {entity} after {attempts} attempts")]
    UnsatisfiableSpawn { entity: SpawnKind, attempts: u32 },

    #[error("acting character index {index} is outside the roster of {len}")]
    ActorOutOfRange { index: usize, len: usize },

    #[error("unknown enemy type '{0}'")]
    UnknownEnemyType(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid reference data: {0}")]
    InvalidReferenceData(String),

    #[error("failed to parse reference data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsatisfiable_spawn_message() {
        let err = GameError::UnsatisfiableSpawn {
            entity: SpawnKind::Chest,
            attempts: 1000,
        };
        assert_eq!(
            err.to_string(),
            "unsatisfiable spawn: could not place chest after 1000 attempts"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, serde_json::Error> = serde_json::from_str("nope");
        let err: GameError = parse.unwrap_err().into();
        assert!(matches!(err, GameError::Json(_)));
    }
}
