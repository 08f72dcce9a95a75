use crate::engine::Tile;

/// Recoverable failures surfaced by the engine and session.
///
/// None of these leave the board or score modified.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid tile value {0}; cells hold 0 or a power of two >= 2")]
    InvalidTile(Tile),
    #[error("unknown direction {0:?}; expected up, down, left or right")]
    InvalidDirection(String),
    #[error("invalid tile value {0}; must be a power of two between 2 and 32768")]
    InvalidDebugValue(Tile),
    #[error("coordinates ({x}, {y}) out of range; x and y must be between 0 and 3")]
    InvalidDebugCoordinate { x: usize, y: usize },
    #[error("initials must be exactly three letters, got {0:?}")]
    InvalidInitials(String),
    #[error("game is over; restart to keep playing")]
    GameOver,
    #[error("game is still in progress")]
    NotGameOver,
}
