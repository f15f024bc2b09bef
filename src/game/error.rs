use thiserror::Error;

/// Configuration rejected before a game is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid extents must be positive, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("a {width}x{height} grid cannot hold both a snake and a candy")]
    GridTooSmall { width: usize, height: usize },

    #[error("frame interval must be greater than zero")]
    InvalidFrameInterval,

    #[error("point size must be greater than zero")]
    InvalidPointSize,

    #[error("invalid color {0:?}: expected #RGB or #RRGGBB")]
    InvalidColor(String),
}

/// Failures the engine can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a snake needs at least one segment")]
    EmptySnake,

    #[error("no free cell left for a candy: snake fills all {capacity} cells")]
    SpawnStarvation { capacity: usize },
}
