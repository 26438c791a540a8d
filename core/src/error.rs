use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size must be at least 1")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape is not a square grid")]
    InvalidBoardShape,
    #[error("No such level")]
    InvalidLevel,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
