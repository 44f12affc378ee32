use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell {index} is already occupied")]
    InvalidMove { index: usize },

    #[error("invalid move: no mark given")]
    UnsetMark,

    #[error("cell {index} is out of bounds (must be 0-8)")]
    InvalidPosition { index: usize },

    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },

    #[error("expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
