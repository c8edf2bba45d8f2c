use thiserror::Error;

/// Errors that can occur in the Mancala engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MancalaError {
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid side: {0} (expected 0 or 1)")]
    InvalidSide(i64),

    #[error("Illegal move: pocket {pocket} for side {side}")]
    IllegalMove { side: u8, pocket: usize },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for Mancala operations
pub type Result<T> = std::result::Result<T, MancalaError>;
