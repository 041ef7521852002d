use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1x1")]
    InvalidSize,
    #[error("Board must hold at least one mine")]
    NoMines,
    #[error("Too many mines: {requested} requested but only {available} cells can hold one")]
    TooManyMines { requested: u16, available: u16 },
    #[error("Safe radius must be at least 1")]
    InvalidSafeRadius,
    #[error("Hazard relocation interval must be positive")]
    InvalidInterval,
    #[error("Mine layout does not match the configured board")]
    LayoutMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
