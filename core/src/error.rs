use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least 8 cells wide and 1 cell tall")]
    InvalidDimensions,
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Source cell holds no card")]
    EmptySource,
    #[error("No cell is selected")]
    NothingSelected,
    #[error("Unrecognized suit or rank")]
    InvalidCardText,
    #[error("Card appears more than once")]
    DuplicateCard,
}

pub type Result<T> = core::result::Result<T, GameError>;
