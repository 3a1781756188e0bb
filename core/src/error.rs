use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Location ({x}, {y}) is outside the minefield")]
    OutOfBounds { x: i64, y: i64 },
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

impl GameError {
    pub const fn is_out_of_bounds(self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    pub const fn is_invalid_state(self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
