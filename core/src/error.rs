use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid cell index {index}, board has {cells} cells")]
    InvalidIndex { index: CellIndex, cells: CellCount },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Hazards were already generated for this board")]
    AlreadyGenerated,
    #[error("Hazards must be placed before any cell is revealed")]
    NotGenerated,
    #[error("Hazards can only be shown once the game is lost")]
    NotLost,
    #[error("Board width and height must be positive")]
    EmptyBoard,
    #[error("Hazard density must be within (0, 1), got {0}")]
    InvalidDensity(f64),
}

/// Broad category of a [`GameError`]. Every kind is a recoverable rejection:
/// the command that produced it had no effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidIndex,
    IllegalStateTransition,
    Configuration,
}

impl GameError {
    pub const fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidIndex { .. } => ErrorKind::InvalidIndex,
            AlreadyEnded | AlreadyGenerated | NotGenerated | NotLost => {
                ErrorKind::IllegalStateTransition
            }
            EmptyBoard | InvalidDensity(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            GameError::InvalidIndex { index: 9, cells: 9 }.kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(GameError::AlreadyEnded.kind(), ErrorKind::IllegalStateTransition);
        assert_eq!(GameError::AlreadyGenerated.kind(), ErrorKind::IllegalStateTransition);
        assert_eq!(GameError::NotGenerated.kind(), ErrorKind::IllegalStateTransition);
        assert_eq!(GameError::NotLost.kind(), ErrorKind::IllegalStateTransition);
        assert_eq!(GameError::EmptyBoard.kind(), ErrorKind::Configuration);
        assert_eq!(GameError::InvalidDensity(1.5).kind(), ErrorKind::Configuration);
    }

    #[test]
    fn messages_name_the_offending_value() {
        let message = GameError::InvalidIndex { index: 12, cells: 9 }.to_string();
        assert_eq!(message, "Invalid cell index 12, board has 9 cells");
    }
}
