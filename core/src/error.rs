use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size {}x{} has no cells", .size.0, .size.1)]
    InvalidSize { size: Coord2 },
    #[error("Cannot place {mines} mines, only {eligible} cells are eligible")]
    InvalidMineCount {
        mines: CellCount,
        eligible: CellCount,
    },
    #[error("Coordinates {coords:?} are outside the board")]
    InvalidCoords { coords: Coord2 },
}

impl GameError {
    /// Whether the error comes from an unusable board configuration.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidSize { .. } | Self::InvalidMineCount { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
