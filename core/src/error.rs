use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid grid dimensions {0:?}")]
    InvalidDimension(Coord2),
    #[error("Cannot place {requested} mines, only {available} cells are free")]
    InfeasibleMineCount {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
