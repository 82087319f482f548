#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use maze::*;
pub use minefield::*;
pub use minesweeper::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod maze;
mod minefield;
mod minesweeper;
mod tile;
mod types;
mod view;

/// Named presets shared by both games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub size: Coord,
}

impl MazeConfig {
    pub const MIN_SIZE: Coord = 5;

    pub const fn new_unchecked(size: Coord) -> Self {
        Self { size }
    }

    /// Even sizes are rounded down to the previous odd size.
    pub fn new(size: Coord) -> Result<Self> {
        let odd_size = if size % 2 == 0 {
            size.saturating_sub(1)
        } else {
            size
        };
        if odd_size < Self::MIN_SIZE {
            return Err(PuzzleError::InvalidDimension((size, size)));
        }
        if odd_size != size {
            log::debug!("Maze size {} rounded down to {}", size, odd_size);
        }
        Ok(Self::new_unchecked(odd_size))
    }

    pub const fn preset(difficulty: Difficulty) -> Self {
        use Difficulty::*;
        match difficulty {
            Beginner => Self::new_unchecked(15),
            Intermediate => Self::new_unchecked(21),
            Expert => Self::new_unchecked(31),
        }
    }

    /// Re-checks a config that may have been built field by field.
    pub fn validated(self) -> Result<Self> {
        Self::new(self.size)
    }

    pub const fn dims(&self) -> Coord2 {
        (self.size, self.size)
    }

    pub const fn entry(&self) -> Coord2 {
        (1, 1)
    }

    pub const fn exit(&self) -> Coord2 {
        let last = self.size.saturating_sub(2);
        (last, last)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl MinefieldConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Accepts at most `rows * cols - 1` mines, the first revealed cell is always kept free.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::InvalidDimension(size));
        }
        let available = mult(rows, cols) - 1;
        if mines > available {
            return Err(PuzzleError::InfeasibleMineCount {
                requested: mines,
                available,
            });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn preset(difficulty: Difficulty) -> Self {
        use Difficulty::*;
        match difficulty {
            Beginner => Self::new_unchecked((9, 9), 10),
            Intermediate => Self::new_unchecked((16, 16), 40),
            Expert => Self::new_unchecked((16, 30), 99),
        }
    }

    pub fn validated(self) -> Result<Self> {
        Self::new(self.size, self.mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Result of asking a maze to move the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayerMove {
    pub accepted: bool,
    pub position: Coord2,
}
