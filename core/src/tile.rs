use serde::{Deserialize, Serialize};

/// Canonical state of a maze cell, never changed after generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeCell {
    #[default]
    Wall,
    Passage,
}

impl MazeCell {
    pub const fn is_passage(self) -> bool {
        matches!(self, Self::Passage)
    }
}

/// Ground truth and player-visible state of a single minefield cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineCell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the Moore neighbors, only meaningful on non-mine cells.
    pub neighbor_mines: u8,
}

impl MineCell {
    /// Neither revealed nor flagged, so a reveal may still open it.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
