use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a maze cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeTile {
    Wall,
    Passage,
    Trail,
    Player,
    Goal,
}

/// What a renderer should draw for a minefield cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineTile {
    Hidden,
    Flagged,
    Mine,
    Open(u8),
}

impl MineTile {
    // whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl From<MineCell> for MineTile {
    fn from(cell: MineCell) -> Self {
        match cell {
            MineCell {
                is_flagged: true, ..
            } => Self::Flagged,
            MineCell {
                is_revealed: false,
                ..
            } => Self::Hidden,
            MineCell { is_mine: true, .. } => Self::Mine,
            MineCell { neighbor_mines, .. } => Self::Open(neighbor_mines),
        }
    }
}

impl MazeGame {
    pub fn tile_at(&self, coords: Coord2) -> MazeTile {
        if coords == self.player() {
            MazeTile::Player
        } else if coords == self.goal() {
            MazeTile::Goal
        } else if self.is_on_trail(coords) {
            MazeTile::Trail
        } else if self.maze().is_passage(coords) {
            MazeTile::Passage
        } else {
            MazeTile::Wall
        }
    }

    pub fn tiles(&self) -> Array2<MazeTile> {
        Array2::from_shape_fn(self.maze().cells().dim(), |(row, col)| {
            self.tile_at((row as Coord, col as Coord))
        })
    }
}

impl Minefield {
    pub fn tile_at(&self, coords: Coord2) -> MineTile {
        self[coords].into()
    }

    pub fn tiles(&self) -> Array2<MineTile> {
        self.cells().map(|&cell| cell.into())
    }
}
