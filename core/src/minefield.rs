use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine grid together with the reveal and flag state laid over it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    cells: Array2<MineCell>,
    mine_count: CellCount,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl Minefield {
    pub fn create_empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
        }
    }

    /// Builds a field with mines at fixed positions and counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut field = Self::create_empty(size);

        for &coords in mine_coords {
            let coords = field.validate_coords(coords)?;
            let cell = &mut field.cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                field.mine_count += 1;
            }
        }

        field.compute_neighbor_counts();
        Ok(field)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Safe cells revealed so far, a mine revealed on loss is not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count.0 as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> MineCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> &Array2<MineCell> {
        &self.cells
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count.0 == self.safe_cell_count()
    }

    /// Marks `mine_count` more cells as mines, sampling uniformly and rejecting `exclude` and cells that already hold
    /// a mine.
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        mine_count: CellCount,
        exclude: Coord2,
        rng: &mut R,
    ) -> Result<()> {
        let exclude = self.validate_coords(exclude)?;

        let free_cells = self.total_cells() - self.mine_count;
        let available = free_cells - CellCount::from(!self[exclude].is_mine);
        if mine_count > available {
            return Err(PuzzleError::InfeasibleMineCount {
                requested: mine_count,
                available,
            });
        }

        // rejection sampling slows down a lot on dense boards
        if u32::from(mine_count) * 100 > u32::from(self.total_cells()) * 35 {
            log::warn!(
                "Placing {} mines on {} cells, sampling may take a while",
                mine_count,
                self.total_cells()
            );
        }

        let (rows, cols) = self.size();
        let mut placed: CellCount = 0;
        while placed < mine_count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if coords == exclude || self[coords].is_mine {
                continue;
            }
            self.cells[coords.to_nd_index()].is_mine = true;
            placed += 1;
        }
        self.mine_count += mine_count;

        log::debug!(
            "Placed {} mines on a {:?} field, kept {:?} safe",
            mine_count,
            self.size(),
            exclude
        );
        Ok(())
    }

    pub fn compute_neighbor_counts(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let count = if self[coords].is_mine {
                    0
                } else {
                    self.adjacent_mine_count(coords)
                };
                self.cells[coords.to_nd_index()].neighbor_mines = count;
            }
        }
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    /// Reveals a hidden cell, flooding through zero-count cells. Revealed or flagged cells are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        self.cells[coords.to_nd_index()].is_revealed = true;
        if cell.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.revealed_count += 1;
        log::debug!(
            "Revealed cell at {:?}, mine count: {}",
            coords,
            cell.neighbor_mines
        );

        if cell.neighbor_mines == 0 {
            self.flood_from(coords);
        }

        Ok(RevealOutcome::Revealed)
    }

    fn flood_from(&mut self, origin: Coord2) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self
            .cells
            .iter_neighbors(origin)
            .filter(|&pos| self[pos].is_hidden())
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = self[visit_coords];
            if !cell.is_hidden() || cell.is_mine {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            self.cells[visit_coords.to_nd_index()].is_revealed = true;
            self.revealed_count += 1;
            log::trace!(
                "Flood revealed cell at {:?}, mine count: {}",
                visit_coords,
                cell.neighbor_mines
            );

            if cell.neighbor_mines == 0 {
                to_visit.extend(
                    self.cells
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self[pos].is_hidden())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Opens every mine, leaving flags and safe cells as they are.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }
}

impl Index<Coord2> for Minefield {
    type Output = MineCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
