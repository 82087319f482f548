use alloc::vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Randomized depth-first carving from the entry cell, yields a perfect maze.
#[derive(Clone, Debug, PartialEq)]
pub struct BacktrackingMazeGenerator {
    seed: u64,
}

impl BacktrackingMazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MazeGenerator for BacktrackingMazeGenerator {
    fn generate(self, config: MazeConfig) -> Result<Maze> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        carve_maze(config, &mut rng)
    }
}

/// One pending cell on the carving stack with its shuffled exits.
struct Frame {
    cell: Coord2,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(cell: Coord2, rng: &mut R) -> Self {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.next).copied()?;
        self.next += 1;
        Some(direction)
    }
}

/// Carves a maze with any random source, the same stream always gives the same maze.
pub fn carve_maze<R: Rng + ?Sized>(config: MazeConfig, rng: &mut R) -> Result<Maze> {
    let config = config.validated()?;
    let size = config.size;
    let bounds = config.dims();
    let interior = 1..=size - 2;
    let is_interior = |(row, col): Coord2| interior.contains(&row) && interior.contains(&col);

    let mut cells = Array2::from_elem(bounds.to_nd_index(), MazeCell::Wall);
    let entry = config.entry();
    cells[entry.to_nd_index()] = MazeCell::Passage;

    let mut stack = vec![Frame::new(entry, rng)];
    let mut visited: usize = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.next_direction() else {
            stack.pop();
            continue;
        };
        let here = frame.cell;

        let (Some(between), Some(next)) = (
            direction.step(here, 1, bounds),
            direction.step(here, 2, bounds),
        ) else {
            continue;
        };
        if !is_interior(next) || cells[next.to_nd_index()].is_passage() {
            continue;
        }

        cells[between.to_nd_index()] = MazeCell::Passage;
        cells[next.to_nd_index()] = MazeCell::Passage;
        visited += 1;
        stack.push(Frame::new(next, rng));
    }

    cells[entry.to_nd_index()] = MazeCell::Passage;
    cells[config.exit().to_nd_index()] = MazeCell::Passage;

    log::debug!("Carved {}x{} maze through {} rooms", size, size, visited);
    Ok(Maze::from_cells(cells))
}
