use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square wall/passage grid produced by a [`MazeGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    cells: Array2<MazeCell>,
}

impl Maze {
    pub(crate) fn from_cells(cells: Array2<MazeCell>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord {
        self.dims().0
    }

    pub fn dims(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn entry(&self) -> Coord2 {
        (1, 1)
    }

    pub fn exit(&self) -> Coord2 {
        let last = self.size().saturating_sub(2);
        (last, last)
    }

    pub fn cells(&self) -> &Array2<MazeCell> {
        &self.cells
    }

    /// `None` outside the grid.
    pub fn cell_at(&self, coords: Coord2) -> Option<MazeCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn is_passage(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(MazeCell::is_passage)
    }

    /// Accepts `target` when it is an in-bounds passage, otherwise the player stays at `current`.
    pub fn move_player(&self, current: Coord2, target: Coord2) -> PlayerMove {
        if self.is_passage(target) {
            PlayerMove {
                accepted: true,
                position: target,
            }
        } else {
            PlayerMove {
                accepted: false,
                position: current,
            }
        }
    }

    pub fn open_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        let bounds = self.dims();
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.step(coords, 1, bounds))
            .filter(|&next| self.is_passage(next))
    }

    /// Number of passage cells connected to `start`, including itself.
    pub fn reachable_from(&self, start: Coord2) -> usize {
        if !self.is_passage(start) {
            return 0;
        }

        let mut visited: Array2<bool> = Array2::default(self.cells.dim());
        visited[start.to_nd_index()] = true;
        let mut to_visit = VecDeque::from([start]);
        let mut count = 0;

        while let Some(coords) = to_visit.pop_front() {
            count += 1;
            for next in self.open_neighbors(coords) {
                if !visited[next.to_nd_index()] {
                    visited[next.to_nd_index()] = true;
                    to_visit.push_back(next);
                }
            }
        }
        count
    }

    /// Shortest passage walk from `from` to `to`, both ends included.
    pub fn path_between(&self, from: Coord2, to: Coord2) -> Option<Vec<Coord2>> {
        if !self.is_passage(from) || !self.is_passage(to) {
            return None;
        }

        let mut came_from: Array2<Option<Coord2>> = Array2::from_elem(self.cells.dim(), None);
        came_from[from.to_nd_index()] = Some(from);
        let mut to_visit = VecDeque::from([from]);

        while let Some(coords) = to_visit.pop_front() {
            if coords == to {
                break;
            }
            for next in self.open_neighbors(coords) {
                if came_from[next.to_nd_index()].is_none() {
                    came_from[next.to_nd_index()] = Some(coords);
                    to_visit.push_back(next);
                }
            }
        }

        let mut path = Vec::new();
        let mut cursor = to;
        loop {
            path.push(cursor);
            let previous = came_from[cursor.to_nd_index()]?;
            if previous == cursor {
                break;
            }
            cursor = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// A maze being walked from its entry towards its exit.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeGame {
    maze: Maze,
    player: Coord2,
    trail: HashSet<Coord2>,
}

impl MazeGame {
    pub fn new(maze: Maze) -> Self {
        let player = maze.entry();
        let mut trail = HashSet::new();
        trail.insert(player);
        Self {
            maze,
            player,
            trail,
        }
    }

    pub fn generate(config: MazeConfig, seed: u64) -> Result<Self> {
        BacktrackingMazeGenerator::new(seed)
            .generate(config)
            .map(Self::new)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn goal(&self) -> Coord2 {
        self.maze.exit()
    }

    pub fn is_on_trail(&self, coords: Coord2) -> bool {
        self.trail.contains(&coords)
    }

    /// Distinct cells the player has stood on.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

impl PuzzleRules for MazeGame {
    type Action = Direction;

    fn apply(&mut self, direction: Direction) -> Result<ActionOutcome> {
        let Some(target) = direction.step(self.player, 1, self.maze.dims()) else {
            return Ok(ActionOutcome::NoChange);
        };

        let step = self.maze.move_player(self.player, target);
        if !step.accepted {
            log::trace!("Blocked move {:?} from {:?}", direction, self.player);
            return Ok(ActionOutcome::NoChange);
        }

        self.player = step.position;
        self.trail.insert(self.player);

        Ok(if self.player == self.goal() {
            log::debug!("Reached the exit at {:?}", self.player);
            ActionOutcome::Won
        } else {
            ActionOutcome::Advanced
        })
    }
}
