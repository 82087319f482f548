use crate::*;
pub use backtracking::*;
pub use random::*;

mod backtracking;
mod random;

pub trait MazeGenerator {
    fn generate(self, config: MazeConfig) -> Result<Maze>;
}

pub trait MinefieldGenerator: Sized {
    /// Lays `mines` mines into `field` without ever touching `start`, then fills in the neighbor counts.
    fn populate(self, field: &mut Minefield, mines: CellCount, start: Coord2) -> Result<()>;

    fn generate(self, config: MinefieldConfig, start: Coord2) -> Result<Minefield> {
        let config = config.validated()?;
        let mut field = Minefield::create_empty(config.size);
        self.populate(&mut field, config.mines, start)?;
        Ok(field)
    }
}
