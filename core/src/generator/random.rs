use super::*;

/// Purely random placement that only keeps the starting cell safe, its neighbors may still hold mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn populate(self, field: &mut Minefield, mines: CellCount, start: Coord2) -> Result<()> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        field.place_mines(mines, start, &mut rng)?;
        field.compute_neighbor_counts();

        // double check mine count
        let count = field.cells().iter().filter(|cell| cell.is_mine).count();
        if count != usize::from(field.mine_count()) {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, expected: {}",
                count,
                field.mine_count()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beginner_field_keeps_first_click_safe() {
        let config = MinefieldConfig::preset(Difficulty::Beginner);

        for seed in 0..50 {
            let field = RandomMinefieldGenerator::new(seed)
                .generate(config, (4, 4))
                .unwrap();

            assert!(!field[(4, 4)].is_mine);
            assert_eq!(
                field.cells().iter().filter(|cell| cell.is_mine).count(),
                10
            );
        }
    }

    #[test]
    fn counts_are_filled_in() {
        let config = MinefieldConfig::preset(Difficulty::Intermediate);
        let field = RandomMinefieldGenerator::new(3)
            .generate(config, (0, 0))
            .unwrap();

        let (rows, cols) = field.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = field[(row, col)];
                if !cell.is_mine {
                    assert_eq!(cell.neighbor_mines, field.adjacent_mine_count((row, col)));
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_field() {
        let config = MinefieldConfig::preset(Difficulty::Expert);

        let a = RandomMinefieldGenerator::new(42).generate(config, (8, 15)).unwrap();
        let b = RandomMinefieldGenerator::new(42).generate(config, (8, 15)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn generate_validates_config() {
        let config = MinefieldConfig::new_unchecked((2, 2), 4);

        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config, (0, 0)),
            Err(PuzzleError::InfeasibleMineCount {
                requested: 4,
                available: 3,
            })
        );
    }
}
