use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperAction {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

/// Minesweeper rules over a [`Minefield`], mines are laid on the first reveal so that cell is always safe.
#[derive(Clone, Debug, PartialEq)]
pub struct MinesweeperGame {
    config: MinefieldConfig,
    field: Minefield,
    seed: u64,
    mines_placed: bool,
}

impl MinesweeperGame {
    pub fn new(config: MinefieldConfig, seed: u64) -> Result<Self> {
        let config = config.validated()?;
        Ok(Self {
            config,
            field: Minefield::create_empty(config.size),
            seed,
            mines_placed: false,
        })
    }

    /// Plays over an already mined field, nothing is placed on the first reveal.
    pub fn from_minefield(field: Minefield) -> Self {
        Self {
            config: MinefieldConfig::new_unchecked(field.size(), field.mine_count()),
            field,
            seed: 0,
            mines_placed: true,
        }
    }

    pub fn config(&self) -> MinefieldConfig {
        self.config
    }

    pub fn field(&self) -> &Minefield {
        &self.field
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Counter shown to the player, configured mines minus flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.field.flagged_count() as isize)
    }

    fn reveal(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.field.validate_coords(coords)?;
        if !self.field[coords].is_hidden() {
            return Ok(ActionOutcome::NoChange);
        }

        if !self.mines_placed {
            RandomMinefieldGenerator::new(self.seed).populate(
                &mut self.field,
                self.config.mines,
                coords,
            )?;
            self.mines_placed = true;
        }

        Ok(match self.field.reveal(coords)? {
            RevealOutcome::NoChange => ActionOutcome::NoChange,
            RevealOutcome::HitMine => {
                self.field.reveal_all_mines();
                ActionOutcome::Lost
            }
            RevealOutcome::Revealed if self.field.is_cleared() => ActionOutcome::Won,
            RevealOutcome::Revealed => ActionOutcome::Advanced,
        })
    }
}

impl PuzzleRules for MinesweeperGame {
    type Action = MinesweeperAction;

    fn apply(&mut self, action: MinesweeperAction) -> Result<ActionOutcome> {
        match action {
            MinesweeperAction::Reveal(coords) => self.reveal(coords),
            MinesweeperAction::ToggleFlag(coords) => Ok(match self.field.toggle_flag(coords)? {
                MarkOutcome::NoChange => ActionOutcome::NoChange,
                MarkOutcome::Changed => ActionOutcome::Marked,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MinesweeperAction::*;

    fn session_with_mines(size: Coord2, mines: &[Coord2]) -> Session<MinesweeperGame> {
        let field = Minefield::from_mine_coords(size, mines).unwrap();
        Session::new(MinesweeperGame::from_minefield(field))
    }

    #[test]
    fn first_click_is_never_a_mine() {
        let config = MinefieldConfig::preset(Difficulty::Beginner);

        for seed in 0..50 {
            let mut session = Session::new(MinesweeperGame::new(config, seed).unwrap());

            let outcome = session.act(Reveal((4, 4))).unwrap();

            let field = session.puzzle().field();
            assert_ne!(outcome, ActionOutcome::Lost);
            assert!(!field[(4, 4)].is_mine);
            assert!(field[(4, 4)].is_revealed);
            assert_eq!(field.cells().iter().filter(|cell| cell.is_mine).count(), 10);
            assert!(matches!(
                session.state(),
                EngineState::InProgress | EngineState::Won
            ));
        }
    }

    #[test]
    fn mines_are_placed_only_once() {
        let config = MinefieldConfig::preset(Difficulty::Intermediate);
        let mut session = Session::new(MinesweeperGame::new(config, 11).unwrap());

        session.act(Reveal((0, 0))).unwrap();
        let mines_after_first = session.puzzle().field().clone();
        assert!(session.puzzle().mines_placed());

        let next_hidden = (0..16u8)
            .flat_map(|row| (0..16u8).map(move |col| (row, col)))
            .find(|&coords| session.puzzle().field()[coords].is_hidden());
        if let Some(coords) = next_hidden {
            session.act(Reveal(coords)).unwrap();
        }

        let field = session.puzzle().field();
        assert_eq!(field.mine_count(), 40);
        for (before, after) in mines_after_first.cells().iter().zip(field.cells().iter()) {
            assert_eq!(before.is_mine, after.is_mine);
        }
    }

    #[test]
    fn flags_do_not_start_the_game_and_survive_placement() {
        let config = MinefieldConfig::preset(Difficulty::Beginner);
        let mut session = Session::new(MinesweeperGame::new(config, 2).unwrap());

        assert_eq!(session.act(ToggleFlag((8, 8))), Ok(ActionOutcome::Marked));
        assert_eq!(session.state(), EngineState::NotStarted);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.puzzle().mines_left(), 9);

        session.act(Reveal((0, 0))).unwrap();

        assert!(session.puzzle().field()[(8, 8)].is_flagged);
        assert!(!session.puzzle().field()[(8, 8)].is_revealed);
    }

    #[test]
    fn clicking_revealed_or_flagged_cell_is_noop() {
        let mut session = session_with_mines((3, 3), &[(0, 0), (0, 2)]);

        assert_eq!(session.act(Reveal((2, 2))), Ok(ActionOutcome::Advanced));
        assert!(session.puzzle().field()[(0, 1)].is_hidden());
        assert_eq!(session.act(Reveal((2, 2))), Ok(ActionOutcome::NoChange));

        session.act(ToggleFlag((0, 1))).unwrap();
        assert_eq!(session.act(Reveal((0, 1))), Ok(ActionOutcome::NoChange));
        assert_eq!(session.act(ToggleFlag((2, 2))), Ok(ActionOutcome::NoChange));
    }

    #[test]
    fn hitting_a_mine_reveals_all_mines_and_locks_the_board() {
        let mut session = session_with_mines((3, 3), &[(0, 0), (2, 2)]);
        session.act(ToggleFlag((2, 2))).unwrap();

        assert_eq!(session.act(Reveal((0, 0))), Ok(ActionOutcome::Lost));
        assert_eq!(session.state(), EngineState::Lost);

        let field = session.puzzle().field();
        assert!(field[(0, 0)].is_revealed);
        assert!(field[(2, 2)].is_revealed && field[(2, 2)].is_flagged);
        assert!(!field[(1, 1)].is_revealed);

        let snapshot = session.puzzle().clone();
        assert_eq!(session.act(Reveal((1, 1))), Ok(ActionOutcome::NoChange));
        assert_eq!(session.act(ToggleFlag((1, 1))), Ok(ActionOutcome::NoChange));
        assert_eq!(session.puzzle(), &snapshot);
    }

    #[test]
    fn revealing_every_safe_cell_wins_and_locks_the_board() {
        let mut session = session_with_mines((2, 2), &[(0, 0)]);

        assert_eq!(session.act(Reveal((0, 1))), Ok(ActionOutcome::Advanced));
        assert_eq!(session.act(Reveal((1, 0))), Ok(ActionOutcome::Advanced));
        assert_eq!(session.act(Reveal((1, 1))), Ok(ActionOutcome::Won));
        assert_eq!(session.state(), EngineState::Won);
        assert_eq!(session.moves(), 3);

        let snapshot = session.puzzle().clone();
        assert_eq!(session.act(Reveal((0, 0))), Ok(ActionOutcome::NoChange));
        assert_eq!(session.puzzle(), &snapshot);
    }

    #[test]
    fn empty_board_wins_on_first_click() {
        let config = MinefieldConfig::new((5, 5), 0).unwrap();
        let mut session = Session::new(MinesweeperGame::new(config, 0).unwrap());

        assert_eq!(session.act(Reveal((2, 2))), Ok(ActionOutcome::Won));
        assert_eq!(session.puzzle().field().revealed_count(), 25);
    }

    #[test]
    fn out_of_bounds_reveal_is_an_error() {
        let mut session = session_with_mines((2, 2), &[(0, 0)]);

        assert_eq!(
            session.act(Reveal((0, 5))),
            Err(PuzzleError::InvalidCoords)
        );
        assert_eq!(session.state(), EngineState::NotStarted);
    }

    #[test]
    fn invalid_config_is_rejected_before_any_grid_exists() {
        let config = MinefieldConfig::new_unchecked((9, 9), 81);

        assert_eq!(
            MinesweeperGame::new(config, 0),
            Err(PuzzleError::InfeasibleMineCount {
                requested: 81,
                available: 80,
            })
        );
    }
}
