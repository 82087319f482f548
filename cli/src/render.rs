use std::fmt::Write;

use puzzlebox_core::*;

fn maze_glyph(tile: MazeTile) -> char {
    match tile {
        MazeTile::Wall => '#',
        MazeTile::Passage => ' ',
        MazeTile::Trail => '.',
        MazeTile::Player => '@',
        MazeTile::Goal => 'G',
    }
}

fn mine_glyph(tile: MineTile) -> char {
    match tile {
        MineTile::Hidden => '#',
        MineTile::Flagged => 'F',
        MineTile::Mine => '*',
        MineTile::Open(0) => '.',
        MineTile::Open(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
    }
}

/// Text rendering of a maze, cells on `route` that are plain passage or trail are drawn as `*`.
pub fn maze(game: &MazeGame, route: &[Coord2]) -> String {
    let tiles = game.tiles();
    let mut out = String::with_capacity(tiles.len() + tiles.nrows());
    for (row, line) in tiles.rows().into_iter().enumerate() {
        for (col, &tile) in line.iter().enumerate() {
            let on_route = route.contains(&(row as Coord, col as Coord));
            let glyph = match tile {
                MazeTile::Passage | MazeTile::Trail if on_route => '*',
                tile => maze_glyph(tile),
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

pub fn minefield(field: &Minefield) -> String {
    let tiles = field.tiles();
    let mut out = String::new();
    for line in tiles.rows() {
        let row: String = line.iter().map(|&tile| mine_glyph(tile)).collect();
        let _ = writeln!(out, "{}", row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minefield_glyphs() {
        let mut field = Minefield::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        field.reveal((1, 2)).unwrap();
        field.toggle_flag((1, 0)).unwrap();

        assert_eq!(minefield(&field), "#1.\nF1.\n");

        field.reveal_all_mines();
        assert_eq!(minefield(&field), "*1.\nF1.\n");
    }

    #[test]
    fn maze_marks_player_and_goal() {
        let game = MazeGame::generate(MazeConfig::new(5).unwrap(), 1).unwrap();
        let text = maze(&game, &[]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#####");
        assert_eq!(lines[1].as_bytes()[1], b'@');
        assert_eq!(lines[3].as_bytes()[3], b'G');
    }

    #[test]
    fn route_is_overlaid_between_player_and_goal() {
        let game = MazeGame::generate(MazeConfig::new(7).unwrap(), 9).unwrap();
        let route = game.maze().path_between(game.player(), game.goal()).unwrap();
        let text = maze(&game, &route);

        assert_eq!(text.matches('*').count(), route.len() - 2);
        assert_eq!(text.matches('@').count(), 1);
    }
}
