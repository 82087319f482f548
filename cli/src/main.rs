use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use puzzlebox_core::*;
use serde::Serialize;

mod render;

#[derive(Parser, Debug)]
#[command(name = "puzzlebox", version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of one derived from the clock
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and optionally walk it
    Maze {
        #[arg(short, long, value_enum, default_value_t = DifficultyArg::Beginner)]
        difficulty: DifficultyArg,

        /// Custom side length, even values are rounded down
        #[arg(long)]
        size: Option<Coord>,

        /// Steps to replay from the entry, e.g. `rrdd` (u/d/l/r)
        #[arg(short, long, default_value = "")]
        moves: String,

        /// Overlay the shortest route from the player to the exit
        #[arg(long)]
        solve: bool,
    },
    /// Play a minefield from a list of actions
    Mines {
        #[arg(short, long, value_enum, default_value_t = DifficultyArg::Beginner)]
        difficulty: DifficultyArg,

        #[arg(long, requires_all = ["cols", "mines"])]
        rows: Option<Coord>,

        #[arg(long, requires_all = ["rows", "mines"])]
        cols: Option<Coord>,

        #[arg(long, requires_all = ["rows", "cols"])]
        mines: Option<CellCount>,

        /// Actions in order, `r4,4` reveals row 4 col 4, `f0,1` toggles a flag
        #[arg(value_parser = parse_action)]
        actions: Vec<MinesweeperAction>,
    },
    /// Print the difficulty presets as JSON
    Presets,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Serialize)]
struct Preset {
    difficulty: Difficulty,
    maze: MazeConfig,
    minefield: MinefieldConfig,
}

fn parse_coords(s: &str) -> anyhow::Result<Coord2> {
    let (row, col) = s
        .split_once(',')
        .with_context(|| format!("expected `row,col`, got `{s}`"))?;
    Ok((row.trim().parse()?, col.trim().parse()?))
}

fn parse_action(s: &str) -> anyhow::Result<MinesweeperAction> {
    let mut chars = s.chars();
    let kind = chars.next().context("empty action")?;
    let coords = parse_coords(chars.as_str())?;
    match kind {
        'r' | 'R' => Ok(MinesweeperAction::Reveal(coords)),
        'f' | 'F' => Ok(MinesweeperAction::ToggleFlag(coords)),
        other => bail!("unknown action `{other}`, expected `r` or `f`"),
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn run_maze(
    seed: u64,
    difficulty: Difficulty,
    size: Option<Coord>,
    moves: &str,
    solve: bool,
) -> anyhow::Result<()> {
    let config = match size {
        Some(size) => MazeConfig::new(size)?,
        None => MazeConfig::preset(difficulty),
    };
    let mut session = Session::new(MazeGame::generate(config, seed)?);

    for c in moves.chars().filter(|c| !c.is_whitespace()) {
        let direction =
            Direction::from_char(c).with_context(|| format!("unknown move `{c}`, expected u/d/l/r"))?;
        if !session.act(direction)?.has_update() {
            log::info!("Move {:?} blocked at {:?}", direction, session.puzzle().player());
        }
    }

    let game = session.puzzle();
    let route = if solve {
        game.maze().path_between(game.player(), game.goal())
    } else {
        None
    };
    print!("{}", render::maze(game, route.as_deref().unwrap_or_default()));
    println!(
        "size: {}  moves: {}  state: {:?}",
        config.size,
        session.moves(),
        session.state()
    );
    Ok(())
}

fn run_mines(
    seed: u64,
    difficulty: Difficulty,
    custom: Option<(Coord, Coord, CellCount)>,
    actions: &[MinesweeperAction],
) -> anyhow::Result<()> {
    let config = match custom {
        Some((rows, cols, mines)) => MinefieldConfig::new((rows, cols), mines)?,
        None => MinefieldConfig::preset(difficulty),
    };
    let mut session = Session::new(MinesweeperGame::new(config, seed)?);

    for &action in actions {
        let outcome = session
            .act(action)
            .with_context(|| format!("could not apply {action:?}"))?;
        log::debug!("{:?} -> {:?}", action, outcome);
    }

    let game = session.puzzle();
    print!("{}", render::minefield(game.field()));
    println!(
        "mines left: {}  moves: {}  state: {:?}",
        game.mines_left(),
        session.moves(),
        session.state()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}", seed);

    match args.command {
        Command::Maze {
            difficulty,
            size,
            moves,
            solve,
        } => run_maze(seed, difficulty.into(), size, &moves, solve),
        Command::Mines {
            difficulty,
            rows,
            cols,
            mines,
            actions,
        } => {
            let custom = rows.zip(cols).zip(mines).map(|((r, c), m)| (r, c, m));
            run_mines(seed, difficulty.into(), custom, &actions)
        }
        Command::Presets => {
            let presets: Vec<_> = Difficulty::ALL
                .into_iter()
                .map(|difficulty| Preset {
                    difficulty,
                    maze: MazeConfig::preset(difficulty),
                    minefield: MinefieldConfig::preset(difficulty),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&presets)?);
            Ok(())
        }
    }
}
