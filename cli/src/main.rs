use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{CellCount, Coord, Game, GameConfig};

use levels::LevelTable;
use session::Session;

mod levels;
mod session;

/// Plays a minesweeper game from a command script, answering every command with a JSON line.
///
/// Commands: `reveal X Y`, `flag X Y`, `view X Y`, `changes`, `status`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty preset, by name or position in the level table [default: Easy]
    #[arg(short, long, conflicts_with_all = ["width", "height", "mines"])]
    level: Option<String>,

    /// Custom board width
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// TOML file replacing the built-in level table
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        if let (Some(width), Some(height), Some(mines)) = (self.width, self.height, self.mines) {
            return GameConfig::new(width, height, mines).context("invalid custom board");
        }

        let table = match &self.levels {
            Some(path) => LevelTable::load(path)?,
            None => LevelTable::builtin(),
        };
        let key = self.level.as_deref().unwrap_or("easy");
        table.lookup(key)?.config()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let config = args.game_config()?;
    let game = match args.seed {
        Some(seed) => {
            log::debug!("seed: {}", seed);
            Game::with_seed(config, seed)?
        }
        None => Game::new(config)?,
    };
    log::info!(
        "Playing {}x{} with {} mines",
        config.width,
        config.height,
        config.mines
    );

    let mut session = Session::new(game);
    let stdout = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("could not open {}", path.display()))?;
            session.run(BufReader::new(file), stdout)?;
        }
        None => session.run(io::stdin().lock(), stdout)?,
    }

    log::info!(
        "Finished in state {:?} after {}s",
        session.game().state(),
        session.game().elapsed_secs()
    );
    Ok(())
}
