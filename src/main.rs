use std::{env, fs::File, process::exit, str::FromStr, time::{SystemTime, UNIX_EPOCH}};

use log::{error, info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, WriteLogger};

use termsnake::config::Settings;
use termsnake::error::{Result, SnakeError, USAGE};
use termsnake::game::SnakeGame;
use termsnake::state::GameState;
use termsnake::term::TermManager;

/// Log file path. Nothing is logged unless it is set, since stdout is the game screen.
const LOG_PATH_VAR: &str = "SNAKE_LOG";
const LOG_LEVEL_VAR: &str = "SNAKE_LOG_LEVEL";

fn main() {
    let settings = match Settings::from_args(env::args().skip(1)) {
        Ok(settings) => settings,
        Err(e) => {
            if let SnakeError::InvalidLevel(_) = e {
                eprintln!("{}", e);
            }
            println!("{}", USAGE);
            exit(1);
        }
    };

    init_logging();
    info!("starting at level {} on a {}x{} board", settings.level.value(), settings.rows, settings.cols);

    if let Err(e) = run(settings) {
        error!("{}", e);
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(settings: Settings) -> Result<()> {
    // Checks the terminal before any game state exists.
    let mut term = TermManager::new()?;

    let state = GameState::new(settings.rows, settings.cols, StdRng::seed_from_u64(time_seed()))?;

    term.setup()?;
    let mut game = SnakeGame::new(term, settings.level.tick_delay());
    game.play(state)?;

    game.into_term().restore()?;
    info!("bye");
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn init_logging() {
    let path = match env::var(LOG_PATH_VAR) {
        Ok(path) => path,
        Err(_) => return,
    };

    let level = env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|lvl| LevelFilter::from_str(&lvl).ok())
        .unwrap_or(LevelFilter::Info);

    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("could not set up logging: {}", e);
            }
        }
        Err(e) => eprintln!("could not open log file {}: {}", path, e),
    }
}
