use std::time::Duration;

use crate::error::{Result, SnakeError};

/// Screen rows needed to draw the arena, border included.
pub const SCREEN_ROWS: u16 = 34;
/// Screen columns needed to draw the arena, border included.
pub const SCREEN_COLS: u16 = 72;

/// Every board cell is drawn two characters wide so it looks square.
pub const CELL_WIDTH: u16 = 2;

pub const BOARD_ROWS: usize = (SCREEN_ROWS - 2) as usize;
pub const BOARD_COLS: usize = ((SCREEN_COLS - 2) / CELL_WIDTH) as usize;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 10;

const BASE_DELAY_MS: u64 = 500;
const DELAY_STEP_MS: u64 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Level(u32);

impl Level {
    pub fn new(level: u32) -> Result<Self> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            Ok(Level(level))
        } else {
            Err(SnakeError::InvalidLevel(level))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Time between two ticks: 500ms at level 1, 50ms less per level above.
    pub fn tick_delay(self) -> Duration {
        Duration::from_millis(BASE_DELAY_MS - (self.0 as u64 - 1) * DELAY_STEP_MS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub level: Level,
    pub rows: usize,
    pub cols: usize,
}

impl Settings {
    /// Builds the settings from the process arguments, program name excluded.
    /// Exactly one argument of the form `-lv<N>` is accepted.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let arg = args.next().ok_or(SnakeError::Usage)?;
        if args.next().is_some() {
            return Err(SnakeError::Usage);
        }

        let level = parse_level(arg.as_ref())?;
        Ok(Settings { level, rows: BOARD_ROWS, cols: BOARD_COLS })
    }
}

/// The number must make up the rest of the argument; trailing text is rejected.
fn parse_level(arg: &str) -> Result<Level> {
    let digits = arg.strip_prefix("-lv").ok_or(SnakeError::Usage)?;
    let level = digits.parse::<u32>().map_err(|_| SnakeError::Usage)?;
    Level::new(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_argument() {
        let settings = Settings::from_args(["-lv5"]).unwrap();
        assert_eq!(settings.level.value(), 5);
        assert_eq!((settings.rows, settings.cols), (32, 35));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(matches!(Settings::from_args(Vec::<String>::new()), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lv5", "-lv6"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-l5"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lvx"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lv"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lv5x"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lv 5"]), Err(SnakeError::Usage)));
        assert!(matches!(Settings::from_args(["-lv0"]), Err(SnakeError::InvalidLevel(0))));
        assert!(matches!(Settings::from_args(["-lv11"]), Err(SnakeError::InvalidLevel(11))));
    }

    #[test]
    fn delay_shrinks_with_level() {
        assert_eq!(Level::new(1).unwrap().tick_delay(), Duration::from_millis(500));
        assert_eq!(Level::new(5).unwrap().tick_delay(), Duration::from_millis(300));
        assert_eq!(Level::new(10).unwrap().tick_delay(), Duration::from_millis(50));
    }
}
