use std::io;

use thiserror::Error;

pub const USAGE: &str = "Usage: snake -lv[1~10]  eg: snake -lv5";

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("{}", USAGE)]
    Usage,

    #[error("level must be between 1 and 10, got {0}")]
    InvalidLevel(u32),

    #[error("You need a screen no smaller than {min_rows} * {min_cols} to play (got {rows} * {cols}).")]
    TerminalTooSmall {
        rows: u16,
        cols: u16,
        min_rows: u16,
        min_cols: u16,
    },

    #[error("Your terminal does not support color display.")]
    NoColorSupport,

    #[error("board of {rows} * {cols} cells is too small, need at least {min_rows} * {min_cols}")]
    BoardTooSmall {
        rows: usize,
        cols: usize,
        min_rows: usize,
        min_cols: usize,
    },

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
