//! Terminal snake: the game rules live in `board`, `snake`, `food` and
//! `state`; `game` runs the tick loop and `term` draws it with crossterm.
//!
//! The modules sit in a library so the rules and the loop can be tested
//! without a terminal; `main.rs` only parses arguments, sets up logging and
//! hands a `TermManager` to the loop.

pub mod board;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod snake;
pub mod state;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);
