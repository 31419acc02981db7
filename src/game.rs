use std::{collections::VecDeque, io, thread::sleep, time::Duration};

use log::info;
use rand::Rng;

use crate::error::Result;
use crate::snake::Direction;
use crate::state::{Frame, GameState, Outcome};

/// A key press, already translated from whatever the terminal reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Turn(Direction),
    Pause,
    Quit,
    Other,
}

/// Where the game gets painted.
pub trait Renderer {
    /// Border and empty playfield.
    fn draw_arena(&mut self) -> io::Result<()>;

    /// Repaints the playfield with the snake, the food and the length counter.
    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()>;

    fn show_message(&mut self, lines: &[&str]) -> io::Result<()>;

    fn hide_message(&mut self) -> io::Result<()>;
}

pub trait InputSource {
    /// Every key pressed since the last call. Never blocks.
    fn poll_keys(&mut self) -> io::Result<Vec<Key>>;

    /// Blocks until a key is pressed.
    fn wait_key(&mut self) -> io::Result<Key>;
}

pub struct SnakeGame<T> {
    term: T,
    tick_delay: Duration,
    pending: VecDeque<Key>,
}

impl<T: Renderer + InputSource> SnakeGame<T> {
    pub fn new(term: T, tick_delay: Duration) -> Self {
        SnakeGame { term, tick_delay, pending: VecDeque::new() }
    }

    pub fn into_term(self) -> T {
        self.term
    }

    /// Runs one game from the intro screen to the final "press q" screen.
    pub fn play<R: Rng>(&mut self, mut state: GameState<R>) -> Result<()> {
        self.term.draw_arena()?;
        self.term.draw_frame(&state.frame())?;

        if !self.show_intro()? {
            info!("player quit before the first move");
            return self.game_over(false, state.length());
        }

        let won = loop {
            // One command per tick. Quick successive turns land on successive ticks.
            let intent = match self.next_command()? {
                Command::Quit => {
                    info!("player quit at length {}", state.length());
                    break false;
                }
                Command::Move(intent) => intent,
            };

            let outcome = state.turn(intent);
            self.term.draw_frame(&state.frame())?;

            if outcome.is_terminal() {
                break outcome == Outcome::Won;
            }

            sleep(self.tick_delay);
        };

        self.game_over(won, state.length())
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Returns false if the player chose to quit right away, in which case
    /// the game-over screen still follows.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "p to pause",
            "q to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.wait_key()?;
        self.term.hide_message()?;
        Ok(key != Key::Quit)
    }

    fn next_command(&mut self) -> Result<Command> {
        self.pending.extend(self.term.poll_keys()?);

        while let Some(key) = self.pending.pop_front() {
            match key {
                Key::Quit => return Ok(Command::Quit),
                Key::Pause => {
                    if self.pause()? {
                        return Ok(Command::Quit);
                    }
                }
                Key::Turn(dir) => return Ok(Command::Move(Some(dir))),
                Key::Other => {}
            }
        }

        Ok(Command::Move(None))
    }

    /// Blocks until the game is resumed. Returns true if the player quit instead.
    fn pause(&mut self) -> Result<bool> {
        info!("paused");
        self.pending.clear();
        self.term.show_message(&["Paused", "Press p to resume", "or q to quit"])?;

        loop {
            match self.term.wait_key()? {
                Key::Pause => break,
                Key::Quit => return Ok(true),
                _ => {}
            }
        }

        info!("resumed");
        self.term.hide_message()?;
        Ok(false)
    }

    fn game_over(&mut self, won: bool, length: usize) -> Result<()> {
        let title = if won { "Y O U   W I N" } else { "G A M E   O V E R" };
        let length_line = format!("Length: {:03}", length);

        self.term.show_message(&[title, &length_line, "", "(press 'q' to quit)"])?;

        while self.term.wait_key()? != Key::Quit {}
        Ok(())
    }
}

enum Command {
    Move(Option<Direction>),
    Quit,
}
