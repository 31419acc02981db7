use std::collections::VecDeque;

use log::info;
use rand::Rng;

use crate::board::{Board, Position};
use crate::error::{Result, SnakeError};
use crate::food;
use crate::snake::{Direction, Snake, INITIAL_SNAKE_LENGTH};

pub const MIN_BOARD_ROWS: usize = 8;
pub const MIN_BOARD_COLS: usize = 14;

/// What a single tick did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Moved onto a free cell (or onto the tail's cell).
    Empty,
    /// Ate the food and grew by one.
    Food,
    /// Hit a wall or its own body. The game is over.
    Obstacle,
    /// Ate the food and no cell is left for the next one.
    Won,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Obstacle | Outcome::Won)
    }
}

/// Everything a renderer needs to paint one tick.
pub struct Frame<'a> {
    pub segments: &'a VecDeque<Position>,
    pub head: Position,
    pub food: Option<Position>,
    pub length: usize,
}

pub struct GameState<R> {
    board: Board,
    snake: Snake,
    food: Option<Position>,
    length: usize,
    finished: Option<Outcome>,
    rng: R,
}

impl<R: Rng> GameState<R> {
    /// Sets up a fresh game on a `rows` x `cols` board, snake in the middle
    /// heading right, and a first piece of food.
    pub fn new(rows: usize, cols: usize, mut rng: R) -> Result<Self> {
        if rows < MIN_BOARD_ROWS || cols < MIN_BOARD_COLS {
            return Err(SnakeError::BoardTooSmall {
                rows,
                cols,
                min_rows: MIN_BOARD_ROWS,
                min_cols: MIN_BOARD_COLS,
            });
        }

        let mut board = Board::new(rows, cols);
        let snake = Snake::new(Position::new(rows / 2, cols / 2), &mut board);
        let food = food::spawn(&mut board, &mut rng);

        Ok(GameState { board, snake, food, length: INITIAL_SNAKE_LENGTH, finished: None, rng })
    }

    /// Resolves one tick. `intent` is the direction the player asked for, if
    /// any; reversals and repeats of the current heading keep it unchanged.
    pub fn turn(&mut self, intent: Option<Direction>) -> Outcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }

        let heading = self.snake.heading();
        let direction = intent.map_or(heading, |dir| heading.turn_towards(dir));

        let target = match self.board.neighbour(self.snake.head(), direction) {
            Some(target) if self.board.get(target).is_enterable() => target,
            _ => return self.finish(Outcome::Obstacle),
        };

        if Some(target) == self.food {
            self.snake.move_to(target, direction, true, &mut self.board);
            self.length += 1;
            self.food = food::spawn(&mut self.board, &mut self.rng);

            debug_assert_eq!(self.snake.len(), self.length);

            if self.food.is_none() {
                return self.finish(Outcome::Won);
            }
            Outcome::Food
        } else {
            self.snake.move_to(target, direction, false, &mut self.board);
            Outcome::Empty
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            segments: self.snake.segments(),
            head: self.snake.head(),
            food: self.food,
            length: self.length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn is_over(&self) -> bool {
        self.finished.is_some()
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        info!("game ended with {:?}, length {}", outcome, self.length);
        self.finished = Some(outcome);
        outcome
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, pos: Position) {
        use crate::board::Cell;

        if let Some(old) = self.food.take() {
            self.board.set(old, Cell::Empty);
        }
        self.board.set(pos, Cell::Food);
        self.food = Some(pos);
    }
}
