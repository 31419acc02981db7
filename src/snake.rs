use std::collections::VecDeque;

use crate::board::{Board, Cell, Position};
use Direction::*;

pub const INITIAL_SNAKE_LENGTH: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The direction the snake actually takes when asked to go `requested`.
    /// Asking for the current heading or its reverse changes nothing.
    pub fn turn_towards(self, requested: Direction) -> Direction {
        if requested == self || requested == self.opposite() {
            self
        } else {
            requested
        }
    }
}

/// The snake body, head first, mirrored onto the board as it moves.
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
}

impl Snake {
    /// Lays a snake of `INITIAL_SNAKE_LENGTH` segments on the board, head at
    /// `start` and heading right, with the rest of the body to its left.
    pub fn new(start: Position, board: &mut Board) -> Self {
        debug_assert!(start.col + 1 >= INITIAL_SNAKE_LENGTH, "no room for the body left of {:?}", start);

        let body: VecDeque<Position> = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| Position::new(start.row, start.col - i))
            .collect();

        for (i, pos) in body.iter().enumerate() {
            let cell = if i == INITIAL_SNAKE_LENGTH - 1 { Cell::Tail } else { Cell::Body };
            board.set(*pos, cell);
        }

        Snake { body, heading: Right }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Moves the head onto `target` and drags every other segment into the
    /// place of the one ahead of it. When `grow` is set the old tail cell stays
    /// occupied by a new last segment.
    ///
    /// The caller must already have checked that `target` is a legal,
    /// adjacent cell for `direction`.
    pub fn move_to(&mut self, target: Position, direction: Direction, grow: bool, board: &mut Board) {
        let old_tail = self.tail();
        self.body.push_front(target);

        if !grow {
            self.body.pop_back();
            board.set(old_tail, Cell::Empty);
            board.set(self.tail(), Cell::Tail);
        }

        // Also covers the tail chase, where target == old_tail.
        board.set(target, Cell::Body);
        self.heading = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(snake: &Snake) -> Vec<(usize, usize)> {
        snake.segments().iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn turning_ignores_same_axis() {
        assert_eq!(Right.turn_towards(Left), Right);
        assert_eq!(Right.turn_towards(Right), Right);
        assert_eq!(Right.turn_towards(Up), Up);
        assert_eq!(Up.turn_towards(Down), Up);
        assert_eq!(Down.turn_towards(Left), Left);
    }

    #[test]
    fn new_snake_is_marked_on_board() {
        let mut board = Board::new(10, 10);
        let snake = Snake::new(Position::new(5, 5), &mut board);

        assert_eq!(positions(&snake), vec![(5, 5), (5, 4), (5, 3), (5, 2)]);
        assert_eq!(snake.heading(), Right);
        assert_eq!(board.get(Position::new(5, 5)), Cell::Body);
        assert_eq!(board.get(Position::new(5, 3)), Cell::Body);
        assert_eq!(board.get(Position::new(5, 2)), Cell::Tail);
        assert_eq!(board.count(Cell::Body), 3);
    }

    #[test]
    fn moving_shifts_every_segment() {
        let mut board = Board::new(10, 10);
        let mut snake = Snake::new(Position::new(5, 5), &mut board);

        snake.move_to(Position::new(6, 5), Down, false, &mut board);

        assert_eq!(positions(&snake), vec![(6, 5), (5, 5), (5, 4), (5, 3)]);
        assert_eq!(snake.heading(), Down);
        assert_eq!(board.get(Position::new(6, 5)), Cell::Body);
        assert_eq!(board.get(Position::new(5, 3)), Cell::Tail);
        assert_eq!(board.get(Position::new(5, 2)), Cell::Empty);
        assert_eq!(board.count(Cell::Tail), 1);
    }

    #[test]
    fn growing_keeps_the_old_tail() {
        let mut board = Board::new(10, 10);
        let mut snake = Snake::new(Position::new(5, 5), &mut board);

        snake.move_to(Position::new(5, 6), Right, true, &mut board);

        assert_eq!(positions(&snake), vec![(5, 6), (5, 5), (5, 4), (5, 3), (5, 2)]);
        assert_eq!(board.get(Position::new(5, 2)), Cell::Tail);
        assert_eq!(board.get(Position::new(5, 3)), Cell::Body);
        assert_eq!(board.count(Cell::Body), 4);
    }

    #[test]
    fn chasing_the_tail() {
        let mut board = Board::new(10, 10);
        let mut snake = Snake::new(Position::new(5, 5), &mut board);
        snake.move_to(Position::new(6, 5), Down, false, &mut board);
        snake.move_to(Position::new(6, 4), Left, false, &mut board);
        snake.move_to(Position::new(5, 4), Up, false, &mut board);
        // Body is now a 2x2 loop and the tail sits right of the head.
        assert_eq!(snake.tail(), Position::new(5, 5));

        snake.move_to(Position::new(5, 5), Right, false, &mut board);

        assert_eq!(positions(&snake), vec![(5, 5), (5, 4), (6, 4), (6, 5)]);
        assert_eq!(board.get(Position::new(5, 5)), Cell::Body);
        assert_eq!(board.get(Position::new(6, 5)), Cell::Tail);
        assert_eq!(board.count(Cell::Empty), 96);
    }
}
