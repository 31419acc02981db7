use std::ops::{Index, IndexMut};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Tail,
    Food,
    Body,
    Obstacle,
}

impl Cell {
    /// Running into this cell ends the game.
    pub fn is_fatal(self) -> bool {
        matches!(self, Cell::Body | Cell::Obstacle)
    }

    /// The head may move here. The tail is enterable since it moves away on the same tick.
    pub fn is_enterable(self) -> bool {
        !self.is_fatal()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Cell state of the whole playfield, row-major.
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Board { rows, cols, cells: vec![Cell::Empty; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Position) -> Cell {
        self[pos]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self[pos] = cell;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// The cell one step away from `pos`, or `None` past any edge.
    pub fn neighbour(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = match dir {
            Up => Position::new(pos.row.checked_sub(1)?, pos.col),
            Down => Position::new(pos.row + 1, pos.col),
            Left => Position::new(pos.row, pos.col.checked_sub(1)?),
            Right => Position::new(pos.row, pos.col + 1),
        };

        if self.contains(next) { Some(next) } else { None }
    }

    #[cfg(test)]
    pub(crate) fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(move |(i, _)| Position::new(i / self.cols, i % self.cols))
    }

    fn index_of(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {:?} outside a {}x{} board", pos, self.rows, self.cols);
        pos.row * self.cols + pos.col
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[self.index_of(pos)]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        let i = self.index_of(pos);
        &mut self.cells[i]
    }
}
