use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::board::{Board, Cell, Position};

/// Places a piece of food on a random empty cell and returns where it went.
///
/// Cells are sampled uniformly until an empty one turns up. On a crowded board
/// that can take long, so after `rows * cols` misses the choice is made among
/// the empty cells directly. `None` means there is no empty cell left.
pub fn spawn<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Position> {
    let (rows, cols) = (board.rows(), board.cols());

    let sampled = (0..rows * cols)
        .map(|_| Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols)))
        .find(|pos| board.get(*pos) == Cell::Empty);

    let pos = match sampled {
        Some(pos) => pos,
        None => board.empty_cells().choose(rng)?,
    };

    board.set(pos, Cell::Food);
    debug!("food spawned at {:?}", pos);
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_on_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(5, 5);

        for _ in 0..24 {
            let pos = spawn(&mut board, &mut rng).unwrap();
            assert_eq!(board.get(pos), Cell::Food);
            // Make the cell occupied so the next spawn has to look elsewhere.
            board.set(pos, Cell::Body);
        }

        assert_eq!(board.count(Cell::Empty), 1);
        let last = spawn(&mut board, &mut rng).unwrap();
        assert_eq!(board.count(Cell::Food), 1);
        assert_eq!(board.count(Cell::Empty), 0);
        assert_eq!(board.get(last), Cell::Food);
    }

    #[test]
    fn never_picks_snake_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::new(2, 3);
        for col in 0..3 {
            board.set(Position::new(0, col), Cell::Body);
        }
        board.set(Position::new(1, 0), Cell::Tail);
        board.set(Position::new(1, 1), Cell::Obstacle);

        for _ in 0..20 {
            board.set(Position::new(1, 2), Cell::Empty);
            assert_eq!(spawn(&mut board, &mut rng), Some(Position::new(1, 2)));
        }
    }

    #[test]
    fn full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new(1, 2);
        board.set(Position::new(0, 0), Cell::Body);
        board.set(Position::new(0, 1), Cell::Tail);

        assert_eq!(spawn(&mut board, &mut rng), None);
        assert_eq!(board.count(Cell::Food), 0);
    }
}
