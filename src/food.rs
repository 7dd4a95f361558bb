use rand::Rng;

use crate::board::Board;
use crate::snake::{Cell, Snake};

/// Random placement attempts per replenish call, as a multiple of the
/// board size. Past this budget the free cells are enumerated instead.
const ATTEMPT_BUDGET_FACTOR: usize = 4;

/// Bounded set of apples on the board.
///
/// Cells are distinct, never overlap the snake, and keep insertion order
/// so rendering and tests see a stable sequence.
#[derive(Debug, Clone)]
pub struct FoodSet {
    cells: Vec<Cell>,
    min_count: usize,
    max_count: usize,
}

impl FoodSet {
    /// Creates an empty food set with the given bounds.
    #[must_use]
    pub fn new(min_count: usize, max_count: usize) -> Self {
        Self {
            cells: Vec::with_capacity(max_count),
            min_count,
            max_count,
        }
    }

    /// Creates a food set with explicit cells, for deterministic setups.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, min_count: usize, max_count: usize) -> Self {
        Self {
            cells,
            min_count,
            max_count,
        }
    }

    /// Tops the set back up to `min_count` apples on free cells.
    ///
    /// Candidates are sampled uniformly at random and rejected while they
    /// collide with the snake or existing apples. Sampling stops after a
    /// budget proportional to the board size; any remaining shortfall is
    /// filled by drawing from the actual free cells, so a nearly full
    /// board yields fewer apples instead of an unbounded retry loop.
    pub fn replenish<R: Rng + ?Sized>(&mut self, rng: &mut R, board: Board, snake: &Snake) {
        let attempt_budget = board.total_cells().saturating_mul(ATTEMPT_BUDGET_FACTOR);
        let side = i32::from(board.tile_count());
        let mut attempts = 0;

        while self.cells.len() < self.min_count && self.cells.len() < self.max_count {
            if attempts >= attempt_budget {
                self.fill_from_free_cells(rng, board, snake);
                return;
            }
            attempts += 1;

            let candidate = Cell {
                x: rng.gen_range(0..side),
                y: rng.gen_range(0..side),
            };
            if snake.occupies(candidate) || self.contains(candidate) {
                continue;
            }
            self.cells.push(candidate);
        }
    }

    /// Dense-board fallback: draw directly from the enumerated free cells.
    fn fill_from_free_cells<R: Rng + ?Sized>(&mut self, rng: &mut R, board: Board, snake: &Snake) {
        let mut free: Vec<Cell> = board
            .cells()
            .filter(|cell| !snake.occupies(*cell) && !self.contains(*cell))
            .collect();

        while self.cells.len() < self.min_count
            && self.cells.len() < self.max_count
            && !free.is_empty()
        {
            let index = rng.gen_range(0..free.len());
            self.cells.push(free.swap_remove(index));
        }
    }

    /// Removes `cell` if present, returning whether an apple was eaten.
    ///
    /// The caller replenishes afterwards, once the snake has moved.
    pub fn consume(&mut self, cell: Cell) -> bool {
        match self.cells.iter().position(|apple| *apple == cell) {
            Some(index) => {
                self.cells.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if an apple sits on `cell`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns the current apple count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when no apples are on the board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over apples in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::FoodSet;
    use crate::board::Board;
    use crate::snake::{Cell, Snake};

    #[test]
    fn replenish_fills_to_minimum_without_collisions() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::new(20);
        let snake = Snake::from_segments(vec![
            Cell { x: 0, y: 0 },
            Cell { x: 1, y: 0 },
            Cell { x: 2, y: 0 },
        ]);
        let mut food = FoodSet::new(10, 20);

        food.replenish(&mut rng, board, &snake);

        assert_eq!(food.len(), 10);
        for apple in food.cells() {
            assert!(board.contains(*apple));
            assert!(!snake.occupies(*apple));
        }
    }

    #[test]
    fn replenish_never_places_duplicate_apples() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::new(6);
        let snake = Snake::new(Cell { x: 3, y: 3 });
        let mut food = FoodSet::new(20, 20);

        food.replenish(&mut rng, board, &snake);

        let mut seen: Vec<Cell> = food.cells().copied().collect();
        let before = seen.len();
        seen.sort_by_key(|cell| (cell.x, cell.y));
        seen.dedup();
        assert_eq!(seen.len(), before);
    }

    #[test]
    fn replenish_on_saturated_board_accepts_a_shortfall() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::new(2);
        // Snake covers three of four cells; only one cell is free.
        let snake = Snake::from_segments(vec![
            Cell { x: 0, y: 0 },
            Cell { x: 1, y: 0 },
            Cell { x: 0, y: 1 },
        ]);
        let mut food = FoodSet::new(3, 3);

        food.replenish(&mut rng, board, &snake);

        assert_eq!(food.len(), 1);
        assert!(food.contains(Cell { x: 1, y: 1 }));
    }

    #[test]
    fn replenish_with_no_free_cell_terminates_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board::new(2);
        let snake = Snake::from_segments(vec![
            Cell { x: 0, y: 0 },
            Cell { x: 1, y: 0 },
            Cell { x: 1, y: 1 },
            Cell { x: 0, y: 1 },
        ]);
        let mut food = FoodSet::new(2, 4);

        food.replenish(&mut rng, board, &snake);

        assert!(food.is_empty());
    }

    #[test]
    fn consume_removes_only_the_hit_apple() {
        let mut food = FoodSet::from_cells(
            vec![Cell { x: 1, y: 1 }, Cell { x: 2, y: 2 }],
            0,
            20,
        );

        assert!(food.consume(Cell { x: 1, y: 1 }));
        assert!(!food.consume(Cell { x: 1, y: 1 }));
        assert_eq!(food.len(), 1);
        assert!(food.contains(Cell { x: 2, y: 2 }));
    }

    #[test]
    fn replenish_respects_the_maximum() {
        let mut rng = StdRng::seed_from_u64(9);
        let board = Board::new(20);
        let snake = Snake::new(Cell { x: 10, y: 10 });
        let mut food = FoodSet::new(5, 5);

        food.replenish(&mut rng, board, &snake);
        food.replenish(&mut rng, board, &snake);

        assert_eq!(food.len(), 5);
    }
}
