pub mod division;

use rand::Rng;

use crate::direction::{Direction, Position};
use crate::grid::Grid;

/// Carves walls into a pre-walled grid using an injected random source.
pub struct MazeMaker<'r, R: Rng> {
    pub grid: Grid,
    pub rng: &'r mut R,
    rows: usize,
    cols: usize,
    depth: usize,
    deepest: usize,
}

impl<'r, R: Rng> MazeMaker<'r, R> {
    pub fn new(grid: Grid, rng: &'r mut R) -> Self {
        let (rows, cols) = grid.dimensions();
        MazeMaker {
            grid,
            rng,
            rows,
            cols,
            depth: 0,
            deepest: 0,
        }
    }

    /// Deepest division level reached so far. The call on the whole grid is level 1.
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    /// Uniform pick from the inclusive range `[low, high]`. A single-value
    /// range is returned as-is without touching the random source.
    fn pick(&mut self, low: usize, high: usize) -> usize {
        if low >= high {
            low
        } else {
            self.rng.random_range(low..=high)
        }
    }

    fn make_horizontal_wall(&mut self, row: usize, start_col: usize, end_col: usize, face: Direction) {
        for col in start_col..=end_col {
            self.grid.set_wall(Position::new(row, col), face, true);
        }
    }

    fn make_vertical_wall(&mut self, col: usize, start_row: usize, end_row: usize, face: Direction) {
        for row in start_row..=end_row {
            self.grid.set_wall(Position::new(row, col), face, true);
        }
    }

    /// Chooses the opening cell for the half-segment `start..end`.
    ///
    /// The span is half-open so the two halves either side of a pivot don't
    /// share a cell. A zero-width span (`start == end`) has exactly one
    /// candidate, `start`; an inverted span has none.
    fn pick_opening(&mut self, start: usize, end: usize) -> Option<usize> {
        if start > end {
            None
        } else if start == end {
            Some(start)
        } else {
            Some(self.pick(start, end - 1))
        }
    }

    fn make_horizontal_opening(&mut self, row: usize, start_col: usize, end_col: usize, face: Direction) {
        if let Some(col) = self.pick_opening(start_col, end_col) {
            self.grid.set_wall(Position::new(row, col), face, false);
        }
    }

    fn make_vertical_opening(&mut self, col: usize, start_row: usize, end_row: usize, face: Direction) {
        if let Some(row) = self.pick_opening(start_row, end_row) {
            self.grid.set_wall(Position::new(row, col), face, false);
        }
    }
}
