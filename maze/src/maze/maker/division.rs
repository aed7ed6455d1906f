use rand::Rng;
use tracing::trace;

use super::MazeMaker;
use crate::direction::Direction;

pub trait RecursiveDivision {
    fn recursive_division(&mut self);
}

impl<R: Rng> RecursiveDivision for MazeMaker<'_, R> {
    fn recursive_division(&mut self) {
        self.divide(0, 0, self.rows - 1, self.cols - 1);
    }
}

impl<R: Rng> MazeMaker<'_, R> {
    // Splits the inclusive region (r0, c0)-(r1, c1) into quadrants around a
    // random pivot. Walls go on the pivot's South and East faces, each given
    // one opening per side of the pivot, then the quadrants that are at least
    // three cells in both axes are divided again.
    fn divide(&mut self, r0: usize, c0: usize, r1: usize, c1: usize) {
        if r0 == r1 && c0 == c1 {
            return;
        }

        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);

        let row = self.pick(r0, r1);
        let col = self.pick(c0, c1);
        trace!(r0, c0, r1, c1, row, col, depth = self.depth, "dividing region");

        self.make_horizontal_wall(row, c0, c1, Direction::South);
        if row < self.rows - 1 {
            self.make_horizontal_opening(row, c0, col, Direction::South);
            self.make_horizontal_opening(row, col, c1, Direction::South);
        }

        self.make_vertical_wall(col, r0, r1, Direction::East);
        if col < self.cols - 1 {
            self.make_vertical_opening(col, r0, row, Direction::East);
            self.make_vertical_opening(col, row, r1, Direction::East);
        }

        for (qr0, qc0, qr1, qc1) in quadrants(r0, c0, r1, c1, row, col) {
            self.divide(qr0, qc0, qr1, qc1);
        }

        self.depth -= 1;
    }
}

type Region = (usize, usize, usize, usize);

// The quadrants around pivot (row, col) that are still worth dividing: at
// least three cells in both axes, and smaller than the region itself. A pivot
// on a corner of the region makes one quadrant the whole region again; that
// one is skipped so every call works on strictly fewer cells.
fn quadrants(r0: usize, c0: usize, r1: usize, c1: usize, row: usize, col: usize) -> Vec<Region> {
    let mut out = Vec::with_capacity(4);

    if row - r0 > 1 {
        if col - c0 > 1 {
            out.push((r0, c0, row, col));
        }
        if c1 - col > 1 {
            out.push((r0, col, row, c1));
        }
    }
    if r1 - row > 1 {
        if c1 - col > 1 {
            out.push((row, col, r1, c1));
        }
        if col - c0 > 1 {
            out.push((row, c0, r1, col));
        }
    }

    out.retain(|quadrant| *quadrant != (r0, c0, r1, c1));
    out
}
