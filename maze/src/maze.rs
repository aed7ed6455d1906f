pub mod maker;

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::{Direction, Position};
use crate::error::MazeError;
use crate::grid::Grid;
use maker::MazeMaker;
use maker::division::RecursiveDivision;

#[derive(Clone, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    depth: usize,
}

impl Maze {
    /// Builds a `rows × cols` maze, drawing every random choice from `rng`.
    pub fn generate<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, MazeError> {
        let grid = Grid::new(rows, cols)?;
        debug!(rows, cols, "generating maze");

        let mut maker = MazeMaker::new(grid, rng);
        maker.recursive_division();
        let depth = maker.deepest();

        debug!(rows, cols, depth, "maze generated");
        Ok(Maze {
            grid: maker.grid,
            depth,
        })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Deepest level the division pass recursed to. Zero for a 1x1 maze.
    pub fn generation_depth(&self) -> usize {
        self.depth
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellHandle<'_>> {
        self.cell(Position::new(row, col))
    }

    pub fn cell(&self, position: Position) -> Option<CellHandle<'_>> {
        if self.grid.contains(position) {
            Some(CellHandle {
                maze: self,
                position,
            })
        } else {
            None
        }
    }

    pub(crate) fn check_bounds(&self, position: Position) -> Result<(), MazeError> {
        if self.grid.contains(position) {
            Ok(())
        } else {
            let (rows, cols) = self.dimensions();
            Err(MazeError::OutOfBounds {
                row: position.row,
                col: position.col,
                rows,
                cols,
            })
        }
    }

    /// The ASCII drawing with every cell of `path` marked.
    pub fn render_with_path(&self, path: &[CellHandle<'_>]) -> String {
        let marked: HashSet<Position> = path.iter().map(|cell| cell.position).collect();
        self.grid.render(&marked)
    }
}

/// Builds a maze seeded from `seed`, or from the operating system when no
/// seed is given.
pub fn create_maze(rows: usize, cols: usize, seed: Option<u64>) -> Result<Maze, MazeError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    debug!(?seed, "seeded maze rng");
    Maze::generate(rows, cols, &mut rng)
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

/// A view of one cell that can look up its neighbors through the maze it
/// borrows.
#[derive(Clone, Copy)]
pub struct CellHandle<'a> {
    maze: &'a Maze,
    position: Position,
}

impl<'a> CellHandle<'a> {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.maze.grid.has_wall(self.position, direction)
    }

    pub fn neighbor(&self, direction: Direction) -> Option<CellHandle<'a>> {
        self.position
            .step(direction)
            .and_then(|position| self.maze.cell(position))
    }
}

impl PartialEq for CellHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for CellHandle<'_> {}

impl fmt::Debug for CellHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellHandle{}", self.position)
    }
}

impl From<CellHandle<'_>> for Position {
    fn from(cell: CellHandle<'_>) -> Self {
        cell.position
    }
}
