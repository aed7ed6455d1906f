use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    InvalidDimension {
        rows: usize,
        cols: usize,
    },
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    InvalidGrid(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { rows, cols } => write!(
                f,
                "Maze dimensions must be at least 1x1, got {}x{}.",
                rows, cols
            ),
            MazeError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "Cell ({}, {}) is outside the {}x{} maze.",
                row, col, rows, cols
            ),
            MazeError::InvalidGrid(reason) => write!(f, "Invalid maze grid: {}.", reason),
        }
    }
}

impl std::error::Error for MazeError {}
