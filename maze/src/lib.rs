//! Grid mazes carved by recursive space division, and a depth-first solver
//! that walks them.
//!
//! ```
//! use maze::{Position, create_maze, find_path};
//!
//! let maze = create_maze(8, 12, Some(42)).unwrap();
//! match find_path(&maze, Position::new(0, 0), Position::new(7, 11)).unwrap() {
//!     Some(path) => println!("Path found! {} cells.", path.len()),
//!     None => println!("No solution."),
//! }
//! ```

pub mod direction;
pub mod error;
pub mod grid;
pub mod maze;
pub mod solver;

pub use direction::{Direction, Position};
pub use error::MazeError;
pub use grid::{Cell, Grid};
pub use maze::{CellHandle, Maze, create_maze};
pub use solver::{VisitOutcome, find_path, find_path_with};
