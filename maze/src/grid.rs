use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::{Direction, Position};
use crate::error::MazeError;

/// One grid position and the four wall flags around it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    walls: [bool; 4],
}

impl Cell {
    fn new(position: Position) -> Self {
        Cell {
            position,
            walls: [false; 4],
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

/// A fixed-size `rows × cols` arena of cells, stored row-major.
///
/// Walls are kept symmetric: whenever a neighbor exists in direction `d`,
/// a cell's `d` flag equals the neighbor's `d.opposite()` flag.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

// Unchecked shape of a serialized grid.
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = MazeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let RawGrid { rows, cols, cells } = raw;
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }
        if cells.len() != rows * cols {
            return Err(MazeError::InvalidGrid(format!(
                "expected {} cells for {}x{}, found {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }

        let grid = Grid { rows, cols, cells };
        grid.validate()?;
        Ok(grid)
    }
}

impl Grid {
    /// Creates a grid with every perimeter face walled and no interior walls.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Position::new(row, col)));
            }
        }

        let mut grid = Grid { rows, cols, cells };

        for col in 0..cols {
            grid.set_wall(Position::new(0, col), Direction::North, true);
            grid.set_wall(Position::new(rows - 1, col), Direction::South, true);
        }
        for row in 0..rows {
            grid.set_wall(Position::new(row, 0), Direction::West, true);
            grid.set_wall(Position::new(row, cols - 1), Direction::East, true);
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub(crate) fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Out-of-range coordinates give `None`, never a panic.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(Position::new(row, col)).map(|i| &self.cells[i])
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).map(|i| &self.cells[i])
    }

    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&Cell> {
        position.step(direction).and_then(|p| self.cell(p))
    }

    /// Missing cells report no wall.
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_some_and(|cell| cell.has_wall(direction))
    }

    /// True when a step in `direction` is neither walled off nor leaves the grid.
    pub fn can_move(&self, position: Position, direction: Direction) -> bool {
        self.cell(position).is_some()
            && !self.has_wall(position, direction)
            && self.neighbor(position, direction).is_some()
    }

    /// Sets one wall flag and mirrors it onto the neighbor's opposite face.
    ///
    /// Setting a flag to the value it already has does nothing, which is also
    /// what stops the mirror update from bouncing back. Out-of-range
    /// positions are ignored.
    pub fn set_wall(&mut self, position: Position, direction: Direction, present: bool) {
        let Some(i) = self.index(position) else {
            return;
        };

        let flag = &mut self.cells[i].walls[direction.index()];
        if *flag == present {
            return;
        }
        *flag = present;

        if let Some(neighbor) = position.step(direction).filter(|p| self.contains(*p)) {
            self.set_wall(neighbor, direction.opposite(), present);
        }
    }

    // Cells in row-major order, mirrored walls, closed perimeter.
    fn validate(&self) -> Result<(), MazeError> {
        for (i, cell) in self.cells.iter().enumerate() {
            let expected = Position::new(i / self.cols, i % self.cols);
            if cell.position != expected {
                return Err(MazeError::InvalidGrid(format!(
                    "cell {} should be at {}, found {}",
                    i, expected, cell.position
                )));
            }

            for direction in Direction::ALL {
                match self.neighbor(cell.position, direction) {
                    Some(neighbor) => {
                        if cell.has_wall(direction) != neighbor.has_wall(direction.opposite()) {
                            return Err(MazeError::InvalidGrid(format!(
                                "{} wall of {} is not mirrored",
                                direction, cell.position
                            )));
                        }
                    }
                    None => {
                        if !cell.has_wall(direction) {
                            return Err(MazeError::InvalidGrid(format!(
                                "{} edge of {} is open",
                                direction, cell.position
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Row-major iterator over every coordinate.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(|cell| cell.position)
    }

    /// One byte per cell, row-major, with bit `d.index()` set when the wall
    /// in direction `d` is present.
    pub fn wall_bits(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|cell| {
                cell.walls
                    .iter()
                    .enumerate()
                    .filter(|(_, present)| **present)
                    .fold(0u8, |bits, (i, _)| bits | (1 << i))
            })
            .collect()
    }

    pub(crate) fn render(&self, marked: &HashSet<Position>) -> String {
        let mut out = String::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push('+');
                out.push_str(if self.has_wall(Position::new(row, col), Direction::North) {
                    "---"
                } else {
                    "   "
                });
            }
            out.push_str("+\n");

            for col in 0..self.cols {
                let position = Position::new(row, col);
                out.push(if self.has_wall(position, Direction::West) {
                    '|'
                } else {
                    ' '
                });
                out.push_str(if marked.contains(&position) {
                    " * "
                } else {
                    "   "
                });
            }
            out.push(
                if self.has_wall(Position::new(row, self.cols - 1), Direction::East) {
                    '|'
                } else {
                    ' '
                },
            );
            out.push('\n');
        }

        for col in 0..self.cols {
            out.push('+');
            out.push_str(
                if self.has_wall(Position::new(self.rows - 1, col), Direction::South) {
                    "---"
                } else {
                    "   "
                },
            );
        }
        out.push('+');

        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&HashSet::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(grid: &Grid) {
        for position in grid.positions() {
            for direction in Direction::ALL {
                if let Some(neighbor) = grid.neighbor(position, direction) {
                    assert_eq!(
                        grid.has_wall(position, direction),
                        neighbor.has_wall(direction.opposite()),
                        "wall {} of {} disagrees with its neighbor:\n{}",
                        direction,
                        position,
                        grid
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_grid_is_closed_on_the_perimeter_only() {
        let grid = Grid::new(3, 4).expect("dimensions are valid");

        for position in grid.positions() {
            let Position { row, col } = position;
            assert_eq!(grid.has_wall(position, Direction::North), row == 0);
            assert_eq!(grid.has_wall(position, Direction::South), row == 2);
            assert_eq!(grid.has_wall(position, Direction::West), col == 0);
            assert_eq!(grid.has_wall(position, Direction::East), col == 3);
        }
        assert_symmetric(&grid);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(MazeError::InvalidDimension { rows: 0, cols: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_single_cell_grid_has_all_four_walls() {
        let grid = Grid::new(1, 1).expect("dimensions are valid");
        let cell = grid.cell_at(0, 0).expect("the only cell should exist");
        for direction in Direction::ALL {
            assert!(cell.has_wall(direction), "missing {} wall", direction);
        }
    }

    #[test]
    fn test_cell_at_out_of_range_is_none() {
        let grid = Grid::new(2, 2).expect("dimensions are valid");
        assert!(grid.cell_at(2, 0).is_none());
        assert!(grid.cell_at(0, 2).is_none());
        assert!(grid.cell_at(usize::MAX, usize::MAX).is_none());
        assert!(grid.neighbor(Position::new(0, 0), Direction::North).is_none());
        assert!(grid.neighbor(Position::new(1, 1), Direction::East).is_none());
    }

    #[test]
    fn test_set_wall_mirrors_onto_neighbor() {
        let mut grid = Grid::new(3, 3).expect("dimensions are valid");
        let centre = Position::new(1, 1);

        grid.set_wall(centre, Direction::East, true);
        assert!(grid.has_wall(Position::new(1, 2), Direction::West));

        grid.set_wall(Position::new(0, 1), Direction::South, true);
        assert!(grid.has_wall(centre, Direction::North));

        grid.set_wall(Position::new(1, 2), Direction::West, false);
        assert!(!grid.has_wall(centre, Direction::East));

        assert_symmetric(&grid);
    }

    #[test]
    fn test_set_wall_is_one_hop() {
        let mut grid = Grid::new(1, 4).expect("dimensions are valid");
        grid.set_wall(Position::new(0, 1), Direction::East, true);

        assert!(grid.has_wall(Position::new(0, 1), Direction::East));
        assert!(grid.has_wall(Position::new(0, 2), Direction::West));
        assert!(!grid.has_wall(Position::new(0, 2), Direction::East));
        assert!(!grid.has_wall(Position::new(0, 0), Direction::East));
    }

    #[test]
    fn test_set_wall_on_boundary_skips_propagation() {
        let mut grid = Grid::new(2, 2).expect("dimensions are valid");
        grid.set_wall(Position::new(0, 0), Direction::North, false);
        assert!(!grid.has_wall(Position::new(0, 0), Direction::North));
        assert_symmetric(&grid);

        // Out-of-range writes are dropped.
        grid.set_wall(Position::new(5, 5), Direction::North, false);
    }

    #[test]
    fn test_wall_bits_encode_directions() {
        let grid = Grid::new(1, 2).expect("dimensions are valid");
        let north = 1 << Direction::North.index();
        let east = 1 << Direction::East.index();
        let south = 1 << Direction::South.index();
        let west = 1 << Direction::West.index();

        assert_eq!(grid.wall_bits(), vec![north | south | west, north | east | south]);
    }

    #[test]
    fn test_can_move_respects_walls_and_edges() {
        let mut grid = Grid::new(2, 2).expect("dimensions are valid");
        let origin = Position::new(0, 0);
        assert!(grid.can_move(origin, Direction::East));
        assert!(grid.can_move(origin, Direction::South));
        assert!(!grid.can_move(origin, Direction::North));

        grid.set_wall(origin, Direction::East, true);
        assert!(!grid.can_move(origin, Direction::East));
        assert!(!grid.can_move(Position::new(0, 1), Direction::West));
    }

    #[test]
    fn test_serialized_grid_round_trips() {
        let mut grid = Grid::new(3, 2).expect("dimensions are valid");
        grid.set_wall(Position::new(1, 0), Direction::East, true);

        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wall_bits(), grid.wall_bits());
    }

    #[test]
    fn test_deserialize_rejects_missing_cells() {
        let result = serde_json::from_str::<Grid>(r#"{"rows":3,"cols":3,"cells":[]}"#);
        let error = result.unwrap_err().to_string();
        assert!(error.contains("expected 9 cells"), "{}", error);
    }

    #[test]
    fn test_deserialize_rejects_zero_dimensions() {
        assert!(serde_json::from_str::<Grid>(r#"{"rows":0,"cols":0,"cells":[]}"#).is_err());
    }

    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> Result<Grid, serde_json::Error> {
        let grid = Grid::new(2, 2).expect("dimensions are valid");
        let mut value = serde_json::to_value(&grid).unwrap();
        edit(&mut value);
        serde_json::from_value(value)
    }

    #[test]
    fn test_deserialize_rejects_one_sided_wall() {
        let east = Direction::East.index();
        let error = tampered(|v| v["cells"][0]["walls"][east] = true.into()).unwrap_err();
        assert!(error.to_string().contains("not mirrored"), "{}", error);
    }

    #[test]
    fn test_deserialize_rejects_open_perimeter() {
        let north = Direction::North.index();
        let error = tampered(|v| v["cells"][1]["walls"][north] = false.into()).unwrap_err();
        assert!(error.to_string().contains("is open"), "{}", error);
    }

    #[test]
    fn test_deserialize_rejects_shuffled_cells() {
        let error = tampered(|v| {
            let cells = v["cells"].as_array_mut().unwrap();
            cells.swap(0, 3);
        })
        .unwrap_err();
        assert!(error.to_string().contains("should be at"), "{}", error);
    }

    #[test]
    fn test_display_draws_walls() {
        let mut grid = Grid::new(2, 2).expect("dimensions are valid");
        grid.set_wall(Position::new(0, 0), Direction::East, true);

        let expected = "\
+---+---+
|   |   |
+   +   +
|       |
+---+---+";
        assert_eq!(grid.to_string(), expected);
    }
}
