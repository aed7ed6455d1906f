use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::{Direction, Position};
use crate::error::MazeError;
use crate::maze::{CellHandle, Maze};

/// What the search just decided about a cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum VisitOutcome {
    Visited,
    DeadEnd,
    OnPath,
}

/// Depth-first search from `start` to `goal`. `Ok(None)` means the goal is
/// not reachable; the path, when found, is the first one the search hits and
/// not necessarily the shortest.
pub fn find_path(
    maze: &Maze,
    start: Position,
    goal: Position,
) -> Result<Option<Vec<CellHandle<'_>>>, MazeError> {
    find_path_with(maze, start, goal, |_, _| {})
}

/// Like [`find_path`], reporting every visit decision to `on_visit` as it is
/// made.
///
/// Each cell is reported as `Visited` the moment it is marked, then once
/// more as either `DeadEnd` or, when the goal is found, `OnPath`. `OnPath`
/// events run from the goal back to the start.
pub fn find_path_with<'m, F>(
    maze: &'m Maze,
    start: Position,
    goal: Position,
    on_visit: F,
) -> Result<Option<Vec<CellHandle<'m>>>, MazeError>
where
    F: FnMut(CellHandle<'m>, VisitOutcome),
{
    maze.check_bounds(start)?;
    maze.check_bounds(goal)?;

    debug!(%start, %goal, "searching for path");
    let mut search = Search::new(maze, on_visit);
    let path = search.run(start, goal);
    debug!(
        found = path.is_some(),
        visited = search.visited_count,
        "search finished"
    );

    Ok(path)
}

struct Frame {
    position: Position,
    next_direction: usize,
}

// One run's worth of visited markers. The frame stack mirrors the call stack
// of the recursive formulation, so the visiting order is the same.
struct Search<'m, F> {
    maze: &'m Maze,
    visited: Vec<bool>,
    visited_count: usize,
    on_visit: F,
}

impl<'m, F> Search<'m, F>
where
    F: FnMut(CellHandle<'m>, VisitOutcome),
{
    fn new(maze: &'m Maze, on_visit: F) -> Self {
        Search {
            maze,
            visited: vec![false; maze.grid().len()],
            visited_count: 0,
            on_visit,
        }
    }

    fn handle(&self, position: Position) -> Option<CellHandle<'m>> {
        self.maze.cell(position)
    }

    fn report(&mut self, position: Position, outcome: VisitOutcome) {
        if let Some(cell) = self.handle(position) {
            (self.on_visit)(cell, outcome);
        }
    }

    fn is_visited(&self, position: Position) -> bool {
        self.maze
            .grid()
            .index(position)
            .is_some_and(|i| self.visited[i])
    }

    fn visit(&mut self, position: Position) {
        if let Some(i) = self.maze.grid().index(position) {
            self.visited[i] = true;
            self.visited_count += 1;
        }
        self.report(position, VisitOutcome::Visited);
    }

    fn run(&mut self, start: Position, goal: Position) -> Option<Vec<CellHandle<'m>>> {
        let mut stack = vec![Frame {
            position: start,
            next_direction: 0,
        }];
        self.visit(start);

        if start == goal {
            return Some(self.finish(&stack));
        }

        while let Some(frame) = stack.last_mut() {
            let position = frame.position;

            let Some(&direction) = Direction::ALL.get(frame.next_direction) else {
                stack.pop();
                self.report(position, VisitOutcome::DeadEnd);
                continue;
            };
            frame.next_direction += 1;

            if !self.maze.grid().can_move(position, direction) {
                continue;
            }
            let Some(next) = position.step(direction) else {
                continue;
            };
            if self.is_visited(next) {
                continue;
            }

            self.visit(next);
            stack.push(Frame {
                position: next,
                next_direction: 0,
            });

            if next == goal {
                return Some(self.finish(&stack));
            }
        }

        None
    }

    fn finish(&mut self, stack: &[Frame]) -> Vec<CellHandle<'m>> {
        for frame in stack.iter().rev() {
            self.report(frame.position, VisitOutcome::OnPath);
        }

        stack
            .iter()
            .filter_map(|frame| self.handle(frame.position))
            .collect()
    }
}
