use std::collections::VecDeque;

use fxhash::FxBuildHasher;
use grid_util::grid::{BoolGrid, Grid};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;

use crate::{
    cell::Cell,
    maze::Maze,
    solver::{MazeSolver, PathNotFound},
};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Breadth-first search over the four orthogonal moves. Neighbours are always expanded in
/// [Direction::ALL](crate::Direction::ALL) order, so among several shortest paths the same one is
/// returned on every run.
///
/// By default only generated neighbours are checked for passability: a blocked start is still
/// searched from, and a blocked end is only ever reached when it equals the start. Setting
/// `require_passable_endpoints` rejects such requests up front instead.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver {
    pub require_passable_endpoints: bool,
}

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver::default()
    }

    /// A solver that reports [PathNotFound] whenever the start or end cell is blocked.
    pub fn strict() -> BfsSolver {
        BfsSolver {
            require_passable_endpoints: true,
        }
    }
}

/// Walks the predecessor chain back from `end`. Returns [None] if the chain breaks before reaching
/// `start`, which would mean the map was not built by a completed search.
fn reverse_path(predecessors: &FxIndexMap<Cell, Cell>, start: Cell, end: Cell) -> Option<Vec<Cell>> {
    let mut path: Vec<Cell> = std::iter::successors(Some(end), |cell| {
        if *cell == start {
            None
        } else {
            predecessors.get(cell).copied()
        }
    })
    .take(predecessors.len() + 1)
    .collect();
    if path.last() != Some(&start) {
        warn!(
            "Predecessor chain from ({}) does not lead back to ({})",
            end, start
        );
        return None;
    }
    path.reverse();
    Some(path)
}

impl MazeSolver for BfsSolver {
    fn find_path<T: Zero>(
        &self,
        maze: &Maze<T>,
        start: Cell,
        end: Cell,
    ) -> Result<Vec<Cell>, PathNotFound> {
        let not_found = PathNotFound { start, end };
        if !maze.contains(start) || !maze.contains(end) {
            warn!(
                "({}) or ({}) lies outside the {}x{} maze",
                start,
                end,
                maze.height(),
                maze.width()
            );
            return Err(not_found);
        }
        if self.require_passable_endpoints && !(maze.is_passable(start) && maze.is_passable(end))
        {
            debug!("({}) or ({}) is blocked", start, end);
            return Err(not_found);
        }

        // BoolGrid is indexed (x, y), i.e. (col, row).
        let mut visited = BoolGrid::new(maze.width(), maze.height(), false);
        visited.set(start.col, start.row, true);
        let mut queue = VecDeque::from([start]);
        let mut predecessors: FxIndexMap<Cell, Cell> = FxIndexMap::default();

        while let Some(current) = queue.pop_front() {
            if current == end {
                debug!(
                    "Reached ({}) from ({}) after visiting {} cells",
                    end,
                    start,
                    predecessors.len() + 1
                );
                return reverse_path(&predecessors, start, end).ok_or(not_found);
            }
            for next in maze.passable_neighbours(current) {
                // Marked on discovery so no cell is queued twice.
                if !visited.get(next.col, next.row) {
                    visited.set(next.col, next.row, true);
                    predecessors.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        debug!(
            "({}) is not reachable from ({}), visited {} cells",
            end,
            start,
            predecessors.len() + 1
        );
        Err(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::is_connected_path;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn detour_around_wall() {
        // ...
        // ##.
        // ...
        let maze = Maze::from_rows(vec![vec![1, 1, 1], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
        let path = BfsSolver::new()
            .find_path(&maze, Cell::new(0, 0), Cell::new(2, 0))
            .unwrap();
        assert_eq!(
            path,
            cells(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)])
        );
    }

    #[test]
    fn diagonal_contact_is_not_a_path() {
        let maze = Maze::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let start = Cell::new(0, 0);
        let end = Cell::new(1, 1);
        assert_eq!(
            BfsSolver::new().find_path(&maze, start, end),
            Err(PathNotFound { start, end })
        );
    }

    #[test]
    fn start_equals_end() {
        let maze = Maze::from_rows(vec![vec![1]]).unwrap();
        let c = Cell::new(0, 0);
        assert_eq!(BfsSolver::new().find_path(&maze, c, c), Ok(vec![c]));
        assert_eq!(BfsSolver::new().path_length(&maze, c, c), Some(0));
    }

    /// With several shortest paths, right is preferred over down, down over left, left over up.
    #[test]
    fn ties_break_in_direction_order() {
        let maze = Maze::from_rows(vec![vec![1; 3]; 3]).unwrap();
        let solver = BfsSolver::new();
        let path = solver
            .find_path(&maze, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap();
        assert_eq!(path, cells(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]));
        let back = solver
            .find_path(&maze, Cell::new(2, 2), Cell::new(0, 0))
            .unwrap();
        assert_eq!(back, cells(&[(2, 2), (2, 1), (2, 0), (1, 0), (0, 0)]));
        for _ in 0..10 {
            assert_eq!(
                solver.find_path(&maze, Cell::new(0, 0), Cell::new(2, 2)),
                Ok(path.clone())
            );
        }
    }

    #[test]
    fn blocked_start_is_still_searched_from() {
        // #.
        // ..
        let maze = Maze::from_rows(vec![vec![0, 1], vec![1, 1]]).unwrap();
        let start = Cell::new(0, 0);
        let end = Cell::new(1, 1);
        let path = BfsSolver::new().find_path(&maze, start, end).unwrap();
        assert_eq!(path, cells(&[(0, 0), (0, 1), (1, 1)]));
        assert_eq!(
            BfsSolver::strict().find_path(&maze, start, end),
            Err(PathNotFound { start, end })
        );
    }

    #[test]
    fn blocked_end_is_never_reached() {
        let maze = Maze::from_rows(vec![vec![1, 1, 0]]).unwrap();
        assert!(BfsSolver::new()
            .find_path(&maze, Cell::new(0, 0), Cell::new(0, 2))
            .is_err());
        // A blocked cell still reaches itself unless endpoints are checked.
        let c = Cell::new(0, 2);
        assert_eq!(BfsSolver::new().find_path(&maze, c, c), Ok(vec![c]));
        assert!(BfsSolver::strict().find_path(&maze, c, c).is_err());
    }

    #[test]
    fn out_of_bounds_endpoints_are_not_found() {
        let maze = Maze::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap();
        let solver = BfsSolver::new();
        assert!(solver
            .find_path(&maze, Cell::new(0, 0), Cell::new(2, 0))
            .is_err());
        assert!(solver
            .find_path(&maze, Cell::new(0, 5), Cell::new(0, 0))
            .is_err());
    }

    #[test]
    fn winding_corridor() {
        // .#...
        // .#.#.
        // ...#.
        let maze = Maze::from_rows(vec![
            vec![1, 0, 1, 1, 1],
            vec![1, 0, 1, 0, 1],
            vec![1, 1, 1, 0, 1],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 4);
        let path = BfsSolver::new().find_path(&maze, start, end).unwrap();
        assert_eq!(path.len(), 11);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert!(is_connected_path(&path));
        assert!(path.iter().all(|c| maze.is_passable(*c)));
    }

    #[test]
    fn broken_predecessor_chain_is_rejected() {
        let mut predecessors: FxIndexMap<Cell, Cell> = FxIndexMap::default();
        predecessors.insert(Cell::new(0, 2), Cell::new(0, 1));
        assert_eq!(
            reverse_path(&predecessors, Cell::new(0, 0), Cell::new(0, 2)),
            None
        );
        predecessors.insert(Cell::new(0, 1), Cell::new(0, 0));
        assert_eq!(
            reverse_path(&predecessors, Cell::new(0, 0), Cell::new(0, 2)),
            Some(cells(&[(0, 0), (0, 1), (0, 2)]))
        );
    }
}
