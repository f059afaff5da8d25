//! # maze_pathfinding
//!
//! Shortest paths through grid mazes. A [Maze] is a rectangular grid of integers in which nonzero
//! cells are passable and zero cells are blocked; movement is restricted to the four orthogonal
//! directions. Paths are found with
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search), which on a
//! uniform-cost grid yields a path with the minimal number of steps. Neighbours are expanded in a
//! fixed order (right, down, left, up) so that ties between equally short paths are always broken
//! the same way.
//!
//! Besides the solver, the crate contains the text [request] format used by the
//! `maze_pathfinding` binary and the polling [runner] loop that drives it.
//!
//! ```
//! use maze_pathfinding::{find_path, Cell, Maze};
//!
//! let maze = Maze::from_rows(vec![vec![1, 1, 1], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
//! let path = find_path(&maze, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
//! assert_eq!(path.len(), 7);
//! ```
mod cell;
pub mod error;
mod maze;
pub mod request;
pub mod runner;
pub mod solver;

pub use crate::cell::{is_connected_path, Cell, Direction};
pub use crate::maze::{Components, Maze, MazeError};
pub use crate::solver::{bfs::BfsSolver, MazeSolver, PathNotFound};

use num_traits::Zero;

/// Computes the shortest orthogonal path from `start` to `end` with a default [BfsSolver].
/// Blocked endpoints are not rejected; see [BfsSolver::strict] for that.
pub fn find_path<T: Zero>(maze: &Maze<T>, start: Cell, end: Cell) -> Result<Vec<Cell>, PathNotFound> {
    BfsSolver::new().find_path(maze, start, end)
}
