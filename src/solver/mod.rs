use crate::{cell::Cell, maze::Maze};
use num_traits::Zero;
use thiserror::Error;

pub mod bfs;

/// No sequence of orthogonal moves through passable cells connects `start` to `end`. This is an
/// ordinary outcome of a search rather than a defect in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no path found from ({start}) to ({end})")]
pub struct PathNotFound {
    pub start: Cell,
    pub end: Cell,
}

pub trait MazeSolver {
    /// Computes a path from `start` to `end`, both inclusive, in which every consecutive pair of
    /// cells is one orthogonal step apart.
    fn find_path<T: Zero>(
        &self,
        maze: &Maze<T>,
        start: Cell,
        end: Cell,
    ) -> Result<Vec<Cell>, PathNotFound>;

    /// Number of steps on the path found by [find_path](Self::find_path), if there is one.
    fn path_length<T: Zero>(&self, maze: &Maze<T>, start: Cell, end: Cell) -> Option<usize> {
        self.find_path(maze, start, end)
            .ok()
            .map(|path| path.len().saturating_sub(1))
    }
}
