use crate::cell::{Cell, Direction};
use core::fmt;
use log::debug;
use num_traits::Zero;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use thiserror::Error;

/// Reasons a set of rows cannot form a [Maze].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular grid of cell values where a cell is passable if its value is nonzero and blocked
/// if it is zero. A [Maze] is non-empty and never changes after construction, so it can be shared
/// freely between searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze<T = i32> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Zero> Maze<T> {
    /// Builds a maze from row-major values, checking that there is at least one cell and that
    /// every row is as long as the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Maze<T>, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::Empty);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(MazeError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        debug!("Built {}x{} maze", height, width);
        Ok(Maze {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    fn ix(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.contains(cell) {
            self.cells.get(self.ix(cell))
        } else {
            None
        }
    }

    /// A cell is passable when it lies inside the maze and holds a nonzero value.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|v| !v.is_zero())
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    /// The passable orthogonal neighbours of `cell`, in [Direction::ALL] order.
    pub fn passable_neighbours(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        Direction::ALL
            .iter()
            .filter_map(|&d| cell.step(d))
            .filter(|&n| self.is_passable(n))
            .collect()
    }

    /// Links every passable cell to its passable right and down neighbours in a [UnionFind],
    /// which covers every orthogonal connection exactly once.
    pub fn components(&self) -> Components {
        let mut components = UnionFind::new(self.cells.len());
        let passable = self.cells.iter().map(|v| !v.is_zero()).collect::<Vec<_>>();
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Cell::new(row, col);
                if !self.is_passable(cell) {
                    continue;
                }
                let parent_ix = self.ix(cell);
                [Direction::Right, Direction::Down]
                    .iter()
                    .filter_map(|&d| cell.step(d))
                    .filter(|&n| self.is_passable(n))
                    .for_each(|n| {
                        components.union(parent_ix, self.ix(n));
                    });
            }
        }
        Components {
            components,
            passable,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Zero> fmt::Display for Maze<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line = row
                .iter()
                .map(|v| if v.is_zero() { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Connected components of the passable cells of a [Maze], as produced by [Maze::components].
#[derive(Clone, Debug)]
pub struct Components {
    components: UnionFind<usize>,
    passable: Vec<bool>,
    width: usize,
    height: usize,
}

impl Components {
    fn ix(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.height && cell.col < self.width).then(|| cell.row * self.width + cell.col)
    }

    /// Retrieves the component id of a passable cell.
    pub fn get_component(&self, cell: Cell) -> Option<usize> {
        self.ix(cell)
            .filter(|&ix| self.passable[ix])
            .map(|ix| self.components.find(ix))
    }

    /// Checks if `goal` can be walked to from `start` through passable cells. A cell always
    /// reaches itself.
    pub fn reachable(&self, start: Cell, goal: Cell) -> bool {
        if start == goal {
            return self.ix(start).is_some();
        }
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Checks if `start` and `goal` are not connected.
    pub fn unreachable(&self, start: Cell, goal: Cell) -> bool {
        !self.reachable(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged_rows() {
        assert_eq!(Maze::<i32>::from_rows(vec![]), Err(MazeError::Empty));
        assert_eq!(Maze::<i32>::from_rows(vec![vec![]]), Err(MazeError::Empty));
        assert_eq!(
            Maze::from_rows(vec![vec![1, 1], vec![1]]),
            Err(MazeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn passability_and_bounds() {
        let maze = Maze::from_rows(vec![vec![1, 0, 7], vec![0, -2, 1]]).unwrap();
        assert_eq!(maze.width(), 3);
        assert_eq!(maze.height(), 2);
        assert!(maze.is_passable(Cell::new(0, 0)));
        assert!(!maze.is_passable(Cell::new(0, 1)));
        assert!(maze.is_passable(Cell::new(0, 2)));
        assert!(maze.is_passable(Cell::new(1, 1)));
        assert!(!maze.is_passable(Cell::new(2, 0)));
        assert!(!maze.is_passable(Cell::new(0, 3)));
        assert_eq!(maze.get(Cell::new(1, 2)), Some(&1));
        assert_eq!(maze.get(Cell::new(5, 5)), None);
    }

    #[test]
    fn neighbours_are_filtered_and_ordered() {
        //  ...
        //  .#.
        //  ...
        let maze = Maze::from_rows(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(
            maze.passable_neighbours(Cell::new(0, 1)).as_slice(),
            &[Cell::new(0, 2), Cell::new(0, 0)]
        );
        assert_eq!(
            maze.passable_neighbours(Cell::new(1, 1)).as_slice(),
            &[
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(0, 1)
            ]
        );
        assert!(maze.passable_neighbours(Cell::new(2, 2)).len() == 2);
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // .#.
        // .#.
        let maze = Maze::from_rows(vec![vec![1, 0, 1], vec![1, 0, 1]]).unwrap();
        let components = maze.components();
        assert!(components.reachable(Cell::new(0, 0), Cell::new(1, 0)));
        assert!(components.unreachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(components.unreachable(Cell::new(0, 0), Cell::new(0, 1)));
        assert_eq!(components.get_component(Cell::new(1, 1)), None);
        assert!(components.reachable(Cell::new(1, 1), Cell::new(1, 1)));
        assert!(components.unreachable(Cell::new(9, 9), Cell::new(9, 9)));
    }

    /// Diagonal contact does not connect two cells.
    #[test]
    fn diagonal_cells_are_separate_components() {
        let maze = Maze::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let components = maze.components();
        assert!(components.unreachable(Cell::new(0, 0), Cell::new(1, 1)));
    }

    #[test]
    fn display_marks_blocked_cells() {
        let maze = Maze::from_rows(vec![vec![1, 0], vec![0, 3]]).unwrap();
        assert_eq!(maze.to_string(), ".#\n#.\n");
    }
}
