use core::fmt;
use itertools::Itertools;

/// One of the four orthogonal moves on the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Expansion order used by every search. Changing it changes which of several equally short
    /// paths gets returned.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// The (row, column) offset of a single step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// A (row, column) coordinate on a [Maze](crate::Maze). Rows grow downwards and columns grow to the
/// right, so `Cell::new(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// The cell one step away in `direction`, or [None] if that would need a negative coordinate.
    /// Upper bounds are not known here and are checked by the maze.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (d_row, d_col) = direction.delta();
        Some(Cell {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether `other` is exactly one orthogonal move away.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Checks that consecutive cells of `path` are all orthogonally adjacent. An empty or single-cell
/// path is trivially connected.
pub fn is_connected_path(path: &[Cell]) -> bool {
    path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_direction_order() {
        let c = Cell::new(1, 1);
        let stepped: Vec<Cell> = Direction::ALL
            .iter()
            .filter_map(|d| c.step(*d))
            .collect();
        assert_eq!(
            stepped,
            vec![
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(0, 1)
            ]
        );
    }

    #[test]
    fn step_off_the_top_left_is_none() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Cell::new(1, 0)));
    }

    #[test]
    fn adjacency_excludes_diagonals() {
        let c = Cell::new(2, 2);
        assert!(c.is_adjacent(&Cell::new(2, 3)));
        assert!(!c.is_adjacent(&Cell::new(3, 3)));
        assert!(!c.is_adjacent(&c));
        assert!(is_connected_path(&[Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]));
        assert!(!is_connected_path(&[Cell::new(0, 0), Cell::new(1, 1)]));
    }

    #[test]
    fn displays_as_row_then_column() {
        assert_eq!(Cell::new(3, 7).to_string(), "3 7");
    }
}
