//! Line-oriented text format for path requests and their answers.
//!
//! A request is
//!
//! ```text
//! <rows> <cols>
//! <cols values>            (repeated rows times)
//! <start_row> <start_col> <end_row> <end_col>
//! ```
//!
//! and an answer is one `row col` line per path cell followed by a line holding a single `.`.
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::trace;
use thiserror::Error;

use crate::{
    cell::Cell,
    maze::{Maze, MazeError},
};

/// Marks the end of a written path so it can be told apart from anything printed around it.
pub const PATH_TERMINATOR: &str = ".";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} values, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid maze: {0}")]
    Maze(#[from] MazeError),
    #[error("({cell}) lies outside the maze")]
    OutOfBounds { cell: Cell },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A parsed request: the maze and the two endpoints, both checked to lie inside the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRequest {
    pub maze: Maze<i64>,
    pub start: Cell,
    pub end: Cell,
}

/// Reads whitespace separated integers line by line, skipping blank lines and counting line
/// numbers for error messages. Bytes that are not valid UTF-8 are decoded lossily, so they show
/// up as unparsable tokens rather than as a stream failure.
struct LineReader<'a, R> {
    reader: &'a mut R,
    line: usize,
    bytes: Vec<u8>,
    buf: String,
}

impl<'a, R: BufRead> LineReader<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        LineReader {
            reader,
            line: 0,
            bytes: Vec::new(),
            buf: String::new(),
        }
    }

    /// Advances to the next non-blank line. Returns `false` at end of input.
    fn advance(&mut self) -> io::Result<bool> {
        loop {
            self.bytes.clear();
            if self.reader.read_until(b'\n', &mut self.bytes)? == 0 {
                return Ok(false);
            }
            self.line += 1;
            self.buf = String::from_utf8_lossy(&self.bytes).into_owned();
            if !self.buf.trim().is_empty() {
                trace!("line {}: {}", self.line, self.buf.trim_end());
                return Ok(true);
            }
        }
    }

    fn numbers<T: FromStr>(
        &mut self,
        expected: usize,
        what: &'static str,
    ) -> Result<Vec<T>, RequestError> {
        if !self.advance()? {
            return Err(RequestError::UnexpectedEof { expected: what });
        }
        let line = self.line;
        let values = self
            .buf
            .split_whitespace()
            .map(|token| {
                token.parse::<T>().map_err(|_| RequestError::InvalidNumber {
                    line,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        if values.len() != expected {
            return Err(RequestError::FieldCount {
                line,
                expected,
                found: values.len(),
            });
        }
        Ok(values)
    }
}

/// Reads one request. Returns `Ok(None)` if the input ends before a request starts; running out
/// of input in the middle of a request is an error.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<PathRequest>, RequestError> {
    let mut lines = LineReader::new(reader);
    let dims = match lines.numbers::<usize>(2, "maze dimensions") {
        Err(RequestError::UnexpectedEof { .. }) => return Ok(None),
        other => other?,
    };
    let (rows, cols) = (dims[0], dims[1]);
    if rows == 0 || cols == 0 {
        return Err(MazeError::Empty.into());
    }
    let grid = (0..rows)
        .map(|_| lines.numbers::<i64>(cols, "maze row"))
        .collect::<Result<Vec<_>, _>>()?;
    let maze = Maze::from_rows(grid)?;

    let coords = lines.numbers::<usize>(4, "start and end coordinates")?;
    let start = Cell::new(coords[0], coords[1]);
    let end = Cell::new(coords[2], coords[3]);
    for cell in [start, end] {
        if !maze.contains(cell) {
            return Err(RequestError::OutOfBounds { cell });
        }
    }
    Ok(Some(PathRequest { maze, start, end }))
}

/// Writes one `row col` line per cell followed by [PATH_TERMINATOR].
pub fn write_path<W: Write>(writer: &mut W, path: &[Cell]) -> io::Result<()> {
    for cell in path {
        writeln!(writer, "{}", cell)?;
    }
    writeln!(writer, "{}", PATH_TERMINATOR)?;
    writer.flush()
}
