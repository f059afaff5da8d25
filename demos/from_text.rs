use maze_pathfinding::request::{read_request, write_path};
use maze_pathfinding::{BfsSolver, MazeSolver};
use std::io::{self, Cursor};

// Reads a request in the text format understood by the binary and prints the answer in the
// same form it would be written to stdout.
const REQUEST: &str = "\
4 5
1 1 1 0 1
0 1 0 1 1
1 1 1 1 0
1 0 0 1 1
0 0 3 4
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = read_request(&mut Cursor::new(REQUEST))?.ok_or("empty request")?;
    print!("{}", request.maze);
    let path = BfsSolver::new().find_path(&request.maze, request.start, request.end)?;
    write_path(&mut io::stdout(), &path)?;
    Ok(())
}
