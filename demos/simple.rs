use maze_pathfinding::{find_path, Cell, Maze};

// In this example a path is found on a 3x3 maze with shape
//  ___
// |S  |
// |## |
// |E  |
//  ___
// where
// - # marks a blocked cell (value 0)
// - S marks the start
// - E marks the end
//
// Only orthogonal moves are allowed, so the path has to go around the wall.

fn main() {
    let maze = Maze::from_rows(vec![vec![1, 1, 1], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
    println!("{}", maze);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 0);
    match find_path(&maze, start, end) {
        Ok(path) => {
            println!("Path:");
            for c in path {
                println!("{:?}", c);
            }
        }
        Err(e) => println!("{}", e),
    }
}
