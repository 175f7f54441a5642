//! The five maze carvers. Each is a pure function of the dimensions (and
//! a random source where the algorithm calls for one) returning a fully
//! carved grid, and each finishes by sealing the outer border.

use rand::Rng;

use crate::direction::Direction;
use crate::grid::Grid;

/// Carves a maze without any walls inside. Wall-hugging solvers have a
/// very bad time in here.
pub fn empty_maze(width: i32, height: i32) -> Grid {
    let mut grid = Grid::open(width, height);
    grid.close_border();
    grid
}

/// Carves a maze that is topologically a straight line: every row is a
/// corridor with a single opening to the row below, alternating ends, so
/// a solver with the wrong bias walks roughly twice the room count.
pub fn simple_maze(width: i32, height: i32) -> Grid {
    let mut grid = Grid::open(width, height);

    for y in 0..height - 1 {
        let (from, to) = if y % 2 == 0 {
            (0, width - 1)
        } else {
            (1, width)
        };
        for x in from..to {
            grid.add_wall(x, y, Direction::South);
        }
    }

    grid.close_border();
    grid
}

/// Carves concentric rectangular rings, each with a single door placed on
/// alternating corners so getting inward means walking all the way
/// around. Larger grids trade some walls for open regions, which
/// backtracking solvers have to sweep room by room.
pub fn ring_maze(width: i32, height: i32) -> Grid {
    let mut grid = Grid::open(width, height);

    let step = if width * height >= 100 { 2 } else { 1 };

    let mut y = step;
    while y < height / 2 + 1 {
        for x in y..width - y {
            grid.add_wall(x, y, Direction::North);
            grid.add_wall(x, height - y - 1, Direction::South);
        }
        for j in y..height - y {
            grid.add_wall(y, j, Direction::West);
            grid.add_wall(width - y - 1, j, Direction::East);
        }

        if (y / step) % 2 == 0 {
            grid.remove_wall(y, y, Direction::West);
        } else {
            grid.remove_wall(width - y - 1, height - y - 1, Direction::East);
        }

        y += step;
    }

    grid.close_border();
    grid
}

/// Carves a maze where every room opens a passage north or west when one
/// is available, chosen at random; the top-left corner has neither and
/// opens nothing. Topologically a tree, with long hallways along the top
/// and left edges.
pub fn btree_maze(width: i32, height: i32, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::walled(width, height);
    let mut dirs: Vec<Direction> = Vec::with_capacity(2);

    for y in 0..height {
        for x in 0..width {
            dirs.clear();
            if y != 0 {
                dirs.push(Direction::North);
            }
            if x != 0 {
                dirs.push(Direction::West);
            }
            if !dirs.is_empty() {
                let dir = dirs[rng.gen_range(0..dirs.len())];
                grid.remove_wall(x, y, dir);
            }
        }
    }

    grid.close_border();
    grid
}

/// Carves with a randomized depth-first walk: pop the most recent room,
/// pick an unvisited neighbor at random, open the shared wall, and keep
/// going until every room has been reached. As random as a maze gets, and
/// always perfect.
pub fn tree_maze(width: i32, height: i32, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::walled(width, height);

    let mut stack = vec![(rng.gen_range(0..width), rng.gen_range(0..height))];
    let mut visited = vec![false; (width * height) as usize];
    let mut neighbors: Vec<Direction> = Vec::with_capacity(4);

    while let Some((x, y)) = stack.pop() {
        visited[(y * width + x) as usize] = true;

        neighbors.clear();
        for dir in Direction::ALL {
            let (nx, ny) = dir.shift(x, y);
            if grid.contains(nx, ny) && !visited[(ny * width + nx) as usize] {
                neighbors.push(dir);
            }
        }

        if !neighbors.is_empty() {
            let dir = neighbors[rng.gen_range(0..neighbors.len())];
            grid.remove_wall(x, y, dir);
            // Come back to this room after the neighbor's branch is done.
            stack.push((x, y));
            stack.push(dir.shift(x, y));
        }
    }

    grid.close_border();
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reachable_rooms(grid: &Grid) -> usize {
        let (w, h) = (grid.width(), grid.height());
        let mut seen = vec![false; (w * h) as usize];
        let mut pending = vec![(0, 0)];
        seen[0] = true;
        let mut count = 0;
        while let Some((x, y)) = pending.pop() {
            count += 1;
            for dir in Direction::ALL {
                if grid.room(x, y).unwrap().walls.blocks(dir) {
                    continue;
                }
                let (nx, ny) = dir.shift(x, y);
                if !grid.contains(nx, ny) {
                    continue;
                }
                let idx = (ny * w + nx) as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    pending.push((nx, ny));
                }
            }
        }
        count
    }

    /// Counts each open interior edge once, scanning east and south.
    fn passage_count(grid: &Grid) -> usize {
        let mut passages = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let walls = grid.room(x, y).unwrap().walls;
                if x + 1 < grid.width() && !walls.right {
                    passages += 1;
                }
                if y + 1 < grid.height() && !walls.bottom {
                    passages += 1;
                }
            }
        }
        passages
    }

    /// A perfect maze is a spanning tree over the rooms: fully connected
    /// with exactly rooms - 1 passages.
    fn assert_perfect(grid: &Grid) {
        let rooms = (grid.width() * grid.height()) as usize;
        assert_eq!(reachable_rooms(grid), rooms, "maze is not fully connected");
        assert_eq!(passage_count(grid), rooms - 1, "maze has a cycle");
    }

    #[test]
    fn simple_maze_is_perfect() {
        assert_perfect(&simple_maze(5, 5));
        assert_perfect(&simple_maze(8, 3));
        assert_perfect(&simple_maze(2, 2));
    }

    #[test]
    fn btree_maze_is_perfect() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_perfect(&btree_maze(6, 5, &mut rng));
        }
    }

    #[test]
    fn tree_maze_is_perfect() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            assert_perfect(&tree_maze(7, 7, &mut rng));
        }
    }

    #[test]
    fn empty_maze_opens_every_interior_edge() {
        let grid = empty_maze(4, 4);
        assert_eq!(passage_count(&grid), 24);
        assert_eq!(reachable_rooms(&grid), 16);
    }

    #[test]
    fn ring_maze_is_fully_reachable() {
        for (w, h) in [(6, 6), (9, 7), (12, 12)] {
            let grid = ring_maze(w, h);
            assert_eq!(reachable_rooms(&grid), (w * h) as usize);
        }
    }

    #[test]
    fn ring_maze_walls_off_the_first_ring() {
        let grid = ring_maze(6, 6);
        // The first ring sits one room in from the border...
        assert!(grid.room(2, 1).unwrap().walls.top);
        assert!(grid.room(1, 2).unwrap().walls.left);
        // ...and its single door is on the inner south-east corner.
        assert!(!grid.room(4, 4).unwrap().walls.right);
    }

    #[test]
    fn every_carver_seals_the_border() {
        let mut rng = StdRng::seed_from_u64(3);
        let mazes = [
            empty_maze(6, 4),
            simple_maze(6, 4),
            ring_maze(6, 4),
            btree_maze(6, 4, &mut rng),
            tree_maze(6, 4, &mut rng),
        ];
        for grid in &mazes {
            for x in 0..grid.width() {
                assert!(grid.room(x, 0).unwrap().walls.top);
                assert!(grid.room(x, grid.height() - 1).unwrap().walls.bottom);
            }
            for y in 0..grid.height() {
                assert!(grid.room(0, y).unwrap().walls.left);
                assert!(grid.room(grid.width() - 1, y).unwrap().walls.right);
            }
        }
    }

    #[test]
    fn btree_top_left_corner_keeps_north_and_west() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..10 {
            let grid = btree_maze(3, 3, &mut rng);
            let corner = grid.room(0, 0).unwrap();
            assert!(corner.walls.top);
            assert!(corner.walls.left);
        }
    }
}
