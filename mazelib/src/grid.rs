use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::Error;

/// A location in the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

/// Wall visibility for one room; true means a wall is present. The same
/// type is a room's own wall set and the report sent over the wire, since
/// the report is just a copy of the wall set taken on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Survey {
    /// Whether this wall set blocks movement in `dir`.
    pub fn blocks(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.top,
            Direction::East => self.right,
            Direction::South => self.bottom,
            Direction::West => self.left,
        }
    }
}

/// The minimum information about a room in the maze.
#[derive(Debug, Clone, Copy, Default)]
pub struct Room {
    pub walls: Survey,
    pub treasure: bool,
    pub start: bool,
    pub visited: bool,
}

impl Room {
    fn set_wall(&mut self, dir: Direction, present: bool) {
        match dir {
            Direction::North => self.walls.top = present,
            Direction::East => self.walls.right = present,
            Direction::South => self.walls.bottom = present,
            Direction::West => self.walls.left = present,
        }
    }
}

/// Rectangular collection of rooms, fixed width and height for its
/// lifetime. Interior walls are only mutated through the paired edge
/// operations so the two sides of a shared edge can never disagree; the
/// border is the one exception, sealed room by room via `close_border`.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    rooms: Vec<Room>,
}

impl Grid {
    /// A grid without any walls. Starting point for additive carvers.
    pub fn open(width: i32, height: i32) -> Grid {
        assert!(width >= 1 && height >= 1, "grid dimensions must be positive");
        Grid {
            width,
            height,
            rooms: vec![Room::default(); (width * height) as usize],
        }
    }

    /// A grid with every wall present. Starting point for subtractive
    /// carvers.
    pub fn walled(width: i32, height: i32) -> Grid {
        let mut grid = Grid::open(width, height);
        let sealed = Survey {
            top: true,
            right: true,
            bottom: true,
            left: true,
        };
        for room in &mut grid.rooms {
            room.walls = sealed;
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn room(&self, x: i32, y: i32) -> Result<&Room, Error> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(&self.rooms[(y * self.width + x) as usize])
    }

    pub fn room_mut(&mut self, x: i32, y: i32) -> Result<&mut Room, Error> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(&mut self.rooms[(y * self.width + x) as usize])
    }

    /// In-bounds room access for callers that have already validated the
    /// coordinate, such as the carvers and the renderers.
    pub(crate) fn at(&self, x: i32, y: i32) -> &Room {
        debug_assert!(self.contains(x, y));
        &self.rooms[(y * self.width + x) as usize]
    }

    /// Removes the wall between (x, y) and its neighbor in `dir`, on both
    /// sides of the shared edge.
    pub fn remove_wall(&mut self, x: i32, y: i32, dir: Direction) {
        self.set_edge(x, y, dir, false);
    }

    /// Adds the wall between (x, y) and its neighbor in `dir`, on both
    /// sides of the shared edge.
    pub fn add_wall(&mut self, x: i32, y: i32, dir: Direction) {
        self.set_edge(x, y, dir, true);
    }

    fn set_edge(&mut self, x: i32, y: i32, dir: Direction, present: bool) {
        let (nx, ny) = dir.shift(x, y);
        // An edge crossing the boundary is a carver bug; a one-sided wall
        // would corrupt every survey after it, so fail loudly here.
        assert!(
            self.contains(x, y) && self.contains(nx, ny),
            "edge ({x}, {y}) -> ({nx}, {ny}) crosses the maze boundary"
        );
        self.rooms[(y * self.width + x) as usize].set_wall(dir, present);
        self.rooms[(ny * self.width + nx) as usize].set_wall(dir.reverse(), present);
    }

    /// Seals the four outer edges, mutating single rooms directly. Every
    /// carver finishes with this so the maze is enclosed whatever the
    /// builder produced.
    pub fn close_border(&mut self) {
        for x in 0..self.width {
            self.rooms[x as usize].set_wall(Direction::North, true);
            self.rooms[((self.height - 1) * self.width + x) as usize]
                .set_wall(Direction::South, true);
        }
        for y in 0..self.height {
            self.rooms[(y * self.width) as usize].set_wall(Direction::West, true);
            self.rooms[(y * self.width + self.width - 1) as usize]
                .set_wall(Direction::East, true);
        }
    }
}
