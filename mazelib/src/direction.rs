use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The four cardinal directions. North points towards y = 0, matching the
/// row order used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order the tree carver scans neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Displacement required to go one room in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Displaces (x, y) one room in this direction.
    pub fn shift(self, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(token: &str) -> Result<Direction, Error> {
        match token {
            "up" => Ok(Direction::North),
            "right" => Ok(Direction::East),
            "down" => Ok(Direction::South),
            "left" => Ok(Direction::West),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Direction::North => "up",
            Direction::East => "right",
            Direction::South => "down",
            Direction::West => "left",
        };
        f.write_str(token)
    }
}
