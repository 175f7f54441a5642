use crate::direction::Direction;
use crate::error::Error;
use crate::grid::{Coordinate, Grid, Survey};

/// One maze being solved: the carved grid plus where everything is.
/// Created fresh per session, mutated only by Icarus walking, discarded
/// when the session ends or the next maze is requested.
#[derive(Debug)]
pub struct Maze {
    grid: Grid,
    start: Coordinate,
    treasure: Coordinate,
    icarus: Coordinate,
    steps: u64,
}

impl Maze {
    /// Places Icarus and the treasure into a carved grid. The two
    /// coordinates must name different in-bounds rooms; placement is the
    /// only way the start/treasure flags get set, so no room can ever
    /// carry both.
    pub fn new(grid: Grid, start: Coordinate, treasure: Coordinate) -> Result<Maze, Error> {
        let mut maze = Maze {
            grid,
            start,
            treasure,
            icarus: start,
            steps: 0,
        };
        maze.set_start(start)?;
        maze.set_treasure(treasure)?;
        maze.grid.room_mut(start.x, start.y)?.visited = true;
        Ok(maze)
    }

    fn set_start(&mut self, at: Coordinate) -> Result<(), Error> {
        let room = self.grid.room_mut(at.x, at.y)?;
        if room.treasure {
            return Err(Error::PlacementClash);
        }
        room.start = true;
        self.start = at;
        self.icarus = at;
        Ok(())
    }

    fn set_treasure(&mut self, at: Coordinate) -> Result<(), Error> {
        let room = self.grid.room_mut(at.x, at.y)?;
        if room.start {
            return Err(Error::PlacementClash);
        }
        room.treasure = true;
        self.treasure = at;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn treasure(&self) -> Coordinate {
        self.treasure
    }

    /// Icarus's current position.
    pub fn icarus(&self) -> Coordinate {
        self.icarus
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Survey for Icarus's current room, or the victory sentinel when he
    /// is standing on the treasure. The victory check comes first, so a
    /// finished maze never reports walls again.
    pub fn look_around(&self) -> Result<Survey, Error> {
        if self.icarus == self.treasure {
            return Err(Error::Victory);
        }
        self.survey_at(self.icarus.x, self.icarus.y)
    }

    /// Survey for an arbitrary room.
    pub fn survey_at(&self, x: i32, y: i32) -> Result<Survey, Error> {
        Ok(self.grid.room(x, y)?.walls)
    }

    /// Walks Icarus one room in `dir`. Won't go through walls, won't go
    /// off the grid, and won't move at all once the treasure is reached.
    /// A successful walk bumps the step counter and marks the destination
    /// visited; a failed one changes nothing.
    pub fn walk(&mut self, dir: Direction) -> Result<(), Error> {
        let survey = self.look_around()?;
        if survey.blocks(dir) {
            return Err(Error::BlockedByWall);
        }

        let (x, y) = dir.shift(self.icarus.x, self.icarus.y);
        // The border wall should have stopped us already; failing here
        // means a carver left a one-sided edge.
        self.grid.room_mut(x, y)?.visited = true;
        self.icarus = Coordinate { x, y };
        self.steps += 1;
        Ok(())
    }
}
