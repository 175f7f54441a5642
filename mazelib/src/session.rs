use rand::Rng;

use crate::direction::Direction;
use crate::error::Error;
use crate::grid::{Coordinate, Survey};
use crate::maze::Maze;
use crate::selector::{GeneratorKind, GeneratorSelector};

/// Construction-time knobs, fixed for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    /// Number of mazes the client plans to solve; sizes the selector's
    /// warm-up phase.
    pub times: usize,
}

/// Aggregate results for the end-of-run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub solved: usize,
    pub average_steps: u64,
}

/// The one active maze plus everything that outlives it: the score
/// history and the carver selector. Single-session by construction; the
/// owner serializes access, so no two moves are ever in flight at once.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    selector: GeneratorSelector,
    maze: Option<Maze>,
    scores: Vec<u64>,
    scored: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            selector: GeneratorSelector::new(config.times),
            config,
            maze: None,
            scores: Vec::new(),
            scored: false,
        }
    }

    /// Starts a fresh maze: pick a carver, carve, and place Icarus and
    /// the treasure apart from each other. Any maze still in progress is
    /// abandoned unscored. Returns the carver used and the survey for the
    /// waking room.
    pub fn begin(&mut self, rng: &mut impl Rng) -> Result<(GeneratorKind, Survey), Error> {
        let kind = self.selector.pick(rng);
        let grid = kind.carve(self.config.width, self.config.height, rng);

        let start = Coordinate {
            x: rng.gen_range(0..self.config.width),
            y: rng.gen_range(0..self.config.height),
        };
        let mut treasure = Coordinate {
            x: rng.gen_range(0..self.config.width),
            y: rng.gen_range(0..self.config.height),
        };
        // Don't put the treasure on top of Icarus.
        if treasure == start {
            treasure.x = if treasure.x > 0 {
                treasure.x - 1
            } else {
                treasure.x + 1
            };
            treasure.y = if treasure.y > 0 {
                treasure.y - 1
            } else {
                treasure.y + 1
            };
        }

        let maze = Maze::new(grid, start, treasure)?;
        let survey = maze.look_around()?;
        self.maze = Some(maze);
        self.scored = false;
        Ok((kind, survey))
    }

    /// One move plus the follow-up glance, which is what the wire
    /// protocol reports. The victory transition scores the session: the
    /// final step count goes to the history and to the selector, exactly
    /// once per maze.
    pub fn step(&mut self, dir: Direction) -> Result<Survey, Error> {
        let maze = self.maze.as_mut().ok_or(Error::NoActiveMaze)?;
        maze.walk(dir)?;
        match maze.look_around() {
            Err(Error::Victory) => {
                let steps = maze.steps();
                if !self.scored {
                    self.scored = true;
                    self.scores.push(steps);
                    self.selector.record(steps);
                }
                Err(Error::Victory)
            }
            other => other,
        }
    }

    /// Step count of the maze in progress, if any.
    pub fn steps(&self) -> u64 {
        self.maze.as_ref().map(Maze::steps).unwrap_or(0)
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        let solved = self.scores.len();
        let average_steps = if solved == 0 {
            0
        } else {
            self.scores.iter().sum::<u64>() / solved as u64
        };
        SessionStats {
            solved,
            average_steps,
        }
    }
}
