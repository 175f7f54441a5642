use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use mazelib::{Direction, Survey};

use crate::api::{MazeApi, StepOutcome};

/// Directions in the order the solver prefers them.
const PRIORITY: [Direction; 4] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
];

/// Recursive backtracking solver. It knows nothing about the maze beyond
/// the surveys it has seen, so positions are tracked relative to the room
/// it woke up in. Each reachable room is visited at most once; a failed
/// branch is physically walked back with the reverse move, so the
/// server-side position always matches the logical backtrack state.
pub struct BacktrackingSolver<'a, A: MazeApi + ?Sized> {
    api: &'a A,
    visited: HashSet<(i32, i32)>,
}

impl<'a, A: MazeApi + ?Sized> BacktrackingSolver<'a, A> {
    pub fn new(api: &'a A) -> BacktrackingSolver<'a, A> {
        BacktrackingSolver {
            api,
            visited: HashSet::new(),
        }
    }

    /// Wakes up in a fresh maze and explores until the treasure is found
    /// or every reachable room has been tried. Returns whether the
    /// treasure was reached.
    pub async fn run(mut self) -> Result<bool> {
        let survey = self.api.awake().await?;
        self.explore(survey, (0, 0)).await
    }

    fn explore(
        &mut self,
        survey: Survey,
        at: (i32, i32),
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        Box::pin(async move {
            self.visited.insert(at);

            for dir in PRIORITY {
                if survey.blocks(dir) {
                    continue;
                }
                let target = dir.shift(at.0, at.1);
                if self.visited.contains(&target) {
                    continue;
                }

                match self.api.step(dir).await? {
                    StepOutcome::Victory(message) => {
                        println!("{message}");
                        return Ok(true);
                    }
                    StepOutcome::Rejected(_) => {
                        // The survey said this way was open but the server
                        // disagreed; nothing moved, try the next direction.
                        continue;
                    }
                    StepOutcome::Moved(next) => {
                        if self.explore(next, target).await? {
                            return Ok(true);
                        }
                        self.undo(dir).await?;
                    }
                }
            }

            Ok(false)
        })
    }

    /// Walks back after a failed branch so the physical position matches
    /// the logical one again. A rejected undo means the maze changed
    /// under us, which is not survivable.
    async fn undo(&mut self, dir: Direction) -> Result<()> {
        match self.api.step(dir.reverse()).await? {
            StepOutcome::Moved(_) => Ok(()),
            StepOutcome::Victory(message) => {
                anyhow::bail!("victory while backtracking: {message}")
            }
            StepOutcome::Rejected(message) => {
                anyhow::bail!("server rejected a backtracking move: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mazelib::{generate, Coordinate, Error, Grid, Maze};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// `MazeApi` over an in-memory maze, standing in for a live server
    /// with the same walk-then-glance semantics.
    struct MockMazeApi {
        maze: Mutex<Maze>,
    }

    impl MockMazeApi {
        fn new(grid: Grid, start: (i32, i32), treasure: (i32, i32)) -> MockMazeApi {
            let maze = Maze::new(
                grid,
                Coordinate {
                    x: start.0,
                    y: start.1,
                },
                Coordinate {
                    x: treasure.0,
                    y: treasure.1,
                },
            )
            .unwrap();
            MockMazeApi {
                maze: Mutex::new(maze),
            }
        }

        fn steps(&self) -> u64 {
            self.maze.lock().unwrap().steps()
        }
    }

    #[async_trait]
    impl MazeApi for MockMazeApi {
        async fn awake(&self) -> Result<Survey> {
            Ok(self.maze.lock().unwrap().look_around()?)
        }

        async fn step(&self, dir: Direction) -> Result<StepOutcome> {
            let mut maze = self.maze.lock().unwrap();
            match maze.walk(dir) {
                Ok(()) => match maze.look_around() {
                    Ok(survey) => Ok(StepOutcome::Moved(survey)),
                    Err(Error::Victory) => Ok(StepOutcome::Victory(format!(
                        "Victory achieved in {} steps",
                        maze.steps()
                    ))),
                    Err(err) => Err(err.into()),
                },
                Err(err) => Ok(StepOutcome::Rejected(err.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn empty_maze_diagonal_takes_exactly_eight_steps() {
        let api = MockMazeApi::new(generate::empty_maze(5, 5), (0, 0), (4, 4));
        let found = BacktrackingSolver::new(&api).run().await.unwrap();
        assert!(found);
        // The right/down bias walks the Manhattan distance, no detours.
        assert_eq!(api.steps(), 8);
    }

    #[tokio::test]
    async fn solves_tree_mazes_within_the_backtracking_bound() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate::tree_maze(6, 6, &mut rng);
            let api = MockMazeApi::new(grid, (0, 0), (5, 5));
            let found = BacktrackingSolver::new(&api).run().await.unwrap();
            assert!(found, "seed {seed} was not solved");
            assert!(api.steps() <= 36 * 36);
        }
    }

    #[tokio::test]
    async fn solves_a_striped_maze_against_its_bias() {
        // The treasure sits behind the serpentine's far end.
        let api = MockMazeApi::new(generate::simple_maze(5, 4), (4, 3), (0, 0));
        let found = BacktrackingSolver::new(&api).run().await.unwrap();
        assert!(found);
    }

    #[tokio::test]
    async fn solves_btree_and_ring_mazes() {
        let mut rng = StdRng::seed_from_u64(99);
        let cases = [
            generate::btree_maze(7, 5, &mut rng),
            generate::ring_maze(8, 8),
        ];
        for grid in cases {
            let api = MockMazeApi::new(grid, (3, 2), (6, 4));
            let found = BacktrackingSolver::new(&api).run().await.unwrap();
            assert!(found);
        }
    }

    #[tokio::test]
    async fn rejected_moves_leave_the_maze_untouched() {
        let api = MockMazeApi::new(generate::empty_maze(3, 3), (0, 0), (2, 2));
        // North of the waking room is the border.
        match api.step(Direction::North).await.unwrap() {
            StepOutcome::Rejected(_) => {}
            other => panic!("expected a rejection, got {other:?}"),
        }
        assert_eq!(api.steps(), 0);
    }
}
