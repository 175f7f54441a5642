use rand::Rng;

use crate::generate;
use crate::grid::Grid;

/// The five carvers Daedalus can field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Empty,
    Simple,
    Ring,
    BinaryTree,
    Tree,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Empty,
        GeneratorKind::Simple,
        GeneratorKind::Ring,
        GeneratorKind::BinaryTree,
        GeneratorKind::Tree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Empty => "empty",
            GeneratorKind::Simple => "simple",
            GeneratorKind::Ring => "ring",
            GeneratorKind::BinaryTree => "btree",
            GeneratorKind::Tree => "tree",
        }
    }

    /// Runs the carver. Dimensions must be at least 1x1; the randomized
    /// carvers draw from `rng`, the deterministic ones ignore it.
    pub fn carve(self, width: i32, height: i32, rng: &mut impl Rng) -> Grid {
        match self {
            GeneratorKind::Empty => generate::empty_maze(width, height),
            GeneratorKind::Simple => generate::simple_maze(width, height),
            GeneratorKind::Ring => generate::ring_maze(width, height),
            GeneratorKind::BinaryTree => generate::btree_maze(width, height, rng),
            GeneratorKind::Tree => generate::tree_maze(width, height, rng),
        }
    }
}

/// Keeps tabs on how much trouble each carver gives the client and picks
/// the next one with a bias towards the troublesome ones. Lives as long
/// as the serving process; never reset between mazes.
#[derive(Debug)]
pub struct GeneratorSelector {
    scorecard: Vec<u64>,
    last: usize,
    completed: usize,
    warmup: usize,
}

impl GeneratorSelector {
    /// `planned_sessions` is how many mazes the client intends to solve;
    /// it only sizes the warm-up phase.
    pub fn new(planned_sessions: usize) -> GeneratorSelector {
        let count = GeneratorKind::ALL.len();
        let warmup = (count * count).max((planned_sessions as f64).sqrt() as usize);
        GeneratorSelector {
            scorecard: vec![0; count],
            last: 0,
            completed: 0,
            warmup,
        }
    }

    /// Credits a finished maze's step count to the carver that built it.
    /// Must be called exactly once per completed session, before the next
    /// `pick`.
    pub fn record(&mut self, steps: u64) {
        self.scorecard[self.last] += steps;
        self.completed += 1;
    }

    /// Picks the carver for the next maze: round-robin while warming up
    /// so every carver gets exercised, then weighted by cumulative score
    /// so the client keeps seeing the mazes it struggles with.
    pub fn pick(&mut self, rng: &mut impl Rng) -> GeneratorKind {
        let count = self.scorecard.len();
        if self.completed < self.warmup {
            self.last = (self.last + 1) % count;
        } else {
            let total: u64 = self.scorecard.iter().sum();
            if total == 0 {
                // Every score is zero; a weighted draw over an empty
                // distribution has to degrade to a uniform one.
                self.last = rng.gen_range(0..count);
            } else {
                let mut n = rng.gen_range(0..total);
                for (i, &score) in self.scorecard.iter().enumerate() {
                    if n < score {
                        self.last = i;
                        break;
                    }
                    n -= score;
                }
            }
        }
        GeneratorKind::ALL[self.last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn warmup_threshold_follows_planned_sessions() {
        // 5 carvers: max(25, floor(sqrt(times)))
        assert_eq!(GeneratorSelector::new(25).warmup, 25);
        assert_eq!(GeneratorSelector::new(0).warmup, 25);
        assert_eq!(GeneratorSelector::new(10_000).warmup, 100);
    }

    #[test]
    fn warmup_round_robins_every_carver() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut selector = GeneratorSelector::new(25);
        let mut seen = [0usize; 5];

        for _ in 0..25 {
            let kind = selector.pick(&mut rng);
            let idx = GeneratorKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[idx] += 1;
            selector.record(10);
        }

        assert!(
            seen.iter().all(|&n| n == 5),
            "warm-up must exercise every carver equally, got {seen:?}"
        );
    }

    #[test]
    fn adaptive_phase_prefers_high_scores() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut selector = GeneratorSelector::new(1);

        // Warm up with the tree carver scoring far above the rest.
        for _ in 0..25 {
            let kind = selector.pick(&mut rng);
            selector.record(if kind == GeneratorKind::Tree { 1000 } else { 1 });
        }

        let tree_picks = (0..200)
            .filter(|_| selector.pick(&mut rng) == GeneratorKind::Tree)
            .count();
        assert!(
            tree_picks > 150,
            "expected the high scorer to dominate, got {tree_picks}/200"
        );
    }

    #[test]
    fn all_zero_scores_still_produce_a_choice() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut selector = GeneratorSelector::new(1);

        for _ in 0..25 {
            selector.pick(&mut rng);
            selector.record(0);
        }
        for _ in 0..10 {
            selector.pick(&mut rng);
        }
    }
}
