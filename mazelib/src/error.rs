use thiserror::Error;

/// Error taxonomy for the maze protocol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Defensive check on the move path. With consistent wall pairing the
    /// border walls stop Icarus first, so seeing this means a carver left
    /// a one-sided edge somewhere.
    #[error("room ({x}, {y}) is outside of the maze boundaries")]
    OutOfBounds { x: i32, y: i32 },

    #[error("can't walk through walls")]
    BlockedByWall,

    #[error("invalid direction {0:?}")]
    InvalidDirection(String),

    #[error("no maze in progress")]
    NoActiveMaze,

    #[error("start and treasure can't share a room")]
    PlacementClash,

    /// Not a fault: the sentinel that short-circuits the survey/move flow
    /// once Icarus is standing on the treasure.
    #[error("victory")]
    Victory,
}
