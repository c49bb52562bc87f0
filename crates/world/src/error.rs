//! Domain errors raised by world operations.

use thiserror::Error;

/// A robot action that the world forbids.
///
/// These are user-program logic errors, not internal bugs: they terminate
/// the current run with a position-tagged diagnostic and leave the world
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Moving forward into a wall.
    #[error("blocked by a wall")]
    BlockedByWall,

    /// Picking a beeper from an empty cell.
    #[error("there is no beeper here to pick up")]
    NoBeeper,

    /// Dropping a beeper onto an occupied cell.
    #[error("there is already a beeper here")]
    BeeperAlreadyHere,
}
