//! Stop conditions for Rover bytecode execution.

use rover_world::WorldError;
use thiserror::Error;

/// Why execution stopped.
///
/// [`Stop::Finished`] is the normal end of a program — a RETURN executed
/// with an empty stack — and not a failure; callers check for it rather
/// than treat every stop as an error. The remaining variants terminate the
/// current run. None of them carries a source position: the caller attaches
/// one from the machine's current instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Stop {
    /// RETURN executed on an empty stack: the program is done.
    #[error("program finished")]
    Finished,

    /// The wall-clock budget ran out before the program finished. A
    /// heuristic, not a proof of non-termination.
    #[error("infinite loop detected")]
    InfiniteLoop,

    /// The world refused a robot action.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A world observer refused the resulting world and aborted the run.
    #[error("{message}")]
    Vetoed { message: String },
}
