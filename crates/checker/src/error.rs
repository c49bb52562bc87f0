//! The ways a candidate program can fail its goal.

use thiserror::Error;

/// A divergence between the candidate's observable behavior and the goal's.
///
/// The wording is what learners see; every variant is reported through a
/// [`rover_common::Diagnostic`] positioned at the candidate's current
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GoalMismatch {
    /// The candidate produced more compared events than the goal.
    #[error("overshoots goal")]
    Overshoots,

    /// A compared event produced a world the goal trace does not match.
    #[error("deviates from goal")]
    Deviates,

    /// Final worlds differ under the finish-only policy.
    #[error("fails goal")]
    Fails,

    /// The candidate finished with goal events still unconsumed.
    #[error("falls short of goal")]
    FallsShort,
}
