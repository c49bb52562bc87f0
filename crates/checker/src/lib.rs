//! Rover checker — verifies a candidate program against a goal program.
//!
//! For every sampled initial world the checker first runs the goal program
//! to completion, collecting the world snapshots selected by the problem's
//! [`CheckAfter`] policy, then replays the candidate with an observer that
//! consumes the goal trace one snapshot at a time and stops the run at the
//! first divergence. The outer loop keeps sampling worlds until the
//! two-second budget runs out or a finite supply is exhausted.
//!
//! # Usage
//!
//! ```
//! use rover_checker::{check, Verdict};
//! use rover_common::{Instruction, Opcode, Program};
//! use rover_world::{CheckAfter, Direction, Problem, World, WorldRef};
//!
//! let program = Program::with_entry_padding(vec![
//!     Instruction::norm(Opcode::MoveForward, 1),
//!     Instruction::norm(Opcode::Return, 2),
//! ])
//! .unwrap();
//!
//! let problem = Problem::exhaustive(
//!     "one_step",
//!     "Take one step east.",
//!     CheckAfter::BeeperMove,
//!     vec![World::empty().with_robot(0, 9, Direction::East)],
//! );
//!
//! let world_ref = WorldRef::new(problem.random_world());
//! let verdict = check(&program, &program, &problem, &world_ref, || {}).unwrap();
//! assert_eq!(verdict, Verdict::AllWorlds { total: 1 });
//! ```

pub mod background;
pub mod error;
pub mod trace;
pub mod verdict;

mod lockstep;

pub use background::check_in_background;
pub use error::GoalMismatch;
pub use trace::{TraceComparer, TraceRecorder};
pub use verdict::Verdict;

use std::time::{Duration, Instant};

use rover_common::{Diagnostic, Program};
use rover_world::{Problem, WorldRef};

/// Total wall-clock budget for the multi-world loop.
pub const CHECK_BUDGET: Duration = Duration::from_secs(2);

/// How often `on_progress` fires so a host can repaint the shared world.
pub const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Check `candidate` against `goal` over the problem's world supply.
///
/// `world_ref` is the shared cell both interpreter runs write through; a
/// painting context may sample it concurrently. `on_progress` is invoked at
/// roughly [`REPAINT_INTERVAL`]s.
///
/// Returns the coverage [`Verdict`] on success, or the first failure as a
/// [`Diagnostic`] positioned at the candidate's current instruction.
pub fn check(
    candidate: &Program,
    goal: &Program,
    problem: &Problem,
    world_ref: &WorldRef,
    on_progress: impl FnMut(),
) -> Result<Verdict, Diagnostic> {
    check_with_budget(candidate, goal, problem, world_ref, on_progress, CHECK_BUDGET)
}

/// [`check`] with an explicit time budget. Tests use this to exercise the
/// budget boundary without waiting out the default two seconds.
pub fn check_with_budget(
    candidate: &Program,
    goal: &Program,
    problem: &Problem,
    world_ref: &WorldRef,
    mut on_progress: impl FnMut(),
    budget: Duration,
) -> Result<Verdict, Diagnostic> {
    let start = Instant::now();
    let mut next_repaint = REPAINT_INTERVAL;
    let mut checked: u64 = 0;

    for initial in problem.worlds() {
        lockstep::check_one_world(candidate, goal, problem.check_after(), world_ref, &initial)?;
        checked += 1;

        let elapsed = start.elapsed();
        if elapsed >= budget {
            return Ok(Verdict::Sampled {
                checked,
                total: problem.num_worlds(),
            });
        } else if elapsed >= next_repaint {
            on_progress();
            next_repaint += REPAINT_INTERVAL;
        }
    }

    // A finite supply ran dry before the budget did.
    Ok(Verdict::AllWorlds {
        total: problem.num_worlds().unwrap_or(checked),
    })
}
