//! One world, two programs: build the goal trace, replay the candidate
//! against it.

use rover_common::{Diagnostic, Program};
use rover_vm::{Machine, Stop};
use rover_world::{CheckAfter, World, WorldRef};

use crate::error::GoalMismatch;
use crate::trace::{TraceComparer, TraceRecorder};

/// Check the candidate against the goal on one initial world.
///
/// Any failure carries the position of the candidate's currently executing
/// instruction.
pub(crate) fn check_one_world(
    candidate: &Program,
    goal: &Program,
    check_after: CheckAfter,
    world_ref: &WorldRef,
    initial: &World,
) -> Result<(), Diagnostic> {
    let goal_trace = goal_worlds(goal, check_after, world_ref, initial)?;

    world_ref.set(initial.clone());
    let mut comparer = TraceComparer::new(check_after, goal_trace);
    let mut machine = Machine::new(candidate, world_ref.clone()).with_observer(&mut comparer);
    let stop = machine.execute_user_program();
    let position = machine.current_position();
    drop(machine);

    match stop {
        Stop::Finished => {
            if check_after == CheckAfter::Finish {
                match comparer.take_next() {
                    Some(expected) if expected.equals_ignoring_direction(&world_ref.get()) => {}
                    _ => return Err(Diagnostic::new(position, GoalMismatch::Fails.to_string())),
                }
            }
        }
        // Veto messages are the comparer's own mismatch wording.
        Stop::Vetoed { message } => return Err(Diagnostic::new(position, message)),
        Stop::InfiniteLoop => {
            return Err(Diagnostic::new(position, Stop::InfiniteLoop.to_string()))
        }
        Stop::World(error) => return Err(Diagnostic::new(position, error.to_string())),
    }

    if !comparer.is_exhausted() {
        return Err(Diagnostic::new(position, GoalMismatch::FallsShort.to_string()));
    }
    Ok(())
}

/// Run the goal program on `initial` and collect its world trace under the
/// active policy, plus the final world when only finish states compare.
fn goal_worlds(
    goal: &Program,
    check_after: CheckAfter,
    world_ref: &WorldRef,
    initial: &World,
) -> Result<Vec<World>, Diagnostic> {
    world_ref.set(initial.clone());
    let mut recorder = TraceRecorder::new(check_after);
    let mut machine = Machine::new(goal, world_ref.clone()).with_observer(&mut recorder);
    let stop = machine.execute_goal_program();
    let position = machine.current_position();
    drop(machine);

    match stop {
        Stop::Finished => {
            if check_after == CheckAfter::Finish {
                recorder.push_final(world_ref.get());
            }
            Ok(recorder.into_worlds())
        }
        // A goal program that fails its own world is a malformed reference
        // program; report it rather than blame the candidate.
        other => Err(Diagnostic::new(position, other.to_string())),
    }
}
