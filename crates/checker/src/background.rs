//! Running a check off the interaction thread.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use rover_common::{Diagnostic, Program};
use rover_world::{Problem, WorldRef};

use crate::verdict::Verdict;

/// Run [`crate::check`] on a background thread.
///
/// Repaint requests arrive on `repaint` at roughly the repaint interval;
/// the host samples `world_ref` to paint and joins the handle for the final
/// verdict. A dropped receiver is harmless — repaint sends are best-effort.
pub fn check_in_background(
    candidate: Program,
    goal: Program,
    problem: Problem,
    world_ref: WorldRef,
    repaint: Sender<()>,
) -> JoinHandle<Result<Verdict, Diagnostic>> {
    thread::spawn(move || {
        crate::check(&candidate, &goal, &problem, &world_ref, || {
            let _ = repaint.send(());
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_common::{Instruction, Opcode, Program};
    use rover_world::{CheckAfter, Direction, Problem, World};
    use std::sync::mpsc;

    #[test]
    fn background_check_delivers_the_verdict() {
        let program = Program::with_entry_padding(vec![
            Instruction::norm(Opcode::MoveForward, 1),
            Instruction::norm(Opcode::Return, 2),
        ])
        .unwrap();

        let problem = Problem::exhaustive(
            "one_step",
            "",
            CheckAfter::BeeperMove,
            vec![World::empty().with_robot(0, 9, Direction::East)],
        );

        let world_ref = WorldRef::new(problem.random_world());
        let (sender, _receiver) = mpsc::channel();
        let handle =
            check_in_background(program.clone(), program, problem, world_ref, sender);

        let verdict = handle.join().unwrap().unwrap();
        assert_eq!(verdict, Verdict::AllWorlds { total: 1 });
    }
}
