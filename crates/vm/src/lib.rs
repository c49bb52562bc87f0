//! Rover virtual machine — executes compiled instruction streams.
//!
//! The machine is a stack interpreter with:
//! - A tagged-value stack (truth values, loop counters, return addresses)
//! - A program counter starting at the reserved entry address
//! - Three stepping modes (step-into, step-over, step-return) and two
//!   run-to-completion modes (budgeted for learner code, unbounded for
//!   trusted goal code), all built on one single-step primitive
//!
//! # Usage
//!
//! ```
//! use rover_common::{Instruction, Opcode, Program};
//! use rover_vm::{run, Stop};
//! use rover_world::{Direction, World};
//!
//! let program = Program::with_entry_padding(vec![
//!     Instruction::norm(Opcode::MoveForward, 1),
//!     Instruction::norm(Opcode::Return, 2),
//! ])
//! .unwrap();
//!
//! let world = World::empty().with_robot(0, 9, Direction::East);
//! let finished = run(&program, world).unwrap();
//! assert_eq!(finished.x(), 1);
//! ```

pub mod error;
pub mod execute;
pub mod hooks;
pub mod machine;

pub use error::Stop;
pub use hooks::{Callbacks, WorldObserver};
pub use machine::{Machine, INSTRUCTION_BATCH, STEP_BUDGET};

use rover_common::{Diagnostic, Program};
use rover_world::{World, WorldRef};

/// Execute a program on `world` to completion and return the final world.
///
/// This is the convenience entry point for hosts that do not step or
/// observe. The run is bounded by the one-second budget; any stop other
/// than normal completion comes back as a [`Diagnostic`] positioned at the
/// instruction that was executing.
pub fn run(program: &Program, world: World) -> Result<World, Diagnostic> {
    let world_ref = WorldRef::new(world);
    let mut machine = Machine::new(program, world_ref.clone());
    match machine.execute_user_program() {
        Stop::Finished => Ok(world_ref.get()),
        stop => Err(Diagnostic::new(machine.current_position(), stop.to_string())),
    }
}
