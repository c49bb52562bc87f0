//! Machine state: program counter, stack, call depth, observers.

use std::time::Duration;

use rover_common::{Instruction, Program, StackValue, ENTRY_POINT};
use rover_world::{World, WorldRef};

use crate::error::Stop;
use crate::hooks::{Callbacks, WorldObserver};

/// If step-over, step-return, or a full user-program run does not finish
/// within one second, we assume the code contains an infinite loop.
pub const STEP_BUDGET: Duration = Duration::from_secs(1);

/// A user-program run re-checks the clock after every batch of this many
/// instructions.
pub const INSTRUCTION_BATCH: usize = 1000;

/// The Rover virtual machine.
///
/// Holds all execution state in plain fields: stopping it is simply not
/// calling it again. Exactly one thread drives a machine at a time; the
/// world travels through the shared [`WorldRef`] so painting contexts can
/// sample it concurrently.
pub struct Machine<'a> {
    pub(crate) program: &'a Program,
    pub(crate) world: WorldRef,
    pub(crate) pc: usize,
    pub(crate) stack: Vec<StackValue>,
    pub(crate) call_depth: i32,
    /// Per address, the source position of the nearest RETURN at or after
    /// it. Lets `on_call` report call/return pairs without rescanning.
    return_positions: Vec<usize>,
    pub(crate) step_budget: Duration,
    pub(crate) callbacks: Option<&'a mut dyn Callbacks>,
    pub(crate) observer: Option<&'a mut dyn WorldObserver>,
}

impl<'a> Machine<'a> {
    /// Create a machine over `program` with the program counter at the
    /// entry point. Callbacks and observer default to no-ops.
    pub fn new(program: &'a Program, world: WorldRef) -> Self {
        let return_positions = build_return_positions(program);
        Self {
            program,
            world,
            pc: ENTRY_POINT,
            stack: Vec::new(),
            call_depth: 0,
            return_positions,
            step_budget: STEP_BUDGET,
            callbacks: None,
            observer: None,
        }
    }

    /// Attach call/return/infinite-loop callbacks.
    pub fn with_callbacks(mut self, callbacks: &'a mut dyn Callbacks) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Attach a world observer.
    pub fn with_observer(mut self, observer: &'a mut dyn WorldObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Override the one-second step budget. Tests use this to exercise the
    /// infinite-loop heuristic without waiting out the default.
    pub fn with_step_budget(mut self, budget: Duration) -> Self {
        self.step_budget = budget;
        self
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn current_instruction(&self) -> &Instruction {
        &self.program[self.pc]
    }

    /// Source position of the current instruction, for diagnostics.
    pub fn current_position(&self) -> usize {
        self.current_instruction().position()
    }

    pub fn stack(&self) -> &[StackValue] {
        &self.stack
    }

    pub fn call_depth(&self) -> i32 {
        self.call_depth
    }

    /// A snapshot of the current world.
    pub fn world(&self) -> World {
        self.world.get()
    }

    pub(crate) fn return_position(&self, address: usize) -> usize {
        self.return_positions[address]
    }

    pub(crate) fn push(&mut self, value: StackValue) {
        self.stack.push(value);
    }

    pub(crate) fn push_bool(&mut self, value: bool) {
        self.stack.push(StackValue::Bool(value));
    }

    /// Pop any value. Underflow here is a code-generator bug, never a user
    /// error, so it fails loudly.
    pub(crate) fn pop(&mut self) -> StackValue {
        self.stack
            .pop()
            .unwrap_or_else(|| panic!("stack underflow at address {:#05x}", self.pc))
    }

    pub(crate) fn pop_bool(&mut self) -> bool {
        match self.pop() {
            StackValue::Bool(value) => value,
            other => panic!("expected a truth value on the stack, found {}", other.kind()),
        }
    }

    pub(crate) fn pop_loop_counter(&mut self) -> u16 {
        match self.pop() {
            StackValue::LoopCounter(count) => count,
            other => panic!("expected a loop counter on the stack, found {}", other.kind()),
        }
    }

    pub(crate) fn notify_call(&mut self, caller_position: usize, callee_return_position: usize) {
        if let Some(callbacks) = self.callbacks.as_mut() {
            callbacks.on_call(caller_position, callee_return_position);
        }
    }

    pub(crate) fn notify_return(&mut self) {
        if let Some(callbacks) = self.callbacks.as_mut() {
            callbacks.on_return();
        }
    }

    pub(crate) fn notify_infinite_loop(&mut self) {
        if let Some(callbacks) = self.callbacks.as_mut() {
            callbacks.on_infinite_loop();
        }
    }

    pub(crate) fn observe_move(&mut self, world: &World) -> Result<(), Stop> {
        match self.observer.as_mut() {
            Some(observer) => observer
                .after_move(world)
                .map_err(|message| Stop::Vetoed { message }),
            None => Ok(()),
        }
    }

    pub(crate) fn observe_beeper(&mut self, world: &World) -> Result<(), Stop> {
        match self.observer.as_mut() {
            Some(observer) => observer
                .after_beeper(world)
                .map_err(|message| Stop::Vetoed { message }),
            None => Ok(()),
        }
    }
}

/// Scan from the last address down to the entry point, propagating the
/// nearest RETURN position backwards.
fn build_return_positions(program: &Program) -> Vec<usize> {
    let mut table = vec![0; program.len()];
    let mut nearest = 0;
    for address in (ENTRY_POINT..program.len()).rev() {
        let instruction = &program[address];
        if instruction.is_return() {
            nearest = instruction.position();
        }
        table[address] = nearest;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_common::{Instruction, Opcode};

    fn program(body: Vec<Instruction>) -> Program {
        Program::with_entry_padding(body).unwrap()
    }

    #[test]
    fn return_positions_propagate_backwards() {
        // main: CALL sub; RETURN@9   sub: MOVE@20; RETURN@21
        let p = program(vec![
            Instruction::call(ENTRY_POINT + 2, 5),
            Instruction::norm(Opcode::Return, 9),
            Instruction::norm(Opcode::MoveForward, 20),
            Instruction::norm(Opcode::Return, 21),
        ]);
        let machine = Machine::new(&p, WorldRef::new(rover_world::World::empty()));
        assert_eq!(machine.return_position(ENTRY_POINT), 9);
        assert_eq!(machine.return_position(ENTRY_POINT + 1), 9);
        assert_eq!(machine.return_position(ENTRY_POINT + 2), 21);
        assert_eq!(machine.return_position(ENTRY_POINT + 3), 21);
    }

    #[test]
    fn machine_starts_at_the_entry_point() {
        let p = program(vec![Instruction::norm(Opcode::Return, 1)]);
        let machine = Machine::new(&p, WorldRef::new(rover_world::World::empty()));
        assert_eq!(machine.pc(), ENTRY_POINT);
        assert_eq!(machine.call_depth(), 0);
        assert!(machine.stack().is_empty());
    }

    #[test]
    #[should_panic(expected = "stack underflow")]
    fn pop_on_empty_stack_is_fatal() {
        let p = program(vec![Instruction::norm(Opcode::Return, 1)]);
        let mut machine = Machine::new(&p, WorldRef::new(rover_world::World::empty()));
        let _ = machine.pop();
    }

    #[test]
    #[should_panic(expected = "expected a truth value")]
    fn pop_bool_rejects_loop_counter() {
        let p = program(vec![Instruction::norm(Opcode::Return, 1)]);
        let mut machine = Machine::new(&p, WorldRef::new(rover_world::World::empty()));
        machine.push(StackValue::LoopCounter(3));
        let _ = machine.pop_bool();
    }

    #[test]
    #[should_panic(expected = "expected a loop counter")]
    fn pop_loop_counter_rejects_bool() {
        let p = program(vec![Instruction::norm(Opcode::Return, 1)]);
        let mut machine = Machine::new(&p, WorldRef::new(rover_world::World::empty()));
        machine.push_bool(true);
        let _ = machine.pop_loop_counter();
    }
}
