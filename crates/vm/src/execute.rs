//! Instruction dispatch and the execution modes built on it.

use std::time::Instant;

use rover_common::{Category, Instruction, Opcode, StackValue};

use crate::error::Stop;
use crate::machine::{Machine, INSTRUCTION_BATCH};

impl Machine<'_> {
    /// Execute exactly one instruction.
    ///
    /// `Ok(())` means the machine is still running. Any [`Stop`] — normal
    /// completion included — comes back as the `Err` variant so the `?`
    /// operator unwinds the stepping loops; callers match on the reason.
    ///
    /// # Panics
    ///
    /// Illegal opcodes and stack-discipline violations are code-generator
    /// bugs and panic immediately.
    pub fn execute_one(&mut self) -> Result<(), Stop> {
        let program = self.program;
        let instruction = &program[self.pc];
        match instruction.category() {
            Category::Norm => self.execute_basic(instruction),

            Category::Push => {
                self.push(decode_literal(instruction.target()));
                self.pc += 1;
                Ok(())
            }

            Category::Loop => {
                let remaining = self.pop_loop_counter() - 1;
                if remaining > 0 {
                    self.push(StackValue::LoopCounter(remaining));
                    self.pc = instruction.target() as usize;
                } else {
                    self.pc += 1;
                }
                Ok(())
            }

            Category::Call => {
                let target = instruction.target() as usize;
                self.notify_call(instruction.position(), self.return_position(target));
                let return_address = StackValue::ReturnAddress(self.pc);
                self.push(return_address);
                self.call_depth += 1;
                self.pc = target;
                Ok(())
            }

            Category::Jump => {
                self.pc = instruction.target() as usize;
                Ok(())
            }

            Category::Else => {
                let condition = self.pop_bool();
                self.pc = if !condition {
                    instruction.target() as usize
                } else {
                    self.pc + 1
                };
                Ok(())
            }

            Category::Then => {
                let condition = self.pop_bool();
                self.pc = if condition {
                    instruction.target() as usize
                } else {
                    self.pc + 1
                };
                Ok(())
            }

            Category::ElseInstrumented => {
                if !self.pop_bool() {
                    self.pc = instruction.target() as usize;
                    instruction.mark_branch_taken();
                } else {
                    self.pc += 1;
                    instruction.mark_branch_skipped();
                }
                Ok(())
            }

            Category::ThenInstrumented => {
                if self.pop_bool() {
                    self.pc = instruction.target() as usize;
                    instruction.mark_branch_taken();
                } else {
                    self.pc += 1;
                    instruction.mark_branch_skipped();
                }
                Ok(())
            }
        }
    }

    fn execute_basic(&mut self, instruction: &Instruction) -> Result<(), Stop> {
        let opcode = Opcode::try_from(instruction.bytecode()).unwrap_or_else(|_| {
            panic!(
                "illegal bytecode {:#05x} at address {:#05x}",
                instruction.bytecode(),
                self.pc
            )
        });

        match opcode {
            Opcode::Return => {
                self.notify_return();
                match self.stack.pop() {
                    None => return Err(Stop::Finished),
                    Some(StackValue::ReturnAddress(address)) => {
                        self.pc = address;
                        self.call_depth -= 1;
                    }
                    Some(other) => {
                        panic!("expected a return address on the stack, found {}", other.kind())
                    }
                }
            }

            Opcode::MoveForward => {
                let world = self.world.move_forward()?;
                self.observe_move(&world)?;
            }
            Opcode::TurnLeft => {
                self.world.turn_left();
            }
            Opcode::TurnAround => {
                self.world.turn_around();
            }
            Opcode::TurnRight => {
                self.world.turn_right();
            }
            Opcode::PickBeeper => {
                let world = self.world.pick_beeper()?;
                self.observe_beeper(&world)?;
            }
            Opcode::DropBeeper => {
                let world = self.world.drop_beeper()?;
                self.observe_beeper(&world)?;
            }

            Opcode::OnBeeper => {
                let sensed = self.world.get().on_beeper();
                self.push_bool(sensed);
            }
            Opcode::BeeperAhead => {
                let sensed = self.world.get().beeper_ahead();
                self.push_bool(sensed);
            }
            Opcode::LeftIsClear => {
                let sensed = self.world.get().left_is_clear();
                self.push_bool(sensed);
            }
            Opcode::FrontIsClear => {
                let sensed = self.world.get().front_is_clear();
                self.push_bool(sensed);
            }
            Opcode::RightIsClear => {
                let sensed = self.world.get().right_is_clear();
                self.push_bool(sensed);
            }

            Opcode::Not => {
                let a = self.pop_bool();
                self.push_bool(!a);
            }
            Opcode::And => {
                let a = self.pop_bool();
                let b = self.pop_bool();
                self.push_bool(a & b);
            }
            Opcode::Or => {
                let a = self.pop_bool();
                let b = self.pop_bool();
                self.push_bool(a | b);
            }
            Opcode::Xor => {
                let a = self.pop_bool();
                let b = self.pop_bool();
                self.push_bool(a ^ b);
            }
        }
        self.pc += 1;
        Ok(())
    }

    /// Run until the next pausable instruction is current, execute exactly
    /// that one, then run until the following pause point.
    ///
    /// With `machine_visible` set, the fast-forwarding is suppressed and
    /// exactly one instruction executes — the "true single step" a bytecode
    /// panel wants.
    pub fn step_into(&mut self, machine_visible: bool) -> Result<(), Stop> {
        self.execute_unpaused(machine_visible)?;
        self.execute_one()?;
        self.execute_unpaused(machine_visible)
    }

    fn execute_unpaused(&mut self, machine_visible: bool) -> Result<(), Stop> {
        if !machine_visible {
            while !self.current_instruction().should_pause() {
                self.execute_one()?;
            }
        }
        Ok(())
    }

    /// One step that treats a call as a single unit: steps once, then runs
    /// until the call depth is back to where it started, bounded by the
    /// step budget.
    pub fn step_over(&mut self) -> Result<(), Stop> {
        let depth = self.call_depth;
        self.step_until(depth)
    }

    /// Run until the current procedure returns, bounded by the step budget.
    pub fn step_return(&mut self) -> Result<(), Stop> {
        let depth = self.call_depth;
        self.step_until(depth - 1)
    }

    fn step_until(&mut self, target_depth: i32) -> Result<(), Stop> {
        let start = Instant::now();
        self.step_into(false)?;
        while self.call_depth > target_depth && start.elapsed() < self.step_budget {
            self.execute_one()?;
        }
        if self.call_depth > target_depth {
            self.notify_infinite_loop();
            return Err(Stop::InfiniteLoop);
        }
        Ok(())
    }

    /// Run a learner's program to completion, re-checking the wall clock
    /// after every instruction batch. Exhausting the budget reports an
    /// infinite loop — a heuristic, not a proof.
    pub fn execute_user_program(&mut self) -> Stop {
        let start = Instant::now();
        while start.elapsed() < self.step_budget {
            for _ in 0..INSTRUCTION_BATCH {
                if let Err(stop) = self.execute_one() {
                    return stop;
                }
            }
        }
        self.notify_infinite_loop();
        Stop::InfiniteLoop
    }

    /// Run a trusted goal program until it stops on its own. No timeout:
    /// goal programs are reference programs, not learner code.
    pub fn execute_goal_program(&mut self) -> Stop {
        loop {
            if let Err(stop) = self.execute_one() {
                return stop;
            }
        }
    }
}

/// PUSH literal decoding: 0 is false, 1 is true, anything else seeds a
/// loop counter.
fn decode_literal(literal: u16) -> StackValue {
    match literal {
        0 => StackValue::Bool(false),
        1 => StackValue::Bool(true),
        count => StackValue::LoopCounter(count),
    }
}
