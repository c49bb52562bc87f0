//! Stack values for the Rover virtual machine.
//!
//! Exactly three kinds of value live on the stack. Data values (truth
//! values and loop counters) are small; return addresses start at the
//! reserved entry offset 256, which keeps the two visually distinguishable
//! when the stack is rendered.

use std::fmt;

/// A value on the machine stack.
///
/// Every pop site matches exhaustively on the variant it expects; finding a
/// different one is a programmer error in the code generator and the
/// machine fails loudly rather than coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackValue {
    /// A truth value produced by a sensor, literal, or boolean operation.
    Bool(bool),
    /// Remaining iterations of a bounded loop, always at least 1 while on
    /// the stack.
    LoopCounter(u16),
    /// A saved program counter pushed by CALL.
    ReturnAddress(usize),
}

impl StackValue {
    /// Human-readable variant name, used in fatal stack-discipline reports.
    pub fn kind(&self) -> &'static str {
        match self {
            StackValue::Bool(_) => "truth value",
            StackValue::LoopCounter(_) => "loop counter",
            StackValue::ReturnAddress(_) => "return address",
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Bool(false) => f.write_str("false"),
            StackValue::Bool(true) => f.write_str("true"),
            StackValue::LoopCounter(count) => write!(f, "{count}"),
            StackValue::ReturnAddress(address) => write!(f, "{address:#05x}"),
        }
    }
}
