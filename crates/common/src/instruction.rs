//! The Rover instruction: a category, a 12-bit payload, and a source position.
//!
//! Instructions pack into a 16-bit word for display and encoding tests:
//! ```text
//! Bits 15-12: category nibble
//! Bits 11-0:  operation selector (NORM) or target/literal (all others)
//! ```
//! The source position travels alongside the word; it is not encoded.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::category::Category;
use crate::error::DecodeError;
use crate::opcode::Opcode;

/// Payloads are 12 bits; no address or literal may exceed this.
pub const MAX_TARGET: u16 = 0x0FFF;

fn address(target: usize) -> u16 {
    assert!(
        target <= MAX_TARGET as usize,
        "address {target:#x} exceeds 12 bits"
    );
    target as u16
}

/// A single Rover instruction.
///
/// Semantically immutable. The two branch-coverage flags are the one
/// exception: instrumented branches record on the instruction itself which
/// side executed. The flags are atomic so a program can be shared with a
/// concurrently painting observer; they never influence control flow and are
/// ignored by [`PartialEq`] and [`Clone`] keeps their current value.
pub struct Instruction {
    category: Category,
    /// Operation selector, meaningful only for [`Category::Norm`]. Kept raw
    /// so the trusted code generator may emit selectors the dispatcher will
    /// reject loudly.
    bytecode: u16,
    /// Jump/call address, or the literal to push for [`Category::Push`].
    target: u16,
    /// Byte offset into the source text, starting at 1. Zero marks a
    /// compiler-synthesized instruction, which the debugger never pauses on.
    position: usize,
    branch_taken: AtomicBool,
    branch_skipped: AtomicBool,
}

impl Instruction {
    fn with_parts(category: Category, bytecode: u16, target: u16, position: usize) -> Self {
        assert!(bytecode <= MAX_TARGET, "bytecode {bytecode:#06x} exceeds 12 bits");
        assert!(target <= MAX_TARGET, "target {target:#06x} exceeds 12 bits");
        Self {
            category,
            bytecode,
            target,
            position,
            branch_taken: AtomicBool::new(false),
            branch_skipped: AtomicBool::new(false),
        }
    }

    /// A NORM instruction executing `opcode`.
    pub fn norm(opcode: Opcode, position: usize) -> Self {
        Self::with_parts(Category::Norm, opcode as u16, 0, position)
    }

    /// A PUSH instruction: 0 pushes false, 1 pushes true, any other literal
    /// seeds a loop counter.
    pub fn push(literal: u16, position: usize) -> Self {
        Self::with_parts(Category::Push, 0, literal, position)
    }

    /// A LOOP instruction branching back to `target` while iterations remain.
    pub fn loop_back(target: usize, position: usize) -> Self {
        Self::with_parts(Category::Loop, 0, address(target), position)
    }

    /// A CALL instruction.
    pub fn call(target: usize, position: usize) -> Self {
        Self::with_parts(Category::Call, 0, address(target), position)
    }

    /// An unconditional JUMP. Jumps are compiler-synthesized and carry no
    /// source position unless one is supplied via [`Instruction::branch`].
    pub fn jump(target: usize) -> Self {
        Self::with_parts(Category::Jump, 0, address(target), 0)
    }

    /// A branch of the given category (JUMP/ELSE/THEN and the instrumented
    /// variants) to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `category` does not take an address payload.
    pub fn branch(category: Category, target: usize, position: usize) -> Self {
        assert!(
            category.takes_address(),
            "{} does not take a branch target",
            category.mnemonic()
        );
        Self::with_parts(category, 0, address(target), position)
    }

    /// The padding filler below the entry point. Executing it is a fatal
    /// internal error, which is exactly the point.
    pub fn illegal() -> Self {
        Self::with_parts(Category::Norm, MAX_TARGET, 0, 0)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Raw operation selector. Only meaningful when the category is
    /// [`Category::Norm`]; decode with [`Opcode::try_from`] at dispatch.
    pub fn bytecode(&self) -> u16 {
        self.bytecode
    }

    /// Jump/call address or push literal, depending on the category.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// Source offset for diagnostics. Zero for synthesized instructions.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether a stepping debugger stops when this instruction is current.
    /// Synthesized instructions (position 0) are fast-forwarded through.
    pub fn should_pause(&self) -> bool {
        self.position != 0
    }

    /// True for NORM/RETURN, the procedure-exit instruction.
    pub fn is_return(&self) -> bool {
        self.category == Category::Norm && self.bytecode == Opcode::Return as u16
    }

    /// Pack into the 16-bit display word.
    pub fn word(&self) -> u16 {
        let payload = match self.category {
            Category::Norm => self.bytecode,
            _ => self.target,
        };
        ((self.category as u16) << 12) | payload
    }

    /// Decode a 16-bit word, attaching `position`.
    pub fn from_word(word: u16, position: usize) -> Result<Self, DecodeError> {
        let category = Category::try_from((word >> 12) as u8)?;
        let payload = word & MAX_TARGET;
        Ok(match category {
            Category::Norm => Self::with_parts(category, payload, 0, position),
            _ => Self::with_parts(category, 0, payload, position),
        })
    }

    /// Record that this instrumented branch was taken.
    pub fn mark_branch_taken(&self) {
        self.branch_taken.store(true, Ordering::Relaxed);
    }

    /// Record that this instrumented branch fell through.
    pub fn mark_branch_skipped(&self) {
        self.branch_skipped.store(true, Ordering::Relaxed);
    }

    pub fn branch_taken(&self) -> bool {
        self.branch_taken.load(Ordering::Relaxed)
    }

    pub fn branch_skipped(&self) -> bool {
        self.branch_skipped.load(Ordering::Relaxed)
    }

    /// Clear both coverage flags, for a fresh run over the same program.
    pub fn reset_coverage(&self) {
        self.branch_taken.store(false, Ordering::Relaxed);
        self.branch_skipped.store(false, Ordering::Relaxed);
    }
}

impl Clone for Instruction {
    fn clone(&self) -> Self {
        Self {
            category: self.category,
            bytecode: self.bytecode,
            target: self.target,
            position: self.position,
            branch_taken: AtomicBool::new(self.branch_taken()),
            branch_skipped: AtomicBool::new(self.branch_skipped()),
        }
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.bytecode == other.bytecode
            && self.target == other.target
            && self.position == other.position
    }
}

impl Eq for Instruction {}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("category", &self.category)
            .field("bytecode", &self.bytecode)
            .field("target", &self.target)
            .field("position", &self.position)
            .finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Category::Norm => match Opcode::try_from(self.bytecode) {
                Ok(opcode) => f.write_str(opcode.mnemonic()),
                Err(_) => write!(f, "NORM {:#05x}", self.bytecode),
            },
            Category::Push => write!(f, "PUSH {}", self.target),
            category => write!(f, "{} {}", category.mnemonic(), self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_word_layout() {
        let instruction = Instruction::norm(Opcode::MoveForward, 7);
        assert_eq!(instruction.word(), 0x0001);
        assert_eq!(instruction.position(), 7);
    }

    #[test]
    fn push_word_layout() {
        let instruction = Instruction::push(42, 3);
        assert_eq!(instruction.word(), 0x102A);
        assert_eq!(instruction.target(), 42);
    }

    #[test]
    fn jump_word_layout() {
        let instruction = Instruction::jump(0x100);
        assert_eq!(instruction.word(), 0x4100);
        assert!(!instruction.should_pause());
    }

    #[test]
    fn word_roundtrip() {
        let original = Instruction::branch(Category::Then, 0x123, 9);
        let decoded = Instruction::from_word(original.word(), 9).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn from_word_rejects_reserved_category() {
        assert_eq!(
            Instruction::from_word(0xF000, 0),
            Err(DecodeError::ReservedCategory(0xF))
        );
    }

    #[test]
    fn illegal_filler_is_norm_with_unassigned_selector() {
        let filler = Instruction::illegal();
        assert_eq!(filler.category(), Category::Norm);
        assert!(Opcode::try_from(filler.bytecode()).is_err());
        assert!(!filler.should_pause());
    }

    #[test]
    fn is_return() {
        assert!(Instruction::norm(Opcode::Return, 1).is_return());
        assert!(!Instruction::norm(Opcode::MoveForward, 1).is_return());
        assert!(!Instruction::push(0, 1).is_return());
    }

    #[test]
    fn coverage_flags_start_clear_and_mark() {
        let instruction = Instruction::branch(Category::ThenInstrumented, 0x104, 5);
        assert!(!instruction.branch_taken());
        assert!(!instruction.branch_skipped());
        instruction.mark_branch_taken();
        assert!(instruction.branch_taken());
        assert!(!instruction.branch_skipped());
        instruction.reset_coverage();
        assert!(!instruction.branch_taken());
    }

    #[test]
    fn equality_ignores_coverage_flags() {
        let a = Instruction::branch(Category::ElseInstrumented, 0x110, 2);
        let b = Instruction::branch(Category::ElseInstrumented, 0x110, 2);
        a.mark_branch_skipped();
        assert_eq!(a, b);
    }

    #[test]
    fn clone_carries_coverage_flags() {
        let a = Instruction::branch(Category::ElseInstrumented, 0x110, 2);
        a.mark_branch_taken();
        assert!(a.clone().branch_taken());
    }

    #[test]
    fn display() {
        assert_eq!(Instruction::norm(Opcode::PickBeeper, 1).to_string(), "PICK_BEEPER");
        assert_eq!(Instruction::push(3, 1).to_string(), "PUSH 3");
        assert_eq!(Instruction::jump(256).to_string(), "JUMP 256");
        assert_eq!(Instruction::illegal().to_string(), "NORM 0xfff");
    }

    #[test]
    #[should_panic(expected = "does not take a branch target")]
    fn branch_rejects_non_address_category() {
        let _ = Instruction::branch(Category::Push, 0x100, 1);
    }
}
