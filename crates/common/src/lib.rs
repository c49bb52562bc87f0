//! Rover common types and instruction encoding.
//!
//! This crate provides the foundational data structures for the Rover
//! bytecode:
//!
//! - [`Category`] — the nine instruction categories
//! - [`Opcode`] — the sixteen NORM operation selectors
//! - [`Instruction`] — category + payload + source position, with the
//!   packed 16-bit display word and the instrumented-branch coverage flags
//! - [`StackValue`] — the closed set of values on the machine stack
//! - [`Program`] — an instruction sequence with the reserved entry layout
//! - [`Diagnostic`] — the position-tagged message crossing the core boundary
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod category;
pub mod diagnostic;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use category::Category;
pub use diagnostic::Diagnostic;
pub use error::{DecodeError, ProgramError};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::{Program, ENTRY_POINT, MAX_PROGRAM_LEN};
pub use value::StackValue;

#[cfg(test)]
mod proptests {
    use super::*;
    use instruction::MAX_TARGET;
    use proptest::prelude::*;

    /// Strategy that generates a random valid Category.
    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(&category::ALL_CATEGORIES[..])
    }

    /// Strategy that generates a random valid Opcode.
    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    /// Strategy that generates a random valid Instruction.
    fn arb_instruction() -> impl Strategy<Value = Instruction> {
        (arb_category(), arb_opcode(), 0..=MAX_TARGET, 1usize..10_000).prop_map(
            |(category, opcode, payload, position)| match category {
                Category::Norm => Instruction::norm(opcode, position),
                Category::Push => Instruction::push(payload, position),
                _ => Instruction::branch(category, payload as usize, position),
            },
        )
    }

    proptest! {
        /// For all valid instructions, packing then decoding the word
        /// reproduces the semantic fields.
        #[test]
        fn word_roundtrip(instruction in arb_instruction()) {
            let decoded = Instruction::from_word(instruction.word(), instruction.position()).unwrap();
            prop_assert_eq!(instruction, decoded);
        }

        /// For any 16-bit word, decoding either succeeds (and re-packs
        /// identically) or reports a reserved category.
        #[test]
        fn random_words_decode(word in any::<u16>()) {
            match Instruction::from_word(word, 1) {
                Ok(instruction) => prop_assert_eq!(instruction.word(), word),
                Err(DecodeError::ReservedCategory(nibble)) => {
                    prop_assert!(nibble > Category::ThenInstrumented as u8)
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }

        /// PUSH literal decoding matches the documented mapping.
        #[test]
        fn push_literal_mapping(literal in 0..=MAX_TARGET) {
            let instruction = Instruction::push(literal, 1);
            prop_assert_eq!(instruction.category(), Category::Push);
            prop_assert_eq!(instruction.target(), literal);
        }
    }
}
