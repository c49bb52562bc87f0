//! Instruction categories for the Rover bytecode.

use crate::error::DecodeError;

/// Identifies how an instruction is dispatched.
///
/// The category occupies the top nibble of the packed instruction word.
/// For [`Category::Norm`] the low 12 bits select an operation; for every
/// other category they carry a jump/call address or a literal to push.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Execute one primitive operation selected by the bytecode field.
    Norm = 0x0,
    /// Push a literal: 0 is false, 1 is true, anything else seeds a loop counter.
    Push = 0x1,
    /// Decrement the loop counter on top of stack; branch back while it stays positive.
    Loop = 0x2,
    /// Push the current program counter as a return address and jump.
    Call = 0x3,
    /// Unconditional jump.
    Jump = 0x4,
    /// Pop a truth value; branch when it is false.
    Else = 0x5,
    /// Pop a truth value; branch when it is true.
    Then = 0x6,
    /// [`Category::Else`] that also records which side was taken, for coverage display.
    ElseInstrumented = 0x7,
    /// [`Category::Then`] that also records which side was taken, for coverage display.
    ThenInstrumented = 0x8,
}

/// All valid categories, in nibble order. Useful for exhaustive testing.
pub const ALL_CATEGORIES: [Category; 9] = [
    Category::Norm,
    Category::Push,
    Category::Loop,
    Category::Call,
    Category::Jump,
    Category::Else,
    Category::Then,
    Category::ElseInstrumented,
    Category::ThenInstrumented,
];

impl TryFrom<u8> for Category {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Category::Norm),
            0x1 => Ok(Category::Push),
            0x2 => Ok(Category::Loop),
            0x3 => Ok(Category::Call),
            0x4 => Ok(Category::Jump),
            0x5 => Ok(Category::Else),
            0x6 => Ok(Category::Then),
            0x7 => Ok(Category::ElseInstrumented),
            0x8 => Ok(Category::ThenInstrumented),
            // 0x9..=0xF are reserved nibbles.
            _ => Err(DecodeError::ReservedCategory(value)),
        }
    }
}

impl Category {
    /// Returns the assembly mnemonic for this category.
    ///
    /// [`Category::Norm`] has no mnemonic of its own; its operations are
    /// named by [`crate::Opcode::mnemonic`].
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Category::Norm => "NORM",
            Category::Push => "PUSH",
            Category::Loop => "LOOP",
            Category::Call => "CALL",
            Category::Jump => "JUMP",
            Category::Else => "ELSE",
            Category::Then => "THEN",
            Category::ElseInstrumented => "ELSE_INSTRUMENTED",
            Category::ThenInstrumented => "THEN_INSTRUMENTED",
        }
    }

    /// True for the categories whose payload is a program address.
    pub fn takes_address(&self) -> bool {
        !matches!(self, Category::Norm | Category::Push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_categories_count() {
        assert_eq!(ALL_CATEGORIES.len(), 9);
    }

    #[test]
    fn roundtrip_all_valid_categories() {
        for &category in &ALL_CATEGORIES {
            let nibble = category as u8;
            let decoded = Category::try_from(nibble).unwrap();
            assert_eq!(category, decoded, "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn reserved_nibbles_rejected() {
        for nibble in 0x9..=0xFu8 {
            assert_eq!(
                Category::try_from(nibble),
                Err(DecodeError::ReservedCategory(nibble)),
                "nibble {nibble:#03x} should be reserved"
            );
        }
    }

    #[test]
    fn address_categories() {
        assert!(!Category::Norm.takes_address());
        assert!(!Category::Push.takes_address());
        assert!(Category::Jump.takes_address());
        assert!(Category::Loop.takes_address());
        assert!(Category::Call.takes_address());
        assert!(Category::Else.takes_address());
        assert!(Category::ThenInstrumented.takes_address());
    }
}
