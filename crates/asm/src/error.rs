//! Error types for the Rover assembler.

use thiserror::Error;

/// Errors produced while assembling text into a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    /// An unrecognized mnemonic was encountered.
    #[error("line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    /// A mnemonic is missing its operand.
    #[error("line {line}: {mnemonic} expects an operand")]
    MissingOperand { line: usize, mnemonic: String },

    /// A mnemonic that takes no operand got one.
    #[error("line {line}: {mnemonic} takes no operand")]
    UnexpectedOperand { line: usize, mnemonic: String },

    /// A numeric literal could not be parsed.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A PUSH literal does not fit in 12 bits.
    #[error("line {line}: literal {value} exceeds the 12-bit payload")]
    LiteralOutOfRange { line: usize, value: u64 },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },

    /// The same label was defined twice.
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },

    /// A branch names a label that is never defined.
    #[error("line {line}: undefined label '{label}'")]
    UndefinedLabel { line: usize, label: String },

    /// Programs must end with RETURN so execution cannot fall off the end.
    #[error("program must end with RETURN")]
    MissingFinalReturn,

    /// The program does not fit in the 12-bit address space.
    #[error("program of {len} instructions does not fit the address space")]
    ProgramTooLarge { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_mnemonic() {
        let e = AsmError::UnknownMnemonic {
            line: 3,
            token: "FLY".to_string(),
        };
        assert_eq!(e.to_string(), "line 3: unknown mnemonic 'FLY'");
    }

    #[test]
    fn display_missing_operand() {
        let e = AsmError::MissingOperand {
            line: 7,
            mnemonic: "LOOP".to_string(),
        };
        assert_eq!(e.to_string(), "line 7: LOOP expects an operand");
    }

    #[test]
    fn display_undefined_label() {
        let e = AsmError::UndefinedLabel {
            line: 2,
            label: "again".to_string(),
        };
        assert_eq!(e.to_string(), "line 2: undefined label 'again'");
    }

    #[test]
    fn display_missing_final_return() {
        assert_eq!(
            AsmError::MissingFinalReturn.to_string(),
            "program must end with RETURN"
        );
    }
}
