//! Rover assembler — line-based text to instruction streams, and back.
//!
//! The assembler stands in for the surface-language compiler upstream of
//! the machine: it emits the same instruction sequences, with each
//! instruction's position pointing at its mnemonic in the source text so
//! diagnostics land on the right spot.
//!
//! # Format
//!
//! One instruction per line. `;` starts a comment. `name:` defines a label
//! at the next instruction's address; branch mnemonics take a label (or a
//! raw address) as operand. Programs must end with `RETURN`.
//!
//! ```
//! use rover_asm::assemble;
//!
//! let program = assemble(
//!     "PUSH 3\n\
//!      again: MOVE_FORWARD\n\
//!      LOOP again\n\
//!      RETURN\n",
//! )
//! .unwrap();
//! assert_eq!(program.len(), 256 + 4);
//! ```

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use disassembler::disassemble;
pub use error::AsmError;

use std::collections::HashMap;

use rover_common::{Instruction, Program, ENTRY_POINT, MAX_PROGRAM_LEN};

use lexer::tokenize_line;
use parser::{parse_line, Draft, DraftKind, TargetRef};

/// Assemble text into a program laid out from the entry point.
///
/// Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut drafts: Vec<Draft> = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();

    let mut line_offset = 0;
    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num, line_offset)?;
        let (defined, draft) = parse_line(&tokens, line_num)?;

        for name in defined {
            let address = ENTRY_POINT + drafts.len();
            if labels.insert(name.clone(), address).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line: line_num,
                    label: name,
                });
            }
        }
        if let Some(draft) = draft {
            drafts.push(draft);
        }

        line_offset += line.len() + 1;
    }

    if ENTRY_POINT + drafts.len() > MAX_PROGRAM_LEN {
        return Err(AsmError::ProgramTooLarge { len: drafts.len() });
    }
    match drafts.last() {
        Some(Draft {
            kind: DraftKind::Norm(rover_common::Opcode::Return),
            ..
        }) => {}
        _ => return Err(AsmError::MissingFinalReturn),
    }

    let mut body = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let instruction = match draft.kind {
            DraftKind::Norm(opcode) => Instruction::norm(opcode, draft.position),
            DraftKind::Push(literal) => Instruction::push(literal, draft.position),
            DraftKind::Branch { category, target } => {
                let address = match target {
                    TargetRef::Address(address) => address as usize,
                    TargetRef::Label(name) => {
                        *labels.get(&name).ok_or(AsmError::UndefinedLabel {
                            line: draft.line,
                            label: name.clone(),
                        })?
                    }
                };
                Instruction::branch(category, address, draft.position)
            }
        };
        body.push(instruction);
    }

    // The size was checked above, so the padding cannot fail.
    Ok(Program::with_entry_padding(body).expect("program size already checked"))
}
