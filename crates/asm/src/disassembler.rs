//! Disassembler: program → canonical assembly text.

use std::collections::BTreeSet;

use rover_common::{Category, Opcode, Program, ENTRY_POINT};

/// Disassemble a program into canonical assembly text.
///
/// Branch targets become generated `L<address>` labels. The entry padding
/// is not emitted. Reassembling the output reproduces the same instruction
/// words (source positions differ, they point into the new text).
pub fn disassemble(program: &Program) -> String {
    let targets: BTreeSet<usize> = (ENTRY_POINT..program.len())
        .filter_map(|address| {
            let instruction = &program[address];
            instruction
                .category()
                .takes_address()
                .then(|| instruction.target() as usize)
        })
        .collect();

    let mut text = String::new();
    for address in ENTRY_POINT..program.len() {
        if targets.contains(&address) {
            text.push_str(&format!("L{address}:\n"));
        }
        let instruction = &program[address];
        let line = match instruction.category() {
            Category::Norm => match Opcode::try_from(instruction.bytecode()) {
                Ok(opcode) => opcode.mnemonic().to_string(),
                // Unassigned selectors have no mnemonic; emit the raw word
                // so the text still documents what is there.
                Err(_) => format!("; unassigned {:#06x}", instruction.word()),
            },
            Category::Push => format!("PUSH {}", instruction.target()),
            category => format!("{} L{}", category.mnemonic(), instruction.target()),
        };
        text.push_str("    ");
        text.push_str(&line);
        text.push('\n');
    }
    text
}
