//! Parser for Rover assembly tokens.

use rover_common::{opcode::ALL_OPCODES, Category, Opcode};

use crate::error::AsmError;
use crate::lexer::{Token, TokenKind};
use rover_common::instruction::MAX_TARGET;

/// One instruction waiting for label resolution.
#[derive(Debug)]
pub(crate) struct Draft {
    pub line: usize,
    /// Byte offset of the mnemonic: the instruction's source position.
    pub position: usize,
    pub kind: DraftKind,
}

#[derive(Debug)]
pub(crate) enum DraftKind {
    Norm(Opcode),
    Push(u16),
    Branch { category: Category, target: TargetRef },
}

#[derive(Debug)]
pub(crate) enum TargetRef {
    Label(String),
    Address(u16),
}

/// Categories that appear as mnemonics with a branch-target operand.
const BRANCH_CATEGORIES: [Category; 7] = [
    Category::Loop,
    Category::Call,
    Category::Jump,
    Category::Else,
    Category::Then,
    Category::ElseInstrumented,
    Category::ThenInstrumented,
];

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES.iter().find(|op| op.mnemonic() == mnemonic).copied()
}

fn lookup_branch_category(mnemonic: &str) -> Option<Category> {
    BRANCH_CATEGORIES
        .iter()
        .find(|category| category.mnemonic() == mnemonic)
        .copied()
}

/// Parse one line of tokens into label definitions and at most one draft
/// instruction.
///
/// Mnemonics are matched case-insensitively; label names are
/// case-sensitive as written.
pub(crate) fn parse_line(
    tokens: &[Token],
    line_num: usize,
) -> Result<(Vec<String>, Option<Draft>), AsmError> {
    let mut labels = Vec::new();
    let mut rest = tokens;

    while let Some(token) = rest.first() {
        match &token.kind {
            TokenKind::LabelDef(name) => {
                labels.push(name.clone());
                rest = &rest[1..];
            }
            _ => break,
        }
    }

    let Some(head) = rest.first() else {
        return Ok((labels, None));
    };

    let word = match &head.kind {
        TokenKind::Word(word) => word,
        TokenKind::Number(n) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: n.to_string(),
            })
        }
        TokenKind::LabelDef(_) => unreachable!("label definitions consumed above"),
    };
    let mnemonic = word.to_uppercase();
    let operands = &rest[1..];

    let kind = if let Some(opcode) = lookup_opcode(&mnemonic) {
        expect_no_operand(operands, &mnemonic, line_num)?;
        DraftKind::Norm(opcode)
    } else if mnemonic == Category::Push.mnemonic() {
        let value = expect_number(operands, &mnemonic, line_num)?;
        DraftKind::Push(fit_payload(value, line_num)?)
    } else if let Some(category) = lookup_branch_category(&mnemonic) {
        let target = expect_target(operands, &mnemonic, line_num)?;
        DraftKind::Branch { category, target }
    } else {
        return Err(AsmError::UnknownMnemonic {
            line: line_num,
            token: word.clone(),
        });
    };

    Ok((
        labels,
        Some(Draft {
            line: line_num,
            position: head.offset,
            kind,
        }),
    ))
}

fn expect_no_operand(operands: &[Token], mnemonic: &str, line_num: usize) -> Result<(), AsmError> {
    match operands.first() {
        None => Ok(()),
        Some(_) => Err(AsmError::UnexpectedOperand {
            line: line_num,
            mnemonic: mnemonic.to_string(),
        }),
    }
}

fn expect_number(operands: &[Token], mnemonic: &str, line_num: usize) -> Result<u64, AsmError> {
    match operands {
        [] => Err(AsmError::MissingOperand {
            line: line_num,
            mnemonic: mnemonic.to_string(),
        }),
        [Token {
            kind: TokenKind::Number(value),
            ..
        }] => Ok(*value),
        [other, ..] => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: token_text(other),
        }),
    }
}

fn expect_target(operands: &[Token], mnemonic: &str, line_num: usize) -> Result<TargetRef, AsmError> {
    match operands {
        [] => Err(AsmError::MissingOperand {
            line: line_num,
            mnemonic: mnemonic.to_string(),
        }),
        [Token {
            kind: TokenKind::Word(label),
            ..
        }] => Ok(TargetRef::Label(label.clone())),
        [Token {
            kind: TokenKind::Number(value),
            ..
        }] => Ok(TargetRef::Address(fit_payload(*value, line_num)?)),
        [other, ..] => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: token_text(other),
        }),
    }
}

fn fit_payload(value: u64, line_num: usize) -> Result<u16, AsmError> {
    if value > MAX_TARGET as u64 {
        return Err(AsmError::LiteralOutOfRange {
            line: line_num,
            value,
        });
    }
    Ok(value as u16)
}

fn token_text(token: &Token) -> String {
    match &token.kind {
        TokenKind::Word(word) => word.clone(),
        TokenKind::LabelDef(name) => format!("{name}:"),
        TokenKind::Number(value) => value.to_string(),
    }
}
