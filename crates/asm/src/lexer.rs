//! Tokenizer for Rover assembly text.

use crate::error::AsmError;

/// A single token from an assembly line, with the byte offset of its first
/// character in the full source text. Offsets are 1-based so they can serve
/// directly as instruction positions (0 marks synthesized instructions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A bare word: mnemonic or label reference.
    Word(String),
    /// A word with a trailing colon: a label definition.
    LabelDef(String),
    /// A numeric literal (decimal or 0x hex).
    Number(u64),
}

/// Tokenize one line. `line_offset` is the 0-based byte offset of the
/// line's first character in the full source.
///
/// Returns an empty Vec for blank and comment-only lines. Comments start
/// with `;` and extend to end of line.
pub(crate) fn tokenize_line(
    line: &str,
    line_num: usize,
    line_offset: usize,
) -> Result<Vec<Token>, AsmError> {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for (start, word) in split_with_offsets(line) {
        let offset = line_offset + start + 1;
        let kind = if let Some(name) = word.strip_suffix(':') {
            TokenKind::LabelDef(name.to_string())
        } else if let Some(hex) = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")) {
            let value = u64::from_str_radix(hex, 16).map_err(|_| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?;
            TokenKind::Number(value)
        } else if word.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
            let value: u64 = word.parse().map_err(|_| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?;
            TokenKind::Number(value)
        } else {
            TokenKind::Word(word.to_string())
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

/// Like `split_whitespace`, but keeps each word's byte offset in the line.
fn split_with_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace().map(move |word| {
        // Pointer arithmetic recovers the offset; split_whitespace yields
        // subslices of `line`.
        let offset = word.as_ptr() as usize - line.as_ptr() as usize;
        (offset, word)
    })
}
