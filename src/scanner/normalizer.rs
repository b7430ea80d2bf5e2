//! Lexical normalization
//!
//! Turns raw source text into a buffer that a whitespace-only tokenizer can
//! split into one token per meaningful symbol:
//!
//! 1. [`strip_comments`](super::comments::strip_comments): blank out comments
//! 2. [`mask_literals`](super::literals::mask_literals): hide literal contents
//! 3. [`remove_attributes`]: delete `[[ ... ]]` attribute lists
//! 4. [`pad_symbols`]: surround structural punctuation with spaces
//! 5. [`collapse_spaces`]: squeeze runs of horizontal whitespace
//!
//! No stage removes a newline, so every character keeps its source line.

use super::comments::strip_comments;
use super::literals::{
    literal_mask, mask_literals, restore_literals, RemovedLiterals,
};
use crate::errors::{Result, ScanError};
use log::trace;

/// Characters that always become standalone tokens
const PADDED_SYMBOLS: [char; 12] =
    [';', '{', '}', '=', '*', '&', ',', '[', ']', '(', ')', ':'];

/// Operators copied through untouched even though they contain padded symbols
const PROTECTED_OPERATORS: [&str; 6] = ["::", "==", "!=", "<=", ">=", "&&"];

/// Normalized text plus the literal contents needed to undo the masking
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    pub text: String,
    pub literals: RemovedLiterals,
}

impl NormalizedSource {
    /// Replays the masked literal contents back into the normalized text
    pub fn restore(&self) -> Result<String> {
        restore_literals(&self.text, &self.literals)
    }
}

/// Runs every normalization stage over `source`
pub fn normalize(source: &str) -> Result<NormalizedSource> {
    let stripped = strip_comments(source);
    let (masked, mut literals) = mask_literals(&stripped);
    trace!("masked {} literal characters", literals.len());

    let without_attributes = remove_attributes(&masked, &mut literals)?;
    let padded = pad_symbols(&without_attributes);
    let text = collapse_spaces(&padded);

    Ok(NormalizedSource { text, literals })
}

/// Deletes every minimal `[[ ... ]]` span outside literals
///
/// Newlines inside a deleted span are kept. Masked literal characters inside
/// a deleted span are dropped from `literals` so the replay stays aligned.
pub fn remove_attributes(
    masked: &str,
    literals: &mut RemovedLiterals,
) -> Result<String> {
    let chars: Vec<char> = masked.chars().collect();
    let inside = literal_mask(&chars);
    let pair_at = |i: usize, ch: char| {
        i + 1 < chars.len()
            && chars[i] == ch
            && chars[i + 1] == ch
            && !inside[i]
            && !inside[i + 1]
    };

    let mut out = String::with_capacity(masked.len());
    let mut dropped = Vec::new();
    let mut replay_position = 0;
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        if pair_at(i, '[') {
            let close = (i + 2..chars.len())
                .find(|&j| pair_at(j, ']'))
                .ok_or(ScanError::UnmatchedAttribute { line })?;

            for j in i..close + 2 {
                if inside[j] {
                    dropped.push(replay_position);
                    replay_position += 1;
                } else if chars[j] == '\n' {
                    out.push('\n');
                    line += 1;
                }
            }
            i = close + 2;
            continue;
        }

        if inside[i] {
            replay_position += 1;
        }
        if chars[i] == '\n' {
            line += 1;
        }
        out.push(chars[i]);
        i += 1;
    }

    literals.remove_positions(&dropped);
    Ok(out)
}

/// Surrounds every padded symbol with a single space on each side
pub fn pad_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let protected = PROTECTED_OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op));
        if let Some(op) = protected {
            out.push_str(op);
            rest = &rest[op.len()..];
            continue;
        }

        if PADDED_SYMBOLS.contains(&ch) {
            out.push(' ');
            out.push(ch);
            out.push(' ');
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Collapses runs of spaces, tabs and carriage returns into one space
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for ch in text.chars() {
        if matches!(ch, ' ' | '\t' | '\r') {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }

    out
}
